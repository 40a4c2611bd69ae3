//! Core data model for Cashier Chaos: play-state types, session outcomes,
//! reports, and the lifecycle phase machine driven by the game view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use yew::Reducible;

// ---------------- Cash drawer & play state -----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Denomination {
    Penny,
    Nickel,
    Dime,
    Quarter,
    One,
    Five,
    Ten,
    Twenty,
}

impl Denomination {
    pub const ALL: [Denomination; 8] = [
        Denomination::Penny,
        Denomination::Nickel,
        Denomination::Dime,
        Denomination::Quarter,
        Denomination::One,
        Denomination::Five,
        Denomination::Ten,
        Denomination::Twenty,
    ];

    pub fn cents(self) -> u64 {
        match self {
            Denomination::Penny => 1,
            Denomination::Nickel => 5,
            Denomination::Dime => 10,
            Denomination::Quarter => 25,
            Denomination::One => 100,
            Denomination::Five => 500,
            Denomination::Ten => 1000,
            Denomination::Twenty => 2000,
        }
    }
}

/// Per-denomination counts, indexed in `Denomination::ALL` order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashDrawer {
    counts: [u32; 8],
}

impl CashDrawer {
    /// Every slot empty; sessions are seeded from this.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn count(&self, denom: Denomination) -> u32 {
        self.counts[denom as usize]
    }

    pub fn add(&mut self, denom: Denomination, count: u32) {
        self.counts[denom as usize] = self.counts[denom as usize].saturating_add(count);
    }

    pub fn total_cents(&self) -> u64 {
        Denomination::ALL
            .iter()
            .map(|d| d.cents() * u64::from(self.counts[*d as usize]))
            .sum()
    }
}

/// Snapshot seeded once at session start; the engine owns all mutation
/// after that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaySnapshot {
    pub cash: CashDrawer,
    /// Index of the customer currently at the counter.
    pub customer: u32,
    pub remaining_lives: u32,
}

/// Per-level tuning read back through the session handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDetails {
    pub lives: u32,
    /// Customers served before the shift ends.
    pub customers: u32,
}

// ---------------- Session outcome & report -----------------

/// Terminal result of one session. Losing a shift is an outcome, not an
/// error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Success,
    Failure(FailureReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    OutOfLives,
    ShiftExpired,
    Abandoned,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::OutOfLives => write!(f, "you ran out of lives"),
            FailureReason::ShiftExpired => write!(f, "the shift timer expired"),
            FailureReason::Abandoned => write!(f, "the shift was abandoned"),
        }
    }
}

/// Write-once record persisted after every session end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub level: usize,
    pub result: SessionOutcome,
}

// ---------------- Lifecycle phase machine -----------------

/// Mutually exclusive UI mode, derived from the flag set below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    ShowingInstructions,
    LoadingAssets,
    GameComplete,
    Playing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifecycleState {
    /// Instructions overlay still open for this game attempt.
    pub instructions_open: bool,
    /// Assets loaded, session started, end listener registered.
    pub ready: bool,
    /// Preload failed; the loading screen is terminal until a page reload.
    pub load_failed: bool,
    pub complete: bool,
}

impl LifecycleState {
    pub fn fresh(show_instructions: bool) -> Self {
        Self {
            instructions_open: show_instructions,
            ready: false,
            load_failed: false,
            complete: false,
        }
    }

    /// Highest-priority mode wins: instructions > loading > complete > play.
    pub fn phase(&self) -> Phase {
        if self.instructions_open {
            Phase::ShowingInstructions
        } else if !self.ready {
            Phase::LoadingAssets
        } else if self.complete {
            Phase::GameComplete
        } else {
            Phase::Playing
        }
    }
}

#[derive(Clone, Debug)]
pub enum LifecycleAction {
    AssetsReady,
    AssetsFailed,
    DismissInstructions,
    SessionComplete,
    PlayAgain,
}

impl Reducible for LifecycleState {
    type Action = LifecycleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use LifecycleAction::*;
        let mut new = (*self).clone();
        match action {
            AssetsReady => {
                new.ready = true;
            }
            AssetsFailed => {
                new.load_failed = true;
            }
            DismissInstructions => {
                new.instructions_open = false;
            }
            SessionComplete => {
                new.complete = true;
            }
            PlayAgain => {
                new.complete = false;
            }
        }
        Rc::new(new)
    }
}
