//! Session handle over the game engine, plus progress and report
//! persistence. One `GameService` lives per mount cycle; a remount always
//! constructs a fresh one, so a handle is never reused after its end
//! listener has fired.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;
use yew::Callback;

use crate::model::{FailureReason, LevelDetails, PlaySnapshot, SessionOutcome, SessionReport};

const LEVEL_KEY: &str = "cc_level";
const REPORTS_KEY: &str = "cc_reports";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not create an image element for {url}")]
    ImageUnavailable { url: String },
    #[error("failed to load asset {url}")]
    Load { url: String },
}

// ---------------- Progress & report stores -----------------

/// Storage behind the session handle. Level progress and the report log
/// intentionally outlive any one mount cycle; everything here is
/// best-effort and must never block a phase transition.
pub trait ProgressStore {
    fn load_level(&self) -> Option<usize>;
    fn store_level(&self, level: usize);
    fn clear_level(&self);
    fn append_report(&self, report: &SessionReport);
}

/// Report log entry with the wall-clock time the save happened.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredReport {
    at_ms: f64,
    report: SessionReport,
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// `localStorage`-backed store used in the browser.
pub struct BrowserStore;

impl ProgressStore for BrowserStore {
    fn load_level(&self) -> Option<usize> {
        let store = local_storage()?;
        let raw = store.get_item(LEVEL_KEY).ok()??;
        raw.parse().ok()
    }

    fn store_level(&self, level: usize) {
        if let Some(store) = local_storage() {
            let _ = store.set_item(LEVEL_KEY, &level.to_string());
        }
    }

    fn clear_level(&self) {
        if let Some(store) = local_storage() {
            let _ = store.remove_item(LEVEL_KEY);
        }
    }

    fn append_report(&self, report: &SessionReport) {
        let Some(store) = local_storage() else {
            return;
        };
        let mut log: Vec<StoredReport> = store
            .get_item(REPORTS_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        log.push(StoredReport {
            at_ms: js_sys::Date::now(),
            report: report.clone(),
        });
        if let Ok(raw) = serde_json::to_string(&log) {
            let _ = store.set_item(REPORTS_KEY, &raw);
        }
    }
}

// ---------------- Session handle -----------------

pub struct GameService {
    levels: &'static [LevelDetails],
    assets: &'static [&'static str],
    store: Rc<dyn ProgressStore>,
    level: Cell<usize>,
    session_active: Cell<bool>,
    play_state: RefCell<Option<PlaySnapshot>>,
    end_listener: RefCell<Option<Callback<SessionOutcome>>>,
}

impl GameService {
    pub fn new(levels: &'static [LevelDetails], assets: &'static [&'static str]) -> Self {
        Self::with_store(levels, assets, Rc::new(BrowserStore))
    }

    pub fn with_store(
        levels: &'static [LevelDetails],
        assets: &'static [&'static str],
        store: Rc<dyn ProgressStore>,
    ) -> Self {
        debug_assert!(!levels.is_empty());
        let level = store
            .load_level()
            .unwrap_or(0)
            .min(levels.len().saturating_sub(1));
        Self {
            levels,
            assets,
            store,
            level: Cell::new(level),
            session_active: Cell::new(false),
            play_state: RefCell::new(None),
            end_listener: RefCell::new(None),
        }
    }

    /// Single-attempt asset gate: the first image that fails to load fails
    /// the whole preload, and no retry happens at this layer.
    pub async fn preload_assets(&self) -> Result<(), AssetError> {
        for url in self.assets {
            let image = HtmlImageElement::new().map_err(|_| AssetError::ImageUnavailable {
                url: (*url).to_string(),
            })?;
            image.set_src(url);
            JsFuture::from(image.decode())
                .await
                .map_err(|_| AssetError::Load {
                    url: (*url).to_string(),
                })?;
        }
        Ok(())
    }

    pub fn start_session(&self) {
        self.session_active.set(true);
    }

    /// Scoped-acquisition exit: safe to call unconditionally, in any phase,
    /// any number of times. Dropping the listener here also breaks the Rc
    /// cycle a listener capturing the handle would otherwise keep alive.
    pub fn reset_session(&self) {
        self.session_active.set(false);
        self.end_listener.borrow_mut().take();
        self.play_state.borrow_mut().take();
    }

    pub fn init_state(&self, snapshot: PlaySnapshot) {
        *self.play_state.borrow_mut() = Some(snapshot);
    }

    pub fn play_state(&self) -> Option<PlaySnapshot> {
        self.play_state.borrow().clone()
    }

    pub fn current_level(&self) -> usize {
        self.level.get()
    }

    pub fn current_level_details(&self) -> LevelDetails {
        self.levels[self.level.get()]
    }

    pub fn next_level(&self) {
        let next = (self.level.get() + 1).min(self.levels.len() - 1);
        self.level.set(next);
        self.store.store_level(next);
    }

    /// True while the current level is the last one; together with a
    /// `Success` outcome this means the whole game has been cleared.
    pub fn is_game_complete(&self) -> bool {
        self.level.get() + 1 >= self.levels.len()
    }

    /// Registers the one end listener for this handle, replacing any
    /// previous registration.
    pub fn set_session_end_listener(&self, listener: Callback<SessionOutcome>) {
        *self.end_listener.borrow_mut() = Some(listener);
    }

    /// Engine-facing terminal signal. The listener is consumed on fire, so
    /// a second call (or a call after teardown) is a no-op.
    pub fn end_session(&self, outcome: SessionOutcome) {
        if !self.session_active.get() {
            return;
        }
        self.session_active.set(false);
        let listener = self.end_listener.borrow_mut().take();
        if let Some(listener) = listener {
            listener.emit(outcome);
        }
    }

    pub fn collect_report(&self, level: usize, result: SessionOutcome) -> SessionReport {
        SessionReport { level, result }
    }

    pub fn save_report(&self, report: &SessionReport) {
        self.store.append_report(report);
    }

    /// Full-game restart support: back to the first level, forgetting the
    /// persisted cursor.
    pub fn reset_progress(&self) {
        self.level.set(0);
        self.store.clear_level();
    }
}

/// Shared ownership of the per-mount session handle. Equality is handle
/// identity, which keeps Yew props cheap to compare.
#[derive(Clone)]
pub struct SessionHandle(Rc<GameService>);

impl SessionHandle {
    pub fn new(service: GameService) -> Self {
        Self(Rc::new(service))
    }
}

impl std::ops::Deref for SessionHandle {
    type Target = GameService;

    fn deref(&self) -> &GameService {
        &self.0
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// ---------------- End-of-session reaction -----------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEndDirective {
    /// Last level cleared: show the completion screen, no remount yet.
    GameComplete,
    /// Advanced to `next`; the caller notifies and requests a remount.
    AdvanceLevel { next: usize },
    /// Level index untouched; the caller notifies and requests a remount.
    RetryLevel { reason: FailureReason },
}

/// The once-per-session reaction: persist the report, then decide what the
/// controller does next. The report always records the level the session
/// was played at, before any advance.
pub fn handle_session_end(service: &GameService, outcome: SessionOutcome) -> SessionEndDirective {
    let report = service.collect_report(service.current_level(), outcome.clone());
    service.save_report(&report);
    match outcome {
        SessionOutcome::Success => {
            if service.is_game_complete() {
                SessionEndDirective::GameComplete
            } else {
                service.next_level();
                SessionEndDirective::AdvanceLevel {
                    next: service.current_level(),
                }
            }
        }
        SessionOutcome::Failure(reason) => SessionEndDirective::RetryLevel { reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CashDrawer;

    const LEVELS: [LevelDetails; 3] = [
        LevelDetails {
            lives: 3,
            customers: 4,
        },
        LevelDetails {
            lives: 2,
            customers: 6,
        },
        LevelDetails {
            lives: 1,
            customers: 8,
        },
    ];
    const ASSETS: [&str; 1] = ["assets/img/register.png"];

    #[derive(Default)]
    struct MemoryStore {
        level: Cell<Option<usize>>,
        reports: RefCell<Vec<SessionReport>>,
    }

    impl ProgressStore for MemoryStore {
        fn load_level(&self) -> Option<usize> {
            self.level.get()
        }

        fn store_level(&self, level: usize) {
            self.level.set(Some(level));
        }

        fn clear_level(&self) {
            self.level.set(None);
        }

        fn append_report(&self, report: &SessionReport) {
            self.reports.borrow_mut().push(report.clone());
        }
    }

    fn service_with(store: Rc<MemoryStore>) -> GameService {
        GameService::with_store(&LEVELS, &ASSETS, store)
    }

    fn seeded_snapshot(service: &GameService) -> PlaySnapshot {
        PlaySnapshot {
            cash: CashDrawer::empty(),
            customer: 0,
            remaining_lives: service.current_level_details().lives,
        }
    }

    #[test]
    fn success_advances_exactly_one_level() {
        let store = Rc::new(MemoryStore::default());
        let service = service_with(store.clone());
        let directive = handle_session_end(&service, SessionOutcome::Success);
        assert_eq!(directive, SessionEndDirective::AdvanceLevel { next: 1 });
        assert_eq!(service.current_level(), 1);
        assert_eq!(store.level.get(), Some(1));
        let reports = store.reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].level, 0);
        assert_eq!(reports[0].result, SessionOutcome::Success);
    }

    #[test]
    fn failure_keeps_the_level_index() {
        let store = Rc::new(MemoryStore::default());
        let service = service_with(store.clone());
        let directive =
            handle_session_end(&service, SessionOutcome::Failure(FailureReason::OutOfLives));
        assert_eq!(
            directive,
            SessionEndDirective::RetryLevel {
                reason: FailureReason::OutOfLives
            }
        );
        assert_eq!(service.current_level(), 0);
        let reports = store.reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].level, 0);
    }

    #[test]
    fn final_level_success_declares_completion() {
        let store = Rc::new(MemoryStore::default());
        store.level.set(Some(2));
        let service = service_with(store.clone());
        let directive = handle_session_end(&service, SessionOutcome::Success);
        assert_eq!(directive, SessionEndDirective::GameComplete);
        assert_eq!(service.current_level(), 2);
        assert_eq!(store.reports.borrow().len(), 1);
    }

    #[test]
    fn mixed_outcome_sequence_tracks_levels() {
        let store = Rc::new(MemoryStore::default());
        let service = service_with(store.clone());
        handle_session_end(&service, SessionOutcome::Failure(FailureReason::OutOfLives));
        handle_session_end(&service, SessionOutcome::Success);
        handle_session_end(&service, SessionOutcome::Failure(FailureReason::ShiftExpired));
        handle_session_end(&service, SessionOutcome::Success);
        assert_eq!(service.current_level(), 2);
        let levels: Vec<usize> = store.reports.borrow().iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn listener_fires_at_most_once_per_handle() {
        let store = Rc::new(MemoryStore::default());
        let service = service_with(store);
        let hits = Rc::new(Cell::new(0));
        service.set_session_end_listener({
            let hits = hits.clone();
            Callback::from(move |_: SessionOutcome| hits.set(hits.get() + 1))
        });
        service.start_session();
        service.end_session(SessionOutcome::Success);
        service.end_session(SessionOutcome::Success);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn double_fire_cannot_double_advance_or_double_save() {
        let store = Rc::new(MemoryStore::default());
        let service = Rc::new(service_with(store.clone()));
        service.set_session_end_listener({
            let service = service.clone();
            Callback::from(move |outcome: SessionOutcome| {
                handle_session_end(&service, outcome);
            })
        });
        service.start_session();
        service.end_session(SessionOutcome::Success);
        service.end_session(SessionOutcome::Success);
        assert_eq!(service.current_level(), 1);
        assert_eq!(store.reports.borrow().len(), 1);
    }

    #[test]
    fn reset_session_silences_the_listener() {
        let store = Rc::new(MemoryStore::default());
        let service = service_with(store.clone());
        let hits = Rc::new(Cell::new(0));
        service.set_session_end_listener({
            let hits = hits.clone();
            Callback::from(move |_: SessionOutcome| hits.set(hits.get() + 1))
        });
        service.start_session();
        service.init_state(seeded_snapshot(&service));
        service.reset_session();
        service.end_session(SessionOutcome::Success);
        assert_eq!(hits.get(), 0);
        assert!(service.play_state().is_none());
        assert!(store.reports.borrow().is_empty());
    }

    #[test]
    fn reset_session_is_safe_in_any_phase() {
        let store = Rc::new(MemoryStore::default());
        let service = service_with(store);
        // Teardown before preload ever finished: nothing started.
        service.reset_session();
        service.reset_session();
        assert_eq!(service.current_level(), 0);
    }

    #[test]
    fn unstarted_session_ignores_end_signals() {
        let store = Rc::new(MemoryStore::default());
        let service = service_with(store.clone());
        let hits = Rc::new(Cell::new(0));
        service.set_session_end_listener({
            let hits = hits.clone();
            Callback::from(move |_: SessionOutcome| hits.set(hits.get() + 1))
        });
        service.end_session(SessionOutcome::Success);
        assert_eq!(hits.get(), 0);
        assert!(store.reports.borrow().is_empty());
    }

    #[test]
    fn progress_survives_a_new_handle() {
        let store = Rc::new(MemoryStore::default());
        let first = service_with(store.clone());
        handle_session_end(&first, SessionOutcome::Success);
        drop(first);
        let second = service_with(store);
        assert_eq!(second.current_level(), 1);
    }

    #[test]
    fn play_again_restarts_from_the_first_level() {
        let store = Rc::new(MemoryStore::default());
        let service = service_with(store.clone());
        handle_session_end(&service, SessionOutcome::Success);
        service.reset_progress();
        assert_eq!(service.current_level(), 0);
        assert_eq!(store.level.get(), None);
        let fresh = service_with(store);
        assert_eq!(fresh.current_level(), 0);
    }

    #[test]
    fn stored_level_is_clamped_to_the_table() {
        let store = Rc::new(MemoryStore::default());
        store.level.set(Some(99));
        let service = service_with(store);
        assert_eq!(service.current_level(), 2);
    }

    #[test]
    fn init_state_seeds_the_play_snapshot() {
        let store = Rc::new(MemoryStore::default());
        let service = service_with(store);
        service.start_session();
        service.init_state(seeded_snapshot(&service));
        let snapshot = service.play_state().unwrap();
        assert_eq!(snapshot.customer, 0);
        assert_eq!(snapshot.remaining_lives, 3);
        assert_eq!(snapshot.cash.total_cents(), 0);
    }
}
