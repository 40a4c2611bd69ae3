//! Level and asset tables. The engine reads level details through the
//! session handle; the lifecycle layer never interprets them beyond lives.

use crate::model::LevelDetails;

/// Eight shifts, busier and less forgiving as they go.
pub const LEVELS: [LevelDetails; 8] = [
    LevelDetails { lives: 5, customers: 4 },
    LevelDetails { lives: 5, customers: 6 },
    LevelDetails { lives: 4, customers: 8 },
    LevelDetails { lives: 4, customers: 10 },
    LevelDetails { lives: 3, customers: 12 },
    LevelDetails { lives: 3, customers: 14 },
    LevelDetails { lives: 2, customers: 16 },
    LevelDetails { lives: 2, customers: 20 },
];

/// Images the preload gate waits for before a session may start.
pub const ASSETS: [&str; 6] = [
    "assets/img/counter.png",
    "assets/img/register.png",
    "assets/img/drawer.png",
    "assets/img/customer.png",
    "assets/img/coins.png",
    "assets/img/bills.png",
];
