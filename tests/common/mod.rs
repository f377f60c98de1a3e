use chrono::{DateTime, TimeZone, Utc};
use cyber_academy::engine::{Academy, ManualClock, Seeder};
use cyber_academy::store::StateStore;
use std::sync::Arc;

pub const SEED: u64 = 2026;

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

/// Academy over `store` with a clock frozen at [`start`]
pub fn academy_with(store: StateStore) -> (Academy, ManualClock) {
    let clock = ManualClock::new(start());
    let academy = Academy::new(store, Arc::new(clock.clone()), Seeder::from_seed(SEED));
    (academy, clock)
}

pub fn academy() -> (Academy, ManualClock) {
    academy_with(StateStore::in_memory())
}
