//! King of the Hill tracker
//!
//! Instances open and close on their own schedule. Every [`Tick`] recomputes
//! which are active and credits one second of uptime to each reigning king.

use super::{Awards, Clock, Seeder, Tick};
use crate::data::*;
use crate::store::{StateStore, KOTH_STATE_KEY};
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Captures needed for the King of the Hill badge
pub const KOTH_BADGE_CAPTURES: u32 = 3;

pub const CAPTURE_MESSAGE: &str = "You have captured the instance and are now the king!";

#[derive(Debug)]
pub struct KothTracker {
    state: KothState,
    store: StateStore,
    clock: Arc<dyn Clock>,
}

impl KothTracker {
    /// Restore the saved state, or seed instances around the current time
    pub fn load(store: StateStore, clock: Arc<dyn Clock>, seeder: &mut Seeder) -> Self {
        let state = match store.load::<KothState>(KOTH_STATE_KEY) {
            Some(state) => state,
            None => {
                info!("Seeding KotH instances");
                seeder.koth_state(clock.now())
            }
        };
        let mut tracker = Self { state, store, clock };
        tracker.refresh_windows();
        tracker.persist();
        tracker
    }

    pub fn state(&self) -> &KothState {
        &self.state
    }

    pub fn instance(&self, instance_id: &str) -> Option<&KothInstance> {
        self.state.instances.get(instance_id)
    }

    pub fn leaderboard(&self, instance_id: &str) -> &[KothLeaderboardEntry] {
        self.state
            .leaderboards
            .get(instance_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn user_total_uptime(&self) -> u64 {
        self.state.user_total_uptime
    }

    pub fn user_captures(&self) -> u32 {
        self.state.user_captures
    }

    pub fn user_rank(&self) -> u32 {
        self.state.user_rank
    }

    pub fn register_for_instance(&mut self, instance_id: &str) -> bool {
        let Some(instance) = self.state.instances.get_mut(instance_id) else {
            debug!("register: unknown instance {}", instance_id);
            return false;
        };
        if instance.user_registered {
            return false;
        }
        instance.user_registered = true;
        instance.participant_count += 1;
        info!("Registered for {}", instance_id);
        self.persist();
        true
    }

    /// Take the throne with `flag`.
    ///
    /// Blank flags, unknown instances and instances outside their window are
    /// refused without touching any state.
    pub fn capture_instance(&mut self, instance_id: &str, flag: &str, awards: &mut dyn Awards) -> bool {
        if flag.trim().is_empty() {
            return false;
        }
        let now = self.clock.now();
        let Some(instance) = self.state.instances.get_mut(instance_id) else {
            debug!("capture: unknown instance {}", instance_id);
            return false;
        };
        if !instance.is_active_at(now) {
            debug!("capture: {} is not active", instance_id);
            return false;
        }
        instance.active = true;

        instance.current_king = Some(King {
            id: CURRENT_USER_ID.to_string(),
            username: CURRENT_USER_NAME.to_string(),
            capture_time: now,
        });
        instance.push_event(KothEvent {
            id: Uuid::new_v4().to_string(),
            event_type: KothEventType::Capture,
            timestamp: now,
            message: CAPTURE_MESSAGE.to_string(),
            user_id: CURRENT_USER_ID.to_string(),
            username: CURRENT_USER_NAME.to_string(),
        });

        let board = self.state.leaderboards.entry(instance_id.to_string()).or_default();
        match board.iter_mut().find(|e| e.id == CURRENT_USER_ID) {
            Some(me) => {
                me.captures += 1;
                me.last_activity = now;
            }
            None => board.push(KothLeaderboardEntry {
                id: CURRENT_USER_ID.to_string(),
                username: CURRENT_USER_NAME.to_string(),
                total_uptime_seconds: 0,
                captures: 1,
                last_activity: now,
                rank: 0,
            }),
        }
        rerank(board);

        self.state.user_captures += 1;
        info!("Captured {} ({} captures)", instance_id, self.state.user_captures);
        if self.state.user_captures >= KOTH_BADGE_CAPTURES {
            awards.award(BadgeKind::KingOfTheHill);
        }
        self.persist();
        true
    }

    /// Events on an instance caused by the player, newest first
    pub fn get_user_events(&self, instance_id: &str) -> Vec<&KothEvent> {
        self.instance(instance_id)
            .map(|i| i.user_events())
            .unwrap_or_default()
    }

    pub fn get_active_instances(&self) -> Vec<&KothInstance> {
        self.state.instances.values().filter(|i| i.active).collect()
    }

    pub fn get_past_instances(&self) -> Vec<&KothInstance> {
        self.state.instances.values().filter(|i| !i.active).collect()
    }

    /// Drop all progress and seed again
    pub fn reset(&mut self, seeder: &mut Seeder) {
        warn!("Resetting KotH state");
        self.state = seeder.koth_state(self.clock.now());
        self.persist();
    }

    /// Recompute every instance's `active` flag against the clock
    fn refresh_windows(&mut self) {
        let now = self.clock.now();
        for (id, instance) in self.state.instances.iter_mut() {
            if instance.refresh_active(now) {
                info!("{} is now {}", id, if instance.active { "open" } else { "closed" });
            }
        }
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(KOTH_STATE_KEY, &self.state) {
            warn!("Failed to save KotH state: {:#}", err);
        }
    }
}

impl Tick for KothTracker {
    fn tick(&mut self) {
        self.refresh_windows();
        let now = self.clock.now();
        let state = &mut self.state;

        for (id, instance) in state.instances.iter_mut() {
            if !instance.active {
                continue;
            }
            let Some(king) = &instance.current_king else {
                continue;
            };
            let Some(board) = state.leaderboards.get_mut(id) else {
                continue;
            };
            let Some(entry) = board.iter_mut().find(|e| e.id == king.id) else {
                continue;
            };
            entry.total_uptime_seconds += 1;
            entry.last_activity = now;
            rerank(board);

            if king.is_current_user() {
                state.user_total_uptime += 1;
                state.user_rank = rank_of(board, CURRENT_USER_ID).unwrap_or(0);
            }
        }

        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualClock;
    use chrono::{Duration, TimeZone, Utc};

    struct NoAwards;

    impl Awards for NoAwards {
        fn award(&mut self, _kind: BadgeKind) -> bool {
            false
        }
    }

    fn tracker() -> (KothTracker, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap());
        let koth = KothTracker::load(StateStore::in_memory(), Arc::new(clock.clone()), &mut Seeder::from_seed(4));
        (koth, clock)
    }

    #[test]
    fn inactive_instance_refuses_capture() {
        let (mut koth, _) = tracker();
        let before = koth.state().clone();
        assert!(!koth.capture_instance("iot-device-hijack", "flag", &mut NoAwards));
        assert!(!koth.capture_instance("windows-domain-control", "flag", &mut NoAwards));
        assert!(!koth.capture_instance("web-server-takeover", "  ", &mut NoAwards));
        assert!(!koth.capture_instance("missing", "flag", &mut NoAwards));
        assert_eq!(koth.state(), &before);
    }

    #[test]
    fn capture_crowns_the_player() {
        let (mut koth, _) = tracker();
        let events_before = koth.instance("web-server-takeover").unwrap().events.len();
        assert!(koth.capture_instance("web-server-takeover", "flag{root}", &mut NoAwards));

        let instance = koth.instance("web-server-takeover").unwrap();
        assert_eq!(instance.current_king.as_ref().unwrap().username, "You");
        assert_eq!(instance.events.len(), events_before + 1);
        assert_eq!(instance.events[0].event_type, KothEventType::Capture);
        assert_eq!(instance.events[0].message, CAPTURE_MESSAGE);
        assert_eq!(koth.get_user_events("web-server-takeover").len(), 1);
        assert_eq!(koth.user_captures(), 1);
        assert!(is_consistent(koth.leaderboard("web-server-takeover")));
    }

    #[test]
    fn tick_opens_and_closes_windows() {
        let (mut koth, clock) = tracker();
        assert_eq!(koth.get_active_instances().len(), 2);

        clock.advance(Duration::days(1) + Duration::hours(1));
        koth.tick();
        let active: Vec<&str> = koth.get_active_instances().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(active, vec!["linux-privilege-escalation", "web-server-takeover", "windows-domain-control"]);

        clock.advance(Duration::days(1));
        koth.tick();
        assert!(!koth.instance("web-server-takeover").unwrap().active);
        assert_eq!(koth.get_past_instances().len(), 2);
    }

    #[test]
    fn player_uptime_accrues_while_reigning() {
        let (mut koth, clock) = tracker();
        koth.capture_instance("linux-privilege-escalation", "flag", &mut NoAwards);
        for _ in 0..3 {
            clock.advance(Duration::seconds(1));
            koth.tick();
        }
        assert_eq!(koth.user_total_uptime(), 3);
        let board = koth.leaderboard("linux-privilege-escalation");
        let me = board.iter().find(|e| e.id == CURRENT_USER_ID).unwrap();
        assert_eq!(me.total_uptime_seconds, 3);
        assert_eq!(koth.user_rank(), me.rank);
    }
}
