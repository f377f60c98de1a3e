//! Academy engine
//!
//! Three trackers, each owning one persisted snapshot:
//! - [`ProgressTracker`]: learning modules and the badge registry
//! - [`CtfTracker`]: competitions, solves and standings
//! - [`KothTracker`]: instances, kings and uptime
//!
//! [`Academy`] wires them together. CTF and KotH award badges through the
//! [`Awards`] seam, which the progress tracker implements. Share an academy
//! as `Arc<Mutex<Academy>>` and drive it with a [`Heartbeat`].

pub mod catalog;
pub mod clock;
pub mod ctf;
pub mod heartbeat;
pub mod koth;
pub mod progress;
pub mod seed;
pub mod simulation;

pub use catalog::{LearningModule, SkillLevel, Task, TaskVariant};
pub use clock::{Clock, ManualClock, SystemClock};
pub use ctf::CtfTracker;
pub use heartbeat::Heartbeat;
pub use koth::KothTracker;
pub use progress::ProgressTracker;
pub use seed::Seeder;
pub use simulation::{CommandResult, SimulationSession};

use crate::config::Config;
use crate::data::*;
use crate::store::StateStore;
use crate::Result;
use log::info;
use serde::Serialize;
use std::sync::Arc;

/// Something that can hand out badges. Awarding an earned badge is a no-op
/// and returns `false`.
pub trait Awards {
    fn award(&mut self, kind: BadgeKind) -> bool;
}

/// One periodic update pass
pub trait Tick {
    fn tick(&mut self);
}

/// Summary shown on the profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub learning_progress: u8,
    pub completed_modules: usize,
    pub total_modules: usize,
    pub earned_badges: usize,
    pub total_badges: usize,
    pub ctf_points: u32,
    pub ctf_rank: u32,
    pub koth_uptime_seconds: u64,
    pub koth_captures: u32,
    pub koth_rank: u32,
}

/// The whole simulator: the three trackers plus the shared seeder
#[derive(Debug)]
pub struct Academy {
    progress: ProgressTracker,
    ctf: CtfTracker,
    koth: KothTracker,
    seeder: Seeder,
    clock: Arc<dyn Clock>,
}

impl Academy {
    /// Load every tracker from `store`, seeding whatever is missing
    pub fn new(store: StateStore, clock: Arc<dyn Clock>, mut seeder: Seeder) -> Self {
        let progress = ProgressTracker::load(store.clone(), clock.clone());
        let ctf = CtfTracker::load(store.clone(), &mut seeder);
        let koth = KothTracker::load(store, clock.clone(), &mut seeder);
        Self {
            progress,
            ctf,
            koth,
            seeder,
            clock,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let store = config.open_store()?;
        info!("Opening academy ({:?} storage)", config.storage);
        Ok(Self::new(store, Arc::new(SystemClock), Seeder::new(config.seed)))
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn ctf(&self) -> &CtfTracker {
        &self.ctf
    }

    pub fn koth(&self) -> &KothTracker {
        &self.koth
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn badges(&self) -> &BadgeRegistry {
        self.progress.badges()
    }

    pub fn award_badge(&mut self, kind: BadgeKind) -> bool {
        self.progress.award(kind)
    }

    // Learning progress

    pub fn update_module_progress(&mut self, module_id: &str, task_id: u32, module_title: &str, total_tasks: u32) -> bool {
        self.progress.update_module_progress(module_id, task_id, module_title, total_tasks)
    }

    pub fn complete_module(&mut self, module_id: &str) -> bool {
        self.progress.complete_module(module_id)
    }

    /// Open a terminal on a catalog module, resuming its finished tasks
    pub fn start_simulation(&self, module_id: &str, level: SkillLevel) -> Result<SimulationSession> {
        let module = catalog::require_module(module_id)?;
        let done = self
            .progress
            .module(module_id)
            .map(|m| m.completed_task_ids.iter().copied().collect::<Vec<_>>())
            .unwrap_or_default();
        Ok(SimulationSession::new(module, level).with_completed(done))
    }

    /// Run a terminal command and record any task it solves
    pub fn run_command(&mut self, session: &mut SimulationSession, command: &str) -> CommandResult {
        let result = session.submit(command);
        if let Some(task_id) = result.completed_task {
            let module = session.module();
            self.progress
                .update_module_progress(module.id, task_id, module.title, module.total_tasks());
        }
        result
    }

    // CTF

    pub fn register_for_competition(&mut self, competition_id: &str) -> bool {
        self.ctf.register_for_competition(competition_id)
    }

    pub fn solve_challenge(&mut self, competition_id: &str, challenge_id: &str) -> bool {
        self.ctf.solve_challenge(competition_id, challenge_id, &mut self.progress)
    }

    pub fn submit_flag(&mut self, competition_id: &str, challenge_id: &str, flag: &str) -> bool {
        self.ctf.submit_flag(competition_id, challenge_id, flag, &mut self.progress)
    }

    pub fn get_user_solved_challenges(&self, competition_id: &str) -> Vec<String> {
        self.ctf.get_user_solved_challenges(competition_id)
    }

    // King of the Hill

    pub fn register_for_instance(&mut self, instance_id: &str) -> bool {
        self.koth.register_for_instance(instance_id)
    }

    pub fn capture_instance(&mut self, instance_id: &str, flag: &str) -> bool {
        self.koth.capture_instance(instance_id, flag, &mut self.progress)
    }

    pub fn get_user_events(&self, instance_id: &str) -> Vec<&KothEvent> {
        self.koth.get_user_events(instance_id)
    }

    pub fn get_active_instances(&self) -> Vec<&KothInstance> {
        self.koth.get_active_instances()
    }

    pub fn get_past_instances(&self) -> Vec<&KothInstance> {
        self.koth.get_past_instances()
    }

    pub fn profile(&self) -> Profile {
        let cyber = self.progress.state();
        Profile {
            learning_progress: cyber.learning_progress,
            completed_modules: cyber.completed_module_count(),
            total_modules: TRACKED_MODULES.len(),
            earned_badges: cyber.badges.earned_count(),
            total_badges: cyber.badges.len(),
            ctf_points: self.ctf.user_points(),
            ctf_rank: self.ctf.user_rank(),
            koth_uptime_seconds: self.koth.user_total_uptime(),
            koth_captures: self.koth.user_captures(),
            koth_rank: self.koth.user_rank(),
        }
    }

    /// Wipe all three trackers and seed fresh competitions
    pub fn reset(&mut self) {
        self.progress.reset();
        self.ctf.reset(&mut self.seeder);
        self.koth.reset(&mut self.seeder);
    }
}

impl Tick for Academy {
    fn tick(&mut self) {
        self.koth.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn academy() -> Academy {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap());
        Academy::new(StateStore::in_memory(), Arc::new(clock), Seeder::from_seed(21))
    }

    #[test]
    fn terminal_solutions_feed_progress() {
        let mut academy = academy();
        let mut session = academy.start_simulation("network", SkillLevel::Beginner).unwrap();
        academy.run_command(&mut session, "scan-network 192.168.1.0/24");
        session.next_task();
        academy.run_command(&mut session, "configure-firewall --block incoming --port 23");

        let network = academy.progress().module("network").unwrap();
        assert_eq!(network.progress_percent, 67);
        assert!(academy.badges().is_earned(BadgeKind::NetworkDefender.id()));

        let resumed = academy.start_simulation("network", SkillLevel::Advanced).unwrap();
        assert!(resumed.is_completed(1));
        assert!(resumed.is_completed(2));
        assert!(academy.start_simulation("coding", SkillLevel::Beginner).is_err());
    }

    #[test]
    fn third_capture_earns_the_crown() {
        let mut academy = academy();
        for _ in 0..2 {
            assert!(academy.capture_instance("web-server-takeover", "flag"));
        }
        assert!(!academy.badges().is_earned(BadgeKind::KingOfTheHill.id()));
        assert!(academy.capture_instance("linux-privilege-escalation", "flag"));
        assert!(academy.badges().is_earned(BadgeKind::KingOfTheHill.id()));
    }

    #[test]
    fn profile_collects_every_tracker() {
        let mut academy = academy();
        academy.solve_challenge("crypto-conquest", "crypto-1");
        academy.capture_instance("web-server-takeover", "flag");
        academy.tick();

        let profile = academy.profile();
        assert_eq!(profile.ctf_points, 100);
        assert_eq!(profile.koth_captures, 1);
        assert_eq!(profile.koth_uptime_seconds, 1);
        assert_eq!(profile.total_modules, 3);
        assert_eq!(profile.total_badges, 7);
    }

    #[test]
    fn reset_clears_progress() {
        let mut academy = academy();
        academy.update_module_progress("phishing", 1, "Phishing Awareness", 3);
        academy.solve_challenge("web-warriors", "web-1");
        academy.reset();
        assert_eq!(academy.profile().learning_progress, 0);
        assert_eq!(academy.ctf().user_points(), 0);
        assert!(academy.get_user_solved_challenges("web-warriors").is_empty());
    }
}
