//! Learning progress and badge awards

use super::{Awards, Clock};
use crate::data::*;
use crate::store::{StateStore, CYBER_STATE_KEY};
use log::{debug, info, warn};
use std::sync::Arc;

/// Owns [`CyberState`]: per-module task completion, the aggregate learning
/// progress and the badge registry every tracker awards into.
#[derive(Debug)]
pub struct ProgressTracker {
    state: CyberState,
    store: StateStore,
    clock: Arc<dyn Clock>,
}

impl ProgressTracker {
    /// Restore the saved state, or start empty and save that
    pub fn load(store: StateStore, clock: Arc<dyn Clock>) -> Self {
        let tracker = match store.load::<CyberState>(CYBER_STATE_KEY) {
            Some(mut state) => {
                state.badges.fill_catalog();
                Self { state, store, clock }
            }
            None => Self {
                state: CyberState::new(),
                store,
                clock,
            },
        };
        tracker.persist();
        tracker
    }

    pub fn state(&self) -> &CyberState {
        &self.state
    }

    pub fn learning_progress(&self) -> u8 {
        self.state.learning_progress
    }

    pub fn module(&self, module_id: &str) -> Option<&ModuleProgress> {
        self.state.modules.get(module_id)
    }

    pub fn badges(&self) -> &BadgeRegistry {
        &self.state.badges
    }

    /// Record `task_id` as done in `module_id`, creating the module on first use.
    ///
    /// A task that was already recorded changes nothing and returns `false`.
    /// `total_tasks` is only read when the module is created.
    pub fn update_module_progress(&mut self, module_id: &str, task_id: u32, module_title: &str, total_tasks: u32) -> bool {
        let module = self
            .state
            .modules
            .entry(module_id.to_string())
            .or_insert_with(|| ModuleProgress::new(module_id, module_title, total_tasks));

        if !module.complete_task(task_id) {
            debug!("Task {} of {} already completed", task_id, module_id);
            return false;
        }
        let (percent, completed) = (module.progress_percent, module.completed);
        info!("Module {} now at {}%", module_id, percent);

        self.state.learning_progress = self.state.compute_learning_progress();
        self.check_module_badges(module_id, percent, completed);
        self.persist();
        true
    }

    /// Mark an existing module finished. Unknown modules are ignored.
    pub fn complete_module(&mut self, module_id: &str) -> bool {
        let Some(module) = self.state.modules.get_mut(module_id) else {
            debug!("complete_module: no progress recorded for {}", module_id);
            return false;
        };
        module.force_complete();
        self.state.learning_progress = self.state.compute_learning_progress();
        self.persist();
        true
    }

    /// Forget all progress and badges
    pub fn reset(&mut self) {
        warn!("Resetting learning progress");
        self.state = CyberState::new();
        self.persist();
    }

    fn check_module_badges(&mut self, module_id: &str, percent: u8, completed: bool) {
        let badge = match module_id {
            "phishing" if completed => Some(BadgeKind::PhishingGuardian),
            "network" if percent >= 50 => Some(BadgeKind::NetworkDefender),
            "crypto" if completed => Some(BadgeKind::CryptoMaster),
            _ => None,
        };
        if let Some(kind) = badge {
            if !self.state.badges.is_earned(kind.id()) {
                self.state.badges.award(kind.id(), self.clock.today());
                info!("Badge earned: {}", kind.title());
            }
        }
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(CYBER_STATE_KEY, &self.state) {
            warn!("Failed to save learning progress: {:#}", err);
        }
    }
}

impl Awards for ProgressTracker {
    fn award(&mut self, kind: BadgeKind) -> bool {
        if !self.state.badges.award(kind.id(), self.clock.today()) {
            return false;
        }
        info!("Badge earned: {}", kind.title());
        self.persist();
        true
    }
}
