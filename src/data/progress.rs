//! Learning-module progress

use super::{rounded_ratio, BadgeRegistry};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Modules that count towards the overall learning progress.
/// Anything else (e.g. the locked `coding` module) is tracked but ignored.
pub const TRACKED_MODULES: [&str; 3] = ["phishing", "network", "crypto"];

/// Completion state of one learning module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    pub id: String,
    pub title: String,
    pub completed_task_ids: BTreeSet<u32>,
    pub total_tasks: u32,
    pub progress_percent: u8,
    pub completed: bool,
}

impl ModuleProgress {
    pub fn new(id: &str, title: &str, total_tasks: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            completed_task_ids: BTreeSet::new(),
            total_tasks,
            progress_percent: 0,
            completed: false,
        }
    }

    /// Record a finished task. Returns `false` if it was already recorded.
    pub fn complete_task(&mut self, task_id: u32) -> bool {
        if !self.completed_task_ids.insert(task_id) {
            return false;
        }
        self.recompute();
        true
    }

    /// Force the module to finished regardless of recorded tasks
    pub fn force_complete(&mut self) {
        self.progress_percent = 100;
        self.completed = true;
    }

    pub fn completed_count(&self) -> u32 {
        self.completed_task_ids.len() as u32
    }

    fn recompute(&mut self) {
        let done = u64::from(self.completed_count());
        let total = u64::from(self.total_tasks);
        self.progress_percent = rounded_ratio(100 * done, total).min(100) as u8;
        self.completed = total > 0 && done >= total;
    }
}

/// Everything the progress tracker persists under one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyberState {
    pub modules: BTreeMap<String, ModuleProgress>,
    pub badges: BadgeRegistry,
    pub learning_progress: u8,
}

impl CyberState {
    pub fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
            badges: BadgeRegistry::new(),
            learning_progress: 0,
        }
    }

    /// Rounded mean progress over the tracked modules that exist, 0 if none do
    pub fn compute_learning_progress(&self) -> u8 {
        let tracked: Vec<&ModuleProgress> = TRACKED_MODULES
            .iter()
            .filter_map(|id| self.modules.get(*id))
            .collect();
        if tracked.is_empty() {
            return 0;
        }
        let sum: u64 = tracked.iter().map(|m| u64::from(m.progress_percent)).sum();
        rounded_ratio(sum, tracked.len() as u64) as u8
    }

    pub fn completed_module_count(&self) -> usize {
        TRACKED_MODULES
            .iter()
            .filter(|id| self.modules.get(**id).map_or(false, |m| m.completed))
            .count()
    }

    /// Modules with some progress that are not yet finished
    pub fn modules_in_progress(&self) -> Vec<&ModuleProgress> {
        self.modules
            .values()
            .filter(|m| m.progress_percent > 0 && !m.completed)
            .collect()
    }

    /// First tracked module (in catalog order) that is not finished
    pub fn next_module(&self) -> Option<&'static str> {
        TRACKED_MODULES
            .iter()
            .copied()
            .find(|id| !self.modules.get(*id).map_or(false, |m| m.completed || m.progress_percent >= 100))
    }
}

impl Default for CyberState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_tasks_do_not_count() {
        let mut module = ModuleProgress::new("crypto", "Cryptography Basics", 3);
        assert!(module.complete_task(1));
        assert!(!module.complete_task(1));
        assert_eq!(module.progress_percent, 33);
        assert!(module.complete_task(3));
        assert_eq!(module.progress_percent, 67);
        assert!(!module.completed);
        assert!(module.complete_task(2));
        assert_eq!(module.progress_percent, 100);
        assert!(module.completed);
    }

    #[test]
    fn zero_task_module_never_completes() {
        let mut module = ModuleProgress::new("coding", "Secure Coding", 0);
        module.complete_task(1);
        assert_eq!(module.progress_percent, 0);
        assert!(!module.completed);
    }

    #[test]
    fn untracked_modules_are_ignored() {
        let mut state = CyberState::new();
        let mut coding = ModuleProgress::new("coding", "Secure Coding", 1);
        coding.complete_task(1);
        state.modules.insert("coding".into(), coding);
        assert_eq!(state.compute_learning_progress(), 0);

        let mut network = ModuleProgress::new("network", "Network Security", 4);
        network.complete_task(1);
        state.modules.insert("network".into(), network);
        assert_eq!(state.compute_learning_progress(), 25);
        assert_eq!(state.next_module(), Some("phishing"));
        assert_eq!(state.modules_in_progress().len(), 1);
    }
}
