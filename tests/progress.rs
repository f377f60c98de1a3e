mod common;

use chrono::NaiveDate;
use cyber_academy::data::{BadgeKind, CyberState, ModuleProgress};
use pretty_assertions::assert_eq;

#[test]
fn network_defender_at_half_way() {
    let (mut academy, _) = common::academy();

    academy.update_module_progress("network", 2, "Network Security", 4);
    assert_eq!(academy.progress().module("network").unwrap().progress_percent, 25);
    assert!(!academy.badges().is_earned(2));

    academy.update_module_progress("network", 4, "Network Security", 4);
    assert_eq!(academy.progress().module("network").unwrap().progress_percent, 50);
    let badge = academy.badges().get(2).unwrap();
    assert!(badge.earned);
    assert_eq!(badge.earned_date, NaiveDate::from_ymd_opt(2026, 10, 19));
}

#[test]
fn learning_progress_is_the_rounded_mean() {
    let (mut academy, _) = common::academy();
    for task in 1..=2 {
        academy.update_module_progress("phishing", task, "Phishing Awareness", 2);
    }
    academy.update_module_progress("network", 1, "Network Security", 2);
    academy.update_module_progress("crypto", 1, "Cryptography Basics", 3);
    assert_eq!(academy.progress().learning_progress(), 61);

    let (mut academy, _) = common::academy();
    for task in 1..=2 {
        academy.update_module_progress("phishing", task, "Phishing Awareness", 2);
    }
    academy.update_module_progress("network", 1, "Network Security", 2);
    academy.update_module_progress("crypto", 1, "Cryptography Basics", 3);
    academy.update_module_progress("coding", 1, "Secure Coding", 1);
    assert_eq!(academy.progress().learning_progress(), 61);
}

#[test]
fn mean_counts_untouched_tracked_modules_as_zero() {
    let mut state = CyberState::new();
    for (id, done) in [("phishing", 4), ("network", 2), ("crypto", 0)] {
        let mut module = ModuleProgress::new(id, id, 4);
        for task in 1..=done {
            module.complete_task(task);
        }
        state.modules.insert(id.to_string(), module);
    }
    assert_eq!(state.compute_learning_progress(), 50);
}

#[test]
fn percent_tracks_distinct_tasks_through_duplicates() {
    let (mut academy, _) = common::academy();
    let sequence = [1, 1, 3, 3, 3, 5, 1, 7];
    for task in sequence {
        academy.update_module_progress("crypto", task, "Cryptography Basics", 7);
        let module = academy.progress().module("crypto").unwrap();
        let done = module.completed_task_ids.len() as f64;
        let expected = (100.0 * done / 7.0).round() as u8;
        assert_eq!(module.progress_percent, expected);
    }
    assert_eq!(academy.progress().module("crypto").unwrap().completed_task_ids.len(), 4);
}

#[test]
fn finishing_modules_awards_their_badges_once() {
    let (mut academy, clock) = common::academy();
    for task in 1..=3 {
        academy.update_module_progress("phishing", task, "Phishing Awareness", 3);
        academy.update_module_progress("crypto", task, "Cryptography Basics", 3);
    }
    let first = academy.badges().get(BadgeKind::PhishingGuardian.id()).unwrap().clone();
    assert!(first.earned);
    assert!(academy.badges().is_earned(BadgeKind::CryptoMaster.id()));

    clock.advance(chrono::Duration::days(3));
    assert!(!academy.award_badge(BadgeKind::PhishingGuardian));
    assert_eq!(academy.badges().get(BadgeKind::PhishingGuardian.id()), Some(&first));
    assert_eq!(academy.profile().completed_modules, 2);
}
