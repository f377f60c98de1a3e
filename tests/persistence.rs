mod common;

use cyber_academy::data::*;
use chrono::Duration as ChronoDuration;
use cyber_academy::engine::{Academy, Heartbeat, ManualClock, Seeder, Tick};
use cyber_academy::store::{FileStore, KvStore, MemoryStore, StateStore, CTF_STATE_KEY, CYBER_STATE_KEY, KOTH_STATE_KEY};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn fresh_store_is_seeded_and_saved() {
    let backend = MemoryStore::new();
    let store = StateStore::new(Arc::new(backend.clone()));
    let (_academy, _) = common::academy_with(store);

    let mut keys = backend.keys().unwrap();
    keys.sort();
    assert_eq!(keys, vec![CTF_STATE_KEY, CYBER_STATE_KEY, KOTH_STATE_KEY]);
}

#[test]
fn progress_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let open = || StateStore::new(Arc::new(FileStore::open(dir.path()).unwrap()));

    let (mut academy, _) = common::academy_with(open());
    academy.update_module_progress("phishing", 1, "Phishing Awareness", 3);
    academy.solve_challenge("web-warriors", "web-2");
    academy.capture_instance("web-server-takeover", "flag");
    let profile = academy.profile();
    let board = academy.ctf().leaderboard("web-warriors").to_vec();
    drop(academy);

    let (reopened, _) = common::academy_with(open());
    assert_eq!(reopened.profile(), profile);
    assert_eq!(reopened.ctf().leaderboard("web-warriors"), &board[..]);
    assert_eq!(reopened.get_user_events("web-server-takeover").len(), 1);
}

#[test]
fn corrupt_snapshot_is_reseeded() {
    let backend = MemoryStore::new();
    backend.put_raw(CTF_STATE_KEY, b"{\"version\":1,\"state\":42}").unwrap();
    backend.put_raw(KOTH_STATE_KEY, b"{\"version\":99,\"state\":{}}").unwrap();
    let store = StateStore::new(Arc::new(backend));

    let (academy, _) = common::academy_with(store.clone());
    assert_eq!(academy.ctf().state().competitions.len(), 3);
    assert_eq!(academy.koth().state().instances.len(), 4);
    // and the fresh seed replaced the bad blobs
    assert!(store.try_load::<CtfState>(CTF_STATE_KEY).unwrap().is_some());
    assert!(store.try_load::<KothState>(KOTH_STATE_KEY).unwrap().is_some());
}

#[test]
fn windows_that_closed_while_away_refuse_captures() {
    let store = StateStore::in_memory();
    let (academy, _) = common::academy_with(store.clone());
    drop(academy);

    let later = ManualClock::new(common::start() + ChronoDuration::days(3));
    let mut academy = Academy::new(store.clone(), Arc::new(later), Seeder::from_seed(common::SEED));
    let active: Vec<&str> = academy.get_active_instances().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(active, vec!["linux-privilege-escalation", "windows-domain-control"]);

    let before = academy.koth().state().clone();
    assert!(!academy.capture_instance("web-server-takeover", "flag"));
    assert_eq!(academy.koth().state(), &before);

    // the refreshed flags are what got saved
    let saved: KothState = store.load(KOTH_STATE_KEY).unwrap();
    assert!(!saved.instances["web-server-takeover"].active);
}

#[test]
fn same_seed_same_world() {
    let (a, _) = common::academy();
    let (b, _) = common::academy();
    assert_eq!(a.ctf().state(), b.ctf().state());
    assert_eq!(a.koth().state(), b.koth().state());
}

#[test]
fn every_tick_saves_the_koth_snapshot() {
    let store = StateStore::in_memory();
    let saves = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&saves);
    store.subscribe(move |key| {
        if key == KOTH_STATE_KEY {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    let (mut academy, _) = common::academy_with(store);
    let after_load = saves.load(Ordering::SeqCst);
    academy.tick();
    academy.tick();
    assert_eq!(saves.load(Ordering::SeqCst), after_load + 2);
}

#[test]
fn heartbeat_drives_the_academy_until_stopped() {
    let (mut academy, clock) = common::academy();
    academy.capture_instance("linux-privilege-escalation", "flag");
    let academy = Arc::new(Mutex::new(academy));

    let mut heartbeat = Heartbeat::start(Arc::clone(&academy), Duration::from_millis(5)).unwrap();
    std::thread::sleep(Duration::from_millis(80));
    heartbeat.stop();

    let uptime = academy.lock().unwrap().koth().user_total_uptime();
    assert!(uptime > 0);
    clock.advance(chrono::Duration::seconds(5));
    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(academy.lock().unwrap().koth().user_total_uptime(), uptime);
}
