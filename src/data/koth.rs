//! King of the Hill instances, kings and event log
//!
//! An instance is a time-boxed target. Whoever submitted the last flag is the
//! king and accrues uptime every second the instance stays active.

use super::{Difficulty, Ranked, CURRENT_USER_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connection details handed to registered players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCredentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// The current holder of an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct King {
    pub id: String,
    pub username: String,
    pub capture_time: DateTime<Utc>,
}

impl King {
    pub fn is_current_user(&self) -> bool {
        self.id == CURRENT_USER_ID
    }
}

/// Kinds of entries in an instance's event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KothEventType {
    Capture,
    Defense,
    Attack,
    System,
}

impl KothEventType {
    pub const ALL: [KothEventType; 4] = [
        KothEventType::Capture,
        KothEventType::Defense,
        KothEventType::Attack,
        KothEventType::System,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            KothEventType::Capture => "♛",
            KothEventType::Defense => "◆",
            KothEventType::Attack => "▲",
            KothEventType::System => "ℹ",
        }
    }
}

impl std::fmt::Display for KothEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KothEventType::Capture => write!(f, "CAPTURE"),
            KothEventType::Defense => write!(f, "DEFENSE"),
            KothEventType::Attack => write!(f, "ATTACK"),
            KothEventType::System => write!(f, "SYSTEM"),
        }
    }
}

/// A single entry in an instance's event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KothEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: KothEventType,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub user_id: String,
    pub username: String,
}

/// One King of the Hill target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KothInstance {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub current_king: Option<King>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Cached `start_time <= now <= end_time`, refreshed every tick
    pub active: bool,
    pub participant_count: u32,
    pub max_participants: u32,
    pub access_credentials: AccessCredentials,
    /// Newest first
    pub events: Vec<KothEvent>,
    pub user_registered: bool,
}

impl KothInstance {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now <= self.end_time
    }

    /// Bring `active` in line with the window at `now`; true if it flipped
    pub fn refresh_active(&mut self, now: DateTime<Utc>) -> bool {
        let active = self.is_active_at(now);
        let changed = active != self.active;
        self.active = active;
        changed
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now > self.end_time
    }

    /// Prepend an event so the log stays newest first
    pub fn push_event(&mut self, event: KothEvent) {
        self.events.insert(0, event);
    }

    pub fn events_of(&self, event_type: KothEventType) -> Vec<&KothEvent> {
        self.events.iter().filter(|e| e.event_type == event_type).collect()
    }

    pub fn user_events(&self) -> Vec<&KothEvent> {
        self.events.iter().filter(|e| e.user_id == CURRENT_USER_ID).collect()
    }

    pub fn is_full(&self) -> bool {
        self.participant_count >= self.max_participants
    }
}

/// One row of an instance leaderboard, ranked by uptime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KothLeaderboardEntry {
    pub id: String,
    pub username: String,
    pub total_uptime_seconds: u64,
    pub captures: u32,
    pub last_activity: DateTime<Utc>,
    pub rank: u32,
}

impl Ranked for KothLeaderboardEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn score(&self) -> u64 {
        self.total_uptime_seconds
    }

    fn rank(&self) -> u32 {
        self.rank
    }

    fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }
}

/// Everything the KotH tracker persists under one key
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KothState {
    pub instances: BTreeMap<String, KothInstance>,
    pub leaderboards: BTreeMap<String, Vec<KothLeaderboardEntry>>,
    pub user_total_uptime: u64,
    pub user_captures: u32,
    /// 0 until the player has held a throne through a tick
    pub user_rank: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn instance(now: DateTime<Utc>) -> KothInstance {
        KothInstance {
            id: "lab".to_string(),
            name: "Lab".to_string(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            current_king: None,
            start_time: now - Duration::hours(1),
            end_time: now + Duration::hours(1),
            active: true,
            participant_count: 0,
            max_participants: 1,
            access_credentials: AccessCredentials {
                host: "lab.local".to_string(),
                port: 22,
                username: "user".to_string(),
                password: "pw".to_string(),
            },
            events: Vec::new(),
            user_registered: false,
        }
    }

    fn event(id: &str, user_id: &str, event_type: KothEventType, at: DateTime<Utc>) -> KothEvent {
        KothEvent {
            id: id.to_string(),
            event_type,
            timestamp: at,
            message: String::new(),
            user_id: user_id.to_string(),
            username: String::new(),
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let now = Utc::now();
        let inst = instance(now);
        assert!(inst.is_active_at(inst.start_time));
        assert!(inst.is_active_at(inst.end_time));
        assert!(!inst.is_active_at(inst.end_time + Duration::seconds(1)));
        assert!(inst.has_ended(inst.end_time + Duration::seconds(1)));
        assert!(!inst.has_started(inst.start_time - Duration::seconds(1)));
    }

    #[test]
    fn events_stay_newest_first() {
        let now = Utc::now();
        let mut inst = instance(now);
        inst.push_event(event("e1", "user-1", KothEventType::Attack, now));
        inst.push_event(event("e2", CURRENT_USER_ID, KothEventType::Capture, now));
        assert_eq!(inst.events[0].id, "e2");
        assert_eq!(inst.user_events().len(), 1);
        assert_eq!(inst.events_of(KothEventType::Attack).len(), 1);
    }

    #[test]
    fn event_type_field_is_named_type() {
        let json = serde_json::to_value(event("e1", "u", KothEventType::Defense, Utc::now())).unwrap();
        assert_eq!(json["type"], "defense");
        assert_eq!(json["userId"], "u");
    }
}
