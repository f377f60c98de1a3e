//! Mock data for a fresh academy
//!
//! Competitions and KotH instance templates are fixed; leaderboards and event
//! logs are random but drawn from a [`Seeder`], so a fixed seed reproduces
//! them exactly.

use crate::data::*;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Synthetic players on every CTF leaderboard
pub const CTF_LEADERBOARD_SIZE: usize = 20;

const EVENT_USERNAMES: [&str; 6] = ["HackerElite", "RootMaster", "ByteWizard", "CipherQueen", "KernelPanic", "NullPointer"];

/// Pseudo-random source for mock data
#[derive(Debug, Clone)]
pub struct Seeder {
    rng: StdRng,
}

impl Seeder {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Deterministic when a seed is given
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Fresh CTF state: fixed competitions, random leaderboards
    pub fn ctf_state(&mut self) -> CtfState {
        let competitions = competitions();
        let leaderboards = competitions
            .keys()
            .map(|id| (id.clone(), self.ctf_leaderboard()))
            .collect();
        CtfState {
            competitions,
            leaderboards,
            ..CtfState::default()
        }
    }

    /// Fresh KotH state with instance windows relative to `now`
    pub fn koth_state(&mut self, now: DateTime<Utc>) -> KothState {
        let instances = self.koth_instances(now);
        let leaderboards = instances
            .keys()
            .map(|id| (id.clone(), self.koth_leaderboard(now)))
            .collect();
        KothState {
            instances,
            leaderboards,
            ..KothState::default()
        }
    }

    fn ctf_leaderboard(&mut self) -> Vec<Participant> {
        let mut participants: Vec<Participant> = (0..CTF_LEADERBOARD_SIZE)
            .map(|i| {
                let solved_count = self.rng.gen_range(0..=3u32);
                let points = solved_count * self.rng.gen_range(100..300u32);
                Participant {
                    id: format!("user-{}", i),
                    username: format!("CyberAgent{}", i + 1),
                    points,
                    solved_count,
                    rank: 0,
                }
            })
            .collect();
        rerank(&mut participants);
        participants
    }

    fn koth_leaderboard(&mut self, now: DateTime<Utc>) -> Vec<KothLeaderboardEntry> {
        let size = self.rng.gen_range(10..=15usize);
        let mut entries: Vec<KothLeaderboardEntry> = (0..size)
            .map(|i| KothLeaderboardEntry {
                id: format!("user-{}", i),
                username: format!("CyberKing{}", i + 1),
                total_uptime_seconds: self.rng.gen_range(60..3660u64),
                captures: self.rng.gen_range(1..=5u32),
                last_activity: now - Duration::milliseconds(self.rng.gen_range(0..24 * 60 * 60_000i64)),
                rank: 0,
            })
            .collect();
        rerank(&mut entries);
        entries
    }

    fn koth_events(&mut self, count: usize, now: DateTime<Utc>) -> Vec<KothEvent> {
        let mut events: Vec<KothEvent> = (0..count)
            .map(|i| {
                let event_type = KothEventType::ALL[self.rng.gen_range(0..KothEventType::ALL.len())];
                let username = EVENT_USERNAMES[self.rng.gen_range(0..EVENT_USERNAMES.len())];
                let minutes_ago = self.rng.gen_range(0..120i64);
                let message = match event_type {
                    KothEventType::Capture => format!("{} has captured the instance and is now the king!", username),
                    KothEventType::Defense => format!("{} successfully defended against an attack attempt.", username),
                    KothEventType::Attack => format!("{} attempted to capture the instance but failed.", username),
                    KothEventType::System => {
                        "System reset performed. The instance is now available for capture.".to_string()
                    }
                };
                KothEvent {
                    id: format!("event-{}", i),
                    event_type,
                    timestamp: now - Duration::minutes(minutes_ago),
                    message,
                    user_id: format!("user-{}", self.rng.gen_range(0..20)),
                    username: username.to_string(),
                }
            })
            .collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events
    }

    fn koth_instances(&mut self, now: DateTime<Utc>) -> BTreeMap<String, KothInstance> {
        let templates = vec![
            InstanceTemplate {
                id: "web-server-takeover",
                name: "Web Server Takeover",
                description: "Gain and maintain control of a vulnerable web server. Defend against other attackers while maintaining your access.",
                difficulty: Difficulty::Medium,
                king: Some(("user-5", "HackerElite", Duration::minutes(15))),
                start: now - Duration::days(1),
                end: now + Duration::days(2),
                participant_count: 18,
                max_participants: 25,
                credentials: ("koth-web-server.cyberacademy.local", 22, "challenger", "start-challenge-123"),
                event_count: 20,
            },
            InstanceTemplate {
                id: "linux-privilege-escalation",
                name: "Linux Privilege Escalation",
                description: "Exploit vulnerabilities to gain root access on a Linux server and maintain your control against other players.",
                difficulty: Difficulty::Hard,
                king: Some(("user-12", "RootMaster", Duration::minutes(45))),
                start: now,
                end: now + Duration::days(5),
                participant_count: 12,
                max_participants: 20,
                credentials: ("koth-linux-server.cyberacademy.local", 22, "user", "challenge-access-456"),
                event_count: 15,
            },
            InstanceTemplate {
                id: "windows-domain-control",
                name: "Windows Domain Control",
                description: "Take over a Windows domain controller and defend your position as the domain admin.",
                difficulty: Difficulty::Hard,
                king: None,
                start: now + Duration::days(1),
                end: now + Duration::days(6),
                participant_count: 0,
                max_participants: 15,
                credentials: ("koth-windows-dc.cyberacademy.local", 3389, "guest", "windows-challenge-789"),
                event_count: 0,
            },
            InstanceTemplate {
                id: "iot-device-hijack",
                name: "IoT Device Hijack",
                description: "Capture and maintain control of a network of vulnerable IoT devices.",
                difficulty: Difficulty::Easy,
                king: None,
                start: now - Duration::days(10),
                end: now - Duration::days(2),
                participant_count: 22,
                max_participants: 30,
                credentials: ("koth-iot-network.cyberacademy.local", 8080, "admin", "iot-challenge-321"),
                event_count: 25,
            },
        ];

        templates
            .into_iter()
            .map(|t| {
                let events = self.koth_events(t.event_count, now);
                let (host, port, username, password) = t.credentials;
                let instance = KothInstance {
                    id: t.id.to_string(),
                    name: t.name.to_string(),
                    description: t.description.to_string(),
                    difficulty: t.difficulty,
                    current_king: t.king.map(|(id, name, ago)| King {
                        id: id.to_string(),
                        username: name.to_string(),
                        capture_time: now - ago,
                    }),
                    start_time: t.start,
                    end_time: t.end,
                    active: t.start <= now && now <= t.end,
                    participant_count: t.participant_count,
                    max_participants: t.max_participants,
                    access_credentials: AccessCredentials {
                        host: host.to_string(),
                        port,
                        username: username.to_string(),
                        password: password.to_string(),
                    },
                    events,
                    user_registered: false,
                };
                (instance.id.clone(), instance)
            })
            .collect()
    }
}

struct InstanceTemplate {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    king: Option<(&'static str, &'static str, Duration)>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    participant_count: u32,
    max_participants: u32,
    credentials: (&'static str, u16, &'static str, &'static str),
    event_count: usize,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The fixed competition catalog
pub fn competitions() -> BTreeMap<String, Competition> {
    let list = vec![
        Competition {
            id: WEB_COMPETITION_ID.to_string(),
            title: "Web Warriors Challenge".to_string(),
            description: "Test your web security skills in this competition focused on web vulnerabilities, XSS, CSRF, and SQL injection attacks.".to_string(),
            start_date: date(2023, 6, 1),
            end_date: date(2023, 6, 30),
            active: true,
            challenges: vec![
                Challenge::new("web-1", "Cookie Monster", "Find and exploit the cookie vulnerability to gain admin access.", "Web", 100, Difficulty::Easy)
                    .with_hint("Check how cookies are being validated on the server."),
                Challenge::new("web-2", "SQL Sleuth", "Identify and exploit the SQL injection vulnerability to extract user data.", "Web", 200, Difficulty::Medium),
                Challenge::new("web-3", "XSS Master", "Execute a cross-site scripting attack that steals admin cookies.", "Web", 300, Difficulty::Hard),
            ],
            participant_count: 128,
            user_registered: false,
        },
        Competition {
            id: "crypto-conquest".to_string(),
            title: "Crypto Conquest".to_string(),
            description: "Crack codes, break ciphers, and solve cryptographic puzzles in this encryption-focused competition.".to_string(),
            start_date: date(2023, 7, 15),
            end_date: date(2023, 8, 15),
            active: true,
            challenges: vec![
                Challenge::new("crypto-1", "Caesar's Secret", "Decrypt the message encoded with a Caesar cipher.", "Cryptography", 100, Difficulty::Easy)
                    .with_hint("The key is related to the date of the Roman Empire's founding."),
                Challenge::new("crypto-2", "RSA Rookie", "Break the weak RSA implementation to recover the private key.", "Cryptography", 250, Difficulty::Medium),
                Challenge::new("crypto-3", "Blockchain Breaker", "Find the vulnerability in the blockchain implementation.", "Cryptography", 400, Difficulty::Hard),
            ],
            participant_count: 95,
            user_registered: false,
        },
        Competition {
            id: "network-ninjas".to_string(),
            title: "Network Ninjas".to_string(),
            description: "Navigate through network security challenges, packet analysis, and firewall evasion techniques.".to_string(),
            start_date: date(2023, 5, 1),
            end_date: date(2023, 5, 31),
            active: false,
            challenges: vec![
                Challenge::new("network-1", "Packet Detective", "Analyze the packet capture to find the hidden message.", "Network", 150, Difficulty::Easy),
                Challenge::new("network-2", "Firewall Bypass", "Find a way to bypass the firewall restrictions.", "Network", 250, Difficulty::Medium),
                Challenge::new("network-3", "DNS Tunneling", "Implement a DNS tunneling technique to exfiltrate data.", "Network", 350, Difficulty::Hard),
            ],
            participant_count: 76,
            user_registered: false,
        },
    ];
    list.into_iter().map(|c| (c.id.clone(), c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn same_seed_same_leaderboards() {
        let a = Seeder::from_seed(99).ctf_state();
        let b = Seeder::from_seed(99).ctf_state();
        assert_eq!(a, b);

        let k1 = Seeder::from_seed(5).koth_state(now());
        let k2 = Seeder::from_seed(5).koth_state(now());
        assert_eq!(k1, k2);
    }

    #[test]
    fn ctf_leaderboards_follow_the_rules() {
        let state = Seeder::from_seed(1).ctf_state();
        assert_eq!(state.competitions.len(), 3);
        for board in state.leaderboards.values() {
            assert_eq!(board.len(), CTF_LEADERBOARD_SIZE);
            assert!(is_consistent(board));
            for p in board {
                assert!(p.solved_count <= 3);
                if p.solved_count == 0 {
                    assert_eq!(p.points, 0);
                } else {
                    assert!(p.points >= 100 * p.solved_count && p.points < 300 * p.solved_count);
                }
            }
        }
        assert_eq!(state.user_points, 0);
        assert_eq!(state.user_rank, 0);
    }

    #[test]
    fn competition_dates_are_pinned() {
        let competitions = competitions();
        let web = &competitions[WEB_COMPETITION_ID];
        assert_eq!(web.start_date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(web.end_date, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap());
        for competition in competitions.values() {
            assert_ne!(competition.start_date, NaiveDate::default(), "{}", competition.id);
            assert!(competition.start_date < competition.end_date, "{}", competition.id);
        }
    }

    #[test]
    fn koth_instances_cover_every_window() {
        let state = Seeder::from_seed(3).koth_state(now());
        assert_eq!(state.instances.len(), 4);

        let active: Vec<&str> = state.instances.values().filter(|i| i.active).map(|i| i.id.as_str()).collect();
        assert_eq!(active, vec!["linux-privilege-escalation", "web-server-takeover"]);
        assert!(state.instances["windows-domain-control"].current_king.is_none());
        assert!(state.instances["iot-device-hijack"].has_ended(now()));

        for (id, board) in &state.leaderboards {
            assert!((10..=15).contains(&board.len()), "{} has {} rows", id, board.len());
            assert!(is_consistent(board));
            for entry in board {
                assert!((60..3660).contains(&entry.total_uptime_seconds));
                assert!((1..=5).contains(&entry.captures));
            }
        }

        let events = &state.instances["web-server-takeover"].events;
        assert_eq!(events.len(), 20);
        assert!(events.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
