//! Badges and the shared badge registry

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Numeric badge id as stored in the registry
pub type BadgeId = u32;

/// The badges the academy knows how to award
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeKind {
    PhishingGuardian,    // Finish the phishing module
    NetworkDefender,     // Reach 50% of the network module
    CryptoMaster,        // Finish the crypto module
    CtfChampion,         // Rank first on a CTF leaderboard
    FlagHunter,          // Solve 10 challenges in one competition
    WebWarrior,          // Solve every Web Warriors challenge
    KingOfTheHill,       // Capture KotH instances 3 times
}

impl BadgeKind {
    pub const ALL: [BadgeKind; 7] = [
        BadgeKind::PhishingGuardian,
        BadgeKind::NetworkDefender,
        BadgeKind::CryptoMaster,
        BadgeKind::CtfChampion,
        BadgeKind::FlagHunter,
        BadgeKind::WebWarrior,
        BadgeKind::KingOfTheHill,
    ];

    pub fn id(&self) -> BadgeId {
        match self {
            BadgeKind::PhishingGuardian => 1,
            BadgeKind::NetworkDefender => 2,
            BadgeKind::CryptoMaster => 3,
            BadgeKind::CtfChampion => 4,
            BadgeKind::FlagHunter => 5,
            BadgeKind::WebWarrior => 6,
            BadgeKind::KingOfTheHill => 7,
        }
    }

    pub fn from_id(id: BadgeId) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            BadgeKind::PhishingGuardian => "Phishing Guardian",
            BadgeKind::NetworkDefender => "Network Defender",
            BadgeKind::CryptoMaster => "Crypto Master",
            BadgeKind::CtfChampion => "CTF Champion",
            BadgeKind::FlagHunter => "Flag Hunter",
            BadgeKind::WebWarrior => "Web Warrior",
            BadgeKind::KingOfTheHill => "King of the Hill",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BadgeKind::PhishingGuardian => "Successfully completed the Phishing Awareness module",
            BadgeKind::NetworkDefender => "Completed 50% of Network Security module",
            BadgeKind::CryptoMaster => "Complete all cryptography challenges",
            BadgeKind::CtfChampion => "Placed 1st in a CTF competition",
            BadgeKind::FlagHunter => "Solved 10 CTF challenges",
            BadgeKind::WebWarrior => "Completed the Web Warriors CTF competition",
            BadgeKind::KingOfTheHill => "Captured King of the Hill instances 3 times",
        }
    }

    pub fn category(&self) -> BadgeCategory {
        match self {
            BadgeKind::PhishingGuardian | BadgeKind::NetworkDefender | BadgeKind::CryptoMaster => {
                BadgeCategory::Module
            }
            BadgeKind::CtfChampion | BadgeKind::FlagHunter | BadgeKind::WebWarrior => BadgeCategory::Ctf,
            BadgeKind::KingOfTheHill => BadgeCategory::Koth,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BadgeKind::PhishingGuardian => "🛡️",
            BadgeKind::NetworkDefender => "🖧",
            BadgeKind::CryptoMaster => "🔒",
            BadgeKind::CtfChampion => "🏆",
            BadgeKind::FlagHunter => "🚩",
            BadgeKind::WebWarrior => "🌐",
            BadgeKind::KingOfTheHill => "👑",
        }
    }
}

/// Grouping used by the badges screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Module,
    Ctf,
    Koth,
    Achievement,
}

/// A badge and whether the player holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: BadgeId,
    pub title: String,
    pub description: String,
    pub earned: bool,
    pub earned_date: Option<NaiveDate>,
    pub category: BadgeCategory,
}

impl Badge {
    pub fn new(kind: BadgeKind) -> Self {
        Self {
            id: kind.id(),
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            earned: false,
            earned_date: None,
            category: kind.category(),
        }
    }

    pub fn kind(&self) -> Option<BadgeKind> {
        BadgeKind::from_id(self.id)
    }
}

/// Badge id → badge, written by every tracker through [`BadgeRegistry::award`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeRegistry {
    badges: BTreeMap<BadgeId, Badge>,
}

impl BadgeRegistry {
    /// Registry holding the full catalog, nothing earned yet
    pub fn new() -> Self {
        let badges = BadgeKind::ALL
            .iter()
            .map(|&kind| (kind.id(), Badge::new(kind)))
            .collect();
        Self { badges }
    }

    /// Award a badge once.
    ///
    /// Returns `true` only on the call that flips it to earned; unknown ids
    /// and repeat awards leave the registry untouched.
    pub fn award(&mut self, id: BadgeId, today: NaiveDate) -> bool {
        match self.badges.get_mut(&id) {
            Some(badge) if !badge.earned => {
                badge.earned = true;
                badge.earned_date = Some(today);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: BadgeId) -> Option<&Badge> {
        self.badges.get(&id)
    }

    pub fn is_earned(&self, id: BadgeId) -> bool {
        self.badges.get(&id).map_or(false, |b| b.earned)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Badge> {
        self.badges.values()
    }

    pub fn earned(&self) -> Vec<&Badge> {
        self.badges.values().filter(|b| b.earned).collect()
    }

    pub fn unearned(&self) -> Vec<&Badge> {
        self.badges.values().filter(|b| !b.earned).collect()
    }

    pub fn earned_count(&self) -> usize {
        self.badges.values().filter(|b| b.earned).count()
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    /// Add catalog entries missing from an older snapshot
    pub(crate) fn fill_catalog(&mut self) {
        for kind in BadgeKind::ALL {
            self.badges.entry(kind.id()).or_insert_with(|| Badge::new(kind));
        }
    }
}

impl Default for BadgeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn award_is_idempotent() {
        let mut registry = BadgeRegistry::new();
        assert!(registry.award(2, day(1)));
        assert!(!registry.award(2, day(9)));

        let badge = registry.get(2).unwrap();
        assert!(badge.earned);
        assert_eq!(badge.earned_date, Some(day(1)));
        assert_eq!(registry.earned_count(), 1);
    }

    #[test]
    fn unknown_badge_is_ignored() {
        let mut registry = BadgeRegistry::new();
        assert!(!registry.award(42, day(1)));
        assert_eq!(registry.earned_count(), 0);
        assert_eq!(registry.unearned().len(), 7);
    }

    #[test]
    fn catalog_ids_round_trip() {
        for kind in BadgeKind::ALL {
            assert_eq!(BadgeKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(BadgeKind::from_id(0), None);
    }

    #[test]
    fn fill_catalog_restores_missing_entries() {
        let mut registry: BadgeRegistry = serde_json::from_str("{}").unwrap();
        assert!(registry.is_empty());
        registry.fill_catalog();
        assert_eq!(registry.len(), BadgeKind::ALL.len());
    }
}
