//! Capture The Flag competitions, challenges and standings

use super::{Difficulty, Ranked};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Competition whose full clear earns the Web Warrior badge
pub const WEB_COMPETITION_ID: &str = "web-warriors";

/// A single CTF challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub points: u32,
    pub difficulty: Difficulty,
    pub solved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Challenge {
    pub fn new(id: &str, title: &str, description: &str, category: &str, points: u32, difficulty: Difficulty) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            points,
            difficulty,
            solved: false,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

/// A CTF event; `active` is a stored fact, not derived from the clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub challenges: Vec<Challenge>,
    pub participant_count: u32,
    pub user_registered: bool,
}

impl Competition {
    pub fn challenge(&self, challenge_id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == challenge_id)
    }

    pub fn all_solved(&self) -> bool {
        !self.challenges.is_empty() && self.challenges.iter().all(|c| c.solved)
    }

    pub fn total_points(&self) -> u32 {
        self.challenges.iter().map(|c| c.points).sum()
    }

    /// Distinct categories in challenge order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for challenge in &self.challenges {
            if !seen.contains(&challenge.category.as_str()) {
                seen.push(&challenge.category);
            }
        }
        seen
    }

    /// Challenges matching `query`, in the order it asks for
    pub fn query(&self, query: &ChallengeQuery) -> Vec<&Challenge> {
        let search = query.search.trim().to_lowercase();
        let mut hits: Vec<&Challenge> = self
            .challenges
            .iter()
            .filter(|c| {
                search.is_empty()
                    || c.title.to_lowercase().contains(&search)
                    || c.description.to_lowercase().contains(&search)
            })
            .filter(|c| query.category.as_deref().map_or(true, |cat| c.category == cat))
            .filter(|c| query.difficulty.map_or(true, |d| c.difficulty == d))
            .collect();

        match query.sort_by {
            SortKey::Points => hits.sort_by_key(|c| c.points),
            SortKey::Difficulty => hits.sort_by_key(|c| c.difficulty),
        }
        if query.order == SortOrder::Descending {
            hits.reverse();
        }
        hits
    }
}

/// Field challenge lists are sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Points,
    Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Search, filter and sort options for a challenge list
#[derive(Debug, Clone, Default)]
pub struct ChallengeQuery {
    pub search: String,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

impl ChallengeQuery {
    /// Selecting the active key again flips the order; a new key starts descending
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_by == key {
            self.order = match self.order {
                SortOrder::Ascending => SortOrder::Descending,
                SortOrder::Descending => SortOrder::Ascending,
            };
        } else {
            self.sort_by = key;
            self.order = SortOrder::Descending;
        }
    }
}

/// One row of a competition leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub username: String,
    pub points: u32,
    pub solved_count: u32,
    pub rank: u32,
}

impl Ranked for Participant {
    fn id(&self) -> &str {
        &self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn score(&self) -> u64 {
        u64::from(self.points)
    }

    fn rank(&self) -> u32 {
        self.rank
    }

    fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
    }
}

/// Everything the CTF tracker persists under one key
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtfState {
    pub competitions: BTreeMap<String, Competition>,
    pub leaderboards: BTreeMap<String, Vec<Participant>>,
    pub user_solved_challenges: BTreeMap<String, Vec<String>>,
    pub user_points: u32,
    /// 0 until the player appears on some leaderboard
    pub user_rank: u32,
}
