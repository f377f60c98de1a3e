//! Capture The Flag tracker

use super::{Awards, Seeder};
use crate::data::*;
use crate::store::{StateStore, CTF_STATE_KEY};
use log::{debug, info, warn};

/// Solved challenges in one competition needed for Flag Hunter
pub const FLAG_HUNTER_THRESHOLD: usize = 10;

#[derive(Debug)]
pub struct CtfTracker {
    state: CtfState,
    store: StateStore,
}

impl CtfTracker {
    /// Restore the saved state, or seed competitions and leaderboards
    pub fn load(store: StateStore, seeder: &mut Seeder) -> Self {
        let state = match store.load::<CtfState>(CTF_STATE_KEY) {
            Some(state) => state,
            None => {
                info!("Seeding CTF competitions");
                seeder.ctf_state()
            }
        };
        let tracker = Self { state, store };
        tracker.persist();
        tracker
    }

    pub fn state(&self) -> &CtfState {
        &self.state
    }

    pub fn competition(&self, competition_id: &str) -> Option<&Competition> {
        self.state.competitions.get(competition_id)
    }

    pub fn competitions(&self) -> impl Iterator<Item = &Competition> {
        self.state.competitions.values()
    }

    pub fn leaderboard(&self, competition_id: &str) -> &[Participant] {
        self.state
            .leaderboards
            .get(competition_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn user_points(&self) -> u32 {
        self.state.user_points
    }

    pub fn user_rank(&self) -> u32 {
        self.state.user_rank
    }

    /// Join a competition. Registering twice counts once.
    pub fn register_for_competition(&mut self, competition_id: &str) -> bool {
        let Some(competition) = self.state.competitions.get_mut(competition_id) else {
            debug!("register: unknown competition {}", competition_id);
            return false;
        };
        if competition.user_registered {
            return false;
        }
        competition.user_registered = true;
        competition.participant_count += 1;
        info!("Registered for {}", competition_id);
        self.persist();
        true
    }

    /// Credit a challenge to the player.
    ///
    /// Unknown ids and already solved challenges change nothing. Returns
    /// whether the challenge was newly solved.
    pub fn solve_challenge(&mut self, competition_id: &str, challenge_id: &str, awards: &mut dyn Awards) -> bool {
        let Some(competition) = self.state.competitions.get_mut(competition_id) else {
            debug!("solve: unknown competition {}", competition_id);
            return false;
        };
        let Some(challenge) = competition.challenges.iter_mut().find(|c| c.id == challenge_id) else {
            debug!("solve: unknown challenge {}/{}", competition_id, challenge_id);
            return false;
        };
        if challenge.solved {
            return false;
        }
        challenge.solved = true;
        let points = challenge.points;
        let cleared_web = competition_id == WEB_COMPETITION_ID && competition.all_solved();

        let solved = self
            .state
            .user_solved_challenges
            .entry(competition_id.to_string())
            .or_default();
        solved.push(challenge_id.to_string());
        let solved_here = solved.len();
        self.state.user_points += points;

        let board = self.state.leaderboards.entry(competition_id.to_string()).or_default();
        match board.iter_mut().find(|p| p.id == CURRENT_USER_ID) {
            Some(me) => {
                me.points += points;
                me.solved_count += 1;
            }
            None => board.push(Participant {
                id: CURRENT_USER_ID.to_string(),
                username: CURRENT_USER_NAME.to_string(),
                points,
                solved_count: 1,
                rank: 0,
            }),
        }
        rerank(board);
        self.state.user_rank = rank_of(board, CURRENT_USER_ID).unwrap_or(0);
        info!(
            "Solved {}/{} for {} points, rank {}",
            competition_id, challenge_id, points, self.state.user_rank
        );

        if solved_here >= FLAG_HUNTER_THRESHOLD {
            awards.award(BadgeKind::FlagHunter);
        }
        if self.state.user_rank == 1 {
            awards.award(BadgeKind::CtfChampion);
        }
        if cleared_web {
            awards.award(BadgeKind::WebWarrior);
        }

        self.persist();
        true
    }

    /// Submit a flag. Any non-blank flag for a known challenge is accepted.
    pub fn submit_flag(&mut self, competition_id: &str, challenge_id: &str, flag: &str, awards: &mut dyn Awards) -> bool {
        if flag.trim().is_empty() {
            return false;
        }
        let known = self
            .competition(competition_id)
            .map_or(false, |c| c.challenge(challenge_id).is_some());
        if !known {
            return false;
        }
        self.solve_challenge(competition_id, challenge_id, awards);
        true
    }

    pub fn get_user_solved_challenges(&self, competition_id: &str) -> Vec<String> {
        self.state
            .user_solved_challenges
            .get(competition_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop all progress and seed again
    pub fn reset(&mut self, seeder: &mut Seeder) {
        warn!("Resetting CTF state");
        self.state = seeder.ctf_state();
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(CTF_STATE_KEY, &self.state) {
            warn!("Failed to save CTF state: {:#}", err);
        }
    }
}
