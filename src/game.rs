use std::fmt;

use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use statrs::distribution::Poisson;

use crate::constants::{
    BASE_GOAL_RATE, BLOWOUT_BASE_CHANCE, BLOWOUT_CHANCE_CAP, BLOWOUT_CHANCE_PER_STRENGTH,
    MAX_GOALS, ROSTER_BASE_GOAL_RATE, UPSET_CHANCE,
};
use crate::error::SimError;
use crate::team::validate_strength;

/// Which slot of a matchup a result refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Team1 => write!(f, "team1"),
            Side::Team2 => write!(f, "team2"),
        }
    }
}

/// Final result of a single simulated game.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GameOutcome {
    pub score1: u8,
    pub score2: u8,
    /// The winning slot. For a tie this is the effective winner from the
    /// strength-based resolution; the recorded score stays level.
    pub winner: Side,
    pub is_tie: bool,
}

/// Expected-goal model for a single game.
///
/// Two calibrations exist: [`GameModel::basic`] pairs with the hand-tuned
/// strength table, [`GameModel::roster_derived`] with strengths computed
/// from averaged roster ratings.
#[derive(Clone, Copy, Debug)]
pub struct GameModel {
    /// Expected goals per game for a side of strength 1.0.
    pub base_rate: f64,
}

impl GameModel {
    pub fn basic() -> Self {
        GameModel {
            base_rate: BASE_GOAL_RATE,
        }
    }

    pub fn roster_derived() -> Self {
        GameModel {
            base_rate: ROSTER_BASE_GOAL_RATE,
        }
    }

    /// Simulate one game between sides of the given strengths.
    ///
    /// The blowout and upset layers are checked first and short-circuit
    /// the regulation draw; regulation scores come from independent
    /// Poisson draws capped at [`MAX_GOALS`]. A level regulation score is
    /// a tie whose effective winner is the stronger side, or a coin flip
    /// when strengths are equal.
    pub fn simulate<R: Rng>(
        &self,
        strength1: f64,
        strength2: f64,
        rng: &mut R,
    ) -> Result<GameOutcome, SimError> {
        let s1 = validate_strength(strength1)?;
        let s2 = validate_strength(strength2)?;

        // Blowout: the stronger side runs away with it. The chance grows
        // with side 1's signed advantage, clamped to [0, cap].
        let blowout_chance = (BLOWOUT_BASE_CHANCE + BLOWOUT_CHANCE_PER_STRENGTH * (s1 - s2))
            .clamp(0.0, BLOWOUT_CHANCE_CAP);
        if rng.gen::<f64>() < blowout_chance {
            let low = rng.gen_range(0..=2u8);
            let outcome = if s1 > s2 {
                GameOutcome {
                    score1: MAX_GOALS,
                    score2: low,
                    winner: Side::Team1,
                    is_tie: false,
                }
            } else {
                GameOutcome {
                    score1: low,
                    score2: MAX_GOALS,
                    winner: Side::Team2,
                    is_tie: false,
                }
            };
            return Ok(outcome);
        }

        // Upset: the strictly weaker side steals one.
        if s1 < s2 && rng.gen::<f64>() < UPSET_CHANCE {
            return Ok(GameOutcome {
                score1: rng.gen_range(4..=5u8),
                score2: rng.gen_range(0..=2u8),
                winner: Side::Team1,
                is_tie: false,
            });
        }
        if s2 < s1 && rng.gen::<f64>() < UPSET_CHANCE {
            return Ok(GameOutcome {
                score1: rng.gen_range(0..=2u8),
                score2: rng.gen_range(4..=5u8),
                winner: Side::Team2,
                is_tie: false,
            });
        }

        let score1 = draw_goals(self.base_rate * s1, rng);
        let score2 = draw_goals(self.base_rate * s2, rng);

        if score1 == score2 {
            let winner = if s1 > s2 {
                Side::Team1
            } else if s2 > s1 {
                Side::Team2
            } else if rng.gen::<bool>() {
                Side::Team1
            } else {
                Side::Team2
            };
            return Ok(GameOutcome {
                score1,
                score2,
                winner,
                is_tie: true,
            });
        }

        let winner = if score1 > score2 {
            Side::Team1
        } else {
            Side::Team2
        };
        Ok(GameOutcome {
            score1,
            score2,
            winner,
            is_tie: false,
        })
    }

    /// Seedable entry point for one-off game simulation.
    pub fn simulate_seeded(
        &self,
        strength1: f64,
        strength2: f64,
        seed: Option<u64>,
    ) -> Result<GameOutcome, SimError> {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        self.simulate(strength1, strength2, &mut rng)
    }
}

/// Draw a capped Poisson goal count for one side.
///
/// A non-positive mean cannot parameterize the distribution and yields
/// zero goals directly.
pub(crate) fn draw_goals<R: Rng>(mean: f64, rng: &mut R) -> u8 {
    if mean <= 0.0 {
        return 0;
    }
    match Poisson::new(mean) {
        Ok(dist) => (dist.sample(rng) as u8).min(MAX_GOALS),
        Err(_) => 0,
    }
}
