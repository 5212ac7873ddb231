use std::fmt;

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Serialize, Serializer};

use crate::constants::{
    ASSIST_COUNT_WEIGHTS, BASE_GOAL_RATE, OVERTIME_PERIOD, OVERTIME_WINDOW_SECONDS,
    PERIOD_SECONDS, PERIOD_WEIGHTS,
};
use crate::error::SimError;
use crate::game::{draw_goals, GameOutcome, Side};
use crate::team::{validate_strength, Player};

/// Time into a period, displayed and serialized as `MM:SS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PeriodClock(u16);

impl PeriodClock {
    pub fn from_seconds(seconds: u16) -> Self {
        PeriodClock(seconds)
    }

    pub fn seconds(self) -> u16 {
        self.0
    }
}

impl fmt::Display for PeriodClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for PeriodClock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One goal in the play-by-play log.
#[derive(Clone, Debug, Serialize)]
pub struct GoalEvent {
    pub side: Side,
    pub scorer: String,
    /// Up to two distinct assisting teammates, primary assist first. The
    /// scorer never assists their own goal.
    pub assists: Vec<String>,
    /// 1-3 for regulation, 4 for overtime.
    pub period: u8,
    pub time: PeriodClock,
}

/// A simulated game together with its per-side goal logs.
///
/// Each side's log is chronological; merging the two stays sorted by
/// `(period, time)`.
#[derive(Clone, Debug, Serialize)]
pub struct AttributedGame {
    pub outcome: GameOutcome,
    pub goals_team1: Vec<GoalEvent>,
    pub goals_team2: Vec<GoalEvent>,
}

/// Simulate one game and attribute every goal to a scorer and assists.
///
/// Goal counts come from the capped Poisson model at the basic rate; the
/// blowout/upset layers of [`crate::GameModel`] do not apply here. A level
/// regulation score is settled by a fair coin and exactly one overtime
/// goal for the chosen side, so the returned outcome is never a tie and
/// the logs always reconcile with the final score.
pub fn simulate_game_with_goals<R: Rng>(
    strength1: f64,
    strength2: f64,
    roster1: &[Player],
    roster2: &[Player],
    rng: &mut R,
) -> Result<AttributedGame, SimError> {
    let s1 = validate_strength(strength1)?;
    let s2 = validate_strength(strength2)?;

    let regulation1 = draw_goals(BASE_GOAL_RATE * s1, rng);
    let regulation2 = draw_goals(BASE_GOAL_RATE * s2, rng);

    let overtime_winner = if regulation1 == regulation2 {
        Some(if rng.gen::<bool>() {
            Side::Team1
        } else {
            Side::Team2
        })
    } else {
        None
    };

    let score1 = regulation1 + u8::from(overtime_winner == Some(Side::Team1));
    let score2 = regulation2 + u8::from(overtime_winner == Some(Side::Team2));

    if score1 > 0 && roster1.is_empty() {
        return Err(SimError::InvalidRoster { side: Side::Team1 });
    }
    if score2 > 0 && roster2.is_empty() {
        return Err(SimError::InvalidRoster { side: Side::Team2 });
    }

    let mut goals = Vec::with_capacity(usize::from(score1) + usize::from(score2));
    for _ in 0..regulation1 {
        goals.push(regulation_goal(Side::Team1, roster1, rng));
    }
    for _ in 0..regulation2 {
        goals.push(regulation_goal(Side::Team2, roster2, rng));
    }
    if let Some(side) = overtime_winner {
        let roster = match side {
            Side::Team1 => roster1,
            Side::Team2 => roster2,
        };
        goals.push(overtime_goal(side, roster, rng));
    }

    // One chronological narrative across both teams, then split back out.
    goals.sort_by(|a, b| (a.period, a.time).cmp(&(b.period, b.time)));
    let (goals_team1, goals_team2): (Vec<GoalEvent>, Vec<GoalEvent>) =
        goals.into_iter().partition(|g| g.side == Side::Team1);

    let winner = if score1 > score2 {
        Side::Team1
    } else {
        Side::Team2
    };
    Ok(AttributedGame {
        outcome: GameOutcome {
            score1,
            score2,
            winner,
            is_tie: false,
        },
        goals_team1,
        goals_team2,
    })
}

/// Seedable entry point for one-off attributed simulation.
pub fn simulate_game_with_goals_seeded(
    strength1: f64,
    strength2: f64,
    roster1: &[Player],
    roster2: &[Player],
    seed: Option<u64>,
) -> Result<AttributedGame, SimError> {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    simulate_game_with_goals(strength1, strength2, roster1, roster2, &mut rng)
}

fn regulation_goal<R: Rng>(side: Side, roster: &[Player], rng: &mut R) -> GoalEvent {
    let period_dist = WeightedIndex::new(&PERIOD_WEIGHTS).unwrap();
    let period = period_dist.sample(rng) as u8 + 1;
    let time = PeriodClock::from_seconds(rng.gen_range(0..PERIOD_SECONDS));
    attribute_goal(side, roster, period, time, rng)
}

fn overtime_goal<R: Rng>(side: Side, roster: &[Player], rng: &mut R) -> GoalEvent {
    let time = PeriodClock::from_seconds(rng.gen_range(0..OVERTIME_WINDOW_SECONDS));
    attribute_goal(side, roster, OVERTIME_PERIOD, time, rng)
}

/// Pick a scorer and assists from the roster, weighted by rating.
///
/// Sampling is without replacement over a shrinking pool, so the scorer
/// and prior assisters are excluded automatically; attribution stops
/// early once no eligible teammate remains.
fn attribute_goal<R: Rng>(
    side: Side,
    roster: &[Player],
    period: u8,
    time: PeriodClock,
    rng: &mut R,
) -> GoalEvent {
    let mut pool: Vec<&Player> = roster.iter().collect();
    let scorer = pool.remove(weighted_pick_index(&pool, rng));

    let assist_dist = WeightedIndex::new(&ASSIST_COUNT_WEIGHTS).unwrap();
    let assist_count = assist_dist.sample(rng);

    let mut assists = Vec::with_capacity(assist_count);
    for _ in 0..assist_count {
        if pool.is_empty() {
            break;
        }
        let assister = pool.remove(weighted_pick_index(&pool, rng));
        assists.push(assister.name.clone());
    }

    GoalEvent {
        side,
        scorer: scorer.name.clone(),
        assists,
        period,
        time,
    }
}

/// Weighted pick by player rating, falling back to a uniform pick when
/// the ratings cannot form a distribution (zero or invalid total).
fn weighted_pick_index<R: Rng>(players: &[&Player], rng: &mut R) -> usize {
    match WeightedIndex::new(players.iter().map(|p| p.rating)) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..players.len()),
    }
}
