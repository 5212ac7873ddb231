use std::collections::HashMap;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::constants::DEFAULT_SCHEDULE_ATTEMPTS;
use crate::error::SimError;

/// An unordered pair of distinct teams.
///
/// The pair is stored with the lexicographically smaller id first, so
/// `Matchup::new(a, b)` and `Matchup::new(b, a)` hash and compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Matchup {
    pub team1: String,
    pub team2: String,
}

impl Matchup {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Matchup { team1: a, team2: b }
        } else {
            Matchup { team1: b, team2: a }
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }
}

/// A season schedule: how many games each matchup plays.
///
/// Invariant: for every team, the counts over all matchups containing it
/// sum to exactly the `games_per_team` the schedule was generated for.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    games: HashMap<Matchup, u32>,
}

impl Schedule {
    pub fn games(&self) -> &HashMap<Matchup, u32> {
        &self.games
    }

    pub fn total_games(&self) -> u32 {
        self.games.values().sum()
    }

    /// Total games scheduled for one team.
    pub fn games_for(&self, team: &str) -> u32 {
        self.games
            .iter()
            .filter(|(m, _)| m.involves(team))
            .map(|(_, &count)| count)
            .sum()
    }

    /// Matchups in a stable order, for reproducible iteration.
    pub fn sorted_matchups(&self) -> Vec<(&Matchup, u32)> {
        let mut matchups: Vec<_> = self.games.iter().map(|(m, &c)| (m, c)).collect();
        matchups.sort_by(|a, b| a.0.cmp(b.0));
        matchups
    }

    /// Build a schedule from explicit matchup counts. The caller is
    /// responsible for balance; the generator is the usual source.
    pub fn from_counts(counts: HashMap<Matchup, u32>) -> Self {
        Schedule { games: counts }
    }
}

/// Tuning knobs for the schedule generator.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleConfig {
    /// Retry budget before the generator gives up.
    pub max_attempts: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            max_attempts: DEFAULT_SCHEDULE_ATTEMPTS,
        }
    }
}

/// Build a schedule where every team plays exactly `games_per_team` games,
/// using only pairwise matchups.
///
/// Randomized greedy with restart: each attempt shuffles the candidate
/// matchups and scans them repeatedly, assigning one game wherever both
/// teams still have open slots. An attempt that deadlocks short of the
/// target is discarded and retried with a fresh shuffle; the budget is
/// bounded by `config.max_attempts`.
///
/// Fails fast with [`SimError::SchedulingInfeasible`] when
/// `games_per_team * teams.len()` is odd, since each game consumes one
/// slot from two teams.
pub fn generate_schedule<R: Rng>(
    teams: &[String],
    games_per_team: u32,
    config: &ScheduleConfig,
    rng: &mut R,
) -> Result<Schedule, SimError> {
    let total_slots = u64::from(games_per_team) * teams.len() as u64;
    if total_slots % 2 != 0 {
        return Err(SimError::SchedulingInfeasible(format!(
            "{} teams x {} games leaves an odd number of game slots",
            teams.len(),
            games_per_team
        )));
    }
    let total_games = total_slots / 2;
    if total_games == 0 {
        return Ok(Schedule::default());
    }

    // The fixed candidate set: every unordered pair, by team index.
    let pairs: Vec<(usize, usize)> = (0..teams.len())
        .flat_map(|i| ((i + 1)..teams.len()).map(move |j| (i, j)))
        .collect();
    let mut order: Vec<usize> = (0..pairs.len()).collect();

    for attempt in 1..=config.max_attempts {
        order.shuffle(rng);

        let mut pair_counts = vec![0u32; pairs.len()];
        let mut team_games = vec![0u32; teams.len()];
        let mut assigned: u64 = 0;

        'attempt: while assigned < total_games {
            let mut progress = false;
            for &k in &order {
                let (i, j) = pairs[k];
                if team_games[i] < games_per_team && team_games[j] < games_per_team {
                    pair_counts[k] += 1;
                    team_games[i] += 1;
                    team_games[j] += 1;
                    assigned += 1;
                    progress = true;
                }
                if assigned >= total_games {
                    break 'attempt;
                }
            }
            if !progress {
                break;
            }
        }

        if team_games.iter().all(|&g| g == games_per_team) {
            debug!(
                "schedule balanced on attempt {} ({} games over {} matchups)",
                attempt,
                assigned,
                pair_counts.iter().filter(|&&c| c > 0).count()
            );
            let games = pairs
                .iter()
                .zip(&pair_counts)
                .filter(|(_, &count)| count > 0)
                .map(|(&(i, j), &count)| (Matchup::new(teams[i].clone(), teams[j].clone()), count))
                .collect();
            return Ok(Schedule { games });
        }
    }

    warn!(
        "schedule generation exhausted {} attempts for {} teams x {} games",
        config.max_attempts,
        teams.len(),
        games_per_team
    );
    Err(SimError::SchedulingInfeasible(format!(
        "no exact schedule within {} attempts",
        config.max_attempts
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn team_names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Team{}", i)).collect()
    }

    #[test]
    fn test_matchup_is_orderless() {
        assert_eq!(Matchup::new("B", "A"), Matchup::new("A", "B"));
        assert_eq!(Matchup::new("B", "A").team1, "A");
    }

    #[test]
    fn test_every_team_plays_exact_count() {
        let teams = team_names(6);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let schedule =
            generate_schedule(&teams, 10, &ScheduleConfig::default(), &mut rng).unwrap();

        for team in &teams {
            assert_eq!(schedule.games_for(team), 10);
        }
        assert_eq!(schedule.total_games(), 6 * 10 / 2);
    }

    #[test]
    fn test_two_teams_share_all_games() {
        let teams = team_names(2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let schedule = generate_schedule(&teams, 8, &ScheduleConfig::default(), &mut rng).unwrap();

        assert_eq!(schedule.games().len(), 1);
        assert_eq!(schedule.games_for("Team0"), 8);
        assert_eq!(schedule.games_for("Team1"), 8);
    }

    #[test]
    fn test_odd_slot_parity_fails_fast() {
        let teams = team_names(3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = generate_schedule(&teams, 3, &ScheduleConfig::default(), &mut rng);
        assert!(matches!(result, Err(SimError::SchedulingInfeasible(_))));
    }

    #[test]
    fn test_attempt_budget_exhaustion() {
        // One team can never play anyone; every attempt deadlocks at zero.
        let teams = team_names(1);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = generate_schedule(&teams, 2, &ScheduleConfig { max_attempts: 5 }, &mut rng);
        assert!(matches!(result, Err(SimError::SchedulingInfeasible(_))));
    }

    #[test]
    fn test_zero_games_is_trivially_balanced() {
        let teams = team_names(4);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let schedule = generate_schedule(&teams, 0, &ScheduleConfig::default(), &mut rng).unwrap();
        assert_eq!(schedule.total_games(), 0);
    }

    proptest! {
        #[test]
        fn prop_schedule_is_exact_or_infeasible(
            n_teams in 2usize..8,
            games_per_team in 0u32..12,
            seed in any::<u64>(),
        ) {
            let teams = team_names(n_teams);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            match generate_schedule(&teams, games_per_team, &ScheduleConfig::default(), &mut rng) {
                Ok(schedule) => {
                    for team in &teams {
                        prop_assert_eq!(schedule.games_for(team), games_per_team);
                    }
                    prop_assert_eq!(
                        u64::from(schedule.total_games()) * 2,
                        u64::from(games_per_team) * n_teams as u64
                    );
                }
                Err(SimError::SchedulingInfeasible(_)) => {
                    // Acceptable outcome; parity failures always land here.
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }
}
