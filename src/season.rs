use std::collections::HashMap;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::SimError;
use crate::game::{GameModel, GameOutcome, Side};
use crate::schedule::{generate_schedule, Matchup, Schedule, ScheduleConfig};
use crate::team::validate_strength;

/// The largest-margin win a team has recorded so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BiggestWin {
    pub score_for: u8,
    pub score_against: u8,
    pub opponent: String,
}

impl BiggestWin {
    pub fn margin(&self) -> i32 {
        i32::from(self.score_for) - i32::from(self.score_against)
    }
}

/// Running per-team accumulator for one season.
///
/// Created zeroed at season start and written only by the sequential
/// aggregation fold; read-only once the standings are built.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TeamSeasonStats {
    pub wins: u32,
    pub points: u32,
    pub games_played: u32,
    pub goal_diff: i32,
    pub biggest_win: BiggestWin,
}

impl TeamSeasonStats {
    /// Fold one game into the accumulator from this team's perspective.
    ///
    /// `biggest_win` is replaced only on a win whose margin strictly
    /// exceeds the stored one, so equal margins never overwrite.
    fn record_game(&mut self, score_for: u8, score_against: u8, points: u32, won: bool, opponent: &str) {
        self.games_played += 1;
        self.goal_diff += i32::from(score_for) - i32::from(score_against);
        self.points += points;
        if won {
            self.wins += 1;
            let margin = i32::from(score_for) - i32::from(score_against);
            if margin > self.biggest_win.margin() {
                self.biggest_win = BiggestWin {
                    score_for,
                    score_against,
                    opponent: opponent.to_string(),
                };
            }
        }
    }
}

/// One row of the final standings table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandingsRow {
    pub rank: u32,
    pub team: String,
    pub points: u32,
    pub wins: u32,
    pub goal_diff: i32,
    pub games_played: u32,
    pub biggest_win: BiggestWin,
}

/// League configuration: team strengths, schedule length and the scoring
/// model used for every game.
#[derive(Clone, Debug)]
pub struct LeagueState {
    /// Team id -> strength. Immutable for the duration of a season run.
    pub strengths: HashMap<String, f64>,
    /// Exact number of games every team must play.
    pub games_per_team: u32,
    /// Outcome model applied to every scheduled game.
    pub model: GameModel,
    /// Schedule generator tuning.
    pub schedule_config: ScheduleConfig,
}

impl LeagueState {
    pub fn new(strengths: HashMap<String, f64>, games_per_team: u32) -> Self {
        LeagueState {
            strengths,
            games_per_team,
            model: GameModel::basic(),
            schedule_config: ScheduleConfig::default(),
        }
    }

    /// Replace the outcome model.
    pub fn with_model(mut self, model: GameModel) -> Self {
        self.model = model;
        self
    }

    /// Replace the schedule generator tuning.
    pub fn with_schedule_config(mut self, config: ScheduleConfig) -> Self {
        self.schedule_config = config;
        self
    }

    /// Simulate a full season and return the sorted standings.
    ///
    /// Standings order by points, then wins, then goal differential, then
    /// team id, so the table is fully deterministic for a fixed seed.
    pub fn simulate(&self, seed: Option<u64>) -> Result<Vec<StandingsRow>, SimError> {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut teams: Vec<String> = self.strengths.keys().cloned().collect();
        teams.sort();
        for team in &teams {
            validate_strength(self.strengths[team])?;
        }

        let schedule = generate_schedule(&teams, self.games_per_team, &self.schedule_config, &mut rng)?;
        self.play_schedule(&schedule, &mut rng)
    }

    /// Play out an already-generated schedule.
    ///
    /// Exposed so a caller can replay a fixed schedule; every scheduled
    /// team must exist in the strength map.
    pub fn simulate_schedule(
        &self,
        schedule: &Schedule,
        seed: Option<u64>,
    ) -> Result<Vec<StandingsRow>, SimError> {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        self.play_schedule(schedule, &mut rng)
    }

    fn play_schedule<R: Rng>(
        &self,
        schedule: &Schedule,
        rng: &mut R,
    ) -> Result<Vec<StandingsRow>, SimError> {
        // Matchups iterate in sorted order and each game repetition gets
        // its own seed drawn from the master rng, so a fixed seed yields
        // a fixed season regardless of how the draws are parallelized.
        let mut games: Vec<(&Matchup, u64)> =
            Vec::with_capacity(schedule.total_games() as usize);
        for (matchup, count) in schedule.sorted_matchups() {
            for _ in 0..count {
                games.push((matchup, rng.gen::<u64>()));
            }
        }

        // Game draws are independent; the stats fold below stays sequential.
        let outcomes = games
            .par_iter()
            .map(|&(matchup, game_seed)| {
                let s1 = *self
                    .strengths
                    .get(&matchup.team1)
                    .ok_or_else(|| SimError::UnknownTeam(matchup.team1.clone()))?;
                let s2 = *self
                    .strengths
                    .get(&matchup.team2)
                    .ok_or_else(|| SimError::UnknownTeam(matchup.team2.clone()))?;

                let mut game_rng = ChaCha8Rng::seed_from_u64(game_seed);
                let outcome = self.model.simulate(s1, s2, &mut game_rng)?;
                Ok((matchup, outcome))
            })
            .collect::<Result<Vec<(&Matchup, GameOutcome)>, SimError>>()?;

        let mut stats: HashMap<String, TeamSeasonStats> = self
            .strengths
            .keys()
            .map(|team| (team.clone(), TeamSeasonStats::default()))
            .collect();
        for (matchup, outcome) in &outcomes {
            apply_outcome(&mut stats, matchup, outcome);
        }

        debug!(
            "season complete: {} teams, {} games",
            stats.len(),
            outcomes.len()
        );
        Ok(build_standings(stats))
    }
}

/// Fold one game result into both teams' accumulators.
///
/// A regulation win pays 2 points. A tie pays 1 point to each side plus a
/// bonus point and a win to the effective winner from the tie resolution.
fn apply_outcome(
    stats: &mut HashMap<String, TeamSeasonStats>,
    matchup: &Matchup,
    outcome: &GameOutcome,
) {
    let (points1, points2) = match (outcome.is_tie, outcome.winner) {
        (true, Side::Team1) => (2, 1),
        (true, Side::Team2) => (1, 2),
        (false, Side::Team1) => (2, 0),
        (false, Side::Team2) => (0, 2),
    };

    if let Some(team1) = stats.get_mut(&matchup.team1) {
        team1.record_game(
            outcome.score1,
            outcome.score2,
            points1,
            outcome.winner == Side::Team1,
            &matchup.team2,
        );
    }
    if let Some(team2) = stats.get_mut(&matchup.team2) {
        team2.record_game(
            outcome.score2,
            outcome.score1,
            points2,
            outcome.winner == Side::Team2,
            &matchup.team1,
        );
    }
}

fn build_standings(stats: HashMap<String, TeamSeasonStats>) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = stats
        .into_iter()
        .map(|(team, s)| StandingsRow {
            rank: 0,
            team,
            points: s.points,
            wins: s.wins,
            goal_diff: s.goal_diff,
            games_played: s.games_played,
            biggest_win: s.biggest_win,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.wins.cmp(&a.wins))
            .then(b.goal_diff.cmp(&a.goal_diff))
            .then(a.team.cmp(&b.team))
    });
    for (position, row) in rows.iter_mut().enumerate() {
        row.rank = position as u32 + 1;
    }
    rows
}
