//! Season Core - league season simulation engine.
//!
//! Builds a balanced round-robin schedule over a set of teams, plays every
//! scheduled matchup through a stochastic scoring model and aggregates the
//! results into a ranked standings table. A goal-attribution variant
//! additionally credits each goal to a scorer and assisting teammates drawn
//! from weighted rosters, producing a play-by-play log per game.
//!
//! The crate performs no I/O: strengths and rosters are passed in by the
//! caller, and all randomness flows through explicit, seedable generators.

pub mod constants;
pub mod error;
pub mod game;
pub mod goals;
pub mod schedule;
pub mod season;
pub mod team;

pub use constants::{BASE_GOAL_RATE, DEFAULT_SCHEDULE_ATTEMPTS, MAX_GOALS, ROSTER_BASE_GOAL_RATE};
pub use error::SimError;
pub use game::{GameModel, GameOutcome, Side};
pub use goals::{
    simulate_game_with_goals, simulate_game_with_goals_seeded, AttributedGame, GoalEvent,
    PeriodClock,
};
pub use schedule::{generate_schedule, Matchup, Schedule, ScheduleConfig};
pub use season::{BiggestWin, LeagueState, StandingsRow, TeamSeasonStats};
pub use team::{validate_strength, Player, Roster};
