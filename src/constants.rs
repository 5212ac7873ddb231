/// Expected goals per game for a side of strength 1.0 (hand-tuned strength table)
pub const BASE_GOAL_RATE: f64 = 2.9;

/// Expected-goal rate used when strengths are derived from roster ratings
pub const ROSTER_BASE_GOAL_RATE: f64 = 4.8;

/// Hard cap on goals per side in any simulated game
pub const MAX_GOALS: u8 = 8;

/// Baseline blowout probability before the strength-gap adjustment
pub const BLOWOUT_BASE_CHANCE: f64 = 0.05;

/// Blowout probability gained per unit of strength advantage
pub const BLOWOUT_CHANCE_PER_STRENGTH: f64 = 0.1;

/// Upper bound on the blowout probability
pub const BLOWOUT_CHANCE_CAP: f64 = 0.3;

/// Probability that the weaker side pulls off an upset win
pub const UPSET_CHANCE: f64 = 0.05;

/// Relative weights for a goal having 0, 1 or 2 assists
pub const ASSIST_COUNT_WEIGHTS: [f64; 3] = [0.1, 0.45, 0.45];

/// Relative weights for placing a regulation goal in periods 1-3
pub const PERIOD_WEIGHTS: [f64; 3] = [33.0, 33.0, 34.0];

/// Length of a regulation period in seconds
pub const PERIOD_SECONDS: u16 = 20 * 60;

/// Period number assigned to an overtime goal
pub const OVERTIME_PERIOD: u8 = 4;

/// Overtime goals land within the first five minutes of the extra period
pub const OVERTIME_WINDOW_SECONDS: u16 = 5 * 60;

/// Default retry budget for the schedule generator
pub const DEFAULT_SCHEDULE_ATTEMPTS: u32 = 1000;
