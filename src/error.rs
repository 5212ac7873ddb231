use thiserror::Error;

use crate::game::Side;

/// Errors raised by the simulation core.
///
/// Every variant is fatal to the operation that raised it; no partial
/// season result is returned on failure.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    /// A strength value was negative or non-finite.
    #[error("invalid strength {0}: must be finite and non-negative")]
    InvalidStrength(f64),

    /// The requested schedule cannot balance, or the retry budget ran out.
    #[error("could not generate a fair schedule: {0}")]
    SchedulingInfeasible(String),

    /// A scheduled team id is missing from the strength map.
    #[error("unknown team {0:?}")]
    UnknownTeam(String),

    /// A side that must score has no players to attribute goals to.
    #[error("empty roster for {side}")]
    InvalidRoster { side: Side },
}
