use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A rostered player with a relative selection weight.
///
/// `rating` drives the weighted scorer/assist sampling. It is a relative
/// weight, not a probability mass, so ratings need not sum to 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub position: String,
    pub rating: f64,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, position: impl Into<String>, rating: f64) -> Self {
        Player {
            id,
            name: name.into(),
            position: position.into(),
            rating,
        }
    }
}

/// An ordered team roster, as supplied by the strength model.
pub type Roster = Vec<Player>;

/// Check that a strength value is usable by the scoring model.
///
/// Strength is an open scalar with no intrinsic unit; the core only
/// rejects values the Poisson model cannot digest.
pub fn validate_strength(strength: f64) -> Result<f64, SimError> {
    if !strength.is_finite() || strength < 0.0 {
        return Err(SimError::InvalidStrength(strength));
    }
    Ok(strength)
}
