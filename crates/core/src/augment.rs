//! Goal injection.
//!
//! The puppet policy reads its current objective from a reserved
//! observation field. [`puppet_timestep`] produces the timestep forwarded to
//! the puppet: the environment's timestep plus that one field.

use crate::array::Array;
use crate::goal::Goal;
use crate::observation::ObsValue;
use crate::timestep::TimeStep;

/// Observation key holding the goal vector.
pub const GOAL_OBSERVATION_KEY: &str = "GOAL";

/// Return `timestep` with `goal` added under [`GOAL_OBSERVATION_KEY`].
///
/// The input is left untouched; an existing goal field is replaced in the
/// returned copy only.
pub fn puppet_timestep(timestep: &TimeStep, goal: &Goal) -> TimeStep {
    let observation = timestep
        .observation()
        .with_entry(GOAL_OBSERVATION_KEY, goal.clone());
    timestep.with_observation(observation)
}

/// The goal field of a puppet timestep, if present.
pub fn goal_of(timestep: &TimeStep) -> Option<&Array> {
    timestep
        .observation()
        .get(GOAL_OBSERVATION_KEY)
        .and_then(ObsValue::as_array)
}
