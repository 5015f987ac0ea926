//! Timesteps: one tick of environment feedback.
//!
//! ```text
//!   restart ──▶ transition ──▶ … ──▶ termination | truncation
//!    First         Mid                     Last
//! ```
//!
//! A [`TimeStep`] is immutable. Puppeteers derive new timesteps from it with
//! [`TimeStep::with_observation`]; the caller's instance is never modified.

use serde::{Deserialize, Serialize};

use crate::observation::Observation;

/// Position of a timestep within its episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    /// First step of an episode; carries no reward.
    First,
    /// Any step between the first and the last.
    Mid,
    /// Final step of an episode.
    Last,
}

/// Step type, reward, discount and observation for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStep {
    step_type: StepType,
    reward: Option<f64>,
    discount: Option<f64>,
    observation: Observation,
}

impl TimeStep {
    /// Create a timestep from its parts.
    pub fn new(
        step_type: StepType,
        reward: Option<f64>,
        discount: Option<f64>,
        observation: Observation,
    ) -> Self {
        Self {
            step_type,
            reward,
            discount,
            observation,
        }
    }

    /// The first timestep of an episode.
    pub fn restart(observation: Observation) -> Self {
        Self::new(StepType::First, None, None, observation)
    }

    /// A mid-episode timestep with discount 1.
    pub fn transition(reward: f64, observation: Observation) -> Self {
        Self::new(StepType::Mid, Some(reward), Some(1.0), observation)
    }

    /// A final timestep that ended the episode (discount 0).
    pub fn termination(reward: f64, observation: Observation) -> Self {
        Self::new(StepType::Last, Some(reward), Some(0.0), observation)
    }

    /// A final timestep cut off by a time limit (discount 1).
    pub fn truncation(reward: f64, observation: Observation) -> Self {
        Self::new(StepType::Last, Some(reward), Some(1.0), observation)
    }

    pub fn step_type(&self) -> StepType {
        self.step_type
    }

    pub fn reward(&self) -> Option<f64> {
        self.reward
    }

    pub fn discount(&self) -> Option<f64> {
        self.discount
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    /// Whether this is the first step of an episode.
    pub fn first(&self) -> bool {
        self.step_type == StepType::First
    }

    pub fn mid(&self) -> bool {
        self.step_type == StepType::Mid
    }

    pub fn last(&self) -> bool {
        self.step_type == StepType::Last
    }

    /// Copy of this timestep with a different observation.
    pub fn with_observation(&self, observation: Observation) -> Self {
        Self {
            step_type: self.step_type,
            reward: self.reward,
            discount: self.discount,
            observation,
        }
    }
}
