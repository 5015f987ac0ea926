//! # Puppeteer Core
//!
//! Data model shared by every puppeteer:
//!
//! - **Arrays & shapes**: immutable typed numeric arrays with shared storage
//! - **Observations**: ordered field maps, possibly nested
//! - **Timesteps**: step type, reward, discount and observation
//! - **Goals**: one-hot goal vocabularies, by name or by enum
//! - **Augmentation**: adding the goal field to a timestep
//!
//! ## Data Flow
//!
//! ```text
//!   environment ──▶ TimeStep ──▶ puppeteer ──▶ TimeStep + "GOAL" ──▶ puppet
//! ```
//!
//! Nothing here mutates a value after construction. Deriving a new
//! observation shares every untouched array with the original.

pub mod array;
pub mod augment;
pub mod error;
pub mod goal;
pub mod observation;
pub mod shape;
pub mod timestep;

// Re-export key types at crate root for convenience
pub use array::{Array, Buffer, Element};
pub use augment::{goal_of, puppet_timestep, GOAL_OBSERVATION_KEY};
pub use error::CoreError;
pub use goal::{
    puppet_goals, puppet_goals_default, Goal, GoalSet, GoalVocabulary, TypedGoals, GOAL_DTYPE,
};
pub use observation::{ObsValue, Observation};
pub use shape::{Dtype, Shape};
pub use timestep::{StepType, TimeStep};
