//! # Puppeteers
//!
//! A puppeteer sits between a multi-agent environment and a scripted puppet
//! policy. Each step it looks at the observation and its carried state,
//! picks the goal the puppet should pursue, and forwards the timestep with
//! that goal under the `"GOAL"` observation key.
//!
//! ## Core Components
//!
//! - [`Puppeteer`]: `(TimeStep, State) -> (TimeStep, State)`, side-effect free
//! - [`cleanup`]: alternating and conditional cleaners for Clean Up
//! - [`two_resource`]: a GRIM strategy for two-resource *_in_the_matrix
//! - [`AnyPuppeteer`] / [`PuppeteerConfig`]: runtime selection from JSON
//! - [`Puppetry`] / [`run_episode()`]: caller-side state threading
//!
//! ## Example
//!
//! ```rust
//! use puppeteer_bots::{Puppeteer, PuppeteerConfig};
//! use puppeteer_core::{goal_of, Observation, TimeStep};
//!
//! let puppeteer = PuppeteerConfig::from_json(r#"{"puppeteer": "alternate_clean_first"}"#)
//!     .unwrap()
//!     .build();
//!
//! let timestep = TimeStep::restart(Observation::new());
//! let (puppet_timestep, state) = puppeteer.step(&timestep, puppeteer.initial_state()).unwrap();
//!
//! // CLEAN is goal 0 of the Clean Up vocabulary.
//! assert_eq!(goal_of(&puppet_timestep).unwrap().one_hot_index(), Some(0));
//! # let _ = state;
//! ```
//!
//! ## State Ownership
//!
//! ```text
//!   episode start ──▶ initial_state() ──▶ s₀
//!   each step:        step(tₖ, sₖ) ──▶ (tₖ + GOAL, sₖ₊₁)
//!   first-step tₖ:    sₖ is ignored; initial_state() is used instead
//! ```
//!
//! The caller owns every state value. Puppeteers are `Send + Sync` and hold
//! only configuration, so one instance can serve many concurrent episodes.

pub mod any;
pub mod cleanup;
pub mod config;
pub mod episode;
mod error;
pub mod fields;
pub mod puppeteer;
pub mod two_resource;

#[cfg(test)]
mod testing;

pub use any::{AnyPuppeteer, AnyState};
pub use cleanup::{
    AlternateCleanFirst, AlternateEatFirst, CleanupGoal, ConditionalCleaner,
    ConditionalCleanerState, StepCount,
};
pub use config::PuppeteerConfig;
pub use episode::{run_episode, Episode, GoalTrace, Puppetry};
pub use error::PuppeteerError;
pub use puppeteer::Puppeteer;
pub use two_resource::{GrimTwoResource, PartnerDefections, TwoResourceGoal};
