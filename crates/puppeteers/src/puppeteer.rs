//! Puppeteers: (TimeStep, State) → (TimeStep, State) mappings.
//!
//! A puppeteer decides which goal a puppet should pursue and forwards the
//! environment's timestep with that goal attached. All per-episode memory
//! lives in the state value the caller threads through `step`; the
//! puppeteer itself holds only immutable configuration.
//!
//! # Compositional Design
//!
//! ```text
//!              ┌────────────┐
//!  TimeStep ──▶│            │──▶ TimeStep + GOAL ──▶ puppet
//!              │ Puppeteer  │
//!  State ─────▶│            │──▶ State'
//!              └────────────┘
//! ```

use std::fmt;

use puppeteer_core::TimeStep;

use crate::PuppeteerError;

/// A goal-selecting state machine in front of a puppet policy.
///
/// Both methods must be free of side effects. Implementors hold no mutable
/// fields; anything that must survive to the next call goes in `State`.
pub trait Puppeteer: Send + Sync {
    /// Per-episode state carried between calls by the caller.
    type State: Clone + fmt::Debug + PartialEq + Send;

    /// The state to use at the start of an episode.
    fn initial_state(&self) -> Self::State;

    /// Advance one step.
    ///
    /// Returns the timestep to forward to the puppet and the state for the
    /// next call. When `timestep.first()`, `prev_state` is ignored and
    /// [`initial_state`](Puppeteer::initial_state) is used instead.
    fn step(
        &self,
        timestep: &TimeStep,
        prev_state: Self::State,
    ) -> Result<(TimeStep, Self::State), PuppeteerError>;

    /// Names of the goals this puppeteer emits, in one-hot index order.
    fn goal_names(&self) -> &'static [&'static str];

    /// Name of this puppeteer for logging.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// `prev_state`, or a fresh initial state at an episode boundary.
    fn resume(&self, timestep: &TimeStep, prev_state: Self::State) -> Self::State {
        if timestep.first() {
            self.initial_state()
        } else {
            prev_state
        }
    }
}

impl<P: Puppeteer + ?Sized> Puppeteer for &P {
    type State = P::State;

    fn initial_state(&self) -> Self::State {
        (**self).initial_state()
    }

    fn step(
        &self,
        timestep: &TimeStep,
        prev_state: Self::State,
    ) -> Result<(TimeStep, Self::State), PuppeteerError> {
        (**self).step(timestep, prev_state)
    }

    fn goal_names(&self) -> &'static [&'static str] {
        (**self).goal_names()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puppeteer_core::{puppet_timestep, Dtype, Observation, TypedGoals};

    use crate::cleanup::CleanupGoal;

    /// Emits CLEAN on even steps and EAT on odd ones.
    struct Parity;

    impl Puppeteer for Parity {
        type State = u64;

        fn initial_state(&self) -> u64 {
            0
        }

        fn step(&self, timestep: &TimeStep, prev_state: u64) -> Result<(TimeStep, u64), PuppeteerError> {
            let count = self.resume(timestep, prev_state);
            let goals = TypedGoals::<CleanupGoal>::new(Dtype::Int32);
            let goal = if count % 2 == 0 {
                CleanupGoal::Clean
            } else {
                CleanupGoal::Eat
            };
            Ok((puppet_timestep(timestep, goals.goal(goal)), count + 1))
        }

        fn goal_names(&self) -> &'static [&'static str] {
            &["CLEAN", "EAT"]
        }

        fn name(&self) -> &'static str {
            "Parity"
        }
    }

    #[test]
    fn test_resume_resets_on_first() {
        let first = TimeStep::restart(Observation::new());
        let mid = TimeStep::transition(0.0, Observation::new());

        assert_eq!(Parity.resume(&first, 17), 0);
        assert_eq!(Parity.resume(&mid, 17), 17);
    }

    #[test]
    fn test_reference_forwards() {
        let puppeteer = &Parity;
        let mid = TimeStep::transition(0.0, Observation::new());

        let (_, next) = puppeteer.step(&mid, 4).unwrap();
        assert_eq!(next, 5);
        assert_eq!(Puppeteer::name(&puppeteer), "Parity");
        assert_eq!(puppeteer.goal_names(), &["CLEAN", "EAT"]);
    }
}
