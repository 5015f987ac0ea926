//! Runtime-selected puppeteers.
//!
//! Each concrete puppeteer has its own state type. When the puppeteer is
//! chosen from configuration, callers still need one type to hold, so
//! [`AnyPuppeteer`] wraps the concrete puppeteers and [`AnyState`] wraps
//! their states. Pairing a puppeteer with another puppeteer's state is an
//! error, except on a first step where the incoming state is discarded.

use puppeteer_core::TimeStep;
use serde::{Deserialize, Serialize};

use crate::cleanup::{
    AlternateCleanFirst, AlternateEatFirst, ConditionalCleaner, ConditionalCleanerState,
    StepCount,
};
use crate::puppeteer::Puppeteer;
use crate::two_resource::{GrimTwoResource, PartnerDefections};
use crate::PuppeteerError;

/// State of an [`AnyPuppeteer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyState {
    StepCount(StepCount),
    ConditionalCleaner(ConditionalCleanerState),
    PartnerDefections(PartnerDefections),
}

impl AnyState {
    /// Variant name, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyState::StepCount(_) => "step_count",
            AnyState::ConditionalCleaner(_) => "conditional_cleaner",
            AnyState::PartnerDefections(_) => "partner_defections",
        }
    }
}

/// One of the concrete puppeteers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyPuppeteer {
    AlternateCleanFirst(AlternateCleanFirst),
    AlternateEatFirst(AlternateEatFirst),
    ConditionalCleaner(ConditionalCleaner),
    GrimTwoResource(GrimTwoResource),
}

/// Step `puppeteer` with an unwrapped state, or its initial state if the
/// wrapped state belonged to someone else and this is a first step.
fn step_with<P: Puppeteer>(
    puppeteer: &P,
    timestep: &TimeStep,
    state: Option<P::State>,
    expected: &'static str,
    got: &'static str,
    wrap: fn(P::State) -> AnyState,
) -> Result<(TimeStep, AnyState), PuppeteerError> {
    let state = match state {
        Some(state) => state,
        None if timestep.first() => puppeteer.initial_state(),
        None => return Err(PuppeteerError::StateMismatch { expected, got }),
    };
    let (timestep, next_state) = puppeteer.step(timestep, state)?;
    Ok((timestep, wrap(next_state)))
}

impl Puppeteer for AnyPuppeteer {
    type State = AnyState;

    fn initial_state(&self) -> AnyState {
        match self {
            AnyPuppeteer::AlternateCleanFirst(p) => AnyState::StepCount(p.initial_state()),
            AnyPuppeteer::AlternateEatFirst(p) => AnyState::StepCount(p.initial_state()),
            AnyPuppeteer::ConditionalCleaner(p) => AnyState::ConditionalCleaner(p.initial_state()),
            AnyPuppeteer::GrimTwoResource(p) => AnyState::PartnerDefections(p.initial_state()),
        }
    }

    fn step(
        &self,
        timestep: &TimeStep,
        prev_state: AnyState,
    ) -> Result<(TimeStep, AnyState), PuppeteerError> {
        let got = prev_state.kind();
        match (self, prev_state) {
            (AnyPuppeteer::AlternateCleanFirst(p), state) => {
                let state = match state {
                    AnyState::StepCount(s) => Some(s),
                    _ => None,
                };
                step_with(p, timestep, state, "step_count", got, AnyState::StepCount)
            }
            (AnyPuppeteer::AlternateEatFirst(p), state) => {
                let state = match state {
                    AnyState::StepCount(s) => Some(s),
                    _ => None,
                };
                step_with(p, timestep, state, "step_count", got, AnyState::StepCount)
            }
            (AnyPuppeteer::ConditionalCleaner(p), state) => {
                let state = match state {
                    AnyState::ConditionalCleaner(s) => Some(s),
                    _ => None,
                };
                step_with(
                    p,
                    timestep,
                    state,
                    "conditional_cleaner",
                    got,
                    AnyState::ConditionalCleaner,
                )
            }
            (AnyPuppeteer::GrimTwoResource(p), state) => {
                let state = match state {
                    AnyState::PartnerDefections(s) => Some(s),
                    _ => None,
                };
                step_with(
                    p,
                    timestep,
                    state,
                    "partner_defections",
                    got,
                    AnyState::PartnerDefections,
                )
            }
        }
    }

    fn goal_names(&self) -> &'static [&'static str] {
        match self {
            AnyPuppeteer::AlternateCleanFirst(p) => p.goal_names(),
            AnyPuppeteer::AlternateEatFirst(p) => p.goal_names(),
            AnyPuppeteer::ConditionalCleaner(p) => p.goal_names(),
            AnyPuppeteer::GrimTwoResource(p) => p.goal_names(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AnyPuppeteer::AlternateCleanFirst(p) => p.name(),
            AnyPuppeteer::AlternateEatFirst(p) => p.name(),
            AnyPuppeteer::ConditionalCleaner(p) => p.name(),
            AnyPuppeteer::GrimTwoResource(p) => p.name(),
        }
    }
}

impl From<AlternateCleanFirst> for AnyPuppeteer {
    fn from(p: AlternateCleanFirst) -> Self {
        AnyPuppeteer::AlternateCleanFirst(p)
    }
}

impl From<AlternateEatFirst> for AnyPuppeteer {
    fn from(p: AlternateEatFirst) -> Self {
        AnyPuppeteer::AlternateEatFirst(p)
    }
}

impl From<ConditionalCleaner> for AnyPuppeteer {
    fn from(p: ConditionalCleaner) -> Self {
        AnyPuppeteer::ConditionalCleaner(p)
    }
}

impl From<GrimTwoResource> for AnyPuppeteer {
    fn from(p: GrimTwoResource) -> Self {
        AnyPuppeteer::GrimTwoResource(p)
    }
}
