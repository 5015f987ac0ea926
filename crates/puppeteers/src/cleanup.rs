//! Clean Up puppeteers.
//!
//! In Clean Up, apples only grow while the river is clean, so agents trade
//! off cleaning (a public good) against eating. These puppeteers pick one of
//! two goals:
//!
//! | Puppeteer | State | Behavior |
//! |---|---|---|
//! | [`AlternateCleanFirst`] | [`StepCount`] | CLEAN, EAT, CLEAN, EAT in 250-step windows |
//! | [`AlternateEatFirst`] | [`StepCount`] | EAT, CLEAN, EAT, CLEAN in 250-step windows |
//! | [`ConditionalCleaner`] | [`ConditionalCleanerState`] | cleans for 100 steps whenever enough others clean |

use std::sync::LazyLock;

use puppeteer_core::{puppet_timestep, Dtype, GoalVocabulary, TimeStep, TypedGoals};
use serde::{Deserialize, Serialize};

use crate::fields;
use crate::puppeteer::Puppeteer;
use crate::PuppeteerError;

/// Action code logged when an agent fires its cleaning beam.
pub const CLEAN_ACTION: f64 = 8.0;

/// Agents whose vertical position is below this are near the river.
pub const RIVER_BOUNDARY: f64 = 9.0;

/// Length of each alternation window, in steps.
pub const WINDOW: u64 = 250;

/// Steps of cleaning committed to after each trigger.
pub const CLEAN_COMMITMENT: u64 = 100;

/// Goals for Clean Up puppets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleanupGoal {
    Clean,
    Eat,
}

impl GoalVocabulary for CleanupGoal {
    const ALL: &'static [Self] = &[CleanupGoal::Clean, CleanupGoal::Eat];
    const NAMES: &'static [&'static str] = &["CLEAN", "EAT"];

    fn index(self) -> usize {
        self as usize
    }
}

static CLEANUP_GOALS: LazyLock<TypedGoals<CleanupGoal>> =
    LazyLock::new(|| TypedGoals::new(Dtype::Float64));

/// The Clean Up goal vectors (`f64` elements).
pub fn cleanup_goals() -> &'static TypedGoals<CleanupGoal> {
    &CLEANUP_GOALS
}

/// Steps elapsed in the current episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepCount(pub u64);

// ============================================================================
// Alternators
// ============================================================================

/// Goal for `step_count` when windows alternate starting with `first`.
///
/// The fourth window is open-ended.
fn alternating(step_count: u64, first: CleanupGoal, second: CleanupGoal) -> CleanupGoal {
    let window = (step_count / WINDOW).min(3);
    if window % 2 == 0 {
        first
    } else {
        second
    }
}

fn step_alternator<P: Puppeteer<State = StepCount>>(
    puppeteer: &P,
    timestep: &TimeStep,
    prev_state: StepCount,
    goal_for: fn(u64) -> CleanupGoal,
) -> (TimeStep, StepCount) {
    let StepCount(step_count) = puppeteer.resume(timestep, prev_state);
    let goal = goal_for(step_count);
    (
        puppet_timestep(timestep, cleanup_goals().goal(goal)),
        StepCount(step_count.saturating_add(1)),
    )
}

/// Alternates cleaning and eating goals, starting with cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlternateCleanFirst;

impl AlternateCleanFirst {
    /// The goal emitted at `step_count`.
    pub fn goal_for(step_count: u64) -> CleanupGoal {
        alternating(step_count, CleanupGoal::Clean, CleanupGoal::Eat)
    }
}

impl Puppeteer for AlternateCleanFirst {
    type State = StepCount;

    fn initial_state(&self) -> StepCount {
        StepCount(0)
    }

    fn step(
        &self,
        timestep: &TimeStep,
        prev_state: StepCount,
    ) -> Result<(TimeStep, StepCount), PuppeteerError> {
        Ok(step_alternator(self, timestep, prev_state, Self::goal_for))
    }

    fn goal_names(&self) -> &'static [&'static str] {
        CleanupGoal::NAMES
    }

    fn name(&self) -> &'static str {
        "AlternateCleanFirst"
    }
}

/// Alternates cleaning and eating goals, starting with eating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlternateEatFirst;

impl AlternateEatFirst {
    /// The goal emitted at `step_count`.
    pub fn goal_for(step_count: u64) -> CleanupGoal {
        alternating(step_count, CleanupGoal::Eat, CleanupGoal::Clean)
    }
}

impl Puppeteer for AlternateEatFirst {
    type State = StepCount;

    fn initial_state(&self) -> StepCount {
        StepCount(0)
    }

    fn step(
        &self,
        timestep: &TimeStep,
        prev_state: StepCount,
    ) -> Result<(TimeStep, StepCount), PuppeteerError> {
        Ok(step_alternator(self, timestep, prev_state, Self::goal_for))
    }

    fn goal_names(&self) -> &'static [&'static str] {
        CleanupGoal::NAMES
    }

    fn name(&self) -> &'static str {
        "AlternateEatFirst"
    }
}

// ============================================================================
// Conditional Cleaner
// ============================================================================

/// State of a [`ConditionalCleaner`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalCleanerState {
    /// Steps elapsed in the episode.
    pub step_count: u64,
    /// Clean while `step_count < clean_until`.
    pub clean_until: u64,
    /// Which agents were cleaning on the previous step. `None` before the
    /// first observation of the episode.
    pub prev_cleaning: Option<Vec<bool>>,
}

/// Cleanup puppeteer for a reciprocating agent.
///
/// Whenever at least `threshold` other agents near the river were seen
/// cleaning on this step or the previous one, commits to cleaning for the
/// next [`CLEAN_COMMITMENT`] steps. Eats otherwise.
///
/// Requires `agent_slot`, `global.actions` and `global.observations.POSITION`
/// in the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalCleaner {
    threshold: u32,
}

impl ConditionalCleaner {
    /// Create a cleaner triggered by `threshold` other cleaners.
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Puppeteer for ConditionalCleaner {
    type State = ConditionalCleanerState;

    fn initial_state(&self) -> ConditionalCleanerState {
        ConditionalCleanerState::default()
    }

    fn step(
        &self,
        timestep: &TimeStep,
        prev_state: ConditionalCleanerState,
    ) -> Result<(TimeStep, ConditionalCleanerState), PuppeteerError> {
        let ConditionalCleanerState {
            step_count,
            mut clean_until,
            prev_cleaning,
        } = self.resume(timestep, prev_state);
        let observation = timestep.observation();

        let actions = fields::vector_at_least(observation, fields::ACTIONS, 0)?;
        let num_agents = actions.len();
        let agent_slot = fields::vector_of_len(observation, fields::AGENT_SLOT, num_agents)?;
        let positions = fields::matrix(observation, fields::POSITION, num_agents, 2)?;

        let cleaning: Vec<bool> = (0..num_agents)
            .map(|i| actions.value_at(i) == Some(CLEAN_ACTION))
            .collect();
        let prev_cleaning = prev_cleaning.unwrap_or_else(|| cleaning.clone());
        if prev_cleaning.len() != num_agents {
            return Err(fields::mismatch(
                fields::ACTIONS,
                format!("vector of length {}", prev_cleaning.len()),
                actions,
            )
            .into());
        }

        let other_cleaners = (0..num_agents)
            .filter(|&i| {
                let smooth_cleaning = cleaning[i] || prev_cleaning[i];
                let not_me = !agent_slot.is_nonzero(i);
                let near_river = positions
                    .get(&[i, 1])
                    .is_some_and(|y| y < RIVER_BOUNDARY);
                smooth_cleaning && not_me && near_river
            })
            .count();

        if other_cleaners >= self.threshold as usize {
            clean_until = step_count.saturating_add(CLEAN_COMMITMENT);
        }

        let goal = if step_count < clean_until {
            CleanupGoal::Clean
        } else {
            CleanupGoal::Eat
        };

        let next_state = ConditionalCleanerState {
            step_count: step_count.saturating_add(1),
            clean_until,
            prev_cleaning: Some(cleaning),
        };
        Ok((puppet_timestep(timestep, cleanup_goals().goal(goal)), next_state))
    }

    fn goal_names(&self) -> &'static [&'static str] {
        CleanupGoal::NAMES
    }

    fn name(&self) -> &'static str {
        "ConditionalCleaner"
    }
}
