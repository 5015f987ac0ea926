//! Episodes: drive a puppeteer through a stream of timesteps.
//!
//! Puppeteers are pure; somebody still has to hold the state between calls.
//! [`Puppetry`] is that caller: it keeps the per-episode state, resets it at
//! episode boundaries, and records which goal was emitted at every step.
//!
//! ```text
//!    env ──TimeStep──▶ ┌──────────┐ ──TimeStep + GOAL──▶ puppet
//!                      │ Puppetry │
//!                      │  state   │◀─┐
//!                      └──────────┘  │ next state
//!                            └───────┘
//! ```

use puppeteer_core::{goal_of, Array, TimeStep};

use crate::puppeteer::Puppeteer;
use crate::PuppeteerError;

/// The goal index emitted at each step of an episode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalTrace {
    goals: Vec<usize>,
}

impl GoalTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the goal for one step.
    pub fn push(&mut self, goal: usize) {
        self.goals.push(goal);
    }

    /// Goal indices in step order.
    pub fn goals(&self) -> &[usize] {
        &self.goals
    }

    /// The most recent goal.
    pub fn last(&self) -> Option<usize> {
        self.goals.last().copied()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Number of times the goal changed between consecutive steps.
    pub fn switches(&self) -> usize {
        self.goals.windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// Goal names, given the puppeteer's vocabulary.
    pub fn names<'a>(&self, vocabulary: &[&'a str]) -> Vec<&'a str> {
        self.goals
            .iter()
            .map(|&g| vocabulary.get(g).copied().unwrap_or("?"))
            .collect()
    }
}

/// Caller-side holder of a puppeteer's per-episode state.
#[derive(Debug, Clone)]
pub struct Puppetry<P: Puppeteer> {
    puppeteer: P,
    state: Option<P::State>,
    trace: GoalTrace,
    finished: bool,
}

impl<P: Puppeteer> Puppetry<P> {
    /// Wrap a puppeteer. No episode is in progress yet.
    pub fn new(puppeteer: P) -> Self {
        Self {
            puppeteer,
            state: None,
            trace: GoalTrace::new(),
            finished: false,
        }
    }

    pub fn puppeteer(&self) -> &P {
        &self.puppeteer
    }

    /// State to be passed to the next call, if an episode is in progress.
    pub fn state(&self) -> Option<&P::State> {
        self.state.as_ref()
    }

    /// Goals emitted so far in the current (or just finished) episode.
    pub fn trace(&self) -> &GoalTrace {
        &self.trace
    }

    /// Forget any episode in progress.
    pub fn reset(&mut self) {
        self.state = None;
        self.trace = GoalTrace::new();
        self.finished = false;
    }

    /// Step the puppeteer and return the timestep for the puppet.
    ///
    /// State and trace are dropped after a last step, so the next episode
    /// starts fresh even if its first timestep is not flagged. A failed step
    /// leaves the held state untouched.
    pub fn step(&mut self, timestep: &TimeStep) -> Result<TimeStep, PuppeteerError> {
        let name = self.puppeteer.name();
        if timestep.first() || self.finished {
            if timestep.first() && !self.finished && !self.trace.is_empty() {
                tracing::debug!(puppeteer = name, steps = self.trace.len(), "Episode restarted");
            }
            self.state = None;
            self.trace = GoalTrace::new();
            self.finished = false;
        }

        let prev_state = match &self.state {
            Some(state) => state.clone(),
            None => self.puppeteer.initial_state(),
        };
        let (puppet_timestep, next_state) = match self.puppeteer.step(timestep, prev_state) {
            Ok(stepped) => stepped,
            Err(e) => {
                tracing::warn!(
                    %e,
                    puppeteer = name,
                    step = self.trace.len(),
                    "Puppeteer step failed"
                );
                return Err(e);
            }
        };

        if let Some(goal) = goal_of(&puppet_timestep).and_then(Array::one_hot_index) {
            let goal_name = self.puppeteer.goal_names().get(goal).copied().unwrap_or("?");
            if self.trace.last().is_some_and(|previous| previous != goal) {
                tracing::debug!(
                    puppeteer = name,
                    step = self.trace.len(),
                    goal = goal_name,
                    "Goal switched"
                );
            }
            tracing::trace!(puppeteer = name, step = self.trace.len(), goal = goal_name, "Puppet step");
            self.trace.push(goal);
        }

        if timestep.last() {
            tracing::debug!(
                puppeteer = name,
                steps = self.trace.len(),
                switches = self.trace.switches(),
                "Episode finished"
            );
            self.state = None;
            self.finished = true;
        } else {
            self.state = Some(next_state);
        }
        Ok(puppet_timestep)
    }
}

/// A completed run of one episode.
#[derive(Debug, Clone)]
pub struct Episode {
    /// Timesteps forwarded to the puppet, in order.
    pub timesteps: Vec<TimeStep>,
    /// Goal emitted at each step.
    pub trace: GoalTrace,
}

impl Episode {
    pub fn len(&self) -> usize {
        self.timesteps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timesteps.is_empty()
    }
}

/// Drive `puppeteer` through one episode's timesteps.
///
/// Stops at the first contract violation and returns it.
///
/// # Example
///
/// ```rust
/// use puppeteer_bots::{run_episode, AlternateEatFirst};
/// use puppeteer_core::{Observation, TimeStep};
///
/// let obs = Observation::new();
/// let timesteps = std::iter::once(TimeStep::restart(obs.clone()))
///     .chain((0..299).map(|_| TimeStep::transition(0.0, obs.clone())));
///
/// let episode = run_episode(&AlternateEatFirst, timesteps).unwrap();
/// assert_eq!(episode.len(), 300);
/// assert_eq!(episode.trace.switches(), 1);
/// ```
pub fn run_episode<P, I>(puppeteer: &P, timesteps: I) -> Result<Episode, PuppeteerError>
where
    P: Puppeteer,
    I: IntoIterator<Item = TimeStep>,
{
    let mut puppetry = Puppetry::new(puppeteer);
    let mut forwarded = Vec::new();
    for timestep in timesteps {
        forwarded.push(puppetry.step(&timestep)?);
    }
    Ok(Episode {
        timesteps: forwarded,
        trace: puppetry.trace().clone(),
    })
}
