//! Observation builders shared by unit tests.

use puppeteer_core::{goal_of, Array, GoalVocabulary, Observation, TimeStep};

use crate::cleanup::{CleanupGoal, CLEAN_ACTION};
use crate::two_resource::TwoResourceGoal;

/// One agent in a Clean Up observation.
#[derive(Debug, Clone, Copy)]
pub struct Agent {
    is_me: bool,
    cleaning: bool,
    y: f64,
}

impl Agent {
    pub fn me(y: f64) -> Self {
        Self {
            is_me: true,
            cleaning: false,
            y,
        }
    }

    pub fn me_cleaning(y: f64) -> Self {
        Self {
            is_me: true,
            cleaning: true,
            y,
        }
    }

    pub fn cleaning(y: f64) -> Self {
        Self {
            is_me: false,
            cleaning: true,
            y,
        }
    }

    pub fn idle(y: f64) -> Self {
        Self {
            is_me: false,
            cleaning: false,
            y,
        }
    }
}

pub fn cleanup_observation(agents: &[Agent]) -> Observation {
    let actions: Vec<i32> = agents
        .iter()
        .map(|a| if a.cleaning { CLEAN_ACTION as i32 } else { 0 })
        .collect();
    let positions: Vec<Vec<f64>> = agents.iter().map(|a| vec![5.0, a.y]).collect();
    let slot: Vec<i32> = agents.iter().map(|a| i32::from(a.is_me)).collect();

    let global = Observation::new()
        .with("actions", Array::vector(actions))
        .with(
            "observations",
            Observation::new().with("POSITION", Array::matrix(positions).unwrap()),
        );
    Observation::new()
        .with("agent_slot", Array::vector(slot))
        .with("global", global)
}

pub fn two_resource_observation(partner: [f64; 2], own: [f64; 2]) -> Observation {
    Observation::new()
        .with(
            "INTERACTION_INVENTORIES",
            Array::matrix(vec![vec![1.0, 1.0], partner.to_vec()]).unwrap(),
        )
        .with("INVENTORY", Array::vector(own.to_vec()))
}

fn decode<V: GoalVocabulary>(timestep: &TimeStep) -> V {
    let index = goal_of(timestep)
        .and_then(Array::one_hot_index)
        .expect("puppet timestep carries a one-hot goal");
    V::ALL[index]
}

pub fn emitted(timestep: &TimeStep) -> CleanupGoal {
    decode(timestep)
}

pub fn emitted_two_resource(timestep: &TimeStep) -> TwoResourceGoal {
    decode(timestep)
}
