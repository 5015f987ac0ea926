//! Two-resource *_in_the_matrix puppeteers.
//!
//! Agents collect two kinds of resource, then interact pairwise; what each
//! holds at the moment of interaction decides the payoff. Resource 0 is the
//! "good" choice and resource 1 the "bad" one:
//!
//! | Substrate | Resource 0 | Resource 1 |
//! |---|---|---|
//! | Prisoner's Dilemma | cooperate | defect |
//! | Stag Hunt | stag | hare |
//! | Chicken | dove | hawk |

use std::sync::LazyLock;

use puppeteer_core::{puppet_timestep, Dtype, GoalVocabulary, TimeStep, TypedGoals};
use serde::{Deserialize, Serialize};

use crate::fields;
use crate::puppeteer::Puppeteer;
use crate::PuppeteerError;

/// Inventory index of the cooperative resource.
pub const COOPERATE_RESOURCE: usize = 0;

/// Inventory index of the defecting resource.
pub const DEFECT_RESOURCE: usize = 1;

/// Goals for two-resource puppets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwoResourceGoal {
    CollectCooperate,
    CollectDefect,
    DestroyCooperate,
    DestroyDefect,
    Interact,
}

impl GoalVocabulary for TwoResourceGoal {
    const ALL: &'static [Self] = &[
        TwoResourceGoal::CollectCooperate,
        TwoResourceGoal::CollectDefect,
        TwoResourceGoal::DestroyCooperate,
        TwoResourceGoal::DestroyDefect,
        TwoResourceGoal::Interact,
    ];
    const NAMES: &'static [&'static str] = &[
        "COLLECT_COOPERATE",
        "COLLECT_DEFECT",
        "DESTROY_COOPERATE",
        "DESTROY_DEFECT",
        "INTERACT",
    ];

    fn index(self) -> usize {
        self as usize
    }
}

static TWO_RESOURCE_GOALS: LazyLock<TypedGoals<TwoResourceGoal>> =
    LazyLock::new(|| TypedGoals::new(Dtype::Float64));

/// The two-resource goal vectors (`f64` elements).
pub fn two_resource_goals() -> &'static TypedGoals<TwoResourceGoal> {
    &TWO_RESOURCE_GOALS
}

/// Number of partner defections seen this episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerDefections(pub u64);

/// GRIM strategy for two-resource *_in_the_matrix substrates.
///
/// Collects the cooperative resource until the partner has defected
/// `threshold` times, then collects the defecting resource for the rest of
/// the episode. Interacts whenever its own inventory leans either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrimTwoResource {
    threshold: u32,
    cooperate_index: usize,
    defect_index: usize,
}

impl GrimTwoResource {
    /// Create a grim puppeteer that retaliates after `threshold` defections.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            cooperate_index: COOPERATE_RESOURCE,
            defect_index: DEFECT_RESOURCE,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// `(cooperate, defect)` counts from an inventory row.
    fn counts(&self, inventory: &[f64]) -> (f64, f64) {
        (inventory[self.cooperate_index], inventory[self.defect_index])
    }

    /// Whether an inventory holds more of the defecting resource.
    pub fn is_defection(&self, inventory: &[f64]) -> bool {
        let (cooperate, defect) = self.counts(inventory);
        defect > cooperate
    }

    /// Whether an inventory leans towards either resource.
    pub fn ready_to_interact(&self, inventory: &[f64]) -> bool {
        let (cooperate, defect) = self.counts(inventory);
        (defect - cooperate).abs() > 0.0
    }
}

impl Puppeteer for GrimTwoResource {
    type State = PartnerDefections;

    fn initial_state(&self) -> PartnerDefections {
        PartnerDefections(0)
    }

    fn step(
        &self,
        timestep: &TimeStep,
        prev_state: PartnerDefections,
    ) -> Result<(TimeStep, PartnerDefections), PuppeteerError> {
        let PartnerDefections(mut partner_defections) = self.resume(timestep, prev_state);
        let observation = timestep.observation();
        let min_resources = self.cooperate_index.max(self.defect_index) + 1;

        let interaction =
            fields::matrix(observation, fields::INTERACTION_INVENTORIES, 2, min_resources)?;
        let partner: Vec<f64> = (0..interaction.dims()[1])
            .filter_map(|j| interaction.get(&[1, j]))
            .collect();
        if self.is_defection(&partner) {
            partner_defections = partner_defections.saturating_add(1);
        }

        let inventory = fields::vector_at_least(observation, fields::INVENTORY, min_resources)?;
        let goal = if self.ready_to_interact(&inventory.to_f64_vec()) {
            TwoResourceGoal::Interact
        } else if partner_defections < u64::from(self.threshold) {
            TwoResourceGoal::CollectCooperate
        } else {
            TwoResourceGoal::CollectDefect
        };

        Ok((
            puppet_timestep(timestep, two_resource_goals().goal(goal)),
            PartnerDefections(partner_defections),
        ))
    }

    fn goal_names(&self) -> &'static [&'static str] {
        TwoResourceGoal::NAMES
    }

    fn name(&self) -> &'static str {
        "GrimTwoResource"
    }
}
