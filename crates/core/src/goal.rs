//! # Goals
//!
//! A goal is a one-hot vector over a puppeteer's vocabulary. Two ways to
//! build a vocabulary:
//!
//! - [`puppet_goals`]: from runtime names. Duplicate names are rejected.
//! - [`TypedGoals`]: from a closed enum implementing [`GoalVocabulary`].
//!   Variants are distinct by construction, so this cannot fail.
//!
//! Both produce vectors that are pairwise orthogonal and stack to the
//! identity matrix.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use crate::array::Array;
use crate::error::CoreError;
use crate::observation::ObsValue;
use crate::shape::Dtype;

/// Element type used when the caller does not choose one.
pub const GOAL_DTYPE: Dtype = Dtype::Int32;

/// A one-hot goal vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal(Array);

impl Goal {
    fn one_hot(dtype: Dtype, len: usize, index: usize) -> Self {
        Self(Array::one_hot(dtype, len, index))
    }

    /// The goal as an observation array.
    pub fn as_array(&self) -> &Array {
        &self.0
    }

    /// Position of the one.
    pub fn index(&self) -> Option<usize> {
        self.0.one_hot_index()
    }

    /// Vocabulary size.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Goal> for ObsValue {
    fn from(goal: Goal) -> Self {
        ObsValue::Array(goal.0)
    }
}

/// An immutable mapping from goal names to one-hot vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalSet {
    names: Vec<String>,
    goals: Vec<Goal>,
    dtype: Dtype,
}

impl GoalSet {
    /// The goal registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Goal, CoreError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.goals[i])
            .ok_or_else(|| CoreError::UnknownGoal {
                name: name.to_string(),
            })
    }

    /// Name of a goal vector from this vocabulary, if it is one.
    pub fn name_of(&self, goal: &Goal) -> Option<&str> {
        if goal.len() != self.len() {
            return None;
        }
        goal.index().map(|i| self.names[i].as_str())
    }

    /// Names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// `(name, goal)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Goal)> {
        self.names.iter().map(String::as_str).zip(&self.goals)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn dtype(&self) -> Dtype {
        self.dtype
    }
}

/// Build a goal vocabulary from ordered, distinct names.
///
/// The vector for `names[i]` has length `names.len()` with its one at `i`.
///
/// # Errors
///
/// [`CoreError::DuplicateGoal`] if any name repeats.
pub fn puppet_goals<S: AsRef<str>>(names: &[S], dtype: Dtype) -> Result<GoalSet, CoreError> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_ref()) {
            return Err(CoreError::DuplicateGoal {
                name: name.as_ref().to_string(),
            });
        }
    }
    let len = names.len();
    Ok(GoalSet {
        names: names.iter().map(|n| n.as_ref().to_string()).collect(),
        goals: (0..len).map(|i| Goal::one_hot(dtype, len, i)).collect(),
        dtype,
    })
}

/// [`puppet_goals`] with [`GOAL_DTYPE`] elements.
pub fn puppet_goals_default<S: AsRef<str>>(names: &[S]) -> Result<GoalSet, CoreError> {
    puppet_goals(names, GOAL_DTYPE)
}

/// A closed set of goals, usually a fieldless enum.
///
/// `ALL[i].index() == i` and `NAMES[i]` is the name of `ALL[i]`.
pub trait GoalVocabulary: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every variant, in index order.
    const ALL: &'static [Self];

    /// Names matching `ALL`.
    const NAMES: &'static [&'static str];

    /// Index of this variant within `ALL`.
    fn index(self) -> usize;

    /// Name of this variant.
    fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }
}

/// One-hot vectors for every variant of a [`GoalVocabulary`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypedGoals<V> {
    goals: Vec<Goal>,
    dtype: Dtype,
    _vocabulary: PhantomData<V>,
}

impl<V: GoalVocabulary> TypedGoals<V> {
    /// Build the vocabulary with the given element type.
    pub fn new(dtype: Dtype) -> Self {
        let len = V::ALL.len();
        Self {
            goals: (0..len).map(|i| Goal::one_hot(dtype, len, i)).collect(),
            dtype,
            _vocabulary: PhantomData,
        }
    }

    /// The vector for `goal`.
    pub fn goal(&self, goal: V) -> &Goal {
        &self.goals[goal.index()]
    }

    /// The variant a vector encodes, if it belongs to this vocabulary.
    pub fn decode(&self, goal: &Goal) -> Option<V> {
        if goal.len() != self.goals.len() {
            return None;
        }
        goal.index().and_then(|i| V::ALL.get(i).copied())
    }

    /// Same vocabulary keyed by name.
    pub fn to_goal_set(&self) -> GoalSet {
        GoalSet {
            names: V::NAMES.iter().map(|n| n.to_string()).collect(),
            goals: self.goals.clone(),
            dtype: self.dtype,
        }
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}
