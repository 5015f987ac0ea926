//! Observation fields read by the puppeteers.
//!
//! The names are part of the environment contract. Readers check shapes up
//! front so a malformed integration fails on its first step.

use puppeteer_core::{Array, CoreError, Observation};

/// One-hot (or 0/1) indicator of the focal agent among all agents.
pub const AGENT_SLOT: &[&str] = &["agent_slot"];

/// Per-agent coordinates, one row per agent.
pub const POSITION: &[&str] = &["global", "observations", "POSITION"];

/// Per-agent actions logged on the previous step.
pub const ACTIONS: &[&str] = &["global", "actions"];

/// Inventories of the latest interaction: row 0 focal, row 1 partner.
pub const INTERACTION_INVENTORIES: &[&str] = &["INTERACTION_INVENTORIES"];

/// The focal agent's own resource counts.
pub const INVENTORY: &[&str] = &["INVENTORY"];

/// A 1-D array of exactly `len` elements.
pub(crate) fn vector_of_len<'a>(
    observation: &'a Observation,
    path: &[&str],
    len: usize,
) -> Result<&'a Array, CoreError> {
    let array = observation.array_at(path)?;
    if array.rank() != 1 || array.len() != len {
        return Err(mismatch(path, format!("vector of length {len}"), array));
    }
    Ok(array)
}

/// A 1-D array of at least `min_len` elements.
pub(crate) fn vector_at_least<'a>(
    observation: &'a Observation,
    path: &[&str],
    min_len: usize,
) -> Result<&'a Array, CoreError> {
    let array = observation.array_at(path)?;
    if array.rank() != 1 || array.len() < min_len {
        return Err(mismatch(
            path,
            format!("vector of length >= {min_len}"),
            array,
        ));
    }
    Ok(array)
}

/// A 2-D array with `rows` rows and at least `min_cols` columns.
pub(crate) fn matrix<'a>(
    observation: &'a Observation,
    path: &[&str],
    rows: usize,
    min_cols: usize,
) -> Result<&'a Array, CoreError> {
    let array = observation.array_at(path)?;
    match array.dims() {
        [r, c] if *r == rows && *c >= min_cols => Ok(array),
        _ => Err(mismatch(
            path,
            format!("matrix of {rows} rows and >= {min_cols} columns"),
            array,
        )),
    }
}

pub(crate) fn mismatch(path: &[&str], expected: String, array: &Array) -> CoreError {
    CoreError::ShapeMismatch {
        key: path.join("."),
        expected,
        got: array.shape(),
    }
}
