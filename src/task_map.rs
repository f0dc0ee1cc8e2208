//! TaskMap - the input/output dataset a network is trained to approximate.
//!
//! A task map is a set of parallel numeric sequences of equal sample count
//! `M`: one or more named input coordinate columns plus one target column
//! `F`. The encoder packages them for serialization without transforming
//! values; the only processing is the optional concatenation of input
//! columns into a single field, selected by [`InputLayout`].
//!
//! # Layouts
//!
//! The engine accepts two field conventions for the "map" container:
//!
//! - [`InputLayout::Merged`]: a single `X` field of length `k * M` holding
//!   all `k` input columns back to back (`[x..., y...]`), plus `F`. The
//!   engine splits `X` into `len(X) / M` rows of `M`.
//! - [`InputLayout::Separate`]: each input column under its own field name,
//!   an all-zeros auxiliary field `Z` of length `M`, and `F`.
//!
//! # Example
//!
//! ```
//! use relab::{InputLayout, TaskMap};
//!
//! // XOR
//! let mut map = TaskMap::new();
//! map.add_input("X", vec![0.0, 0.0, 1.0, 1.0]).unwrap();
//! map.add_input("Y", vec![0.0, 1.0, 0.0, 1.0]).unwrap();
//! map.set_target(vec![0.0, 1.0, 1.0, 0.0]).unwrap();
//!
//! let ds = map.encode(InputLayout::Merged).unwrap();
//! assert_eq!(ds.floats("X").unwrap().len(), 8);
//! assert_eq!(ds.floats("F").unwrap().len(), 4);
//! ```

use crate::{Dataset, RelabError, Result};
use serde::{Deserialize, Serialize};

/// Container field name for the target sequence.
pub const TARGET_FIELD: &str = "F";
/// Container field name for merged input columns.
pub const MERGED_INPUT_FIELD: &str = "X";
/// Container field name for the auxiliary zeros column in the separate layout.
pub const AUX_FIELD: &str = "Z";

/// Field convention used when encoding input columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputLayout {
    /// All input columns concatenated into one `X` field
    Merged,
    /// One field per input column, plus a reserved zeros field `Z`
    Separate,
}

/// Named input columns plus a target column, all sharing sample count `M`.
///
/// Task maps are immutable experiment inputs once encoded; they are written
/// to a container, consumed exactly once by the engine, and never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskMap {
    inputs: Vec<(String, Vec<f64>)>,
    target: Option<Vec<f64>>,
}

impl TaskMap {
    /// Create an empty task map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample count `M` established by the first column added, if any.
    pub fn num_samples(&self) -> Option<usize> {
        self.inputs
            .first()
            .map(|(_, v)| v.len())
            .or_else(|| self.target.as_ref().map(|t| t.len()))
    }

    /// Number of input columns.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Add a named input column.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the column's length differs from the sample count
    /// established by previously added columns, `InvalidParameter` if the
    /// name collides with an existing column or with the reserved `F`/`Z`
    /// field names.
    pub fn add_input(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if name == TARGET_FIELD || name == AUX_FIELD {
            return Err(RelabError::InvalidParameter(format!(
                "input name '{}' is reserved",
                name
            )));
        }
        if self.inputs.iter().any(|(n, _)| *n == name) {
            return Err(RelabError::InvalidParameter(format!(
                "duplicate input name '{}'",
                name
            )));
        }
        self.check_len(&name, values.len())?;
        self.inputs.push((name, values));
        Ok(())
    }

    /// Set the target column `F`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the target's length differs from the established
    /// sample count.
    pub fn set_target(&mut self, values: Vec<f64>) -> Result<()> {
        self.check_len(TARGET_FIELD, values.len())?;
        self.target = Some(values);
        Ok(())
    }

    fn check_len(&self, field: &str, actual: usize) -> Result<()> {
        if let Some(expected) = self.num_samples() {
            if actual != expected {
                return Err(RelabError::ShapeMismatch {
                    field: field.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Package the map as a "map" container under the given layout.
    ///
    /// Values pass through exactly as supplied.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if no input column or no target has been set.
    pub fn encode(&self, layout: InputLayout) -> Result<Dataset> {
        if self.inputs.is_empty() {
            return Err(RelabError::InvalidParameter(
                "task map has no input columns".to_string(),
            ));
        }
        let target = self.target.as_ref().ok_or_else(|| {
            RelabError::InvalidParameter("task map has no target column".to_string())
        })?;

        let mut ds = Dataset::new();
        match layout {
            InputLayout::Merged => {
                let merged: Vec<f64> = self
                    .inputs
                    .iter()
                    .flat_map(|(_, v)| v.iter().copied())
                    .collect();
                ds.insert_floats(MERGED_INPUT_FIELD, merged);
            }
            InputLayout::Separate => {
                for (name, values) in &self.inputs {
                    ds.insert_floats(name.clone(), values.clone());
                }
                ds.insert_floats(AUX_FIELD, vec![0.0; target.len()]);
            }
        }
        ds.insert_floats(TARGET_FIELD, target.clone());
        Ok(ds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_map() -> TaskMap {
        let mut map = TaskMap::new();
        map.add_input("X", vec![0.0, 0.0, 1.0, 1.0]).unwrap();
        map.add_input("Y", vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        map.set_target(vec![0.0, 1.0, 1.0, 0.0]).unwrap();
        map
    }

    #[test]
    fn test_merged_layout() {
        let ds = xor_map().encode(InputLayout::Merged).unwrap();
        assert_eq!(ds.names(), vec!["X", "F"]);
        assert_eq!(
            ds.floats("X").unwrap(),
            &[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0]
        );
        assert_eq!(ds.floats("F").unwrap(), &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_separate_layout() {
        let ds = xor_map().encode(InputLayout::Separate).unwrap();
        assert_eq!(ds.names(), vec!["X", "Y", "Z", "F"]);
        assert_eq!(ds.floats("Y").unwrap(), &[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(ds.floats("Z").unwrap(), &[0.0; 4]);
    }

    #[test]
    fn test_shape_mismatch() {
        let mut map = TaskMap::new();
        map.add_input("X", vec![0.0, 0.0, 1.0, 1.0]).unwrap();
        let err = map.set_target(vec![0.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            RelabError::ShapeMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));

        let err = map.add_input("Y", vec![0.0]).unwrap_err();
        assert!(matches!(err, RelabError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_target_first_establishes_count() {
        let mut map = TaskMap::new();
        map.set_target(vec![1.0, 0.0]).unwrap();
        assert!(matches!(
            map.add_input("X", vec![1.0]),
            Err(RelabError::ShapeMismatch { .. })
        ));
        map.add_input("X", vec![0.5, 0.5]).unwrap();
        assert!(map.encode(InputLayout::Merged).is_ok());
    }

    #[test]
    fn test_reserved_and_duplicate_names() {
        let mut map = TaskMap::new();
        assert!(map.add_input("F", vec![1.0]).is_err());
        assert!(map.add_input("Z", vec![1.0]).is_err());
        map.add_input("X", vec![1.0]).unwrap();
        assert!(map.add_input("X", vec![2.0]).is_err());
    }

    #[test]
    fn test_encode_requires_inputs_and_target() {
        let map = TaskMap::new();
        assert!(map.encode(InputLayout::Merged).is_err());

        let mut map = TaskMap::new();
        map.add_input("X", vec![1.0]).unwrap();
        assert!(map.encode(InputLayout::Merged).is_err());
    }

    #[test]
    fn test_values_pass_through_exactly() {
        let mut map = TaskMap::new();
        let vals = vec![0.1 + 0.2, f64::MIN_POSITIVE, -0.0, 1e300];
        map.add_input("X", vals.clone()).unwrap();
        map.set_target(vec![0.0; 4]).unwrap();
        let ds = map.encode(InputLayout::Merged).unwrap();
        let stored = ds.floats("X").unwrap();
        for (a, b) in stored.iter().zip(vals.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
