//! Dataset - the named-array container exchanged with the engine.
//!
//! Experiment inputs ("map", "network") and engine outputs ("outputs") are
//! all carried in the same minimal structured-array format: an ordered
//! collection of named 1-D numeric fields, each either integer or floating
//! point. The contract is "named arrays, typed, ordered, round-trippable";
//! the on-disk encoding (bincode over serde) is an implementation detail
//! that neither side may peek through.
//!
//! # Writing
//!
//! Writes are atomic at the level of "file holds all fields" or "operation
//! failed": the container is serialized to a sibling temporary file and
//! renamed into place, so a crashed writer never leaves a truncated
//! container at the destination path.
//!
//! # Example
//!
//! ```no_run
//! use relab::{Dataset, Result};
//!
//! # fn main() -> Result<()> {
//! let mut ds = Dataset::new();
//! ds.insert_ints("pre", vec![0, 0, 1]);
//! ds.insert_ints("post", vec![1, 2, 2]);
//! ds.write("network.dat")?;
//!
//! let back = Dataset::read("network.dat")?;
//! assert_eq!(back.ints("pre")?, &[0, 0, 1]);
//! # Ok(())
//! # }
//! ```

use crate::{RelabError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A single named 1-D numeric sequence stored in a [`Dataset`].
///
/// Element order is preserved exactly; no numeric coercion is applied on
/// either side of a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// Integer sequence (node indices, edge endpoints)
    Int(Vec<i64>),
    /// Floating-point sequence (map coordinates, targets, responses)
    Float(Vec<f64>),
}

impl Field {
    /// Number of elements in the sequence.
    pub fn len(&self) -> usize {
        match self {
            Field::Int(v) => v.len(),
            Field::Float(v) => v.len(),
        }
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An ordered collection of named numeric fields.
///
/// Insertion order is preserved through serialization, and inserting a name
/// that already exists replaces the field in place without reordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    fields: Vec<(String, Field)>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Insert an integer field, replacing any existing field of that name.
    pub fn insert_ints(&mut self, name: impl Into<String>, values: Vec<i64>) {
        self.insert(name.into(), Field::Int(values));
    }

    /// Insert a floating-point field, replacing any existing field of that name.
    pub fn insert_floats(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.insert(name.into(), Field::Float(values));
    }

    fn insert(&mut self, name: String, field: Field) {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = field;
        } else {
            self.fields.push((name, field));
        }
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Extract an integer field.
    ///
    /// # Errors
    ///
    /// `MissingField` if no field of that name exists, `FieldType` if the
    /// field holds floats.
    pub fn ints(&self, name: &str) -> Result<&[i64]> {
        match self.get(name) {
            Some(Field::Int(v)) => Ok(v),
            Some(Field::Float(_)) => Err(RelabError::FieldType {
                field: name.to_string(),
                expected: "int",
            }),
            None => Err(RelabError::MissingField {
                field: name.to_string(),
            }),
        }
    }

    /// Extract a floating-point field.
    ///
    /// # Errors
    ///
    /// `MissingField` if no field of that name exists, `FieldType` if the
    /// field holds integers.
    pub fn floats(&self, name: &str) -> Result<&[f64]> {
        match self.get(name) {
            Some(Field::Float(v)) => Ok(v),
            Some(Field::Int(_)) => Err(RelabError::FieldType {
                field: name.to_string(),
                expected: "float",
            }),
            None => Err(RelabError::MissingField {
                field: name.to_string(),
            }),
        }
    }

    /// Whether a field of the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields in the container.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the container holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Serialize the container to `path`, creating or overwriting it.
    ///
    /// The bytes are staged in a sibling `.tmp` file and renamed into place.
    /// On any failure the destination is either untouched or still holds its
    /// previous complete content; callers must treat an error as "no valid
    /// container was produced" and not hand the path to the engine.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = bincode::serialize(self)?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        fs::write(&tmp, &bytes)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(
            path = %path.display(),
            fields = self.fields.len(),
            bytes = bytes.len(),
            "wrote dataset container"
        );
        Ok(())
    }

    /// Read a container back from `path`.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be opened (e.g. the engine never ran),
    /// `Serialization` if the content is not a valid container.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let ds: Dataset = bincode::deserialize(&bytes)?;
        debug!(
            path = %path.display(),
            fields = ds.fields.len(),
            "read dataset container"
        );
        Ok(ds)
    }
}
