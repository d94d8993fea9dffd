//! JSON Patch (RFC 6902) operations used as PATCH request bodies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec;
use crate::error::Result;

/// Content type of a JSON Patch document.
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// Patch operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Add a value
    Add,
    /// Remove a value
    Remove,
    /// Replace a value
    Replace,
    /// Move a value from `from` to `path`
    Move,
    /// Copy a value from `from` to `path`
    Copy,
    /// Assert a value
    Test,
}

impl PatchOp {
    /// Wire name of the operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Test => "test",
        }
    }
}

/// A single JSON Patch operation.
///
/// `value` is kept as raw JSON; use [`JsonPatchOperation::value_as`] for a
/// typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPatchOperation {
    /// Operation kind
    pub op: PatchOp,
    /// Target location (JSON pointer)
    pub path: String,
    /// Source location for `move` and `copy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Operand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl JsonPatchOperation {
    /// Create an operation with no operand.
    #[must_use]
    pub fn new(op: PatchOp, path: impl Into<String>) -> Self {
        Self {
            op,
            path: path.into(),
            from: None,
            value: None,
        }
    }

    /// `add` operation.
    #[must_use]
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(PatchOp::Add, path).with_value(value)
    }

    /// `remove` operation.
    #[must_use]
    pub fn remove(path: impl Into<String>) -> Self {
        Self::new(PatchOp::Remove, path)
    }

    /// `replace` operation.
    #[must_use]
    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(PatchOp::Replace, path).with_value(value)
    }

    /// `move` operation.
    #[must_use]
    pub fn move_from(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(PatchOp::Move, path).with_from(from)
    }

    /// `copy` operation.
    #[must_use]
    pub fn copy_from(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(PatchOp::Copy, path).with_from(from)
    }

    /// `test` operation.
    #[must_use]
    pub fn test(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(PatchOp::Test, path).with_value(value)
    }

    /// Set the source location.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the operand.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Decode the operand as `T`. Returns `Ok(None)` when there is none.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the operand does not match `T`.
    pub fn value_as<T>(&self) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.value.as_ref().map(codec::project::<T>).transpose()
    }
}
