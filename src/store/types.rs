use serde::{Deserialize, Serialize};

/// What the stores do when an operation names a listing id they do not hold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownListingPolicy {
    /// Fail with `StoreError::NotFound`
    #[default]
    Reject,
    /// Create a shell listing under the requested id, then carry on
    AutoCreate,
}
