use k8s_openapi::api::core::v1::{Container, Volume};
use serde::Serialize;

/// A single RFC 6902 operation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PatchOperation {
    pub op: Op,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<PatchValue>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Add,
    Replace,
    Remove,
}

/// The values this webhook ever writes into a Pod.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PatchValue {
    Volume(Box<Volume>),
    Volumes(Vec<Volume>),
    Container(Box<Container>),
    Containers(Vec<Container>),
}

impl PatchOperation {
    pub fn add(path: impl Into<String>, value: PatchValue) -> Self {
        PatchOperation {
            op: Op::Add,
            path: path.into(),
            value: Some(value),
        }
    }

    pub fn replace(path: impl Into<String>, value: PatchValue) -> Self {
        PatchOperation {
            op: Op::Replace,
            path: path.into(),
            value: Some(value),
        }
    }

    /// Build the operation that puts `item` into the array at `path`.
    ///
    /// JSON Pointer cannot append to an array that does not exist yet, so an
    /// empty array is created holding `item`. Otherwise `item` is appended
    /// using the `-` end of array marker.
    pub fn add_to_array<T>(
        path: &str,
        array_is_empty: bool,
        item: T,
        scalar: impl FnOnce(T) -> PatchValue,
        array: impl FnOnce(Vec<T>) -> PatchValue,
    ) -> Self {
        if array_is_empty {
            PatchOperation::add(path, array(vec![item]))
        } else {
            PatchOperation::add(format!("{path}/-"), scalar(item))
        }
    }
}

/// Serialize the operations into a JSON Patch document.
pub fn to_json(patch: &[PatchOperation]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(patch)
}
