use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebhookError>;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("unmarshaling request failed with {0}")]
    EnvelopeDecode(#[source] serde_json::Error),

    #[error("unable to unmarshal pod json object: {0}")]
    ObjectDecode(#[source] serde_json::Error),

    #[error("admission request does not carry an object")]
    MissingObject,

    #[error("failed to serialize admission response: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl WebhookError {
    /// Both a missing and an unparsable `request.object` are object decode failures.
    pub fn is_object_decode(&self) -> bool {
        matches!(
            self,
            WebhookError::ObjectDecode(_) | WebhookError::MissingObject
        )
    }
}
