use serde::{Deserialize, Serialize};

/// Successful wire shape produced by a requester: whatever else the backend
/// answers with, the `data` field is what the UI binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub data: T,
}

impl<T> ResponseEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
