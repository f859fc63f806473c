//! The four operations each iteration performs against the pet store.

use goose::goose::GooseMethod;
use reqwest::header::{self, HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::StatusCode;

/// One step of the create, read, update, delete cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetOperation {
    Create,
    Read,
    Update,
    Delete,
}

impl PetOperation {
    /// All operations, in the order an iteration performs them.
    pub const CYCLE: [PetOperation; 4] = [
        PetOperation::Create,
        PetOperation::Read,
        PetOperation::Update,
        PetOperation::Delete,
    ];

    pub fn method(&self) -> GooseMethod {
        match self {
            PetOperation::Create => GooseMethod::Post,
            PetOperation::Read => GooseMethod::Get,
            PetOperation::Update => GooseMethod::Put,
            PetOperation::Delete => GooseMethod::Delete,
        }
    }

    /// Name the request is aggregated under in Goose metrics.
    pub fn request_name(&self) -> &'static str {
        match self {
            PetOperation::Create => "Create Pet",
            PetOperation::Read => "Get Pet",
            PetOperation::Update => "Update Pet",
            PetOperation::Delete => "Delete Pet",
        }
    }

    /// Verb used in failure messages, as in "Failed to create pet".
    pub fn verb(&self) -> &'static str {
        match self {
            PetOperation::Create => "create",
            PetOperation::Read => "retrieve",
            PetOperation::Update => "update",
            PetOperation::Delete => "delete",
        }
    }

    /// Whether this operation sends a pet in the request body.
    pub fn has_payload(&self) -> bool {
        matches!(self, PetOperation::Create | PetOperation::Update)
    }

    /// Whether the server response counts as a success for this operation.
    ///
    /// This is stricter than "any 2xx": a read must return exactly 200.
    pub fn accepts(&self, status: StatusCode) -> bool {
        match self {
            PetOperation::Create | PetOperation::Update => {
                status == StatusCode::OK || status == StatusCode::CREATED
            }
            PetOperation::Read => status == StatusCode::OK,
            PetOperation::Delete => status == StatusCode::OK || status == StatusCode::NO_CONTENT,
        }
    }

    /// Headers sent with this operation. Operations with a body also declare its content
    /// type.
    pub fn headers(&self, api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        if self.has_payload() {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("api_key", HeaderValue::from_str(api_key)?);
        Ok(headers)
    }
}
