//! Wire format of the pet store resource and its identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifiers are generated in the range `0..PET_ID_RANGE`.
pub const PET_ID_RANGE: u128 = 1_000_000;

/// Identifier of a pet created by a [`GooseUser`](goose::goose::GooseUser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PetId(u64);

impl PetId {
    /// Generate a new identifier from a random 128-bit value.
    pub fn random() -> Self {
        PetId::from_entropy(rand::random::<u128>())
    }

    /// Reduce a 128-bit value into the identifier range.
    pub fn from_entropy(value: u128) -> Self {
        // Always fits: the remainder is below one million.
        PetId((value % PET_ID_RANGE) as u64)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for PetId {
    fn from(id: u64) -> Self {
        PetId(id)
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a pet in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

/// A pet, as sent to and returned by the `/pet` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: u64,
    pub name: String,
    pub category: Category,
    pub photo_urls: Vec<String>,
    pub tags: Vec<Tag>,
    pub status: PetStatus,
}

impl Pet {
    /// The pet every user creates at the start of an iteration.
    pub fn listing(id: PetId) -> Self {
        Pet::with_details(id, "Fluffy", "https://example.com/photo.jpg", PetStatus::Available)
    }

    /// The same pet after it has been sold.
    pub fn sold(id: PetId) -> Self {
        Pet::with_details(
            id,
            "UpdatedFluffy",
            "https://example.com/newphoto.jpg",
            PetStatus::Sold,
        )
    }

    fn with_details(id: PetId, name: &str, photo_url: &str, status: PetStatus) -> Self {
        Pet {
            id: id.value(),
            name: name.to_string(),
            category: Category {
                id: 1,
                name: "Dogs".to_string(),
            },
            photo_urls: vec![photo_url.to_string()],
            tags: vec![Tag {
                id: 1,
                name: "cute".to_string(),
            }],
            status,
        }
    }
}
