//! Vehicle record types
//!
//! A vehicle record ties a car on the lot to the person responsible for it:
//! owner name, department, phone number, plate number, model, and an optional
//! photo reference. The plate number is the natural unique key; the numeric
//! `id` is assigned by the store on creation and identifies the record for
//! update and delete.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A stored vehicle record, including its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Store-assigned identifier, stable for the record's lifetime
    pub id: i64,
    /// Owner name
    pub owner: String,
    /// Department the owner belongs to
    pub department: String,
    /// Contact phone number
    pub phone: String,
    /// Plate number - unique across all records
    pub plate: String,
    /// Vehicle model
    pub model: String,
    /// Opaque photo URI/path; never interpreted, opened, or copied
    pub photo: Option<String>,
}

impl Vehicle {
    /// Get a short description for display and log lines
    pub fn short_description(&self) -> String {
        format!("{} ({}, {})", self.plate, self.owner, self.model)
    }

    /// Drop the id, producing the unstored form (used to re-validate edits)
    pub fn to_draft(&self) -> NewVehicle {
        NewVehicle {
            owner: self.owner.clone(),
            department: self.department.clone(),
            phone: self.phone.clone(),
            plate: self.plate.clone(),
            model: self.model.clone(),
            photo: self.photo.clone(),
        }
    }
}

/// A vehicle record that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub owner: String,
    pub department: String,
    pub phone: String,
    pub plate: String,
    pub model: String,
    pub photo: Option<String>,
}

impl NewVehicle {
    /// Create a new record with the required fields
    pub fn new(
        owner: impl Into<String>,
        department: impl Into<String>,
        phone: impl Into<String>,
        plate: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            department: department.into(),
            phone: phone.into(),
            plate: plate.into(),
            model: model.into(),
            photo: None,
        }
    }

    /// Set the photo reference
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Check that every required field is non-empty.
    ///
    /// Callers run this before handing the record to the store; the store
    /// itself only enforces plate uniqueness. Whitespace-only values count
    /// as empty.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("owner", &self.owner),
            ("department", &self.department),
            ("phone", &self.phone),
            ("plate", &self.plate),
            ("model", &self.model),
        ] {
            if value.trim().is_empty() {
                return Err(Error::EmptyField { field });
            }
        }
        Ok(())
    }

    /// Attach a store-assigned id, producing the stored form
    pub fn into_vehicle(self, id: i64) -> Vehicle {
        Vehicle {
            id,
            owner: self.owner,
            department: self.department,
            phone: self.phone,
            plate: self.plate,
            model: self.model,
            photo: self.photo,
        }
    }
}
