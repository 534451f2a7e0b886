use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_gender;

/// Opaque record identifier. Unique within a store snapshot and never edited through the form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        EmployeeId(id.into())
    }

    pub fn generate() -> Self {
        EmployeeId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGender(pub String);

impl fmt::Display for UnknownGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid enum value. Expected 'Male' | 'Female', received '{}'",
            self.0
        )
    }
}

impl FromStr for Gender {
    type Err = UnknownGender;

    // Case-sensitive: "male" is not a member of the set.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub image_url: String,
}

/// First id that occurs more than once in `records`, if any.
pub fn find_duplicate_id(records: &[Employee]) -> Option<&EmployeeId> {
    let mut seen = HashSet::with_capacity(records.len());
    records.iter().map(|record| &record.id).find(|id| !seen.insert(*id))
}

/// Editable fields of the employee form. The id is read-only and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Gender,
    ImageUrl,
}

impl Field {
    /// Wire name of the field, as used in JSON payloads and error maps.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Gender => "gender",
            Field::ImageUrl => "imageUrl",
        }
    }

    /// Maps a struct field key reported by `validator` back to the form field.
    pub fn from_validation_key(key: &str) -> Option<Field> {
        match key {
            "first_name" => Some(Field::FirstName),
            "last_name" => Some(Field::LastName),
            "email" => Some(Field::Email),
            "gender" => Some(Field::Gender),
            "image_url" => Some(Field::ImageUrl),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw, user-entered values of the editor form.
#[derive(Validate, Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub id: Option<EmployeeId>,
    #[validate(length(min = 1, code = "required", message = "The First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, code = "required", message = "The Last name is required"))]
    pub last_name: String,
    #[validate(email(code = "format", message = "Invalid email"))]
    pub email: String,
    #[validate(custom = "validate_gender")]
    pub gender: String,
    pub image_url: String,
}

impl EmployeeForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Gender => &self.gender,
            Field::ImageUrl => &self.image_url,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Email => self.email = value,
            Field::Gender => self.gender = value,
            Field::ImageUrl => self.image_url = value,
        }
    }
}

impl From<&Employee> for EmployeeForm {
    fn from(employee: &Employee) -> Self {
        EmployeeForm {
            id: Some(employee.id.clone()),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            gender: employee.gender.to_string(),
            image_url: employee.image_url.clone(),
        }
    }
}

/// Output of a successful editor submission. `id` is `None` for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub image_url: String,
}

impl EmployeeDraft {
    /// Completes the draft into a record, drawing an id from `assign` only when the draft has none.
    pub fn into_employee<F>(self, assign: F) -> Employee
    where
        F: FnOnce() -> EmployeeId,
    {
        Employee {
            id: self.id.unwrap_or_else(assign),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            image_url: self.image_url,
        }
    }
}
