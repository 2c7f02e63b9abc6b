use std::fmt;
use std::str::FromStr;

use crate::{CatalogError, FilterField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Alive,
    Dead,
    Unknown,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Alive, Status::Dead, Status::Unknown];

    /// Literal value sent to the listing API.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
    Genderless,
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Genderless,
        Gender::Unknown,
    ];

    /// Literal value sent to the listing API.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CatalogError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| CatalogError::InvalidFilterValue {
                field: FilterField::Status,
                value: raw.to_string(),
            })
    }
}

impl FromStr for Gender {
    type Err = CatalogError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| CatalogError::InvalidFilterValue {
                field: FilterField::Gender,
                value: raw.to_string(),
            })
    }
}

/// Discrete filters selected in the dropdown. `None` means "no constraint",
/// which is not the same as an explicit `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FilterSet {
    pub status: Option<Status>,
    pub gender: Option<Gender>,
}

impl FilterSet {
    pub fn new(status: Option<Status>, gender: Option<Gender>) -> Self {
        Self { status, gender }
    }

    /// Parses the dropdown's raw values. An empty string leaves the field
    /// unconstrained; anything outside the enumerated literals is rejected.
    pub fn from_raw(status: &str, gender: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            status: parse_optional(status)?,
            gender: parse_optional(gender)?,
        })
    }

    /// Replaces only the status, parsed like [`FilterSet::from_raw`].
    pub fn with_status_raw(self, status: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            status: parse_optional(status)?,
            ..self
        })
    }

    /// Replaces only the gender, parsed like [`FilterSet::from_raw`].
    pub fn with_gender_raw(self, gender: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            gender: parse_optional(gender)?,
            ..self
        })
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.gender.is_none()
    }
}

fn parse_optional<T>(raw: &str) -> Result<Option<T>, CatalogError>
where
    T: FromStr<Err = CatalogError>,
{
    if raw.is_empty() {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}
