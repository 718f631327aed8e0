//! Roles, domains and vehicle categories captured at registration.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user's professional category. Immutable after registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Field or workshop technician. The only role with a two-step quiz.
    Technician,
    /// Sales staff.
    Sales,
    /// Workshop owner or manager.
    Workshop,
    /// Entry-level candidate, tested on the technician question bank.
    Aspirant,
}

impl Role {
    pub const ALL: [Role; 4] = [Self::Technician, Self::Sales, Self::Workshop, Self::Aspirant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technician => "technician",
            Self::Sales => "sales",
            Self::Workshop => "workshop",
            Self::Aspirant => "aspirant",
        }
    }

    /// The role whose question bank is used for quizzes.
    ///
    /// Aspirants are tested as entry-level technicians.
    pub fn question_role(&self) -> Role {
        match self {
            Self::Aspirant => Self::Technician,
            other => *other,
        }
    }

    /// Roles that complete verification in a single quiz step.
    pub fn is_single_step(&self) -> bool {
        matches!(self, Self::Sales | Self::Workshop | Self::Aspirant)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technician" => Ok(Self::Technician),
            "sales" => Ok(Self::Sales),
            "workshop" => Ok(Self::Workshop),
            "aspirant" => Ok(Self::Aspirant),
            _ => Err(TypesError::UnknownRole(s.to_string())),
        }
    }
}

/// Technology domain a user registers for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Electric vehicles.
    #[serde(rename = "EV")]
    Ev,
    /// Bharat Stage VI combustion engines.
    #[serde(rename = "BS6")]
    Bs6,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ev => "EV",
            Self::Bs6 => "BS6",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EV" => Ok(Self::Ev),
            "BS6" => Ok(Self::Bs6),
            _ => Err(TypesError::UnknownDomain(s.to_string())),
        }
    }
}

/// Vehicle category tag. Informational only; never consulted by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleCategory {
    #[serde(rename = "2W")]
    TwoWheeler,
    #[serde(rename = "3W")]
    ThreeWheeler,
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoWheeler => f.write_str("2W"),
            Self::ThreeWheeler => f.write_str("3W"),
        }
    }
}

impl FromStr for VehicleCategory {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2w" | "2-wheeler" | "two_wheeler" => Ok(Self::TwoWheeler),
            "3w" | "3-wheeler" | "three_wheeler" => Ok(Self::ThreeWheeler),
            _ => Err(TypesError::UnknownVehicleCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspirants_use_technician_questions() {
        assert_eq!(Role::Aspirant.question_role(), Role::Technician);
        assert_eq!(Role::Sales.question_role(), Role::Sales);
        assert_eq!(Role::Technician.question_role(), Role::Technician);
    }

    #[test]
    fn only_technicians_are_multi_step() {
        for role in Role::ALL {
            assert_eq!(role.is_single_step(), role != Role::Technician);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Technician".parse::<Role>().unwrap(), Role::Technician);
        assert_eq!("bs6".parse::<Domain>().unwrap(), Domain::Bs6);
        assert_eq!("2-wheeler".parse::<VehicleCategory>().unwrap(), VehicleCategory::TwoWheeler);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(
            "mechanic".parse::<Role>(),
            Err(TypesError::UnknownRole("mechanic".into()))
        );
        assert!("CNG".parse::<Domain>().is_err());
    }

    #[test]
    fn domain_serializes_as_upper_case_tag() {
        assert_eq!(serde_json::to_string(&Domain::Ev).unwrap(), "\"EV\"");
        assert_eq!(serde_json::to_string(&Role::Workshop).unwrap(), "\"workshop\"");
    }
}
