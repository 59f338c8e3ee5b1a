use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::fields;

/// The three resolvable reference kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "flag_code")]
    Flag,
    #[serde(rename = "gear_type")]
    GearType,
    #[serde(rename = "vessel_type")]
    VesselType,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [FieldKind::Flag, FieldKind::GearType, FieldKind::VesselType];

    /// Input column holding the raw code for this kind.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Flag => fields::FLAG_CODE,
            Self::GearType => fields::GEAR_TYPE,
            Self::VesselType => fields::VESSEL_TYPE,
        }
    }

    /// Human-readable label used in issue messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Flag => "flag code",
            Self::GearType => "gear type",
            Self::VesselType => "vessel type",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for FieldKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flag" | "flag_code" => Ok(Self::Flag),
            "gear" | "gear_type" => Ok(Self::GearType),
            "vessel_type" => Ok(Self::VesselType),
            _ => Err(ModelError::UnknownFieldKind(s.to_string())),
        }
    }
}

/// Opaque, stable identifier of a reference table row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidReferenceId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_id_rejects_blank() {
        assert!(ReferenceId::new("  ").is_err());
        assert_eq!(ReferenceId::new(" 42 ").unwrap().as_str(), "42");
    }

    #[test]
    fn field_kind_parses_column_names() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.field_name().parse::<FieldKind>().unwrap(), kind);
        }
        assert!("tonnage".parse::<FieldKind>().is_err());
    }
}
