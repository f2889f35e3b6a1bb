//! # Unit Selection
//!
//! Display units for reports and tables. The solvers are unit-agnostic
//! (they work in whatever consistent system the inputs use), so these
//! enums carry no conversion factors; they only label output. Serialized
//! values are the short codes ("m", "kN") so saved projects stay readable
//! and match what an LLM assistant would produce.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::units::{UnitSystem, LengthUnit, ForceUnit};
//!
//! let units = UnitSystem::default();
//! assert_eq!(units.length.code(), "m");
//! assert_eq!(units.moment_label(), "kN·m");
//!
//! let us = UnitSystem::new(LengthUnit::Feet, ForceUnit::Kips);
//! assert_eq!(us.distributed_label(), "kip/ft");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length unit used for positions and the beam span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "in")]
    Inches,
}

impl LengthUnit {
    /// All available length units for UI selection
    pub const ALL: [LengthUnit; 5] = [
        LengthUnit::Meters,
        LengthUnit::Centimeters,
        LengthUnit::Millimeters,
        LengthUnit::Feet,
        LengthUnit::Inches,
    ];

    /// Short code used in serialized projects and report text
    pub fn code(&self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Feet => "ft",
            LengthUnit::Inches => "in",
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LengthUnit::Meters => "Meters",
            LengthUnit::Centimeters => "Centimeters",
            LengthUnit::Millimeters => "Millimeters",
            LengthUnit::Feet => "Feet",
            LengthUnit::Inches => "Inches",
        }
    }

    /// Parse from a code, case-insensitively
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" => Some(LengthUnit::Meters),
            "cm" => Some(LengthUnit::Centimeters),
            "mm" => Some(LengthUnit::Millimeters),
            "ft" => Some(LengthUnit::Feet),
            "in" => Some(LengthUnit::Inches),
            _ => None,
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force unit used for loads and reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ForceUnit {
    #[default]
    #[serde(rename = "kN")]
    KiloNewtons,
    #[serde(rename = "N")]
    Newtons,
    #[serde(rename = "kgf")]
    KilogramsForce,
    #[serde(rename = "lb")]
    Pounds,
    #[serde(rename = "kip")]
    Kips,
}

impl ForceUnit {
    /// All available force units for UI selection
    pub const ALL: [ForceUnit; 5] = [
        ForceUnit::KiloNewtons,
        ForceUnit::Newtons,
        ForceUnit::KilogramsForce,
        ForceUnit::Pounds,
        ForceUnit::Kips,
    ];

    /// Short code used in serialized projects and report text
    pub fn code(&self) -> &'static str {
        match self {
            ForceUnit::KiloNewtons => "kN",
            ForceUnit::Newtons => "N",
            ForceUnit::KilogramsForce => "kgf",
            ForceUnit::Pounds => "lb",
            ForceUnit::Kips => "kip",
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ForceUnit::KiloNewtons => "Kilonewtons",
            ForceUnit::Newtons => "Newtons",
            ForceUnit::KilogramsForce => "Kilograms-force",
            ForceUnit::Pounds => "Pounds",
            ForceUnit::Kips => "Kips",
        }
    }

    /// Parse from a code, case-insensitively
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kn" => Some(ForceUnit::KiloNewtons),
            "n" => Some(ForceUnit::Newtons),
            "kgf" => Some(ForceUnit::KilogramsForce),
            "lb" | "lbs" => Some(ForceUnit::Pounds),
            "kip" | "kips" => Some(ForceUnit::Kips),
            _ => None,
        }
    }
}

impl std::fmt::Display for ForceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unit System
// ============================================================================

/// The pair of display units a project is annotated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UnitSystem {
    pub length: LengthUnit,
    pub force: ForceUnit,
}

impl UnitSystem {
    /// Create a unit system from its parts
    pub fn new(length: LengthUnit, force: ForceUnit) -> Self {
        Self { length, force }
    }

    /// Derived moment unit label, e.g. "kN·m"
    pub fn moment_label(&self) -> String {
        format!("{}·{}", self.force.code(), self.length.code())
    }

    /// Derived distributed-load unit label, e.g. "kN/m"
    pub fn distributed_label(&self) -> String {
        format!("{}/{}", self.force.code(), self.length.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for unit in LengthUnit::ALL {
            assert_eq!(LengthUnit::from_code(unit.code()), Some(unit));
        }
        for unit in ForceUnit::ALL {
            assert_eq!(ForceUnit::from_code(unit.code()), Some(unit));
        }
    }

    #[test]
    fn test_serialization_uses_codes() {
        let json = serde_json::to_string(&UnitSystem::default()).unwrap();
        assert_eq!(json, r#"{"length":"m","force":"kN"}"#);

        let parsed: UnitSystem = serde_json::from_str(r#"{"length":"ft","force":"kip"}"#).unwrap();
        assert_eq!(parsed.length, LengthUnit::Feet);
        assert_eq!(parsed.force, ForceUnit::Kips);
    }

    #[test]
    fn test_derived_labels() {
        let si = UnitSystem::default();
        assert_eq!(si.moment_label(), "kN·m");
        assert_eq!(si.distributed_label(), "kN/m");

        let us = UnitSystem::new(LengthUnit::Feet, ForceUnit::Pounds);
        assert_eq!(us.moment_label(), "lb·ft");
        assert_eq!(us.distributed_label(), "lb/ft");
    }

    #[test]
    fn test_flexible_parse() {
        assert_eq!(ForceUnit::from_code(" KN "), Some(ForceUnit::KiloNewtons));
        assert_eq!(ForceUnit::from_code("kips"), Some(ForceUnit::Kips));
        assert_eq!(LengthUnit::from_code("FT"), Some(LengthUnit::Feet));
        assert_eq!(LengthUnit::from_code("furlong"), None);
    }
}
