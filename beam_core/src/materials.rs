//! # Material & Section Presets
//!
//! Built-in elastic moduli for common structural materials and second
//! moments of area for standard European rolled sections, so a caller
//! can build a FEM-ready beam without hunting through tables.
//!
//! ## Data Source
//!
//! Section inertias follow the standard IPE/HEA catalog values (strong
//! axis). Elastic moduli are the usual design values: 210 GPa steel,
//! 70 GPa aluminum, and representative concrete/timber stiffnesses.
//!
//! ## Units
//!
//! Moduli are stored in MPa (N/mm²) and inertias in m⁴, matching the
//! convention of the default demo beam (E = 210000, I = 8.5e-5). The
//! solvers are unit-agnostic; keeping E and I consistent is the
//! caller's responsibility.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::materials;
//!
//! let steel = materials::lookup_material("Steel S235").unwrap();
//! assert_eq!(steel.elastic_modulus, 210_000.0);
//!
//! let section = materials::section_properties("Steel S235", "IPE 300").unwrap();
//! assert!(section.moment_of_inertia > 8.0e-5);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{BeamError, BeamResult};
use crate::model::SectionProperties;

/// A material with its design elastic modulus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPreset {
    /// Preset name (e.g., "Steel S235")
    pub name: String,

    /// Elastic modulus in MPa
    pub elastic_modulus: f64,
}

/// A rolled section with its strong-axis second moment of area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPreset {
    /// Catalog designation (e.g., "IPE 300")
    pub name: String,

    /// Second moment of area about the strong axis, in m⁴
    pub moment_of_inertia: f64,
}

/// Built-in material presets, loaded once
static MATERIALS: Lazy<Vec<MaterialPreset>> = Lazy::new(|| {
    let presets = [
        ("Steel S235", 210_000.0),
        ("Steel S275", 210_000.0),
        ("Steel S355", 210_000.0),
        ("Aluminum 6061", 70_000.0),
        ("Concrete C25/30", 31_000.0),
        ("Concrete C30/37", 33_000.0),
        ("Timber C24", 11_000.0),
        ("Timber GL24h", 11_500.0),
    ];
    presets
        .into_iter()
        .map(|(name, elastic_modulus)| MaterialPreset {
            name: name.to_string(),
            elastic_modulus,
        })
        .collect()
});

/// Built-in section presets, loaded once
static SECTIONS: Lazy<Vec<SectionPreset>> = Lazy::new(|| {
    // Strong-axis inertia, converted from catalog cm⁴ to m⁴
    let presets = [
        ("IPE 200", 1.943e-5),
        ("IPE 240", 3.892e-5),
        ("IPE 270", 5.790e-5),
        ("IPE 300", 8.356e-5),
        ("IPE 330", 1.177e-4),
        ("IPE 400", 2.313e-4),
        ("HEA 200", 3.692e-5),
        ("HEA 240", 7.763e-5),
        ("HEA 300", 1.826e-4),
    ];
    presets
        .into_iter()
        .map(|(name, moment_of_inertia)| SectionPreset {
            name: name.to_string(),
            moment_of_inertia,
        })
        .collect()
});

/// All material presets
pub fn materials() -> &'static [MaterialPreset] {
    &MATERIALS
}

/// All section presets
pub fn sections() -> &'static [SectionPreset] {
    &SECTIONS
}

/// Look up a material preset by name (case-insensitive)
pub fn lookup_material(name: &str) -> BeamResult<&'static MaterialPreset> {
    MATERIALS
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            BeamError::material_not_found(format!("Material '{}' not found in presets", name))
        })
}

/// Look up a section preset by name (case-insensitive)
pub fn lookup_section(name: &str) -> BeamResult<&'static SectionPreset> {
    SECTIONS
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            BeamError::material_not_found(format!("Section '{}' not found in presets", name))
        })
}

/// Combine a material and a section preset into FEM-ready properties
pub fn section_properties(material: &str, section: &str) -> BeamResult<SectionProperties> {
    let m = lookup_material(material)?;
    let s = lookup_section(section)?;
    Ok(SectionProperties::new(m.elastic_modulus, s.moment_of_inertia))
}

/// Second moment of area of a solid rectangle, b·h³/12.
///
/// `b` and `h` in meters give the result in m⁴.
pub fn rectangle_inertia(width: f64, height: f64) -> f64 {
    width * height * height * height / 12.0
}
