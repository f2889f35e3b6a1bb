//! # Beam Model
//!
//! Input data structures for an analysis run: the beam itself (span and
//! optional section properties), point supports, and applied loads. These
//! types are the input half of the JSON contract; the solvers never
//! mutate them.
//!
//! ## Sign Conventions
//!
//! - Loads: negative is downward (gravity loads are negative)
//! - Reactions: positive is upward
//! - Moments: positive is counterclockwise
//! - Positions: measured from the left end of the beam (x = 0)
//!
//! ## Example
//!
//! ```rust
//! use beam_core::model::{BeamModel, Support, SupportKind, Load};
//!
//! let model = BeamModel::new(10.0)
//!     .with_support(Support::new(0.0, SupportKind::Pinned).with_label("S1"))
//!     .with_support(Support::new(10.0, SupportKind::Roller).with_label("S2"))
//!     .with_load(Load::point(-20.0, 5.0).with_label("L1"));
//!
//! assert_eq!(model.reaction_unknowns(), 2);
//! assert_eq!(model.total_vertical_load(), -20.0);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BeamError, BeamResult};

// =============================================================================
// SUPPORT
// =============================================================================

/// Support condition at a point along the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    /// Pinned/hinged support - restrains vertical displacement, allows rotation
    #[default]
    Pinned,

    /// Roller support - same restraint as pinned for in-plane beam analysis
    Roller,

    /// Fixed support - restrains displacement and rotation, carries a
    /// moment reaction
    Fixed,
}

impl SupportKind {
    /// All available support kinds for UI selection
    pub const ALL: [SupportKind; 3] = [
        SupportKind::Pinned,
        SupportKind::Roller,
        SupportKind::Fixed,
    ];

    /// Returns true if this support restrains vertical displacement
    pub fn restrains_vertical(&self) -> bool {
        true
    }

    /// Returns true if this support restrains rotation
    pub fn restrains_rotation(&self) -> bool {
        matches!(self, SupportKind::Fixed)
    }

    /// Number of unknown reaction components this support introduces
    /// (vertical force, plus a moment for fixed supports)
    pub fn reaction_components(&self) -> usize {
        if self.restrains_rotation() {
            2
        } else {
            1
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportKind::Pinned => "Pinned",
            SupportKind::Roller => "Roller",
            SupportKind::Fixed => "Fixed",
        }
    }

    /// Get short symbol for diagrams
    pub fn symbol(&self) -> &'static str {
        match self {
            SupportKind::Pinned => "△",
            SupportKind::Roller => "○",
            SupportKind::Fixed => "▣",
        }
    }
}

impl std::fmt::Display for SupportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A point support on the beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Unique identifier for this support
    pub id: Uuid,

    /// Optional user label (e.g., "S1"), used in reports and tables
    #[serde(default)]
    pub label: String,

    /// Position from the left end of the beam
    pub x: f64,

    /// Support condition
    #[serde(rename = "type")]
    pub kind: SupportKind,
}

impl Support {
    /// Create a new support
    pub fn new(x: f64, kind: SupportKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: String::new(),
            x,
            kind,
        }
    }

    /// Create with a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Create with a specific UUID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Label if set, otherwise a short form of the id
    pub fn display_ref(&self) -> String {
        if self.label.is_empty() {
            self.id.simple().to_string()[..8].to_string()
        } else {
            self.label.clone()
        }
    }
}

// =============================================================================
// LOAD
// =============================================================================

/// The kind and geometry of an applied load
///
/// Serializes with a lowercase `type` tag and flat fields, so a point
/// load reads `{"type": "point", "magnitude": -20.0, "x": 5.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LoadKind {
    /// Concentrated force at a position (negative = downward)
    Point { magnitude: f64, x: f64 },

    /// Uniformly distributed load of intensity `w` over `[x_start, x_end]`
    Udl { w: f64, x_start: f64, x_end: f64 },

    /// Concentrated moment at a position (positive = counterclockwise)
    Moment { magnitude: f64, x: f64 },
}

impl LoadKind {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadKind::Point { .. } => "Point",
            LoadKind::Udl { .. } => "UDL",
            LoadKind::Moment { .. } => "Moment",
        }
    }
}

/// An applied load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Unique identifier for this load
    pub id: Uuid,

    /// Optional user label (e.g., "L1"), used in reports and tables
    #[serde(default)]
    pub label: String,

    /// Kind and geometry
    #[serde(flatten)]
    pub kind: LoadKind,
}

impl Load {
    /// Create a point load
    pub fn point(magnitude: f64, x: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: String::new(),
            kind: LoadKind::Point { magnitude, x },
        }
    }

    /// Create a uniformly distributed load
    pub fn udl(w: f64, x_start: f64, x_end: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: String::new(),
            kind: LoadKind::Udl { w, x_start, x_end },
        }
    }

    /// Create a concentrated moment
    pub fn moment(magnitude: f64, x: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: String::new(),
            kind: LoadKind::Moment { magnitude, x },
        }
    }

    /// Create with a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Create with a specific UUID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Label if set, otherwise a short form of the id
    pub fn display_ref(&self) -> String {
        if self.label.is_empty() {
            self.id.simple().to_string()[..8].to_string()
        } else {
            self.label.clone()
        }
    }

    /// Total vertical force contributed by this load
    /// (moments contribute none)
    pub fn vertical_magnitude(&self) -> f64 {
        match self.kind {
            LoadKind::Point { magnitude, .. } => magnitude,
            LoadKind::Udl { w, x_start, x_end } => w * (x_end - x_start),
            LoadKind::Moment { .. } => 0.0,
        }
    }

    /// Moment of this load about a reference position.
    ///
    /// Point loads act at their position, UDLs at their centroid, and a
    /// concentrated moment contributes its magnitude regardless of where
    /// it is applied.
    pub fn moment_about(&self, ref_x: f64) -> f64 {
        match self.kind {
            LoadKind::Point { magnitude, x } => magnitude * (x - ref_x),
            LoadKind::Udl { w, x_start, x_end } => {
                let len = x_end - x_start;
                let centroid = x_start + len / 2.0;
                w * len * (centroid - ref_x)
            }
            LoadKind::Moment { magnitude, .. } => magnitude,
        }
    }
}

// =============================================================================
// BEAM
// =============================================================================

/// Section properties needed by the stiffness method
///
/// Serialized as `"E"` and `"I"` to match the conventional symbols.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Elastic (Young's) modulus
    #[serde(rename = "E")]
    pub elastic_modulus: f64,

    /// Second moment of area about the bending axis
    #[serde(rename = "I")]
    pub moment_of_inertia: f64,
}

impl SectionProperties {
    /// Create section properties from E and I
    pub fn new(elastic_modulus: f64, moment_of_inertia: f64) -> Self {
        Self {
            elastic_modulus,
            moment_of_inertia,
        }
    }
}

/// The beam itself: span length and optional section properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    /// Total span length
    pub length: f64,

    /// Section properties; only required for the stiffness method
    #[serde(default)]
    pub section: Option<SectionProperties>,
}

impl BeamConfig {
    /// Create a beam of the given length with no section properties
    pub fn new(length: f64) -> Self {
        Self {
            length,
            section: None,
        }
    }

    /// Attach section properties
    pub fn with_section(mut self, section: SectionProperties) -> Self {
        self.section = Some(section);
        self
    }

    /// Flexural rigidity EI, if the section supplies both E and I.
    ///
    /// A zero E or I counts as missing; the stiffness method cannot use
    /// a rigidity of zero.
    pub fn flexural_rigidity(&self) -> Option<f64> {
        self.section.as_ref().and_then(|s| {
            if s.elastic_modulus != 0.0 && s.moment_of_inertia != 0.0 {
                Some(s.elastic_modulus * s.moment_of_inertia)
            } else {
                None
            }
        })
    }
}

// =============================================================================
// MODEL
// =============================================================================

/// The complete input to an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamModel {
    /// Beam span and section
    pub beam: BeamConfig,

    /// Point supports, in whatever order the caller keeps them
    pub supports: Vec<Support>,

    /// Applied loads
    pub loads: Vec<Load>,
}

impl BeamModel {
    /// Create an empty model for a beam span
    pub fn new(length: f64) -> Self {
        Self {
            beam: BeamConfig::new(length),
            supports: Vec::new(),
            loads: Vec::new(),
        }
    }

    /// Attach section properties to the beam
    pub fn with_section(mut self, section: SectionProperties) -> Self {
        self.beam.section = Some(section);
        self
    }

    /// Add a support
    pub fn with_support(mut self, support: Support) -> Self {
        self.supports.push(support);
        self
    }

    /// Add a load
    pub fn with_load(mut self, load: Load) -> Self {
        self.loads.push(load);
        self
    }

    /// Count of unknown reaction components across all supports
    pub fn reaction_unknowns(&self) -> usize {
        self.supports
            .iter()
            .map(|s| s.kind.reaction_components())
            .sum()
    }

    /// Sum of all applied vertical loads (moments excluded)
    pub fn total_vertical_load(&self) -> f64 {
        self.loads.iter().map(|l| l.vertical_magnitude()).sum()
    }

    /// Sum of applied-load moments about a reference position
    pub fn applied_moment_about(&self, ref_x: f64) -> f64 {
        self.loads.iter().map(|l| l.moment_about(ref_x)).sum()
    }

    /// Check the model for inputs the solvers cannot work with.
    ///
    /// Geometry problems (too few supports, collocated supports) are not
    /// caught here; those surface from the solvers as `SingularSystem`.
    pub fn validate(&self) -> BeamResult<()> {
        let length = self.beam.length;
        if !length.is_finite() || length <= 0.0 {
            return Err(BeamError::invalid_input(
                "beam.length",
                length.to_string(),
                "Beam length must be positive",
            ));
        }

        if let Some(section) = &self.beam.section {
            if !section.elastic_modulus.is_finite() || section.elastic_modulus < 0.0 {
                return Err(BeamError::invalid_input(
                    "beam.section.E",
                    section.elastic_modulus.to_string(),
                    "Elastic modulus must be finite and non-negative",
                ));
            }
            if !section.moment_of_inertia.is_finite() || section.moment_of_inertia < 0.0 {
                return Err(BeamError::invalid_input(
                    "beam.section.I",
                    section.moment_of_inertia.to_string(),
                    "Moment of inertia must be finite and non-negative",
                ));
            }
        }

        for support in &self.supports {
            if !support.x.is_finite() || support.x < 0.0 || support.x > length {
                return Err(BeamError::invalid_input(
                    format!("support {}", support.display_ref()),
                    support.x.to_string(),
                    format!("Support position must lie within [0, {}]", length),
                ));
            }
        }

        for load in &self.loads {
            let label = load.display_ref();
            match load.kind {
                LoadKind::Point { magnitude, x } | LoadKind::Moment { magnitude, x } => {
                    if !magnitude.is_finite() {
                        return Err(BeamError::invalid_input(
                            format!("load {}", label),
                            magnitude.to_string(),
                            "Load magnitude must be finite",
                        ));
                    }
                    if !x.is_finite() || x < 0.0 || x > length {
                        return Err(BeamError::invalid_input(
                            format!("load {}", label),
                            x.to_string(),
                            format!("Load position must lie within [0, {}]", length),
                        ));
                    }
                }
                LoadKind::Udl { w, x_start, x_end } => {
                    if !w.is_finite() {
                        return Err(BeamError::invalid_input(
                            format!("load {}", label),
                            w.to_string(),
                            "UDL intensity must be finite",
                        ));
                    }
                    if !x_start.is_finite()
                        || !x_end.is_finite()
                        || x_start < 0.0
                        || x_end > length
                    {
                        return Err(BeamError::invalid_input(
                            format!("load {}", label),
                            format!("[{}, {}]", x_start, x_end),
                            format!("UDL span must lie within [0, {}]", length),
                        ));
                    }
                    if x_start > x_end {
                        return Err(BeamError::invalid_input(
                            format!("load {}", label),
                            format!("[{}, {}]", x_start, x_end),
                            "UDL start must not exceed its end",
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_model() -> BeamModel {
        BeamModel::new(10.0)
            .with_section(SectionProperties::new(210_000.0, 8.5e-5))
            .with_support(Support::new(0.0, SupportKind::Pinned).with_label("S1"))
            .with_support(Support::new(10.0, SupportKind::Roller).with_label("S2"))
            .with_load(Load::point(-20.0, 5.0).with_label("L1"))
            .with_load(Load::udl(-2.0, 0.0, 4.0).with_label("L2"))
    }

    #[test]
    fn test_reaction_unknowns() {
        let model = demo_model();
        assert_eq!(model.reaction_unknowns(), 2);

        let fixed = BeamModel::new(10.0)
            .with_support(Support::new(0.0, SupportKind::Fixed));
        assert_eq!(fixed.reaction_unknowns(), 2);

        let three = demo_model()
            .with_support(Support::new(5.0, SupportKind::Roller).with_label("S3"));
        assert_eq!(three.reaction_unknowns(), 3);
    }

    #[test]
    fn test_load_aggregates() {
        let model = demo_model();
        // Point -20 plus UDL -2 * 4
        assert_eq!(model.total_vertical_load(), -28.0);
        // About x=0: -20*5 + (-2*4)*2 = -116
        assert_eq!(model.applied_moment_about(0.0), -116.0);
    }

    #[test]
    fn test_moment_load_is_position_independent() {
        let m = Load::moment(15.0, 3.0);
        assert_eq!(m.vertical_magnitude(), 0.0);
        assert_eq!(m.moment_about(0.0), 15.0);
        assert_eq!(m.moment_about(10.0), 15.0);
    }

    #[test]
    fn test_flexural_rigidity() {
        let model = demo_model();
        let ei = model.beam.flexural_rigidity().unwrap();
        assert!((ei - 210_000.0 * 8.5e-5).abs() < 1e-12);

        // Missing section
        assert_eq!(BeamModel::new(10.0).beam.flexural_rigidity(), None);

        // Zero E counts as missing
        let zero_e = BeamConfig::new(10.0).with_section(SectionProperties::new(0.0, 1.0));
        assert_eq!(zero_e.flexural_rigidity(), None);
    }

    #[test]
    fn test_support_kind_components() {
        assert_eq!(SupportKind::Pinned.reaction_components(), 1);
        assert_eq!(SupportKind::Roller.reaction_components(), 1);
        assert_eq!(SupportKind::Fixed.reaction_components(), 2);
        assert!(SupportKind::Fixed.restrains_rotation());
        assert!(!SupportKind::Roller.restrains_rotation());
    }

    #[test]
    fn test_serialization_shape() {
        let support = Support::new(0.0, SupportKind::Pinned).with_label("S1");
        let json = serde_json::to_string(&support).unwrap();
        assert!(json.contains("\"type\":\"pinned\""));
        assert!(json.contains("\"label\":\"S1\""));

        let load = Load::point(-20.0, 5.0).with_label("L1");
        let json = serde_json::to_string(&load).unwrap();
        assert!(json.contains("\"type\":\"point\""));
        assert!(json.contains("\"magnitude\":-20.0"));
        assert!(json.contains("\"x\":5.0"));

        let section = SectionProperties::new(210_000.0, 8.5e-5);
        let json = serde_json::to_string(&section).unwrap();
        assert!(json.contains("\"E\":"));
        assert!(json.contains("\"I\":"));
    }

    #[test]
    fn test_model_roundtrip() {
        let model = demo_model();
        let json = serde_json::to_string(&model).unwrap();
        let parsed: BeamModel = serde_json::from_str(&json).unwrap();
        assert_eq!(model, parsed);
    }

    #[test]
    fn test_validate_accepts_demo() {
        assert!(demo_model().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_length() {
        let model = BeamModel::new(0.0);
        assert_eq!(model.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let model = BeamModel::new(f64::NAN);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_span_positions() {
        let model = BeamModel::new(10.0)
            .with_support(Support::new(12.0, SupportKind::Pinned).with_label("S1"));
        assert!(model.validate().is_err());

        let model = BeamModel::new(10.0).with_load(Load::point(-5.0, -1.0));
        assert!(model.validate().is_err());

        let model = BeamModel::new(10.0).with_load(Load::udl(-2.0, 6.0, 4.0));
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_allows_zero_supports() {
        // Geometry problems are the solvers' business, not validation's.
        assert!(BeamModel::new(10.0).validate().is_ok());
    }
}
