//! # Analysis Results
//!
//! Output data structures for an analysis run: reactions, equilibrium
//! checks, diagram samples, key points, and the human-readable log. These
//! are the output half of the JSON contract and serialize with the field
//! names downstream consumers key on (`supportId`, `Ry`, `keyPoints`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// REACTIONS
// =============================================================================

/// Solved reaction at one support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResult {
    /// Id of the support this reaction belongs to
    pub support_id: Uuid,

    /// Support label at solve time, for reports
    #[serde(default)]
    pub label: String,

    /// Support position
    pub x: f64,

    /// Vertical reaction force (positive = upward)
    #[serde(rename = "Ry")]
    pub ry: f64,

    /// Moment reaction (non-zero only for fixed supports)
    #[serde(rename = "M")]
    pub m: f64,
}

impl ReactionResult {
    /// Label if set, otherwise a short form of the support id
    pub fn display_ref(&self) -> String {
        if self.label.is_empty() {
            self.support_id.simple().to_string()[..8].to_string()
        } else {
            self.label.clone()
        }
    }
}

/// Global equilibrium residuals computed from the solved reactions
///
/// Both sums should be near zero for a correct solution; the report
/// flags anything above 0.01 in absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EquilibriumCheck {
    /// Sum of vertical forces: reactions plus applied loads
    pub sum_fy: f64,

    /// Sum of moments about x = 0: reactions plus applied loads
    pub sum_m: f64,
}

impl EquilibriumCheck {
    /// Residual tolerance used when flagging a check line in the report
    pub const TOLERANCE: f64 = 0.01;

    /// True when both residuals are within reporting tolerance
    pub fn is_balanced(&self) -> bool {
        self.sum_fy.abs() < Self::TOLERANCE && self.sum_m.abs() < Self::TOLERANCE
    }
}

// =============================================================================
// DIAGRAMS AND KEY POINTS
// =============================================================================

/// Shear and moment at a structurally significant position, evaluated
/// from both sides so jumps at point loads and moments are visible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPointResult {
    /// Position along the beam
    pub x: f64,

    /// Shear just to the left of `x`
    pub shear_left: f64,

    /// Shear just to the right of `x`
    pub shear_right: f64,

    /// Moment just to the left of `x`
    pub moment_left: f64,

    /// Moment just to the right of `x`
    pub moment_right: f64,

    /// What lives at this position (e.g., "Support S1, Load L1")
    pub description: String,
}

impl KeyPointResult {
    /// Shear discontinuity at this point (right minus left)
    pub fn shear_jump(&self) -> f64 {
        self.shear_right - self.shear_left
    }

    /// Moment discontinuity at this point (right minus left)
    pub fn moment_jump(&self) -> f64 {
        self.moment_right - self.moment_left
    }
}

/// Location and size of the extreme bending moment found while sampling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentPeak {
    /// Position of the largest absolute moment
    pub x: f64,

    /// Absolute moment value at that position
    pub value: f64,
}

// =============================================================================
// RESULTS
// =============================================================================

/// Everything an analysis run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisResults {
    /// Solved reactions, one per support, in model order
    pub reactions: Vec<ReactionResult>,

    /// Global equilibrium residuals; absent if the run failed before
    /// reactions were available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks: Option<EquilibriumCheck>,

    /// Sample positions for the diagrams, ascending
    pub x_points: Vec<f64>,

    /// Shear force at each sample position
    pub shear_points: Vec<f64>,

    /// Bending moment at each sample position
    pub moment_points: Vec<f64>,

    /// Left/right shear and moment at structurally significant positions
    #[serde(rename = "keyPoints")]
    pub key_points: Vec<KeyPointResult>,

    /// Human-readable report, one line per entry
    pub log: Vec<String>,

    /// Largest absolute bending moment seen while sampling, if any
    /// samples were taken
    #[serde(
        rename = "peakMoment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub peak_moment: Option<MomentPeak>,
}

impl AnalysisResults {
    /// The report log joined into one printable block
    pub fn report_text(&self) -> String {
        self.log.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_serialization_shape() {
        let reaction = ReactionResult {
            support_id: Uuid::new_v4(),
            label: "S1".to_string(),
            x: 0.0,
            ry: 16.8,
            m: 0.0,
        };
        let json = serde_json::to_string(&reaction).unwrap();
        assert!(json.contains("\"supportId\":"));
        assert!(json.contains("\"Ry\":16.8"));
        assert!(json.contains("\"M\":0.0"));
    }

    #[test]
    fn test_check_serialization_shape() {
        let check = EquilibriumCheck {
            sum_fy: 0.0,
            sum_m: -1.2e-14,
        };
        let json = serde_json::to_string(&check).unwrap();
        assert!(json.contains("\"sumFy\":"));
        assert!(json.contains("\"sumM\":"));
    }

    #[test]
    fn test_check_balance() {
        assert!(EquilibriumCheck { sum_fy: 0.001, sum_m: -0.005 }.is_balanced());
        assert!(!EquilibriumCheck { sum_fy: 0.02, sum_m: 0.0 }.is_balanced());
    }

    #[test]
    fn test_key_point_jumps() {
        let kp = KeyPointResult {
            x: 5.0,
            shear_left: 8.8,
            shear_right: -11.2,
            moment_left: 60.0,
            moment_right: 60.0,
            description: "Load L1".to_string(),
        };
        assert!((kp.shear_jump() + 20.0).abs() < 1e-12);
        assert!(kp.moment_jump().abs() < 1e-12);
    }

    #[test]
    fn test_results_field_names() {
        let results = AnalysisResults {
            key_points: vec![],
            peak_moment: Some(MomentPeak { x: 5.0, value: 60.4 }),
            ..Default::default()
        };
        let json = serde_json::to_string(&results).unwrap();
        assert!(json.contains("\"keyPoints\":"));
        assert!(json.contains("\"peakMoment\":"));
        assert!(json.contains("\"x_points\":"));

        // Absent optionals stay out of the payload
        let empty = AnalysisResults::default();
        let json = serde_json::to_string(&empty).unwrap();
        assert!(!json.contains("checks"));
        assert!(!json.contains("peakMoment"));
    }

    #[test]
    fn test_results_roundtrip() {
        let results = AnalysisResults {
            reactions: vec![ReactionResult {
                support_id: Uuid::new_v4(),
                label: "S1".to_string(),
                x: 0.0,
                ry: 16.8,
                m: 0.0,
            }],
            checks: Some(EquilibriumCheck { sum_fy: 0.0, sum_m: 0.0 }),
            x_points: vec![0.0, 5.0, 10.0],
            shear_points: vec![16.8, 8.8, -11.2],
            moment_points: vec![0.0, 60.0, 0.0],
            key_points: vec![],
            log: vec!["### STRUCTURAL ANALYSIS REPORT ###".to_string()],
            peak_moment: Some(MomentPeak { x: 5.0, value: 60.0 }),
        };
        let json = serde_json::to_string(&results).unwrap();
        let parsed: AnalysisResults = serde_json::from_str(&json).unwrap();
        assert_eq!(results, parsed);
    }
}
