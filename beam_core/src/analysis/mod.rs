//! # Beam Analysis
//!
//! The analysis pipeline. One call to [`analyze`] takes a model from
//! input to full result bundle:
//!
//! 1. Validate the model and snapshot it
//! 2. Count unknown reaction components
//! 3. Solve: equilibrium equations when the system is isostatic
//!    (unknowns ≤ 2), otherwise the stiffness method, which also serves
//!    as the fallback when the equilibrium system turns out singular
//! 4. Verify global equilibrium residuals
//! 5. Write the report log, sample the diagrams, tabulate key points
//!
//! The run is a pure function of its inputs: no hidden state survives
//! between calls, and an unchanged model with a pinned timestamp
//! reproduces its results bit for bit.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::analysis::{analyze, AnalysisOptions};
//! use beam_core::model::{BeamModel, Support, SupportKind, Load};
//!
//! let model = BeamModel::new(10.0)
//!     .with_support(Support::new(0.0, SupportKind::Pinned).with_label("S1"))
//!     .with_support(Support::new(10.0, SupportKind::Roller).with_label("S2"))
//!     .with_load(Load::point(-20.0, 5.0).with_label("L1"));
//!
//! let results = analyze(&model, &AnalysisOptions::default()).unwrap();
//! assert!((results.reactions[0].ry - 10.0).abs() < 1e-6);
//! assert!((results.reactions[1].ry - 10.0).abs() < 1e-6);
//! ```

pub mod internal_forces;
pub mod results;

mod diagrams;
mod equilibrium;
mod stiffness;

// Re-export commonly used types
pub use internal_forces::{internal_forces_at, InternalForces, Side};
pub use results::{
    AnalysisResults, EquilibriumCheck, KeyPointResult, MomentPeak, ReactionResult,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BeamError, BeamResult};
use crate::model::{BeamModel, LoadKind};
use crate::units::UnitSystem;

/// Positions closer than this are treated as the same point, both when
/// meshing and when collapsing duplicate diagram samples
pub(crate) const POSITION_EPS: f64 = 1e-9;

/// Sorted, deduplicated list of every position where something changes:
/// beam ends, supports, point loads, moments, UDL boundaries.
///
/// The stiffness mesher, the diagram sampler, and the key-point table
/// all share this list so their notions of "event" never drift apart.
pub(crate) fn event_positions(model: &BeamModel) -> Vec<f64> {
    let mut positions = vec![0.0, model.beam.length];
    for support in &model.supports {
        positions.push(support.x);
    }
    for load in &model.loads {
        match load.kind {
            LoadKind::Point { x, .. } | LoadKind::Moment { x, .. } => positions.push(x),
            LoadKind::Udl { x_start, x_end, .. } => {
                positions.push(x_start);
                positions.push(x_end);
            }
        }
    }
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
    positions.dedup_by(|a, b| (*a - *b).abs() < POSITION_EPS);
    positions
}

fn default_samples_per_segment() -> usize {
    20
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Knobs for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Allow the stiffness (FEM) path. Without it, a statically
    /// indeterminate model fails with `MethodUnavailable`.
    #[serde(default)]
    pub use_fem: bool,

    /// Interior sample count between consecutive events when building
    /// the diagrams
    #[serde(default = "default_samples_per_segment")]
    pub samples_per_segment: usize,

    /// Display units stamped into the report
    #[serde(default)]
    pub units: UnitSystem,

    /// Report timestamp override. `None` stamps the current time;
    /// pinning it makes repeated runs byte-identical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            use_fem: false,
            samples_per_segment: default_samples_per_segment(),
            units: UnitSystem::default(),
            timestamp: None,
        }
    }
}

impl AnalysisOptions {
    /// Enable or disable the stiffness fallback
    pub fn with_fem(mut self, use_fem: bool) -> Self {
        self.use_fem = use_fem;
        self
    }

    /// Set diagram sampling density
    pub fn with_samples_per_segment(mut self, samples: usize) -> Self {
        self.samples_per_segment = samples;
        self
    }

    /// Set the display units used in the report
    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    /// Pin the report timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

// =============================================================================
// ORCHESTRATOR
// =============================================================================

/// Run a full analysis: solve reactions, verify equilibrium, build the
/// report, sample diagrams, tabulate key points.
///
/// Fails with `MethodUnavailable` when the model is statically
/// indeterminate and `use_fem` is off, `MissingRigidity` when the FEM
/// path lacks E·I, and `SingularSystem` when no method can stabilize
/// the geometry. No partial results are returned on failure.
pub fn analyze(model: &BeamModel, options: &AnalysisOptions) -> BeamResult<AnalysisResults> {
    model.validate()?;

    // Private snapshot; the run never aliases caller-owned state.
    let model = model.clone();
    let units = options.units;
    let unknowns = model.reaction_unknowns();

    let mut log: Vec<String> = Vec::new();
    let timestamp = options.timestamp.unwrap_or_else(Utc::now);
    log.push("### STRUCTURAL ANALYSIS REPORT ###".to_string());
    log.push(format!("Date: {}", timestamp.format("%Y-%m-%d %H:%M:%S UTC")));
    log.push(format!(
        "Units: Length [{}], Force [{}]",
        units.length, units.force
    ));
    log.push(format!("Beam length: {} {}", model.beam.length, units.length));
    log.push(format!(
        "Supports: {} | Unknowns: {}",
        model.supports.len(),
        unknowns
    ));
    log.push("-".repeat(50));

    // Isostatic attempt, with one fallback to the stiffness method.
    let mut reactions: Option<Vec<ReactionResult>> = None;
    if unknowns <= 2 {
        log.push("METHOD: Static equilibrium equations (isostatic)".to_string());
        match equilibrium::solve(&model, &units, &mut log) {
            Ok(solved) => reactions = Some(solved),
            Err(_) => {
                log.push(
                    "Isostatic solver failed or is unstable. Switching to FEM.".to_string(),
                );
            }
        }
    }

    let reactions = match reactions {
        Some(solved) => solved,
        None => match model.beam.flexural_rigidity() {
            Some(ei) if options.use_fem => {
                log.push("METHOD: Stiffness matrix (finite elements - FEM)".to_string());
                if let Some(section) = &model.beam.section {
                    log.push(format!(
                        "Properties: E={}, I={} -> EI={}",
                        section.elastic_modulus, section.moment_of_inertia, ei
                    ));
                }
                stiffness::solve(&model, ei)?
            }
            _ => {
                log.push(
                    "ERROR: Hyperstatic system detected without E/I properties or FEM mode disabled."
                        .to_string(),
                );
                return Err(if options.use_fem {
                    BeamError::missing_rigidity(
                        "The FEM method requires Young's modulus (E) and moment of inertia (I) on the beam section.",
                    )
                } else {
                    BeamError::method_unavailable(
                        "Statically indeterminate system. Enable advanced FEM mode and provide Young's modulus (E) and inertia (I).",
                    )
                });
            }
        },
    };

    let checks = equilibrium::verify(&model, &reactions);
    append_report(&reactions, &checks, &units, &mut log);

    let samples = diagrams::sample_diagrams(&model, &reactions, options.samples_per_segment);
    let key_points = diagrams::key_point_table(&model, &reactions);

    Ok(AnalysisResults {
        reactions,
        checks: Some(checks),
        x_points: samples.x_points,
        shear_points: samples.shear_points,
        moment_points: samples.moment_points,
        key_points,
        log,
        peak_moment: samples.peak_moment,
    })
}

/// Reaction table and equilibrium check portion of the report
fn append_report(
    reactions: &[ReactionResult],
    checks: &EquilibriumCheck,
    units: &UnitSystem,
    log: &mut Vec<String>,
) {
    log.push(String::new());
    log.push("REACTION RESULTS:".to_string());
    for r in reactions {
        let moment_text = if r.m.abs() > 0.001 {
            format!(", Moment M = {:.3} {}", r.m, units.moment_label())
        } else {
            String::new()
        };
        log.push(format!(
            "   > Support {} (x={}{}): Ry = {:.3} {}{}",
            r.display_ref(),
            r.x,
            units.length,
            r.ry,
            units.force,
            moment_text
        ));
    }

    log.push(String::new());
    log.push("GLOBAL EQUILIBRIUM CHECK:".to_string());
    log.push(format!(
        "   > Sum Fy: {:.4} {} {}",
        checks.sum_fy,
        units.force,
        residual_flag(checks.sum_fy)
    ));
    log.push(format!(
        "   > Sum M:  {:.4} {} {}",
        checks.sum_m,
        units.moment_label(),
        residual_flag(checks.sum_m)
    ));
}

fn residual_flag(value: f64) -> &'static str {
    if value.abs() < EquilibriumCheck::TOLERANCE {
        "[OK]"
    } else {
        "[WARN]"
    }
}
