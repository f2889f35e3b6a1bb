//! # Project Management
//!
//! A project bundles one beam model with its display units, analysis
//! mode, metadata, and the results of the last run. Projects are the
//! unit of persistence and the surface an assistant-driven editor
//! works against.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::project::BeamProject;
//! use beam_core::model::{Support, SupportKind};
//!
//! let mut project = BeamProject::new("Jane Doe", "2024-017", "Acme Corp");
//! let id = project.add_support(Support::new(7.0, SupportKind::Roller));
//!
//! // New supports get sequential labels
//! assert_eq!(project.model.supports.last().unwrap().label, "S3");
//!
//! project.remove_support(id);
//! assert_eq!(project.model.supports.len(), 2);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{analyze, AnalysisOptions, AnalysisResults};
use crate::errors::BeamResult;
use crate::model::{BeamConfig, BeamModel, Load, SectionProperties, Support, SupportKind};
use crate::units::UnitSystem;

/// Current schema version for saved project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Diagram sampling density used by project-level runs
const PROJECT_SAMPLES_PER_SEGMENT: usize = 100;

// =============================================================================
// METADATA
// =============================================================================

/// Project identification and bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version of the file this was loaded from
    pub version: String,

    /// Engineer responsible for the analysis
    pub engineer: String,

    /// Job or project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Last modification timestamp
    pub modified: DateTime<Utc>,
}

impl ProjectMetadata {
    /// Create metadata stamped with the current time
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            version: SCHEMA_VERSION.to_string(),
            engineer: engineer.into(),
            job_id: job_id.into(),
            client: client.into(),
            created: now,
            modified: now,
        }
    }
}

// =============================================================================
// PROPOSAL
// =============================================================================

/// A partial configuration replacement, typically proposed by an
/// assistant from a natural-language request. Absent fields keep their
/// current values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelProposal {
    /// Replacement beam (length and optionally section)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beam: Option<BeamConfig>,

    /// Replacement support list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports: Option<Vec<Support>>,

    /// Replacement load list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loads: Option<Vec<Load>>,

    /// New analysis-mode flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_fem: Option<bool>,
}

// =============================================================================
// PROJECT
// =============================================================================

/// A complete beam analysis project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamProject {
    /// Identification and timestamps
    pub metadata: ProjectMetadata,

    /// Display units for reports and tables
    pub units: UnitSystem,

    /// Whether the stiffness (FEM) fallback is enabled
    pub use_fem: bool,

    /// The beam, its supports, and its loads
    pub model: BeamModel,

    /// Results of the most recent run, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<AnalysisResults>,
}

impl BeamProject {
    /// Create a project pre-loaded with the demo beam: a 10 m simply
    /// supported span with a midspan point load and a partial UDL.
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        Self {
            metadata: ProjectMetadata::new(engineer, job_id, client),
            units: UnitSystem::default(),
            use_fem: false,
            model: demo_model(),
            results: None,
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }

    /// Add a support, assigning a sequential label if it has none.
    /// Returns the support's id.
    pub fn add_support(&mut self, mut support: Support) -> Uuid {
        if support.label.is_empty() {
            support.label = format!("S{}", self.model.supports.len() + 1);
        }
        let id = support.id;
        self.model.supports.push(support);
        self.touch();
        id
    }

    /// Add a load, assigning a sequential label if it has none.
    /// Returns the load's id.
    pub fn add_load(&mut self, mut load: Load) -> Uuid {
        if load.label.is_empty() {
            load.label = format!("L{}", self.model.loads.len() + 1);
        }
        let id = load.id;
        self.model.loads.push(load);
        self.touch();
        id
    }

    /// Remove a support by id
    pub fn remove_support(&mut self, id: Uuid) -> Option<Support> {
        let idx = self.model.supports.iter().position(|s| s.id == id)?;
        let removed = self.model.supports.remove(idx);
        self.touch();
        Some(removed)
    }

    /// Remove a load by id
    pub fn remove_load(&mut self, id: Uuid) -> Option<Load> {
        let idx = self.model.loads.iter().position(|l| l.id == id)?;
        let removed = self.model.loads.remove(idx);
        self.touch();
        Some(removed)
    }

    /// Get a mutable support by id; marks the project modified
    pub fn get_support_mut(&mut self, id: Uuid) -> Option<&mut Support> {
        self.touch();
        self.model.supports.iter_mut().find(|s| s.id == id)
    }

    /// Get a mutable load by id; marks the project modified
    pub fn get_load_mut(&mut self, id: Uuid) -> Option<&mut Load> {
        self.touch();
        self.model.loads.iter_mut().find(|l| l.id == id)
    }

    /// Apply a partial configuration proposal.
    ///
    /// A proposed beam that carries no section keeps the current one, so
    /// an assistant changing only the span does not silently wipe E/I.
    /// Previous results stay in place until the next run.
    pub fn apply_proposal(&mut self, proposal: ModelProposal) {
        if let Some(mut beam) = proposal.beam {
            if beam.section.is_none() {
                beam.section = self.model.beam.section;
            }
            self.model.beam = beam;
        }
        if let Some(supports) = proposal.supports {
            self.model.supports = supports;
        }
        if let Some(loads) = proposal.loads {
            self.model.loads = loads;
        }
        if let Some(use_fem) = proposal.use_fem {
            self.use_fem = use_fem;
        }
        self.touch();
    }

    /// Options a project-level run uses: the project's mode and units,
    /// at presentation sampling density
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::default()
            .with_fem(self.use_fem)
            .with_samples_per_segment(PROJECT_SAMPLES_PER_SEGMENT)
            .with_units(self.units)
    }

    /// Run the analysis and store its results, replacing any previous
    /// run wholesale.
    pub fn run_analysis(&mut self) -> BeamResult<&AnalysisResults> {
        let results = analyze(&self.model, &self.analysis_options())?;
        self.touch();
        Ok(self.results.insert(results))
    }
}

impl Default for BeamProject {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

/// The demo configuration every new project starts from
fn demo_model() -> BeamModel {
    BeamModel::new(10.0)
        .with_section(SectionProperties::new(210_000.0, 8.5e-5))
        .with_support(Support::new(0.0, SupportKind::Pinned).with_label("S1"))
        .with_support(Support::new(10.0, SupportKind::Roller).with_label("S2"))
        .with_load(Load::point(-20.0, 5.0).with_label("L1"))
        .with_load(Load::udl(-2.0, 0.0, 4.0).with_label("L2"))
}
