//! # beam_core - Beam Analysis Engine
//!
//! `beam_core` is the computational heart of Camber, providing continuous-beam
//! statics with a clean, LLM-friendly API. All inputs and outputs are
//! JSON-serializable, making it ideal for integration with AI assistants via
//! MCP or similar protocols.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: [`analysis::analyze`] takes a model and options and returns results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Well-Documented**: Every type and function has examples
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::analysis::{analyze, AnalysisOptions};
//! use beam_core::model::{BeamModel, Load, Support, SupportKind};
//!
//! // A simply supported 6 m beam with a midspan point load
//! let model = BeamModel::new(6.0)
//!     .with_support(Support::new(0.0, SupportKind::Pinned))
//!     .with_support(Support::new(6.0, SupportKind::Roller))
//!     .with_load(Load::point(-10.0, 3.0));
//!
//! let results = analyze(&model, &AnalysisOptions::default()).unwrap();
//! assert!((results.reactions[0].ry - 5.0).abs() < 1e-9);
//! assert!((results.reactions[1].ry - 5.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Beam geometry, supports, loads, and section properties
//! - [`analysis`] - Reaction solvers, internal forces, diagrams, and reports
//! - [`project`] - Project container, metadata, and settings
//! - [`materials`] - Material and section preset tables
//! - [`linalg`] - Dense linear solver shared by both reaction solvers
//! - [`units`] - Display unit systems
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod analysis;
pub mod errors;
pub mod file_io;
pub mod linalg;
pub mod materials;
pub mod model;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::{analyze, AnalysisOptions, AnalysisResults};
pub use errors::{BeamError, BeamResult};
pub use file_io::{load_project, save_project, FileLock};
pub use model::{BeamModel, Load, LoadKind, Support, SupportKind};
pub use project::{BeamProject, ModelProposal, ProjectMetadata};
