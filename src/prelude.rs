//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types of the crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use routegraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph = Graph::from_json(&std::fs::read_to_string("campaign.json")?)?;
//! let compiled = compile(&graph, &CampaignSettings::default())?;
//! println!("{} segments", compiled.segments.len());
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{
    Edge, Graph, GraphReader, IntoGraph, Node, NodeKind, NodeType, RuleOperator, RuleType,
    RuleValue, SegmentRule,
};
pub use crate::settings::{CampaignSettings, CustomGoal};

// Compilation
pub use crate::compiler::{CleanedSegment, CleanedVariant, CompiledConfig, Compiler, compile};

// Validation and publishing
pub use crate::publish::{
    ConfigStore, MemoryStore, PublishGate, PublishOutcome, PublishPipeline, PublishStatus,
    PublishTarget, Publisher, ValidationReport,
};
pub use crate::validator::{
    LandingPageStatus, LeadForm, Severity, ValidationContext, ValidationFinding,
    ValidationResult, Validator, validate,
};

// Configuration and errors
pub use crate::config::EngineConfig;
pub use crate::error::{CompileError, GraphParseError, GraphStructureError, PublishError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
