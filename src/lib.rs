//! # routegraph - Campaign Routing Graph Compiler
//!
//! **routegraph** turns a campaign graph authored in a visual editor into two things:
//! the compact routing configuration an edge router reads on every request, and a
//! validation report that decides whether the campaign may go live.
//!
//! A graph has exactly one traffic node. It fans out to audience segments, and each
//! segment fans out to A/B tests or plain content variants.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Graph**: Parse the editor document with [`graph::Graph::from_json`], or
//!     implement [`graph::IntoGraph`] for your own storage format. Payloads are checked
//!     against the schema of their node kind at this boundary.
//! 2.  **Validate**: Run the [`validator::Validator`] with a [`validator::ValidationContext`]
//!     describing the project's landing pages and lead form. Every problem comes back as
//!     data; nothing is thrown.
//! 3.  **Gate**: [`publish::PublishGate`] folds the findings into a single `can_publish`.
//! 4.  **Compile**: The [`compiler::Compiler`] projects the graph into a
//!     [`compiler::CompiledConfig`]. The same input always yields byte-identical JSON.
//! 5.  **Publish**: [`publish::Publisher`] writes the config to every target key
//!     concurrently and reports exactly which keys failed.
//!
//! [`publish::PublishPipeline`] runs steps 2 to 5 in order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use routegraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("campaign.json")?;
//!     let graph = Graph::from_json(&json)?;
//!     let context = ValidationContext::new().with_page("lp-1", LandingPageStatus::Published);
//!
//!     let report = Validator::default().report(&graph, &context);
//!     if !report.can_publish {
//!         for finding in &report.by_severity.critical {
//!             println!("blocked: {}", finding.message);
//!         }
//!         return Ok(());
//!     }
//!
//!     let compiled = Compiler::builder(&graph)
//!         .with_settings(CampaignSettings::default())
//!         .build()
//!         .compile()?;
//!     println!("{}", compiled.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod publish;
pub mod settings;
pub mod validator;
