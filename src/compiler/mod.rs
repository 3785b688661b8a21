use crate::error::CompileError;
use crate::graph::{Graph, GraphReader};
use crate::settings::CampaignSettings;
use tracing::info;

mod artifact;
mod projection;

pub use artifact::*;
use projection::SegmentProjector;

/// Compiles a campaign graph into the router's [`CompiledConfig`].
///
/// Compilation only fails when the graph does not have exactly one traffic node.
/// Incomplete graphs compile fine: missing fields come out as `null` and business rules
/// are left to the [`crate::validator::Validator`].
pub struct Compiler<'a> {
    graph: &'a Graph,
    settings: CampaignSettings,
}

pub struct CompilerBuilder<'a> {
    graph: &'a Graph,
    settings: CampaignSettings,
}

impl<'a> CompilerBuilder<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            settings: CampaignSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: CampaignSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Compiler<'a> {
        Compiler {
            graph: self.graph,
            settings: self.settings,
        }
    }
}

impl<'a> Compiler<'a> {
    pub fn builder(graph: &'a Graph) -> CompilerBuilder<'a> {
        CompilerBuilder::new(graph)
    }

    pub fn compile(&self) -> Result<CompiledConfig, CompileError> {
        let reader = GraphReader::new(self.graph);
        let root = reader.find_root()?;

        let segments = SegmentProjector::new(&reader).segments(&root.node.id);
        info!(
            root = %root.node.id,
            segments = segments.len(),
            variants = segments.iter().map(|s| s.variants.len()).sum::<usize>(),
            "Compiled campaign graph"
        );

        let settings = self.settings.clone();
        Ok(CompiledConfig {
            default_variant_id: root.payload.default_variant_id.clone(),
            segments,
            session_duration: settings.session_duration,
            attribution_period: settings.attribution_period,
            primary_goal: settings.primary_goal,
            custom_goals: settings.custom_goals,
        })
    }
}

/// Compiles `graph` with `settings` in one call.
pub fn compile(graph: &Graph, settings: &CampaignSettings) -> Result<CompiledConfig, CompileError> {
    Compiler::builder(graph)
        .with_settings(settings.clone())
        .build()
        .compile()
}
