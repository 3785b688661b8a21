use super::fanout::{PublishOutcome, Publisher};
use super::gate::ValidationReport;
use super::store::ConfigStore;
use super::target::PublishTarget;
use crate::compiler::{CompiledConfig, compile};
use crate::config::EngineConfig;
use crate::error::PublishError;
use crate::graph::Graph;
use crate::settings::CampaignSettings;
use crate::validator::{ValidationContext, Validator};
use tracing::info;

/// Validate, gate, compile and fan out, in that order.
///
/// Nothing is written unless the report allows publishing. Two concurrent runs for the
/// same campaign are not serialized here; the caller must do that if it matters.
pub struct PublishPipeline<S> {
    validator: Validator,
    publisher: Publisher<S>,
}

/// What a successful run produced. `outcome` may still be partial.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub report: ValidationReport,
    pub compiled: CompiledConfig,
    pub outcome: PublishOutcome,
}

impl<S: ConfigStore> PublishPipeline<S> {
    pub fn new(store: S, config: &EngineConfig) -> Self {
        Self {
            validator: Validator::new(config.validation.clone()),
            publisher: Publisher::new(store, config.publish.clone()),
        }
    }

    pub fn publisher(&self) -> &Publisher<S> {
        &self.publisher
    }

    pub async fn run(
        &self,
        graph: &Graph,
        settings: &CampaignSettings,
        context: &ValidationContext,
        targets: &[PublishTarget],
    ) -> Result<PublishReceipt, PublishError> {
        if targets.is_empty() {
            return Err(PublishError::NoTargets);
        }

        let report = self.validator.report(graph, context);
        if !report.can_publish {
            info!(
                errors = report.summary.errors,
                critical = report.summary.critical_errors,
                "Publish blocked by validation"
            );
            return Err(PublishError::Blocked(Box::new(report)));
        }

        let compiled = compile(graph, settings)?;
        let outcome = self.publisher.publish(&compiled, targets).await?;

        Ok(PublishReceipt {
            report,
            compiled,
            outcome,
        })
    }
}
