use super::store::ConfigStore;
use super::target::PublishTarget;
use crate::compiler::CompiledConfig;
use crate::config::PublishConfig;
use crate::error::{CompileError, StoreError};
use futures::future::join_all;
use itertools::Itertools;
use std::time::Duration;
use tracing::{info, warn};

/// Writes one compiled config to many store keys concurrently.
pub struct Publisher<S> {
    store: S,
    config: PublishConfig,
}

/// Per-key result of a fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    pub written: Vec<String>,
    pub failed: Vec<FailedWrite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedWrite {
    pub target: PublishTarget,
    pub key: String,
    pub error: StoreError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    /// Every target was written.
    Published,
    /// Some targets were written and some were not; those mirrors are stale.
    Partial,
    NothingPublished,
}

impl<S: ConfigStore> Publisher<S> {
    pub fn new(store: S, config: PublishConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serializes `compiled` once and writes it under every target's key.
    ///
    /// Targets resolving to the same key are written once. Writes run concurrently and
    /// each one is bounded by the configured timeout.
    pub async fn publish(
        &self,
        compiled: &CompiledConfig,
        targets: &[PublishTarget],
    ) -> Result<PublishOutcome, CompileError> {
        let payload = compiled.to_json()?;
        Ok(self.write_all(&payload, targets).await)
    }

    /// Re-publishes only the targets that failed in `previous`.
    pub async fn retry_failed(
        &self,
        compiled: &CompiledConfig,
        previous: &PublishOutcome,
    ) -> Result<PublishOutcome, CompileError> {
        let targets: Vec<_> = previous.failed.iter().map(|f| f.target.clone()).collect();
        self.publish(compiled, &targets).await
    }

    async fn write_all(&self, payload: &str, targets: &[PublishTarget]) -> PublishOutcome {
        let timeout_ms = self.config.write_timeout_ms;
        let writes = targets
            .iter()
            .map(|target| (target, target.key(&self.config)))
            .unique_by(|(_, key)| key.clone())
            .map(|(target, key)| async move {
                let write = self.store.put(&key, payload);
                let result = tokio::time::timeout(Duration::from_millis(timeout_ms), write)
                    .await
                    .unwrap_or(Err(StoreError::Timeout(timeout_ms)));
                (target, key, result)
            });

        let mut outcome = PublishOutcome::default();
        for (target, key, result) in join_all(writes).await {
            match result {
                Ok(()) => outcome.written.push(key),
                Err(error) => {
                    warn!(key = %key, error = %error, "Config store write failed");
                    outcome.failed.push(FailedWrite {
                        target: target.clone(),
                        key,
                        error,
                    });
                }
            }
        }

        info!(
            written = outcome.written.len(),
            failed = outcome.failed.len(),
            bytes = payload.len(),
            "Published compiled config"
        );
        outcome
    }
}

impl PublishOutcome {
    pub fn status(&self) -> PublishStatus {
        match (self.written.is_empty(), self.failed.is_empty()) {
            (_, true) => PublishStatus::Published,
            (true, false) => PublishStatus::NothingPublished,
            (false, false) => PublishStatus::Partial,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_keys(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.key.as_str()).collect()
    }
}
