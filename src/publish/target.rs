use crate::config::PublishConfig;
use serde::{Deserialize, Serialize};

/// One location the compiled config is written to. All targets of a publish share the
/// same compiled value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PublishTarget {
    Preview {
        campaign_id: String,
    },
    Production {
        workspace: String,
        project: String,
        slug: String,
    },
    CustomDomain {
        host: String,
    },
}

impl PublishTarget {
    /// The store key for this target.
    pub fn key(&self, config: &PublishConfig) -> String {
        let prefix = &config.key_prefix;
        match self {
            PublishTarget::Preview { campaign_id } => format!("{}:preview:{}", prefix, campaign_id),
            PublishTarget::Production {
                workspace,
                project,
                slug,
            } => format!("{}:route:{}/{}/{}", prefix, workspace, project, slug),
            PublishTarget::CustomDomain { host } => format!(
                "{}:domain:{}",
                prefix,
                host.trim().trim_end_matches('.').to_ascii_lowercase()
            ),
        }
    }
}
