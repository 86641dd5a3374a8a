//! Surface labelling convention.
//!
//! Every surface this process creates is labelled
//! `<prefix><model>-<8 hex chars>`, e.g. `emb-claude-1a2b3c4d`. The prefix
//! is what lets `close_all` recognise orphans in the host-wide inventory.

use omnichat_common::{new_correlation_id, ModelIdentity};

/// Default label prefix for managed surfaces.
pub const DEFAULT_LABEL_PREFIX: &str = "emb-";

/// Build a fresh unique label for a surface showing `model`.
pub fn generate(prefix: &str, model: ModelIdentity) -> String {
    format!("{prefix}{}-{}", model.as_str(), new_correlation_id())
}

/// Whether `label` follows this system's labelling convention.
pub fn is_managed(prefix: &str, label: &str) -> bool {
    !prefix.is_empty() && label.starts_with(prefix)
}
