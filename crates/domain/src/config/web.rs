use serde::{Deserialize, Serialize};

/// Management console settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebConfig {
    /// Directory served as the management console (optional)
    #[serde(default)]
    pub content_root: Option<String>,
}
