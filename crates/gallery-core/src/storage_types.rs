use std::fmt::{Display, Formatter, Result as FmtResult};

/// Which photo provider serves the process.
///
/// Chosen once at startup from configuration; `Local` only changes the
/// informational banner shown by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    Remote,
    Local,
}

impl ProviderMode {
    pub fn is_local(self) -> bool {
        self == ProviderMode::Local
    }
}

impl Display for ProviderMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ProviderMode::Remote => write!(f, "remote"),
            ProviderMode::Local => write!(f, "local"),
        }
    }
}
