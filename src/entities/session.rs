use serde::{Deserialize, Serialize};

/// Identity handed over by the external sign-in provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub name: Option<String>,
}

impl Session {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}
