use serde::{Deserialize, Serialize};

/// Persisted switch record: `{ id, password, state }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub state: bool,
}

impl Switch {
    /// A fresh switch starts off.
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
            state: false,
        }
    }

    /// Plaintext, byte-for-byte comparison against the stored password.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password.as_bytes() == password.as_bytes()
    }
}
