//! Platform user directory models.

use serde::{Deserialize, Serialize};

/// One user from the platform directory.
///
/// Every field is required: a payload missing any of them fails to parse,
/// so a malformed response surfaces as a fetch error instead of rendering
/// half-empty rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformUser {
    /// Unique user id.
    pub id: i64,
    /// First name.
    pub nome: String,
    /// Last name.
    pub cognome: String,
    /// Account email.
    pub email: String,
    /// `true` for administrators, `false` for regular users.
    pub ruolo: bool,
}

impl PlatformUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nome, self.cognome)
    }

    pub fn role_label(&self) -> &'static str {
        if self.ruolo { "Admin" } else { "User" }
    }
}
