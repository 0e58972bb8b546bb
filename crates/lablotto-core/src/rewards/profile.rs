//! User identity and invitation codes.

use rand::Rng;
use serde::{Deserialize, Serialize};

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const CODE_SUFFIX_LEN: usize = 6;

/// Identity handed over by the host bridge at login.
///
/// Accepts both `first_name` and `firstName` on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl UserProfile {
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Best human-readable name: first name, then username, then the id.
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.username.clone())
            .or_else(|| self.id.map(|id| id.to_string()))
            .unwrap_or_else(|| "anonymous".to_string())
    }
}

/// Build `"{prefix}-{id}-{suffix}"` with a random upper-case suffix.
pub fn generate_invitation_code<R: Rng + ?Sized>(prefix: &str, id: i64, rng: &mut R) -> String {
    let suffix: String = (0..CODE_SUFFIX_LEN)
        .map(|_| char::from(CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())]))
        .collect();
    format!("{prefix}-{id}-{suffix}")
}
