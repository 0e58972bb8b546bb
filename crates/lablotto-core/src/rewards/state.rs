//! Persisted ledger snapshot.
//!
//! This is the JSON blob stored under the configured storage key. Bump
//! [`SNAPSHOT_VERSION`] whenever the shape changes incompatibly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::profile::UserProfile;
use super::task::{TaskId, TaskRecord};
use super::timer::EarningTimer;

pub const SNAPSHOT_VERSION: u32 = 1;

/// A purchased draw entitlement. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: Uuid,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl Entitlement {
    pub fn new(label: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            created_at,
        }
    }
}

pub type Ticket = Entitlement;
pub type Pass = Entitlement;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub version: u32,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub tickets_used: usize,
    #[serde(default)]
    pub passes: Vec<Pass>,
    #[serde(default)]
    pub earning_timer: EarningTimer,
    #[serde(default)]
    pub tasks: BTreeMap<TaskId, TaskRecord>,
    #[serde(default)]
    pub invitation_code: Option<String>,
    #[serde(default)]
    pub invited_users: u64,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            user: None,
            points: 0,
            tickets: Vec::new(),
            tickets_used: 0,
            passes: Vec::new(),
            earning_timer: EarningTimer::new(),
            tasks: BTreeMap::new(),
            invitation_code: None,
            invited_users: 0,
        }
    }
}

impl LedgerState {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a stored snapshot. Unreadable or foreign-version snapshots
    /// yield `None` so the caller can start fresh; an inconsistent earning
    /// timer is reset without discarding the rest of the ledger.
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(json) {
            Ok(mut state) if state.version == SNAPSHOT_VERSION => {
                if state.earning_timer.repair() {
                    warn!("reset inconsistent earning timer in snapshot");
                }
                Some(state)
            }
            Ok(state) => {
                warn!(version = state.version, "discarding snapshot with unknown version");
                None
            }
            Err(e) => {
                warn!(error = %e, "discarding unreadable snapshot");
                None
            }
        }
    }

    pub fn task(&self, task: TaskId) -> TaskRecord {
        self.tasks.get(&task).cloned().unwrap_or_default()
    }

    pub fn unused_tickets(&self) -> usize {
        self.tickets.len().saturating_sub(self.tickets_used)
    }
}
