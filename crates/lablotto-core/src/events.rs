use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rewards::{TaskId, TimerPhase};

/// Every ledger mutation produces an Event.
/// The UI renders from them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    UserChanged {
        user_id: Option<i64>,
        invitation_code: Option<String>,
        at: DateTime<Utc>,
    },
    PointsChanged {
        delta: i64,
        balance: u64,
        at: DateTime<Utc>,
    },
    TicketAdded {
        id: Uuid,
        label: String,
        total: usize,
        at: DateTime<Utc>,
    },
    TicketUsed {
        id: Uuid,
        remaining: usize,
        at: DateTime<Utc>,
    },
    PassAdded {
        id: Uuid,
        label: String,
        total: usize,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        task: TaskId,
        reward: u64,
        balance: u64,
        at: DateTime<Utc>,
    },
    ReferralAdded {
        invited_users: u64,
        reward: u64,
        balance: u64,
        at: DateTime<Utc>,
    },
    EarningTimerStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown hit zero and its reward was granted.
    EarningTimerCompleted {
        reward: u64,
        balance: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        user_id: Option<i64>,
        display_name: Option<String>,
        points: u64,
        tickets: usize,
        unused_tickets: usize,
        passes: usize,
        invited_users: u64,
        invitation_code: Option<String>,
        timer_phase: TimerPhase,
        time_remaining: u64,
        time_remaining_display: String,
        at: DateTime<Utc>,
    },
}
