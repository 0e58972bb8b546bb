//! Task table.
//!
//! Every rewardable task is a [`TaskId`] variant; its kind and reward are
//! declared once in [`TaskId::spec`]. Callers never pass reward amounts.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskId {
    DailyReward,
    JoinTelegram,
    FollowX,
    ConnectWallet,
    ShareInvite,
    FirstLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Claimable once per calendar day.
    Daily,
    /// Claimable once, ever.
    OneShot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    pub kind: TaskKind,
    pub reward: u64,
    pub title: &'static str,
}

impl TaskId {
    pub const ALL: [TaskId; 6] = [
        TaskId::DailyReward,
        TaskId::JoinTelegram,
        TaskId::FollowX,
        TaskId::ConnectWallet,
        TaskId::ShareInvite,
        TaskId::FirstLabel,
    ];

    pub fn spec(self) -> TaskSpec {
        let (kind, reward, title) = match self {
            TaskId::DailyReward => (TaskKind::Daily, 100, "Claim daily reward"),
            TaskId::JoinTelegram => (TaskKind::OneShot, 500, "Join the Telegram channel"),
            TaskId::FollowX => (TaskKind::OneShot, 500, "Follow on X"),
            TaskId::ConnectWallet => (TaskKind::OneShot, 300, "Connect a wallet"),
            TaskId::ShareInvite => (TaskKind::OneShot, 200, "Share your invitation link"),
            TaskId::FirstLabel => (TaskKind::OneShot, 1000, "Label your first data item"),
        };
        TaskSpec { kind, reward, title }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskId::DailyReward => "dailyReward",
            TaskId::JoinTelegram => "joinTelegram",
            TaskId::FollowX => "followX",
            TaskId::ConnectWallet => "connectWallet",
            TaskId::ShareInvite => "shareInvite",
            TaskId::FirstLabel => "firstLabel",
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskId {
    type Err = String;

    /// Accepts the camelCase wire name or its snake/kebab-case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        TaskId::ALL
            .into_iter()
            .find(|t| t.as_str().to_lowercase() == folded)
            .ok_or_else(|| format!("unknown task: {s}"))
    }
}

/// Completion state of one task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub completed: bool,
    /// Day of the last claim; only meaningful for daily tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<NaiveDate>,
}

impl TaskRecord {
    /// Whether `task` can be claimed on `today` given this record.
    pub fn is_claimable(&self, task: TaskId, today: NaiveDate) -> bool {
        match task.spec().kind {
            TaskKind::Daily => self.last_completed != Some(today),
            TaskKind::OneShot => !self.completed,
        }
    }
}

/// Result of [`RewardsStore::complete_task`](super::RewardsStore::complete_task).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskOutcome {
    Completed { reward: u64 },
    AlreadyClaimed,
}
