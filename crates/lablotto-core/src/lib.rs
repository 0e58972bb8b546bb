//! # Lablotto Core Library
//!
//! State core of the Lablotto lottery + data-labeling mini-app. The UI (or
//! the bundled CLI) drives a single [`RewardsStore`] per session; every
//! mutation goes through one of its actions and is persisted through
//! [`SafeStorage`], which never fails.
//!
//! ## Architecture
//!
//! - **Rewards**: points, tickets/passes, task table, referrals and the
//!   earning timer, with copy-on-write state updates
//! - **Storage**: SQLite kv backend behind a memory-fallback adapter, plus
//!   TOML configuration
//! - **Agent**: client for the chat/analysis endpoint with a deterministic
//!   offline fallback
//!
//! ## Key Components
//!
//! - [`RewardsStore`]: the ledger and its actions
//! - [`EarningTimer`]: wall-clock countdown with a one-time reward
//! - [`SafeStorage`]: best-effort key/value persistence
//! - [`Config`]: application configuration management

pub mod agent;
pub mod error;
pub mod events;
pub mod rewards;
pub mod storage;

pub use agent::{AgentClient, AgentReply, ChatMessage, Role};
pub use error::{AgentError, ConfigError, CoreError, StorageError};
pub use events::Event;
pub use rewards::{
    format_time, Clock, EarningTimer, LedgerState, ManualClock, RewardsStore, SystemClock, TaskId,
    TaskKind, TaskOutcome, TimerPhase, UserProfile,
};
pub use storage::{Config, Database, KvBackend, MemoryBackend, SafeStorage};
