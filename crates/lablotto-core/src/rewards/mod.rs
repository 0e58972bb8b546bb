mod clock;
mod profile;
mod state;
mod store;
mod task;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use profile::{generate_invitation_code, UserProfile, CODE_SUFFIX_LEN};
pub use state::{Entitlement, LedgerState, Pass, Ticket, SNAPSHOT_VERSION};
pub use store::RewardsStore;
pub use task::{TaskId, TaskKind, TaskOutcome, TaskRecord, TaskSpec};
pub use timer::{format_time, EarningTimer, TimerPhase};
