//! Rewards store.
//!
//! The only mutation path for the ledger. Each action copies the current
//! [`LedgerState`], applies its change to the copy, swaps the copy in and
//! writes the snapshot through [`SafeStorage`]. A flag flip and its point
//! grant therefore land in the same swap.
//!
//! ## Usage
//!
//! ```ignore
//! let storage = SafeStorage::new(Database::open()?);
//! let mut store = RewardsStore::open(storage, &config, Box::new(SystemClock));
//! store.complete_task(TaskId::DailyReward);
//! store.update_earning_timer(); // on mount and on every UI tick
//! ```

use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::profile::{generate_invitation_code, UserProfile};
use super::state::{Entitlement, LedgerState};
use super::task::{TaskId, TaskKind, TaskOutcome};
use super::timer::format_time;
use crate::events::Event;
use crate::storage::{Config, KvBackend, RewardsConfig, SafeStorage};

pub struct RewardsStore<B: KvBackend> {
    state: LedgerState,
    storage: SafeStorage<B>,
    storage_key: String,
    rules: RewardsConfig,
    clock: Box<dyn Clock>,
}

impl<B: KvBackend> RewardsStore<B> {
    /// Restore the ledger from `storage`, or start empty when nothing
    /// usable is stored.
    pub fn open(storage: SafeStorage<B>, config: &Config, clock: Box<dyn Clock>) -> Self {
        let storage_key = config.storage.key.clone();
        let state = storage
            .get(&storage_key)
            .and_then(|json| LedgerState::from_json(&json))
            .unwrap_or_default();
        debug!(key = %storage_key, points = state.points, "rewards store opened");
        Self {
            state,
            storage,
            storage_key,
            rules: config.rewards.clone(),
            clock,
        }
    }

    pub fn with_system_clock(backend: B, config: &Config) -> Self {
        Self::open(SafeStorage::new(backend), config, Box::new(SystemClock))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn points(&self) -> u64 {
        self.state.points
    }

    pub fn rules(&self) -> &RewardsConfig {
        &self.rules
    }

    pub fn storage(&self) -> &SafeStorage<B> {
        &self.storage
    }

    /// Whether `task` can be claimed right now.
    pub fn is_task_claimable(&self, task: TaskId) -> bool {
        self.state.task(task).is_claimable(task, self.clock.today())
    }

    pub fn snapshot(&self) -> Event {
        let now = self.clock.now();
        let timer = &self.state.earning_timer;
        let time_remaining = timer.remaining_at(now);
        Event::StateSnapshot {
            user_id: self.state.user.as_ref().and_then(|u| u.id),
            display_name: self.state.user.as_ref().map(UserProfile::display_name),
            points: self.state.points,
            tickets: self.state.tickets.len(),
            unused_tickets: self.state.unused_tickets(),
            passes: self.state.passes.len(),
            invited_users: self.state.invited_users,
            invitation_code: self.state.invitation_code.clone(),
            timer_phase: timer.phase(),
            time_remaining,
            time_remaining_display: format_time(time_remaining),
            at: now,
        }
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Replace the profile. An id yields a fresh invitation code; no id
    /// clears it. Points, tasks and entitlements are untouched.
    pub fn set_user(&mut self, profile: UserProfile) -> Option<Event> {
        let mut next = self.state.clone();
        next.invitation_code = profile.id.map(|id| {
            generate_invitation_code(&self.rules.invitation_prefix, id, &mut rand::thread_rng())
        });
        let user_id = profile.id;
        next.user = Some(profile);
        let invitation_code = next.invitation_code.clone();
        self.commit(next);
        debug!(?user_id, "user set");
        Some(Event::UserChanged {
            user_id,
            invitation_code,
            at: self.clock.now(),
        })
    }

    /// Apply a signed delta; the balance clamps at zero.
    pub fn add_points(&mut self, delta: i64) -> Option<Event> {
        let mut next = self.state.clone();
        next.points = apply_delta(next.points, delta);
        let balance = next.points;
        self.commit(next);
        Some(Event::PointsChanged {
            delta,
            balance,
            at: self.clock.now(),
        })
    }

    pub fn add_ticket(&mut self, label: impl Into<String>) -> Option<Event> {
        let now = self.clock.now();
        let ticket = Entitlement::new(label, now);
        let mut next = self.state.clone();
        next.tickets.push(ticket.clone());
        let total = next.tickets.len();
        self.commit(next);
        Some(Event::TicketAdded {
            id: ticket.id,
            label: ticket.label,
            total,
            at: now,
        })
    }

    pub fn add_pass(&mut self, label: impl Into<String>) -> Option<Event> {
        let now = self.clock.now();
        let pass = Entitlement::new(label, now);
        let mut next = self.state.clone();
        next.passes.push(pass.clone());
        let total = next.passes.len();
        self.commit(next);
        Some(Event::PassAdded {
            id: pass.id,
            label: pass.label,
            total,
            at: now,
        })
    }

    /// Consume the oldest unused ticket. `None` when every ticket is used.
    pub fn use_ticket(&mut self) -> Option<Event> {
        let ticket = self.state.tickets.get(self.state.tickets_used)?.clone();
        let mut next = self.state.clone();
        next.tickets_used += 1;
        let remaining = next.unused_tickets();
        self.commit(next);
        Some(Event::TicketUsed {
            id: ticket.id,
            remaining,
            at: self.clock.now(),
        })
    }

    /// Claim a task's reward from the task table.
    pub fn complete_task(&mut self, task: TaskId) -> TaskOutcome {
        let today = self.clock.today();
        let spec = task.spec();
        let record = self.state.task(task);
        if !record.is_claimable(task, today) {
            debug!(%task, "task already claimed");
            return TaskOutcome::AlreadyClaimed;
        }

        let mut next = self.state.clone();
        let entry = next.tasks.entry(task).or_default();
        entry.completed = true;
        if spec.kind == TaskKind::Daily {
            entry.last_completed = Some(today);
        }
        next.points = next.points.saturating_add(spec.reward);
        self.commit(next);
        info!(%task, reward = spec.reward, balance = self.state.points, "task reward granted");
        TaskOutcome::Completed {
            reward: spec.reward,
        }
    }

    /// [`complete_task`](Self::complete_task) reported as an event.
    pub fn complete_task_event(&mut self, task: TaskId) -> Option<Event> {
        match self.complete_task(task) {
            TaskOutcome::Completed { reward } => Some(Event::TaskCompleted {
                task,
                reward,
                balance: self.state.points,
                at: self.clock.now(),
            }),
            TaskOutcome::AlreadyClaimed => None,
        }
    }

    /// Count one confirmed referral and grant its reward.
    pub fn add_referral(&mut self) -> Option<Event> {
        let reward = self.rules.referral_reward;
        let mut next = self.state.clone();
        next.invited_users += 1;
        next.points = next.points.saturating_add(reward);
        let (invited_users, balance) = (next.invited_users, next.points);
        self.commit(next);
        info!(invited_users, reward, "referral reward granted");
        Some(Event::ReferralAdded {
            invited_users,
            reward,
            balance,
            at: self.clock.now(),
        })
    }

    /// Start the earning timer. `None` while one is already running.
    pub fn start_earning_timer(&mut self, duration_secs: u64) -> Option<Event> {
        let now = self.clock.now();
        let mut next = self.state.clone();
        if !next.earning_timer.start(duration_secs, now) {
            debug!("earning timer already running");
            return None;
        }
        self.commit(next);
        debug!(duration_secs, "earning timer started");
        Some(Event::EarningTimerStarted {
            duration_secs,
            at: now,
        })
    }

    /// Start the earning timer with the configured default duration.
    pub fn start_default_earning_timer(&mut self) -> Option<Event> {
        self.start_earning_timer(self.rules.timer_duration_secs)
    }

    /// Recompute the remaining time; grants the timer reward on the call
    /// that first sees it reach zero. Safe to call any number of times.
    pub fn update_earning_timer(&mut self) -> Option<Event> {
        let now = self.clock.now();
        let mut next = self.state.clone();
        let expired = next.earning_timer.tick(now);
        if expired {
            next.points = next.points.saturating_add(self.rules.timer_reward);
        }
        if next == self.state {
            return None;
        }
        let balance = next.points;
        self.commit(next);
        if !expired {
            return None;
        }
        info!(reward = self.rules.timer_reward, balance, "earning timer reward granted");
        Some(Event::EarningTimerCompleted {
            reward: self.rules.timer_reward,
            balance,
            at: now,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn commit(&mut self, next: LedgerState) {
        self.state = next;
        match self.state.to_json() {
            Ok(json) => self.storage.set(&self.storage_key, &json),
            Err(e) => warn!(error = %e, "failed to serialize ledger snapshot"),
        }
    }
}

fn apply_delta(balance: u64, delta: i64) -> u64 {
    if delta >= 0 {
        balance.saturating_add(delta.unsigned_abs())
    } else {
        balance.saturating_sub(delta.unsigned_abs())
    }
}
