use clap::Subcommand;

use super::{open_store, print_json};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the earning timer
    Start {
        /// Countdown length in seconds (defaults to rewards.timer_duration_secs)
        #[arg(long)]
        duration: Option<u64>,
    },
    /// Refresh the timer and print the current state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        TimerAction::Start { duration } => {
            // Settle a finished run first so it can be restarted.
            let completed = store.update_earning_timer();
            let duration = duration.unwrap_or(store.rules().timer_duration_secs);
            let started = store.start_earning_timer(duration);
            if started.is_none() {
                eprintln!("earning timer already running");
            }
            print_json(&serde_json::json!({
                "completed": completed,
                "started": started,
                "snapshot": store.snapshot(),
            }))?;
        }
        TimerAction::Status => {
            let completed = store.update_earning_timer();
            print_json(&serde_json::json!({
                "completed": completed,
                "snapshot": store.snapshot(),
            }))?;
        }
    }
    Ok(())
}
