//! Task commands for CLI.

use clap::Subcommand;
use lablotto_core::{TaskId, TaskOutcome};

use super::{open_store, print_json};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks with reward and claim status
    List,
    /// Claim a task's reward
    Complete {
        /// Task name, e.g. daily-reward or joinTelegram
        task: TaskId,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        TaskAction::List => {
            let rows: Vec<_> = TaskId::ALL
                .into_iter()
                .map(|task| {
                    let spec = task.spec();
                    let record = store.state().task(task);
                    serde_json::json!({
                        "task": task,
                        "title": spec.title,
                        "kind": spec.kind,
                        "reward": spec.reward,
                        "completed": record.completed,
                        "last_completed": record.last_completed,
                        "claimable": store.is_task_claimable(task),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
        TaskAction::Complete { task } => {
            let outcome = store.complete_task(task);
            print_json(&serde_json::json!({
                "task": task,
                "result": outcome,
                "points": store.points(),
            }))?;
            if outcome == TaskOutcome::AlreadyClaimed {
                eprintln!("task {task} already claimed");
            }
        }
    }
    Ok(())
}
