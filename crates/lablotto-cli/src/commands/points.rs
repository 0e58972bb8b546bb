use clap::Subcommand;

use super::{open_store, print_json};

#[derive(Subcommand)]
pub enum PointsAction {
    /// Print the current balance
    Show,
    /// Apply a signed delta (the balance never drops below zero)
    Add {
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
}

pub fn run(action: PointsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        PointsAction::Show => {
            print_json(&serde_json::json!({ "points": store.points() }))?;
        }
        PointsAction::Add { delta } => {
            if let Some(event) = store.add_points(delta) {
                print_json(&event)?;
            }
        }
    }
    Ok(())
}
