use clap::Subcommand;

use super::{open_store, print_json};

#[derive(Subcommand)]
pub enum ReferralAction {
    /// Record one confirmed referral
    Add,
}

pub fn run(action: ReferralAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        ReferralAction::Add => {
            if let Some(event) = store.add_referral() {
                print_json(&event)?;
            }
        }
    }
    Ok(())
}
