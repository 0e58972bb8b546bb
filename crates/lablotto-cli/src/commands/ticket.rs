use clap::Subcommand;

use super::{open_store, print_event_or_snapshot, print_json};

#[derive(Subcommand)]
pub enum TicketAction {
    /// Record a purchased ticket
    Add {
        /// Draw the ticket is for
        label: String,
    },
    /// Consume the oldest unused ticket
    Use,
    /// List tickets
    List,
}

#[derive(Subcommand)]
pub enum PassAction {
    /// Record a purchased pass
    Add {
        label: String,
    },
    /// List passes
    List,
}

pub fn run_ticket(action: TicketAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        TicketAction::Add { label } => {
            let event = store.add_ticket(label);
            print_event_or_snapshot(event, &store)?;
        }
        TicketAction::Use => match store.use_ticket() {
            Some(event) => print_json(&event)?,
            None => return Err("no unused tickets".into()),
        },
        TicketAction::List => {
            let state = store.state();
            print_json(&serde_json::json!({
                "tickets": state.tickets,
                "used": state.tickets_used,
                "unused": state.unused_tickets(),
            }))?;
        }
    }
    Ok(())
}

pub fn run_pass(action: PassAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        PassAction::Add { label } => {
            let event = store.add_pass(label);
            print_event_or_snapshot(event, &store)?;
        }
        PassAction::List => print_json(&store.state().passes)?,
    }
    Ok(())
}
