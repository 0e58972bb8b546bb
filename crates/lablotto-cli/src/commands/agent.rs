use clap::Subcommand;
use lablotto_core::{AgentClient, ChatMessage, Config};

use super::print_json;

const SYSTEM_PROMPT: &str =
    "You help users of a data-labeling lottery app understand their tasks, points and tickets.";

#[derive(Subcommand)]
pub enum AgentAction {
    /// Ask the analysis agent a question (falls back to a local answer offline)
    Ask {
        message: String,
    },
}

pub fn run(action: AgentAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        AgentAction::Ask { message } => {
            let client = AgentClient::new(&config.agent)?;
            let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)];
            let runtime = tokio::runtime::Runtime::new()?;
            let reply = runtime.block_on(client.ask_or_fallback(&messages));
            print_json(&reply)?;
        }
    }
    Ok(())
}
