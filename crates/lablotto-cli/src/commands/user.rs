use clap::Subcommand;
use lablotto_core::UserProfile;

use super::{open_store, print_json};

#[derive(Subcommand)]
pub enum UserAction {
    /// Log in as a host-supplied identity (issues a new invitation code)
    Login {
        /// Numeric user id
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },
    /// Log in from a host identity JSON object
    LoginJson {
        /// e.g. '{"id": 42, "firstName": "Ada"}'
        json: String,
    },
    /// Print profile and invitation code
    Show,
}

pub fn run(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        UserAction::Login {
            id,
            first_name,
            username,
        } => {
            let profile = UserProfile {
                id,
                first_name,
                username,
            };
            if let Some(event) = store.set_user(profile) {
                print_json(&event)?;
            }
        }
        UserAction::LoginJson { json } => {
            let profile: UserProfile = serde_json::from_str(&json)?;
            if let Some(event) = store.set_user(profile) {
                print_json(&event)?;
            }
        }
        UserAction::Show => {
            let state = store.state();
            print_json(&serde_json::json!({
                "user": state.user,
                "invitation_code": state.invitation_code,
                "invited_users": state.invited_users,
            }))?;
        }
    }
    Ok(())
}
