pub mod agent;
pub mod config;
pub mod points;
pub mod referral;
pub mod task;
pub mod ticket;
pub mod timer;
pub mod user;

use lablotto_core::{Config, Database, Event, RewardsStore};
use serde::Serialize;

/// Open the session store on the on-disk kv database.
pub fn open_store() -> Result<RewardsStore<Database>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    Ok(RewardsStore::with_system_clock(db, &config))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the event, or the current snapshot when the action was a no-op.
pub fn print_event_or_snapshot(
    event: Option<Event>,
    store: &RewardsStore<Database>,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => print_json(&event),
        None => print_json(&store.snapshot()),
    }
}
