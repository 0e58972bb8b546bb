use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lablotto-cli", version, about = "Lablotto rewards CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login identity and invitation code
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Point balance
    Points {
        #[command(subcommand)]
        action: commands::points::PointsAction,
    },
    /// Rewardable tasks
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Referral rewards
    Referral {
        #[command(subcommand)]
        action: commands::referral::ReferralAction,
    },
    /// Draw tickets
    Ticket {
        #[command(subcommand)]
        action: commands::ticket::TicketAction,
    },
    /// Draw passes
    Pass {
        #[command(subcommand)]
        action: commands::ticket::PassAction,
    },
    /// Earning timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Chat with the analysis agent
    Agent {
        #[command(subcommand)]
        action: commands::agent::AgentAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::User { action } => commands::user::run(action),
        Commands::Points { action } => commands::points::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Referral { action } => commands::referral::run(action),
        Commands::Ticket { action } => commands::ticket::run_ticket(action),
        Commands::Pass { action } => commands::ticket::run_pass(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Agent { action } => commands::agent::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
