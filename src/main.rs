//! Telegraph CLI entry point.

use clap::Parser;

use telegraph::cli::commands::{dispatch, heartbeat, init, serve};
use telegraph::cli::{handle_error, Cli, Commands};
use telegraph::domain::models::{EntityRef, RepresentativeEvent};
use telegraph::infrastructure::config::ConfigLoader;
use telegraph::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli.command, cli.json).await {
        handle_error(err, cli.json);
    }
}

async fn run(command: Commands, json: bool) -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    let _logger = LoggerImpl::init(&config.logging)?;

    match command {
        Commands::Init(args) => init::execute(args, json).await,
        Commands::Heartbeat { integration } => heartbeat::execute(&integration, json),
        Commands::Action { log_record_id } => {
            let event = RepresentativeEvent::Action(EntityRef::Id(log_record_id));
            dispatch::execute(event, &config, json).await
        }
        Commands::LogUpdated { alert_group_id } => {
            let event = RepresentativeEvent::LogUpdated(EntityRef::Id(alert_group_id));
            dispatch::execute(event, &config, json).await
        }
        Commands::AlertCreated { alert_id } => {
            let event = RepresentativeEvent::AlertCreated(EntityRef::Id(alert_id));
            dispatch::execute(event, &config, json).await
        }
        Commands::Serve => serve::execute(&config, json).await,
    }
}
