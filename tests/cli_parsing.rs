use clap::Parser;
use telegraph::cli::{Cli, Commands};
use uuid::Uuid;

#[test]
fn test_parse_dispatch_commands() {
    let id = Uuid::new_v4();

    let cli = Cli::try_parse_from(["telegraph", "action", &id.to_string()]).unwrap();
    assert!(matches!(cli.command, Commands::Action { log_record_id } if log_record_id == id));
    assert!(!cli.json);

    let cli = Cli::try_parse_from(["telegraph", "log-updated", &id.to_string(), "--json"]).unwrap();
    assert!(matches!(cli.command, Commands::LogUpdated { alert_group_id } if alert_group_id == id));
    assert!(cli.json);

    let cli = Cli::try_parse_from(["telegraph", "--json", "alert-created", &id.to_string()]).unwrap();
    assert!(matches!(cli.command, Commands::AlertCreated { alert_id } if alert_id == id));
}

#[test]
fn test_parse_rejects_malformed_id() {
    assert!(Cli::try_parse_from(["telegraph", "action", "not-a-uuid"]).is_err());
}

#[test]
fn test_parse_init_and_heartbeat() {
    let cli = Cli::try_parse_from(["telegraph", "init", "--force", "/tmp/project"]).unwrap();
    match cli.command {
        Commands::Init(args) => {
            assert!(args.force);
            assert_eq!(args.path, std::path::PathBuf::from("/tmp/project"));
        }
        _ => panic!("Expected init command"),
    }

    let cli = Cli::try_parse_from(["telegraph", "heartbeat", "alertmanager"]).unwrap();
    assert!(matches!(cli.command, Commands::Heartbeat { integration } if integration == "alertmanager"));

    let cli = Cli::try_parse_from(["telegraph", "serve"]).unwrap();
    assert!(matches!(cli.command, Commands::Serve));
}
