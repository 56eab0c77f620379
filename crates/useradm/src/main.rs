use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use user_api::UserApiClient;
use user_core::UserApi;
use user_mock::MockClient;
use useradm::cli::{Cli, Commands, ConfigCommands};
use useradm::config::Config;
use useradm::output::output_error;
use useradm::{color, commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);

    if let Err(e) = run(&cli) {
        output_error(&e, cli.format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    // Commands that need neither configuration nor a client
    match &cli.command {
        Commands::Completions { shell } => {
            Cli::generate_completions(*shell);
            return Ok(());
        }
        Commands::Init {
            url,
            timeout_secs,
            force,
        } => return commands::init::handle_init(url, *timeout_secs, *force, cli.format),
        _ => {}
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_with_cli(cli.url.clone());
    logging::init(config.log.as_deref());

    if let Commands::Config { action } = &cli.command {
        if !matches!(action, ConfigCommands::Test) {
            return commands::config::handle_config_local(
                action,
                &config,
                cli.config.as_deref(),
                cli.format,
            );
        }
    }

    if let Some(path) = user_mock::get_mock_file() {
        debug!(path = %path.display(), "using mock client");
        let client = MockClient::from_fixture(&path)
            .with_context(|| format!("Failed to load mock data from {}", path.display()))?;
        return run_with_client(&client, cli);
    }

    let api_config = config.api_config()?;
    let client = UserApiClient::new(&api_config);
    run_with_client(&client, cli)
}

fn run_with_client(client: &dyn UserApi, cli: &Cli) -> Result<()> {
    use commands::users;

    match &cli.command {
        Commands::List => users::handle_list(client, cli.format),
        Commands::Get { id } => users::handle_get(client, *id, cli.format),
        Commands::Create { fields } => users::handle_create(client, fields, cli.format),
        Commands::Update { id, fields } => users::handle_update(client, *id, fields, cli.format),
        Commands::Delete { id, yes } => users::handle_delete(client, *id, *yes, cli.format),
        Commands::Config { .. } => commands::config::handle_config_test(client, cli.format),
        // Handled in run() before a client is built
        Commands::Init { .. } | Commands::Completions { .. } => Ok(()),
    }
}
