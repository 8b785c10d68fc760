use anyhow::Result;
use clap::Parser;
use lazymeter::cli::{log_level, Cli, Commands};
use lazymeter::commands;
use lazymeter::config::{LazyMeterConfig, CONFIG_FILE_NAME};
use lazymeter::LazyMeterError;
use std::process::ExitCode;

fn init_logging(verbose: u8) {
    // RUST_LOG, when set, takes precedence over -v
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(command: &Commands, config: &LazyMeterConfig) -> Result<()> {
    match command {
        Commands::Analyze(args) => commands::handle_analyze(args, config),
        Commands::Score {
            text,
            format,
            plain,
        } => commands::handle_score(text.as_deref(), *format, *plain, config),
        Commands::Projects { history } => commands::list_projects(history.as_deref(), config),
        Commands::Stats { database } => commands::show_stats(database.as_deref(), config),
        Commands::Prune { days, database } => {
            commands::prune_scores(*days, database.as_deref(), config)
        }
        Commands::Init { force } => commands::init_config(*force),
    }
}

fn execute(cli: &Cli) -> Result<()> {
    // init must work even when an existing config is broken
    if let Commands::Init { force } = &cli.command {
        return commands::init_config(*force);
    }

    let config = commands::resolve_config(cli.config.as_deref())?;
    run(&cli.command, &config)
}

fn is_user_fixable(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<LazyMeterError>())
        .any(LazyMeterError::is_user_fixable)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            if is_user_fixable(&err) {
                eprintln!("Hint: check the command-line arguments and {CONFIG_FILE_NAME}");
            }
            ExitCode::FAILURE
        }
    }
}
