//! Folio CLI - Command-line interface for invoice analysis.

use clap::Parser;
use folio_cli::cli::{ConfigAction, ConfigArgs};
use folio_cli::commands;
use folio_cli::provider::build_pipeline;
use folio_cli::{logging, Cli, Command, Config, Formatter};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> folio_cli::Result<()> {
    // Load config, or defaults if the file is absent; `config init` may replace a broken file
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = match &cli.command {
        Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => Config::default(),
        _ => Config::load_from(&config_path)?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
        cmd => {
            let pipeline = build_pipeline(&config, cli.api_key, cli.mock)?;

            match cmd {
                Command::Analyze(args) => {
                    commands::execute_analyze(args, &pipeline, &formatter)?;
                }
                Command::Ask(args) => {
                    commands::execute_ask(args, &pipeline, &formatter)?;
                }
                Command::Chat(args) => {
                    commands::execute_chat(
                        args,
                        &pipeline,
                        &formatter,
                        config.settings.history_size,
                    )?;
                }
                Command::Config(_) => unreachable!(),
            }
        }
    }

    Ok(())
}
