//! Hearth CLI - inspect the resolved settings of a home inventory tool.

use clap::Parser;
use hearth::cli::{Cli, Commands, ConfigCommands};
use hearth::commands::{self, CommandResult};
use hearth::config::{self, ProcessEnv};
use hearth::logging;
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    logging::init(cli.verbose);

    // Settings file: --config flag > HEARTH_CONFIG_PATH > platform config dir
    let path = config::config_path(cli.config_path.as_deref(), &ProcessEnv);

    let command = match cli.command {
        Some(Commands::Config { command }) => command,
        None => ConfigCommands::List,
    };

    if let Err(e) = run_command(command, path.as_deref(), human) {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

fn run_command(
    command: ConfigCommands,
    path: Option<&Path>,
    human: bool,
) -> Result<(), hearth::Error> {
    match command {
        ConfigCommands::Get { key } => {
            let result = commands::config_get(path, &ProcessEnv, &key)?;
            output(&result, human);
        }
        ConfigCommands::List => {
            let result = commands::config_list(path, &ProcessEnv)?;
            output(&result, human);
        }
        ConfigCommands::Path => {
            let result = commands::config_path_info(path);
            output(&result, human);
        }
        ConfigCommands::Template => {
            // Always raw TOML so it can be redirected into a file.
            print!("{}", commands::config_template(path));
        }
        ConfigCommands::Check => {
            let result = commands::config_check(path, &ProcessEnv)?;
            output(&result, human);
        }
    }
    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: CommandResult>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
