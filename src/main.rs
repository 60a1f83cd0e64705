// CLI binary entry point for id3v1tag

use clap::Parser;
use std::process;

mod cli;

use cli::{Commands, Config, OutputFormatter, SimpleLogger};

static LOGGER: SimpleLogger = SimpleLogger;

fn main() {
    let config = Config::parse();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(config.log_level.filter());
    }

    let formatter = OutputFormatter::new(config.format.clone(), config.quiet);

    let result = match config.command {
        Commands::Read { files, fields, output } => {
            cli::commands::command_read(&files, &fields, output.as_deref(), &formatter)
        }
        Commands::Write { file, values, from_json, clear } => {
            cli::commands::command_write(&file, &values, from_json.as_deref(), clear, &formatter)
        }
        Commands::Remove { files } => cli::commands::command_remove(&files, &formatter),
        Commands::Genres => cli::commands::command_genres(&formatter),
    };

    if let Err(e) = result {
        formatter.print_error(&format!("{:#}", e));
        process::exit(1);
    }
}
