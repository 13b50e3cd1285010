use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use sankey_gen::cli::{handle_config_command, handle_generate_command, GenerateArgs};
use sankey_gen::config::{Config, ConfigPaths};

#[derive(Parser)]
#[command(
    name = "sankey-gen",
    author = "Kaylee Beyene",
    version,
    about = "Turn a transaction ledger export into a SankeyMatic budget diagram",
    long_about = "sankey-gen reads a transaction ledger CSV export and writes \
                  SankeyMatic flow lines showing how income over a time window \
                  splits into spending categories and savings."
)]
struct Cli {
    /// Configuration file (defaults to config.yaml, then config-sample.yaml)
    #[arg(short, long, global = true, env = "SANKEY_GEN_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the diagram (default)
    Generate(GenerateArgs),

    /// Show the resolved configuration
    Config,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&ConfigPaths::new(cli.config))?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Some(Commands::Generate(args)) => handle_generate_command(&config, &args, &mut stdout)?,
        Some(Commands::Config) => handle_config_command(&config, &mut stdout)?,
        None => handle_generate_command(&config, &GenerateArgs::default(), &mut stdout)?,
    }

    Ok(())
}
