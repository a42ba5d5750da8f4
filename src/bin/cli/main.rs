mod client;
mod commands;
mod output;

use clap::{Parser, Subcommand};
use client::LostFoundClient;
use lostfound::config;
use output::{OutputConfig, OutputFormat};
use std::process;

/// Command line client for the lostfound server
#[derive(Parser, Debug)]
#[clap(name = "lostfound-cli", about = "CLI for the lostfound server")]
struct Cli {
    /// Server URL to connect to
    #[clap(long, env = "LOSTFOUND_URL", global = true)]
    server_url: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Quiet mode: print only IDs
    #[clap(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage lost items
    #[command(subcommand)]
    Item(commands::lost_item::ItemCommands),
}

/// Resolves the server URL from CLI args, config file, or defaults
///
/// Precedence: CLI flag / env var > config file > default port
fn resolve_server_url(cli_url: Option<String>) -> String {
    if let Some(url) = cli_url {
        return url;
    }

    let from_file = config::get_config_dir_path()
        .and_then(|dir| config::config_from_file(Some(dir.join("config.toml"))).ok())
        .and_then(|update| update.server_url);
    if let Some(url) = from_file {
        return url;
    }

    format!("http://localhost:{}", config::default_port())
}

/// Formats an error for stderr, with a hint when the server is unreachable
fn format_error(err: &dyn std::error::Error) -> String {
    let err_string = err.to_string();

    if err_string.contains("error sending request")
        || err_string.to_lowercase().contains("connection refused")
        || err_string.contains("tcp connect error")
    {
        return format!("Could not connect to server. Is lostfound running?\n  {}", err_string);
    }

    err_string
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = LostFoundClient::new(resolve_server_url(cli.server_url));
    let output_config = OutputConfig {
        format: cli.format,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Item(cmd) => commands::lost_item::execute(&client, cmd, &output_config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", format_error(e.as_ref()));
        process::exit(1);
    }
}
