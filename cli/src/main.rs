//! Command-line interface for the notes service.
//!
//! Commands:
//! - create: Create a note
//! - get: Fetch a note by identifier
//! - list: List notes a page at a time
//!
//! Configuration via environment:
//! - NOTES_URL: Base URL of the notes server (default: http://localhost:8080)

mod commands;

use clap::{Parser, Subcommand};

use commands::{create::CreateArgs, get::GetArgs, list::ListArgs};

/// Notes service CLI
///
/// Prints JSON by default; pass --human for formatted output.
#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notes server URL
    #[arg(
        long,
        env = "NOTES_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    url: String,

    /// Give up on a request after this many seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new note
    Create(CreateArgs),

    /// Fetch a note by its identifier
    Get(GetArgs),

    /// List notes
    List(ListArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client(cli.timeout_secs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let url = cli.url.trim_end_matches('/');

    let result = match cli.command {
        Commands::Create(args) => commands::create::execute(&client, url, cli.human, args).await,
        Commands::Get(args) => commands::get::execute(&client, url, cli.human, args).await,
        Commands::List(args) => commands::list::execute(&client, url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_page() {
        let cli = Cli::try_parse_from(["notes", "list", "--page", "20", "--human"]).unwrap();
        assert!(cli.human);
        assert!(matches!(cli.command, Commands::List(ListArgs { page: 20, all: false })));
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "notes",
            "--url",
            "http://notes.internal:9000",
            "create",
            "Groceries",
            "eggs, milk",
        ])
        .unwrap();
        assert_eq!(cli.url, "http://notes.internal:9000");
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.title, "Groceries");
                assert_eq!(args.content.as_deref(), Some("eggs, milk"));
            }
            _ => panic!("expected create"),
        }
    }
}
