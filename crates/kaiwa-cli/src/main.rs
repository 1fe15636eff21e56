//! kaiwa CLI: terminal chat client for a conversational agent endpoint

use clap::{Parser, Subcommand};
use kaiwa_engine::{ChatBackend, ChatSession, Config, HttpChatClient};
use kaiwa_tui::conversation::MessageView;
use kaiwa_tui::text::{lines_to_string, render_markdown};
use kaiwa_tui::theme::Theme;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Terminal chat client with markdown rendering
#[derive(Parser)]
#[command(name = "kaiwa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Chat endpoint URL (overrides config and KAIWA_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Send one message and print the reply
    Ask {
        /// Message to send
        message: String,

        /// Print the reply text as received, without rendering
        #[arg(long)]
        raw: bool,

        /// Columns to render into
        #[arg(long, default_value = "80")]
        width: usize,
    },

    /// Check that the backend is up
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a markdown file (or stdin) the way replies are shown
    Render {
        /// File to render; reads stdin when absent
        file: Option<PathBuf>,

        /// Columns to render into
        #[arg(long, default_value = "80")]
        width: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let tui = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(cli.log_file.as_deref(), tui)?;

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.set_endpoint(endpoint)?;
    }
    debug!(endpoint = %config.endpoint, "configuration resolved");

    match cli.command {
        None | Some(Commands::Tui) => runtime()?.block_on(kaiwa_tui::run_tui(&config)),
        Some(Commands::Ask {
            message,
            raw,
            width,
        }) => runtime()?.block_on(cmd_ask(&config, &message, raw, width)),
        Some(Commands::Health { json }) => runtime()?.block_on(cmd_health(&config, json)),
        Some(Commands::Render { file, width }) => cmd_render(&config, file.as_deref(), width),
    }
}

fn runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
}

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so it only logs when a file is given.
fn init_logging(log_file: Option<&Path>, tui: bool) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None if tui => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn client_for(config: &Config) -> CliResult<HttpChatClient> {
    Ok(HttpChatClient::new(
        config.endpoint_url()?,
        config.request_timeout(),
    )?)
}

async fn cmd_ask(config: &Config, message: &str, raw: bool, width: usize) -> CliResult<()> {
    let client = client_for(config)?;
    let mut session = ChatSession::new();

    let request = session
        .submit(message)
        .ok_or("message is empty")?;
    let outcome = client.send(&request).await;
    let failed = outcome.is_err();
    session.complete(outcome);

    let Some(turn) = session.conversation().last() else {
        return Err("no reply recorded".into());
    };
    if raw {
        println!("{}", turn.content());
    } else {
        let theme = Theme::named(config.theme);
        println!("{}", lines_to_string(&MessageView::new(turn, &theme).lines(width)));
    }

    if failed {
        return Err(format!("no reply from {}", client.endpoint()).into());
    }
    Ok(())
}

async fn cmd_health(config: &Config, json: bool) -> CliResult<()> {
    let client = client_for(config)?;
    match client.health().await {
        Ok(health) => {
            if json {
                let report = serde_json::json!({
                    "endpoint": client.endpoint().as_str(),
                    "status": health.status,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}: {}", client.endpoint(), health.status);
            }
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "health check failed");
            Err(e.into())
        }
    }
}

fn cmd_render(config: &Config, file: Option<&Path>, width: usize) -> CliResult<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let theme = Theme::named(config.theme);
    println!("{}", lines_to_string(&render_markdown(&input, width, &theme)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_tui() {
        let cli = Cli::parse_from(["kaiwa"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["kaiwa", "ask", "hi", "--endpoint", "http://h:1/chat"]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://h:1/chat"));
        match cli.command {
            Some(Commands::Ask {
                message,
                raw,
                width,
            }) => {
                assert_eq!(message, "hi");
                assert!(!raw);
                assert_eq!(width, 80);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_health_json_flag() {
        let cli = Cli::parse_from(["kaiwa", "health", "--json"]);
        assert!(matches!(cli.command, Some(Commands::Health { json: true })));
    }

    #[test]
    fn test_render_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Title\n").unwrap();
        assert!(cmd_render(&Config::default(), Some(&path), 40).is_ok());
    }

    #[test]
    fn test_render_missing_file_errors() {
        let missing = Path::new("/nonexistent/kaiwa/doc.md");
        assert!(cmd_render(&Config::default(), Some(missing), 40).is_err());
    }
}
