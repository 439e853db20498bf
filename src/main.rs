use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "snippets-view")]
#[command(about = "Browse code snippets from workspace, user and extension stores")]
#[command(version)]
struct Cli {
    /// Workspace folder(s) to include (defaults to the current directory)
    #[arg(short, long = "workspace", global = true)]
    workspace: Vec<PathBuf>,

    /// Path to the settings file (defaults to .snippets-view/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List snippets grouped by file, or as one list with --flat
    List {
        #[command(flatten)]
        view: cli::ViewArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the snippet files that would be read
    Sources {
        /// Include snippet files contributed by installed extensions
        #[arg(long)]
        extensions: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the snippets defined in one file
    Show {
        /// Snippet file path
        file: PathBuf,

        #[command(flatten)]
        view: cli::ViewArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let workspaces = if cli.workspace.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.workspace
    };
    let settings = cli::load_settings(&workspaces[0], cli.config.as_deref())?;

    match cli.command {
        Some(Commands::List { view, json }) => {
            cli::list::list_command(workspaces, settings, &view, json).await?;
        }
        Some(Commands::Sources { extensions, json }) => {
            cli::list::sources_command(workspaces, settings, extensions, json).await?;
        }
        Some(Commands::Show { file, view, json }) => {
            cli::list::show_command(workspaces, settings, &file, &view, json).await?;
        }
        None => {
            cli::list::list_command(workspaces, settings, &cli::ViewArgs::default(), false)
                .await?;
        }
    }

    Ok(())
}
