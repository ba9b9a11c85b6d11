mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "biolens", about = "AI-generated biology study materials", version)]
struct Cli {
    /// Config file (default: <config dir>/biolens/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List the curriculum units and their topics
    Units,

    /// Show study notes and diagrams for a topic
    Notes {
        /// Topic id (e.g. 2.4) or name (case-insensitive prefix match)
        topic: String,
    },

    /// Study a topic's flashcards
    Flashcards {
        /// Topic id or name
        topic: String,
    },

    /// Take a topic's checkpoint quiz
    Quiz {
        /// Topic id or name
        topic: String,
    },

    /// Work through a topic's virtual lab
    Lab {
        /// Topic id or name
        topic: String,
    },

    /// Interactive study session with curriculum navigation
    Study,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    match cli.command {
        Command::Units => {
            commands::units::run(&cli.format, use_color)?;
        }
        Command::Notes { topic } => {
            let app = app::App::new(cli.config.as_deref())?;
            commands::notes::run(&app, &topic, &cli.format, use_color).await?;
        }
        Command::Flashcards { topic } => {
            let app = app::App::new(cli.config.as_deref())?;
            commands::flashcards::run(&app, &topic, &cli.format, use_color).await?;
        }
        Command::Quiz { topic } => {
            let app = app::App::new(cli.config.as_deref())?;
            commands::quiz::run(&app, &topic, &cli.format, use_color).await?;
        }
        Command::Lab { topic } => {
            let app = app::App::new(cli.config.as_deref())?;
            commands::lab::run(&app, &topic, &cli.format, use_color).await?;
        }
        Command::Study => {
            let app = app::App::new(cli.config.as_deref())?;
            commands::study::run(&app, use_color).await?;
        }
    }

    Ok(())
}
