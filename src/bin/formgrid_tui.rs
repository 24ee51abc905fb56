//! Form editor TUI binary entry point

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

use formgrid::{
    config::Config,
    form::FormShell,
    form_tui::App,
    models::DisplayMode,
    storage,
};

#[derive(Parser)]
#[command(name = "formgrid-tui")]
#[command(about = "Interactive editor for structured business forms")]
#[command(version)]
pub struct Cli {
    /// Draft file to open; created on first save if it does not exist
    #[arg(long)]
    pub draft: Option<PathBuf>,
    /// Form to start when no draft exists
    #[arg(long, default_value = "asset-request")]
    pub form: String,
    /// Start in print mode
    #[arg(long)]
    pub print: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "formgrid=info,formgrid_tui=info");
    }

    let config = Config::from_env()?;
    config.validate()?;

    // Log to file only so output does not interfere with the display
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting form editor TUI...");

    let (shell, draft_path) = open_form(&cli, &config)?;
    let mode = if cli.print {
        DisplayMode::Print
    } else {
        config.display_mode()
    };
    let shell = shell.with_mode(mode);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, shell, draft_path);
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("Form editor exited successfully");
        }
        Err(e) => {
            error!("Form editor encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Load the draft if it exists, otherwise start a fresh form
fn open_form(cli: &Cli, config: &Config) -> Result<(FormShell, PathBuf)> {
    if let Some(path) = &cli.draft {
        if path.exists() {
            info!("Opening draft {}", path.display());
            return Ok((storage::open_draft(path)?, path.clone()));
        }
    }

    let shell = FormShell::from_catalog(&cli.form)?;
    let path = cli
        .draft
        .clone()
        .unwrap_or_else(|| storage::draft_path(&config.draft_dir, &shell.state));
    info!("Starting new {} form, draft at {}", cli.form, path.display());
    Ok((shell, path))
}
