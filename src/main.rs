use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use formgrid::{
    cli::{Cli, Commands},
    config::Config,
    editor::{ColumnProposal, EditorCommand, EditorOutcome},
    form::{schema, FormShell},
    models::{DisplayMode, SignatureRecord},
    render, storage,
    submit::{JsonFileSubmitter, LogSubmitter, SubmitError, SubmitHandler},
};

fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "formgrid=info");
    }

    let config = Config::from_env()?;

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ".".into());
    let log_name = config
        .log_file
        .file_name()
        .map(|n| n.to_owned())
        .unwrap_or_else(|| "formgrid.log".into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Forms => {
            println!("{:<16} {:<10} {}", "Id", "Category", "Title");
            println!("{}", "-".repeat(50));
            for schema in schema::catalog() {
                println!("{:<16} {:<10} {}", schema.id, schema.category, schema.title);
            }
        }

        Commands::New { form, output } => {
            let shell = FormShell::from_catalog(&form)?;
            let path = match output {
                Some(path) => path,
                None => {
                    config.validate()?;
                    storage::draft_path(&config.draft_dir, &shell.state)
                }
            };
            storage::save_draft(&path, &shell.state)?;
            println!("{}", path.display());
        }

        Commands::AddColumn { draft, label } => {
            let mut shell = storage::open_draft(&draft)?;
            match shell.propose_column(&label) {
                ColumnProposal::Accepted(key) => {
                    storage::save_draft(&draft, &shell.state)?;
                    println!("Added column '{}' with key {}", label, key);
                }
                ColumnProposal::Rejected(reason) if reason.should_notify() => {
                    eprintln!("Column not added: {}", reason);
                    std::process::exit(1);
                }
                ColumnProposal::Rejected(_) => {}
            }
        }

        Commands::RemoveColumn { draft, key } => {
            let mut shell = storage::open_draft(&draft)?;
            match shell.apply(EditorCommand::RemoveColumn { key: key.clone() })? {
                EditorOutcome::ColumnRemoved(true) => {
                    storage::save_draft(&draft, &shell.state)?;
                    println!("Removed column {}", key);
                }
                _ => {
                    eprintln!("No such column: {}", key);
                    std::process::exit(1);
                }
            }
        }

        Commands::AddRow { draft } => {
            let mut shell = storage::open_draft(&draft)?;
            shell.apply(EditorCommand::AddRow)?;
            storage::save_draft(&draft, &shell.state)?;
            println!("Table now has {} rows", shell.table().row_count());
        }

        Commands::RemoveRow { draft, index } => {
            let mut shell = storage::open_draft(&draft)?;
            shell.apply(EditorCommand::RemoveRow { index })?;
            storage::save_draft(&draft, &shell.state)?;
            println!("Table now has {} rows", shell.table().row_count());
        }

        Commands::Set { draft, row, field, dynamic, value } => {
            let mut shell = storage::open_draft(&draft)?;
            match row {
                Some(row) => {
                    let target = Commands::parse_target(&field, dynamic);
                    shell.set_cell_input(row, target, &value)?;
                }
                None => shell.set_header_input(&field, &value)?,
            }
            storage::save_draft(&draft, &shell.state)?;
        }

        Commands::Sign { draft, slot, name, date } => {
            let mut shell = storage::open_draft(&draft)?;
            shell.set_signature(&slot, SignatureRecord::typed(&name, date))?;
            storage::save_draft(&draft, &shell.state)?;
            info!("Signed slot '{}' on {}", slot, draft.display());
        }

        Commands::Render { draft, print, csv } => {
            config.check_max_cell_width()?;
            let mode = if print {
                DisplayMode::Print
            } else {
                config.display_mode()
            };
            let shell = storage::open_draft(&draft)?.with_mode(mode);
            if csv {
                print!("{}", render::table_to_csv(&shell.table_view())?);
            } else {
                print!("{}", render::render_form(&shell, config.max_cell_width));
            }
        }

        Commands::Validate { draft } => {
            let shell = storage::open_draft(&draft)?;
            let report = shell.validate();
            if report.is_valid() {
                println!("No validation errors");
            } else {
                for err in &report.errors {
                    println!("{}", err);
                }
                std::process::exit(1);
            }
        }

        Commands::Submit { draft, output, log_only } => {
            let shell = storage::open_draft(&draft)?;
            let mut handler: Box<dyn SubmitHandler> = if log_only {
                Box::new(LogSubmitter)
            } else {
                let dir = match output {
                    Some(dir) => dir,
                    None => {
                        config.validate()?;
                        config.submission_dir.clone()
                    }
                };
                Box::new(JsonFileSubmitter::new(dir))
            };

            match shell.submit(handler.as_mut()) {
                Ok(submission) => {
                    info!("Successfully submitted {}", submission.instance_id);
                    println!("Submitted {} ({})", submission.form_id, submission.instance_id);
                }
                Err(SubmitError::Invalid(report)) => {
                    warn!("Submission blocked: {}", report);
                    for err in &report.errors {
                        eprintln!("{}", err);
                    }
                    std::process::exit(1);
                }
                Err(e) => {
                    error!("Submission failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
