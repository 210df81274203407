use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qualsum::cli::commands;
use qualsum::config::ExportFormat;

#[derive(Parser)]
#[command(name = "qualsum")]
#[command(
    version,
    about = "Structured qualitative research summaries from interview responses"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize qualsum in the current directory
    Init {
        #[arg(long, short, help = "Overwrite existing initialization")]
        force: bool,
    },

    /// Manage saved project contexts
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Estimate tokens and cost for a responses file
    Estimate {
        #[arg(help = "Raw responses file")]
        responses: PathBuf,
    },

    /// Generate a summary for a saved project
    Generate {
        #[arg(long, short, help = "Project ID")]
        project: String,
        #[arg(long, short, help = "Raw responses file")]
        responses: PathBuf,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long, help = "Output token cap")]
        max_tokens: Option<u32>,
        #[arg(long, short, help = "Export format: html, markdown")]
        format: Option<ExportFormat>,
        #[arg(long, short, help = "Output directory for copy text and export")]
        output_dir: Option<PathBuf>,
        #[arg(long, help = "Logo image for the export")]
        logo: Option<PathBuf>,
        #[arg(long, help = "Show the summary only, write no files")]
        no_export: bool,
        #[arg(long = "dry-run", help = "Print the prompt and estimate, don't call the model")]
        dry_run: bool,
        #[arg(long, help = "Save the raw model reply to a file")]
        save_reply: Option<PathBuf>,
    },

    /// Extract a summary from a saved model reply
    Extract {
        #[arg(help = "Saved reply file")]
        reply: PathBuf,
        #[arg(long, short, help = "Project ID")]
        project: String,
        #[arg(long, short, help = "Export format: html, markdown")]
        format: Option<ExportFormat>,
        #[arg(long, short, help = "Output directory for copy text and export")]
        output_dir: Option<PathBuf>,
        #[arg(long, help = "Show the summary only, write no files")]
        no_export: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// List saved projects
    List,
    /// Show one project context
    Show {
        id: String,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Create or replace a project context
    Save {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "")]
        client: String,
        #[arg(long, default_value = "")]
        industry: String,
        #[arg(long, default_value = "")]
        respondent_type: String,
        #[arg(long, default_value = "")]
        objectives: String,
        #[arg(long = "question", help = "Interview question (repeatable)")]
        questions: Vec<String>,
        #[arg(long, help = "File with one question per line")]
        questions_file: Option<PathBuf>,
    },
    /// Remove a project context
    Remove { id: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json, yaml"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mqualsum encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { force } => {
            commands::init::run(force)?;
        }
        Commands::Project { action } => match action {
            ProjectAction::List => commands::project::list()?,
            ProjectAction::Show { id, format } => commands::project::show(&id, &format)?,
            ProjectAction::Save {
                id,
                client,
                industry,
                respondent_type,
                objectives,
                questions,
                questions_file,
            } => {
                commands::project::save(commands::project::SaveOptions {
                    id,
                    client,
                    industry,
                    respondent_type,
                    objectives,
                    questions,
                    questions_file,
                })?;
            }
            ProjectAction::Remove { id } => commands::project::remove(&id)?,
        },
        Commands::Estimate { responses } => {
            commands::estimate::run(&responses)?;
        }
        Commands::Generate {
            project,
            responses,
            model,
            max_tokens,
            format,
            output_dir,
            logo,
            no_export,
            dry_run,
            save_reply,
        } => {
            commands::generate::run(commands::generate::GenerateOptions {
                project,
                responses,
                model,
                max_tokens,
                format,
                output_dir,
                logo,
                no_export,
                dry_run,
                save_reply,
            })?;
        }
        Commands::Extract {
            reply,
            project,
            format,
            output_dir,
            no_export,
        } => {
            commands::extract::run(&reply, &project, format, output_dir, no_export)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => commands::config::show(&format)?,
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init { global, force } => {
                if global {
                    commands::config::init_global(force)?;
                } else {
                    commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
