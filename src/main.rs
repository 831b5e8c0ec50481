use anyhow::{Context, Result};
use arxiv_weekly::config::{find_config_file, load_config, render_config, save_config, Config};
use arxiv_weekly::listing::{ListingError, SubjectGroup};
use arxiv_weekly::models::{Entry, FilterError, FilterSpec, ListingRequest};
use arxiv_weekly::report::{display, write_report, ReportTarget};
use arxiv_weekly::sources::{ArxivSource, ScanError};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// arxiv-weekly - Scan the weekly arXiv listing for papers matching your keywords
#[derive(Parser, Debug)]
#[command(name = "arxiv-weekly")]
#[command(version = arxiv_weekly::VERSION)]
#[command(about = "Scan the past-week arXiv listing for papers whose titles match your keywords", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the configuration)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a weekly listing and report titles matching the keywords
    #[command(alias = "s")]
    Scan {
        /// Keywords to search in titles (a single pattern with --mode regex)
        #[arg(long, short, num_args = 1.., required = true)]
        keywords: Vec<String>,

        /// Matching mode: any, all or regex
        #[arg(long, short, default_value = "any")]
        mode: String,

        /// Subject shortcut (e.g. cs, math, stat, econ, eess)
        #[arg(long, short)]
        subject: Option<String>,

        /// Field shortcut within the subject (e.g. LG)
        #[arg(long, short)]
        field: Option<String>,

        /// Directory under which weekly report folders are written
        #[arg(long)]
        out_path: Option<PathBuf>,

        /// Filter name added to the report file name
        #[arg(long, short)]
        name: Option<String>,

        /// Print matches without writing a report
        #[arg(long)]
        no_report: bool,
    },

    /// Print the number of entries in a weekly listing
    #[command(alias = "c")]
    Count {
        /// Subject shortcut
        #[arg(long, short)]
        subject: Option<String>,

        /// Field shortcut within the subject
        #[arg(long, short)]
        field: Option<String>,
    },

    /// List the subject and field shortcuts
    #[command(alias = "ls")]
    Subjects,

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration to a file
    Init {
        /// Where to write the file
        #[arg(long, default_value = arxiv_weekly::config::LOCAL_CONFIG_FILE)]
        path: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref()).context("Failed to load configuration")?;
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("arxiv_weekly={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::debug!("Using config file: {}", path.display());
    }

    let format = resolve_format(cli.output);

    match cli.command {
        Some(Commands::Scan {
            keywords,
            mode,
            subject,
            field,
            out_path,
            name,
            no_report,
        }) => {
            // Reject a bad filter before any network traffic
            let spec = filter_spec(&mode, &keywords)?;
            let request = listing_request(&config, subject, field);
            let source = ArxivSource::new(&config)?;

            let total = source
                .entry_count(&request)
                .await
                .map_err(|e| describe_scan_error(e, &request, &config))?;

            if !cli.quiet {
                print_banner(&request, &spec, total, &request.show_all_url(source.site_root(), total));
            }

            let entries = source
                .fetch_entries(&request, total, &spec)
                .await
                .map_err(|e| describe_scan_error(e, &request, &config))?;

            if entries.is_empty() {
                if !cli.quiet {
                    eprintln!("\tNONE");
                }
                return Ok(());
            }

            output_entries(&entries, format)?;

            if !no_report {
                let mut target = ReportTarget::current(&config.report, &request);
                if let Some(out_path) = out_path {
                    target = target.out_path(out_path);
                }
                if let Some(name) = name {
                    target = target.name(name);
                }

                let path = write_report(&target, &entries)
                    .with_context(|| format!("Failed to write report for {}", request.subject))?;
                if !cli.quiet {
                    eprintln!("\nWriting table to: \n\n\t{}", path.display());
                }
            }

            if !cli.quiet {
                eprintln!("\nDONE");
            }
        }

        Some(Commands::Count { subject, field }) => {
            let request = listing_request(&config, subject, field);
            let source = ArxivSource::new(&config)?;

            let total = source
                .entry_count(&request)
                .await
                .map_err(|e| describe_scan_error(e, &request, &config))?;

            if format == OutputFormat::Json {
                let value = serde_json::json!({
                    "subject": request.subject,
                    "field": request.field_label(),
                    "total": total,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", total);
            }
        }

        Some(Commands::Subjects) => {
            let source = ArxivSource::new(&config)?;
            let subjects = source
                .subjects()
                .await
                .context("Failed to read the subject directory")?;
            output_subjects(&subjects, format)?;
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                print!("{}", render_config(&config)?);
            }
            ConfigCommands::Init { path, force } => {
                save_config(&Config::default(), &path, force)?;
                if !cli.quiet {
                    eprintln!("Wrote default configuration to {}", path.display());
                }
            }
        },

        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

fn filter_spec(mode: &str, keywords: &[String]) -> Result<FilterSpec, FilterError> {
    FilterSpec::parse(mode, keywords.iter().map(String::as_str))
}

fn listing_request(config: &Config, subject: Option<String>, field: Option<String>) -> ListingRequest {
    let subject = subject.unwrap_or_else(|| config.listing.default_subject.clone());
    let request = ListingRequest::new(subject);
    match field {
        Some(field) => request.field(field),
        None => request,
    }
}

/// Turn a missing listing into a hint about the subject and field
fn describe_scan_error(err: ScanError, request: &ListingRequest, config: &Config) -> anyhow::Error {
    match err {
        ScanError::Listing(ListingError::PageNotFound(_)) => anyhow::anyhow!(
            "The page you requested ({}) does not exist. Check the subject and field.",
            request.base_url(&config.listing.site_root)
        ),
        other => other.into(),
    }
}

fn print_banner(request: &ListingRequest, spec: &FilterSpec, total: usize, url: &str) {
    eprintln!("Searching {} papers for:\n", total);
    eprintln!("\tSubject: {}", request.subject);
    eprintln!("\tField: {}", request.field_label());
    eprintln!("\tKeywords: {:?}", spec.keywords());
    eprintln!("\tMode: {}\n", spec.mode());
    eprintln!("\tURL: \n\n\t>>> {} <<<\n", url);
    eprintln!("Found: \n");
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn output_entries(entries: &[Entry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entries)?),
        OutputFormat::Plain => print!("{}", display::entries_plain(entries)),
        OutputFormat::Table | OutputFormat::Auto => println!("{}", display::entries_table(entries)),
    }
    Ok(())
}

fn output_subjects(subjects: &[SubjectGroup], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(subjects)?),
        OutputFormat::Plain => print!("{}", display::subjects_plain(subjects)),
        OutputFormat::Table | OutputFormat::Auto => println!("{}", display::subjects_table(subjects)),
    }
    Ok(())
}
