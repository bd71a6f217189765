//! LLM Quality CLI
//!
//! Score model answers with heuristic metrics and fold in reviewer feedback.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use llm_quality_cli::commands::{config, feedback, metrics, score, CommandContext};
use llm_quality_cli::output::OutputFormat;
use llm_quality_common::{init_tracing, EvalConfig};
use llm_quality_domain::{TraceId, USER_RATING_METRIC};

/// Output format for CLI commands
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CliOutputFormat {
    /// JSON output
    Json,
    /// Table output
    Table,
    /// Plain text output
    Plain,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "llm-quality")]
#[command(author, version, about = "Score LLM answers with quality metrics")]
#[command(long_about = "Score answered questions with heuristic quality metrics.\n\n\
    Reads items from JSON or JSON lines, aggregates per-metric statistics, \
    and merges reviewer feedback into the same report.")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format (overrides config)
    #[arg(short = 'o', long, global = true, value_enum)]
    format: Option<CliOutputFormat>,

    /// Configuration file layered over config/default and config/$QUALITY_ENV
    #[arg(short, long, global = true, env = "QUALITY_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a file of answered items
    #[command(alias = "s")]
    Score {
        /// JSON array or JSON lines file of items
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Also report statistics per item category
        #[arg(long)]
        by_category: bool,

        /// JSON lines file of feedback scores to merge into the report
        #[arg(long, value_name = "FILE")]
        feedback: Option<PathBuf>,

        /// Metrics to run, in order (overrides config)
        #[arg(short, long, value_delimiter = ',')]
        metrics: Vec<String>,

        /// Ideal answer length for conciseness (overrides config)
        #[arg(long)]
        ideal_length: Option<usize>,

        /// Score items on a thread pool
        #[arg(long)]
        parallel: bool,

        /// Experiment name (defaults to a dated name)
        #[arg(short, long)]
        experiment: Option<String>,
    },

    /// List the built-in metrics
    #[command(alias = "m")]
    Metrics,

    /// Record a 1-5 star rating as a feedback score
    #[command(alias = "f")]
    Feedback {
        /// Star rating from 1 to 5
        #[arg(value_name = "RATING")]
        rating: u8,

        /// Trace being rated (a new one is generated if omitted)
        #[arg(short, long)]
        trace_id: Option<TraceId>,

        /// Metric the rating contributes to
        #[arg(short, long, default_value = USER_RATING_METRIC)]
        metric: String,

        /// Reviewer comment
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Show current configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "llm-quality", &mut std::io::stdout());
}

fn run(cli: Cli) -> Result<()> {
    let config = EvalConfig::load_with_file(cli.config.as_deref())?;

    if cli.no_color || !config.output.colored {
        colored::control::set_override(false);
    }

    let log_level = if cli.verbose {
        "debug"
    } else {
        config.telemetry.log_level.as_str()
    };
    init_tracing(config.telemetry.json_logging, log_level)?;

    let ctx = CommandContext::new(config, cli.format.map(Into::into));

    match cli.command {
        Commands::Score {
            file,
            by_category,
            feedback,
            metrics,
            ideal_length,
            parallel,
            experiment,
        } => score::run(
            &ctx,
            score::ScoreOptions {
                file,
                by_category,
                feedback,
                ideal_length,
                parallel,
                experiment,
                metrics,
            },
        ),

        Commands::Metrics => metrics::list(&ctx),

        Commands::Feedback {
            rating,
            trace_id,
            metric,
            reason,
        } => feedback::run(
            &ctx,
            feedback::FeedbackOptions {
                trace_id,
                rating,
                metric,
                reason,
            },
        ),

        Commands::Config => config::show(&ctx),

        Commands::Completions { .. } => {
            // Already handled in main
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle completions command early (doesn't need config)
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return;
    }

    let verbose = cli.verbose;
    if let Err(e) = run(cli) {
        use colored::Colorize;
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if verbose {
            eprintln!("\n{}", "Backtrace:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(1);
    }
}
