use clap::{Parser, Subcommand};

use lookup_cli::commands::{config_ops, query_ops};

#[derive(Parser)]
#[command(name = "lookuptool", about = "Prefix lookup and fuzzy ranking tool", version)]
struct Cli {
    /// Custom settings TOML (defaults are embedded)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every vocabulary entry starting with a prefix
    Match {
        /// Word list, one entry per line
        vocab_file: String,
        /// Prefix to look up (omit to list everything)
        prefix: Option<String>,
    },
    /// Complete the last token of a space-separated command
    Complete {
        /// Word list, one entry per line
        vocab_file: String,
        /// Tokens typed so far; the last one is completed
        tokens: Vec<String>,
    },
    /// Rank two strings with a metric (lower is a better match)
    Rank {
        /// Metric name (jaro_winkler, levenshtein)
        #[arg(short, long)]
        metric: Option<String>,
        x: String,
        y: String,
    },
    /// Prefix matches followed by typo-tolerant near-matches
    Suggest {
        /// Metric name (jaro_winkler, levenshtein)
        #[arg(short, long)]
        metric: Option<String>,
        /// Maximum number of suggestions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
        /// Word list, one entry per line
        vocab_file: String,
        query: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    lookup_engine::init_tracing(if cli.verbose { "debug" } else { "warn" }, cli.log_json);
    if let Some(path) = &cli.settings {
        config_ops::settings_load(path);
    }

    match cli.command {
        Command::Match { vocab_file, prefix } => {
            query_ops::match_prefix(&vocab_file, prefix.as_deref().unwrap_or(""))
        }
        Command::Complete { vocab_file, tokens } => query_ops::complete(&vocab_file, &tokens),
        Command::Rank { metric, x, y } => query_ops::rank(metric.as_deref(), &x, &y),
        Command::Suggest {
            metric,
            limit,
            json,
            vocab_file,
            query,
        } => query_ops::suggest(&vocab_file, &query, metric.as_deref(), limit, json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
