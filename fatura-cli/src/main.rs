use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use fatura_core::{Reconciliation, money};
use fatura_export::{ExportError, export_reconciled, generate_references, references};
use fatura_ingest::{Dialect, ParseResult, parse_statement, parse_with_dialect};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::Config;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FATURA_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "fatura", version = VERSION, about = "Parse and reconcile Brazilian card statements")]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement text dump; export CSV only when totals reconcile
    Parse {
        /// Statement text file (already extracted from the PDF)
        file: PathBuf,

        /// Who the spending belongs to (default: config statement.default_who)
        #[arg(long)]
        who: Option<String>,

        /// Output CSV (default: config export.output_dir/export.filename)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Statement layout
        #[arg(long, value_enum, default_value_t = DialectArg::Auto)]
        dialect: DialectArg,

        /// Print the parse result as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Year for DD/MM rows when reporting the statement period
        #[arg(long)]
        year: Option<i32>,
    },

    /// Build the category reference table from a categorised sheet CSV
    References {
        /// CSV with Descrição, Comentário, Quem, Categoria columns
        csv: PathBuf,

        /// Output CSV (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage ~/.fatura/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum DialectArg {
    /// Detect from the statement text
    Auto,
    Generic,
    /// Banco do Brasil credit card
    Bb,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (cfg, cfg_err) = config::or_default(config::load_config());
    init_tracing(&cfg, cli.verbose);
    if let Some(err) = cfg_err {
        warn!("{err:#}; falling back to default config");
    }

    match cli.command {
        Command::Parse {
            file,
            who,
            out,
            dialect,
            json,
            year,
        } => {
            let who = who.unwrap_or_else(|| cfg.statement.default_who.clone());
            let out = out.unwrap_or_else(|| cfg.export_path());
            run_parse(&file, &who, &out, dialect, json, year)?;
        }

        Command::References { csv, out } => {
            run_references(&csv, out.as_deref())?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config(&cfg)?,
        },
    }

    Ok(())
}

fn init_tracing(cfg: &Config, verbose: bool) {
    let level = if verbose { "debug" } else { cfg.log.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "fatura={level},fatura_core={level},fatura_ingest={level},fatura_export={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_parse(
    file: &Path,
    who: &str,
    out: &Path,
    dialect: DialectArg,
    json: bool,
    year: Option<i32>,
) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("read {}", file.display()))?;

    let result = match dialect {
        DialectArg::Auto => parse_statement(&text),
        DialectArg::Generic => parse_with_dialect(&text, Dialect::Generic),
        DialectArg::Bb => parse_with_dialect(&text, Dialect::BancoDoBrasil),
    };
    let outcome = result.reconcile();

    if json {
        let doc = serde_json::json!({ "result": &result, "reconciliation": outcome });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_summary(&result, outcome, year);
    }

    match export_reconciled(&result, who, out) {
        Ok(()) => {
            info!(path = %out.display(), "statement reconciled, CSV written");
            if !json {
                println!("\nCSV exported -> {}", out.display());
            }
            Ok(())
        }
        Err(ExportError::Blocked(outcome)) => {
            warn!(%outcome, file = %file.display(), "export blocked");
            match outcome {
                Reconciliation::Mismatch { diff } => bail!(
                    "totals do not match (difference R$ {}); CSV was NOT generated",
                    money::encode(diff)
                ),
                _ => bail!(
                    "declared total not found in {}; CSV was NOT generated",
                    file.display()
                ),
            }
        }
        Err(e) => Err(e).with_context(|| format!("export {}", out.display())),
    }
}

fn print_summary(result: &ParseResult, outcome: Reconciliation, year: Option<i32>) {
    for line in summary_lines(result, outcome, year) {
        println!("{line}");
    }
}

fn summary_lines(result: &ParseResult, outcome: Reconciliation, year: Option<i32>) -> Vec<String> {
    let refunds = result.transactions.iter().filter(|t| t.is_refund()).count();
    let mut lines = vec![
        format!("Dialect               : {:?}", result.dialect),
        format!(
            "Captured transactions : {} ({} refunds)",
            result.transactions.len(),
            refunds
        ),
        format!("Sum of captured items : R$ {}", money::encode(result.total_captured)),
    ];

    lines.push(match result.expected_total {
        Some(total) => format!("Statement total       : R$ {}", money::encode(total)),
        None => "Statement total       : not found".to_string(),
    });

    if let Some((first, last)) = result.period(year) {
        lines.push(format!("Period                : {first} .. {last}"));
    }

    if !result.skipped.is_empty() {
        lines.push(format!(
            "Skipped lines         : {} (use --verbose to list them)",
            result.skipped.len()
        ));
    }

    lines.push(format!("Outcome               : {outcome}"));
    lines
}

fn run_references(csv_path: &Path, out: Option<&Path>) -> Result<()> {
    let file = fs::File::open(csv_path).with_context(|| format!("open {}", csv_path.display()))?;
    let (headers, rows) =
        references::read_table(file).with_context(|| format!("parsing {}", csv_path.display()))?;

    let table = generate_references(&headers, &rows)?;

    match out {
        Some(path) => {
            let f = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
            references::write_table(f, &table)?;
            println!("Wrote {} references to {}", table.len() - 1, path.display());
        }
        None => references::write_table(io::stdout().lock(), &table)?,
    }

    Ok(())
}
