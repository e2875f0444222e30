use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use paylog_finance::{MonthlySummary, NO_DATA_CATEGORY, Tracker, TrackerError, write_expenses_csv};
use paylog_ingest::parse_message;
use std::io::Read;
use std::path::PathBuf;

mod config;
mod state;
mod store;

use config::{Config, load_config};
use store::JsonFileStore;

#[derive(Parser, Debug)]
#[command(name = "paylog", version, about = "Track spending from payment notifications")]
struct Cli {
    /// Log parser and store decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a payment message without saving it
    Parse {
        /// Message text (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Parse a payment message and record it as an expense dated now
    AddMessage {
        /// Message text (words are joined with spaces)
        text: Vec<String>,

        /// Read the message from stdin instead
        #[arg(long, conflicts_with = "text")]
        stdin: bool,
    },

    /// Set (or replace) the budget for a month
    AddBudget {
        /// Month name, e.g. "july"
        #[arg(long)]
        month: String,

        /// Budget ceiling; 0 means no limit
        #[arg(long)]
        amount: String,
    },

    /// Show spending for a month against its budget
    Summary {
        /// Month name (default: config summary.default_month, else current month)
        #[arg(long)]
        month: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Export a month's expenses as CSV
    Export {
        #[arg(long)]
        month: Option<String>,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage ~/.paylog/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if none exists
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Parse { text, json } => {
            let text = text.join(" ");
            match parse_message(&text) {
                Ok(txn) if json => println!("{}", serde_json::to_string_pretty(&txn)?),
                Ok(txn) => {
                    println!("amount:   {}", txn.amount);
                    println!("date:     {}", txn.date.format("%Y-%m-%d %H:%M:%S"));
                    println!("category: {}", txn.category);
                }
                Err(e) => println!("Failed to parse message: {e}"),
            }
        }

        Command::AddMessage { text, stdin } => {
            let text = if stdin {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading message from stdin")?;
                buf
            } else {
                text.join(" ")
            };
            if text.trim().is_empty() {
                bail!("no message given (pass text or --stdin)");
            }

            let cfg = load_config()?;
            let tracker = open_tracker(&cfg)?;
            match tracker.record_message(&text) {
                Ok(rec) => println!(
                    "Expense added: {}{} ({}) id={}",
                    cfg.summary.currency_symbol, rec.stored.amount, rec.stored.category, rec.id
                ),
                // Not fatal: nothing was written.
                Err(TrackerError::Parse(e)) => {
                    println!("Failed to parse message: {e}. Please check your input.")
                }
                Err(e) => return Err(e).context("saving expense"),
            }
        }

        Command::AddBudget { month, amount } => {
            let cfg = load_config()?;
            let tracker = open_tracker(&cfg)?;
            let budget = tracker
                .set_budget(&month, &amount)
                .context("saving budget")?;
            println!(
                "Budget for {} set to {}{}",
                budget.month, cfg.summary.currency_symbol, budget.amount
            );
        }

        Command::Summary { month, json } => {
            let cfg = load_config()?;
            let summary = load_summary(&cfg, month)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary, &cfg.summary.currency_symbol);
            }
        }

        Command::Export { month, out } => {
            let cfg = load_config()?;
            let summary = load_summary(&cfg, month)?;
            match out {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("create {}", path.display()))?;
                    write_expenses_csv(&summary, file)
                        .with_context(|| format!("write {}", path.display()))?;
                    eprintln!(
                        "Exported {} expenses for {} to {}",
                        summary.expenses.len(),
                        summary.selected_month,
                        path.display()
                    );
                }
                None => write_expenses_csv(&summary, std::io::stdout().lock())
                    .context("write CSV to stdout")?,
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,paylog={level}")));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_tracker(cfg: &Config) -> Result<Tracker<JsonFileStore>> {
    let path = cfg.store_path()?;
    tracing::debug!(store = %path.display(), "opening store");
    Ok(Tracker::new(JsonFileStore::open(path)))
}

fn load_summary(cfg: &Config, month: Option<String>) -> Result<MonthlySummary> {
    let tracker = open_tracker(cfg)?;
    let requested = month.or_else(|| cfg.summary.default_month.clone());
    tracker
        .summary(requested.as_deref())
        .with_context(|| format!("loading summary from {}", tracker.store().path().display()))
}

fn print_summary(s: &MonthlySummary, cur: &str) {
    print!("{}", render_summary(s, cur));
}

fn render_summary(s: &MonthlySummary, cur: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "# Spending for {}\n", s.selected_month);

    if s.is_empty() {
        let _ = writeln!(out, "(no expenses recorded this month)\n");
    } else {
        for e in &s.expenses {
            let _ = writeln!(
                out,
                "- {} | {:<10} | {}{:.2}",
                e.date.format("%Y-%m-%d %H:%M"),
                e.category,
                cur,
                e.amount
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## By category\n");
    if s.is_empty() {
        // The single NO_DATA_CATEGORY entry is a chart placeholder, not spending.
        let _ = writeln!(out, "- {NO_DATA_CATEGORY}");
    } else {
        for c in &s.category_totals {
            let _ = writeln!(out, "- {:<10} {}{:.2}", c.category, cur, c.amount);
        }
    }

    let _ = writeln!(out, "\n## Budget\n");
    let _ = writeln!(out, "Total:   {cur}{:.2}", s.total);
    let _ = writeln!(out, "Budget:  {cur}{:.2}", s.budget);
    let _ = writeln!(out, "Balance: {cur}{:.2}", s.balance);
    if s.over_budget {
        let _ = writeln!(out, "\nOver budget by {cur}{:.2}", -s.balance);
    }

    if !s.known_months.is_empty() {
        let _ = writeln!(out, "\nMonths with budgets: {}", s.known_months.join(", "));
    }
    out
}
