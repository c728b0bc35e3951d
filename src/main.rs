// Mon Feb 9 2026 - Alex

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use record_extractor::history::HistoryStore;
use record_extractor::ledger::{AccessLedger, GrantStatus, RedeemOutcome, UserId};
use record_extractor::service::{
    DenialReason, ExtractionOutcome, ExtractionRequest, ExtractionService,
};
use record_extractor::{CommandRegistry, Config};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Keyword-filtered account record extraction with keyed access", long_about = None)]
struct Args {
    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,

    #[arg(long, default_value = "generated_results")]
    results_dir: PathBuf,

    #[arg(long, default_value = "ledger_data.json")]
    data_file: PathBuf,

    #[arg(long, default_value_t = 0)]
    operator: UserId,

    #[arg(long)]
    threads: Option<usize>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    no_progress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Extract {
        #[arg(long)]
        user: UserId,
        #[arg(long, default_value = "N/A")]
        name: String,
        #[arg(long)]
        keyword: String,
        #[arg(long)]
        count: usize,
        #[arg(long, default_value = "Results.txt")]
        output: String,
    },
    Available {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        keyword: String,
    },
    Validate {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        file: String,
    },
    Issue {
        #[arg(long)]
        duration: String,
    },
    Redeem {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        code: String,
    },
    Check {
        #[arg(long)]
        user: UserId,
    },
    Extend {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        duration: String,
    },
    Deduct {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        duration: String,
    },
    Pause {
        #[arg(long)]
        user: UserId,
    },
    Resume {
        #[arg(long)]
        user: UserId,
    },
    Revoke {
        #[arg(long)]
        user: UserId,
    },
    History {
        #[arg(long)]
        user: Option<UserId>,
    },
    Users,
}

fn main() {
    let args = Args::parse();

    if std::env::var_os("RUST_LOG").is_some() {
        record_extractor::logging::init_from_env();
    } else {
        record_extractor::logging::init_logger(args.verbose);
    }

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    if let Err(e) = run(args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::new()
        .with_raw_corpus_dir(args.logs_dir.clone())
        .with_delivered_dir(args.results_dir.clone())
        .with_data_file(args.data_file.clone())
        .with_operator(args.operator);
    if let Some(threads) = args.threads {
        config = config.with_worker_threads(threads);
    }

    if let Err(e) = config.validate() {
        bail!("invalid configuration: {}", e);
    }

    fs::create_dir_all(&config.raw_corpus_dir)
        .with_context(|| format!("creating {}", config.raw_corpus_dir.display()))?;
    fs::create_dir_all(&config.delivered_dir)
        .with_context(|| format!("creating {}", config.delivered_dir.display()))?;

    let ledger = Arc::new(AccessLedger::new(config.operator));
    let registry = Arc::new(CommandRegistry::new());
    let history = Arc::new(HistoryStore::new());
    let service = ExtractionService::new(
        Arc::new(config),
        ledger,
        registry,
        history,
    );
    service.load().context("loading data file")?;

    match args.command {
        Command::Extract {
            user,
            name,
            keyword,
            count,
            output,
        } => extract(&service, user, name, keyword, count, output, args.no_progress),
        Command::Available { user, keyword } => {
            match service.availability(user, &keyword) {
                Ok(count) => {
                    println!(
                        "{} Keyword `{}` appears in {} available lines ({} total, {} delivered)",
                        "[+]".green(),
                        keyword.cyan(),
                        count.available().to_string().green(),
                        count.total,
                        count.delivered
                    );
                }
                Err(reason) => print_denied(reason),
            }
            Ok(())
        }
        Command::Validate { user, file } => {
            match service.validate_output(user, &file) {
                Ok(Some(report)) => {
                    println!("{} Validation complete for {}", "[+]".green(), file.cyan());
                    println!("    Valid identifiers:   {}", report.valid.to_string().green());
                    println!("    Invalid identifiers: {}", report.invalid.to_string().yellow());
                    if !report.invalid_samples.is_empty() {
                        println!("    Samples: {}", report.invalid_samples.join(", ").dimmed());
                    }
                }
                Ok(None) => println!("{} File not found: {}", "[!]".red(), file),
                Err(reason) => print_denied(reason),
            }
            Ok(())
        }
        Command::Issue { duration } => {
            let (code, expiration) = service.issue_code(&duration)?;
            println!("{} Key generated: {}", "[+]".green(), code.cyan().bold());
            println!("    Expires at: {}", format_ts(expiration).yellow());
            Ok(())
        }
        Command::Redeem { user, code } => {
            match service.redeem_code(&code, user)? {
                RedeemOutcome::Success(expiration) => {
                    println!("{} Redemption successful for user {}", "[+]".green(), user);
                    println!("    Access expires: {}", format_ts(expiration).yellow());
                }
                RedeemOutcome::AlreadyRedeemed => {
                    println!("{} Key already redeemed", "[!]".red());
                }
                RedeemOutcome::Invalid => {
                    println!("{} Wrong key: not valid or already expired", "[!]".red());
                }
            }
            Ok(())
        }
        Command::Check { user } => {
            match service.grant_status(user)? {
                GrantStatus::Operator => println!("{} Operator account, no key needed", "[+]".green()),
                GrantStatus::Active(expiration) => {
                    println!("{} Key accepted", "[+]".green());
                    if let Some(remaining) = service.remaining_time(user) {
                        println!(
                            "    Remaining: {} days | {} hours | {} minutes | {} seconds",
                            remaining.days, remaining.hours, remaining.minutes, remaining.seconds
                        );
                    }
                    println!("    Expires at: {}", format_ts(expiration).yellow());
                }
                GrantStatus::Paused => println!("{} Key is paused", "[!]".yellow()),
                GrantStatus::Expired => println!("{} Key has expired", "[!]".red()),
                GrantStatus::Missing => println!("{} No active key for user {}", "[!]".red(), user),
            }
            Ok(())
        }
        Command::Extend { user, duration } => {
            let expiration = service.extend_grant(user, &duration)?;
            println!(
                "{} Key for user {} extended, new expiration: {}",
                "[+]".green(),
                user,
                format_ts(expiration).yellow()
            );
            Ok(())
        }
        Command::Deduct { user, duration } => {
            let expiration = service.deduct_grant(user, &duration)?;
            println!(
                "{} Key for user {} reduced, new expiration: {}",
                "[+]".green(),
                user,
                format_ts(expiration).yellow()
            );
            Ok(())
        }
        Command::Pause { user } => {
            service.pause_user(user);
            println!("{} User {} paused", "[+]".green(), user);
            Ok(())
        }
        Command::Resume { user } => {
            if service.resume_user(user) {
                println!("{} User {} resumed", "[+]".green(), user);
            } else {
                println!("{} User {} was not paused", "[!]".yellow(), user);
            }
            Ok(())
        }
        Command::Revoke { user } => {
            if service.revoke_user(user)? {
                println!("{} User {} revoked", "[+]".green(), user);
            } else {
                println!("{} User {} had no grant", "[!]".yellow(), user);
            }
            Ok(())
        }
        Command::History { user } => {
            let report = service.history_report();
            match user {
                Some(user) => match report.get(&user) {
                    Some(entry) => print_history_entry(user, entry),
                    None => println!("{} No history found for user {}", "[!]".yellow(), user),
                },
                None => {
                    if report.is_empty() {
                        println!("{} No generation history recorded", "[!]".yellow());
                    }
                    for (user, entry) in &report {
                        print_history_entry(*user, entry);
                    }
                }
            }
            Ok(())
        }
        Command::Users => {
            let users = service.active_users();
            if users.is_empty() {
                println!("{} No active users", "[!]".yellow());
            }
            for (user, expiration) in users {
                println!(
                    "{} User {} expires at {}",
                    "[+]".green(),
                    user.to_string().cyan(),
                    format_ts(expiration).yellow()
                );
            }
            Ok(())
        }
    }
}

fn extract(
    service: &ExtractionService,
    user: UserId,
    name: String,
    keyword: String,
    count: usize,
    output: String,
    no_progress: bool,
) -> Result<()> {
    println!("{} Searching for `{}` (up to {} records)", "[*]".blue(), keyword.cyan(), count);

    let spinner = if no_progress {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Scanning corpus...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let start = Instant::now();
    let outcome = service.run(&ExtractionRequest {
        requester: user,
        display_name: name,
        keyword,
        quota: count,
        output_name: output,
    });

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match outcome? {
        ExtractionOutcome::Completed(report) => {
            println!("{}", "=".repeat(40).cyan());
            println!("{} Extraction complete in {:.2}s", "[+]".green(), start.elapsed().as_secs_f64());
            println!("    Name:        {}", report.output_name.cyan());
            println!("    Date & time: {}", format_ts(report.timestamp).yellow());
            println!("    Total lines: {}", report.total_records.to_string().green());
            println!("    Saved to:    {}", report.output_path.display());
            println!("{}", "=".repeat(40).cyan());
        }
        ExtractionOutcome::Superseded => {
            println!("{} Command superseded by a newer request; no results delivered", "[!]".yellow());
        }
        ExtractionOutcome::Denied(reason) => print_denied(reason),
    }
    Ok(())
}

fn print_denied(reason: DenialReason) {
    println!("{} Access denied: {}", "[!]".red(), reason.message());
}

fn print_history_entry(user: UserId, entry: &record_extractor::history::HistoryEntry) {
    println!(
        "{} User {} ({}) generated {} times, {} total lines",
        "[+]".green(),
        user.to_string().cyan(),
        entry.display_name,
        entry.invocation_count,
        entry.total_records
    );
}

fn format_ts(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
