//! veriskill: operator CLI for the verification engine.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use veriskill_node::{init_logging, LogFormat, ServiceConfig, VerificationService};
use veriskill_types::{Domain, Role, Step, UserId, VehicleCategory};

#[derive(Parser)]
#[command(name = "veriskill", about = "Skill verification engine operator CLI")]
struct Cli {
    /// Data directory for the LMDB environment.
    #[arg(long, env = "VERISKILL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VERISKILL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VERISKILL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Reject retries inside the cooldown window after a failed attempt.
    #[arg(long, env = "VERISKILL_ENFORCE_RETRY_COOLDOWN")]
    enforce_retry_cooldown: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VERISKILL_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Register a user for verification.
    Register {
        user: UserId,
        #[arg(long)]
        role: Role,
        /// "EV" or "BS6".
        #[arg(long)]
        domain: Option<Domain>,
        /// "2W" or "3W".
        #[arg(long)]
        vehicle_category: Option<VehicleCategory>,
    },
    /// Print a user's verification progress as JSON.
    Status { user: UserId },
    /// Admin verification flag.
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Question bank maintenance.
    Questions {
        #[command(subcommand)]
        action: QuestionsAction,
    },
    /// Take a quiz step with answers given as option indices, in question order.
    Attempt {
        user: UserId,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
        step: u8,
        #[arg(long, value_delimiter = ',', required = true)]
        answers: Vec<usize>,
    },
}

#[derive(clap::Subcommand)]
enum AdminAction {
    /// Confirm a user after human review.
    Verify { user: UserId },
    /// Withdraw a previous confirmation.
    Revoke { user: UserId },
}

#[derive(clap::Subcommand)]
enum QuestionsAction {
    /// Replace the question set for a role and step from a JSON file.
    Import {
        #[arg(long)]
        role: Role,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
        step: u8,
        file: PathBuf,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<ServiceConfig> {
    let mut config = match cli.config {
        Some(ref path) => ServiceConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(ref level) = cli.log_level {
        config.log_level = level.clone();
    }
    config.verification.enforce_retry_cooldown |= cli.enforce_retry_cooldown;
    Ok(config)
}

fn step(n: u8) -> anyhow::Result<Step> {
    Ok(Step::try_from(n)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level)?;

    let service = VerificationService::open(&config)?;

    match cli.command {
        Command::Register {
            user,
            role,
            domain,
            vehicle_category,
        } => {
            let record = service
                .orchestrator()
                .register(user, role, domain, vehicle_category)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Status { user } => {
            let progress = service.orchestrator().progress(&user)?;
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        Command::Admin { action } => {
            let (user, verified) = match action {
                AdminAction::Verify { user } => (user, true),
                AdminAction::Revoke { user } => (user, false),
            };
            let badge = service.admin().set_admin_verified(&user, verified)?;
            println!("{user}: {}", badge.label());
        }
        Command::Questions { action } => match action {
            QuestionsAction::Import { role, step: n, file } => {
                let count = service.import_questions(role, step(n)?, &file)?;
                println!("stored {count} question(s) for {} step {n}", role.question_role());
            }
        },
        Command::Attempt {
            user,
            step: n,
            answers,
        } => {
            let outcome = service.attempt(&user, step(n)?, &answers)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
