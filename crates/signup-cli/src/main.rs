use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use signup_core::config::SignupConfig;
use signup_core::user::{DraftProfile, Gender};
use signup_infrastructure::ConfigService;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "signup")]
#[command(about = "Signup CLI - validate and submit account-creation forms", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/signup/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a form without creating anything
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Create an account and store its profile
    Register {
        #[command(flatten)]
        form: FormArgs,

        /// Birthdate as YYYY-MM-DD
        #[arg(long)]
        birthdate: chrono::NaiveDate,

        /// male or female
        #[arg(long, default_value = "male")]
        gender: Gender,

        /// Store profiles as JSON documents in this directory instead of in memory
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },
}

/// Text fields of the signup form. Missing fields are left empty so the
/// validator reports them.
#[derive(Args)]
struct FormArgs {
    #[arg(long, default_value = "")]
    lastname: String,
    #[arg(long, default_value = "")]
    firstname: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    password: String,
    #[arg(long, default_value = "")]
    confirm_password: String,
}

impl FormArgs {
    fn into_draft(self) -> DraftProfile {
        DraftProfile {
            lastname: self.lastname,
            firstname: self.firstname,
            email: self.email,
            password: self.password,
            confirm_password: self.confirm_password,
            ..Default::default()
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<SignupConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    Ok(service.get_config()?)
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(cli.config)?;
    init_tracing(&config.logging.level);

    let code = match cli.command {
        Commands::Validate { form } => commands::validate::run(&config, &form.into_draft()),
        Commands::Register {
            form,
            birthdate,
            gender,
            store_dir,
        } => {
            let draft = DraftProfile {
                birthdate,
                gender,
                ..form.into_draft()
            };
            commands::register::run(&config, draft, store_dir).await?
        }
    };

    Ok(code)
}
