//! Command-line front end for the configuration resolver.
//!
//! Fetches, inspects, and clears the cached remote configuration using the
//! same service object the client application embeds.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use external_config::observability::logging;
use external_config::{ConfigService, InMemoryOverrides, ServiceSettings};

#[derive(Parser)]
#[command(name = "external-config")]
#[command(about = "Remote host/feature-override configuration resolver", long_about = None)]
struct Cli {
    /// Product data directory holding the cached document.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Honor a local develop-myteam-config.json override file.
    #[arg(long)]
    develop: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download, validate, cache, and print the remote document
    Fetch {
        /// Login domain, sent as the `?domain=` query value
        #[arg(long)]
        login_domain: String,

        /// Explicit config host; defaults to the login domain
        #[arg(long)]
        host: Option<String>,

        /// Full document URL, bypassing URL construction
        #[arg(long)]
        url: Option<String>,
    },
    /// Load the cached document from disk and print it
    Show,
    /// Remove the cached document and revert overrides
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let Some(data_dir) = cli.data_dir.or_else(default_data_dir) else {
        eprintln!("Error: no data directory available; pass --data-dir");
        return ExitCode::FAILURE;
    };

    let mut settings = ServiceSettings::new(data_dir);
    if cli.develop {
        settings.develop_overrides = true;
    }
    let service = ConfigService::new(settings, Arc::new(InMemoryOverrides::new()));

    match cli.command {
        Commands::Fetch {
            login_domain,
            host,
            url,
        } => {
            let url = url.unwrap_or_else(|| service.fetch_url(&login_domain, host.as_deref()));
            let outcome = service.fetch(&url).await;
            println!("{outcome}");
            if !outcome.is_ok() {
                return ExitCode::FAILURE;
            }
            print_snapshot(&service)
        }
        Commands::Show => {
            if !service.load_from_disk() {
                eprintln!("Error: no valid cached configuration");
                return ExitCode::FAILURE;
            }
            print_snapshot(&service)
        }
        Commands::Clear => {
            service.clear();
            ExitCode::SUCCESS
        }
    }
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("myteam"))
}

fn print_snapshot(service: &ConfigService) -> ExitCode {
    match service.store().snapshot() {
        Some(model) => match serde_json::to_string_pretty(&*model) {
            Ok(rendered) => {
                println!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("Error: failed to render snapshot: {error}");
                ExitCode::FAILURE
            }
        },
        None => {
            println!("(no configuration published)");
            ExitCode::SUCCESS
        }
    }
}
