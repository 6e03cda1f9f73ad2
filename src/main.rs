// Student-card authentication demo: runs the OCR pipeline over a card
// photo, against a single registered account supplied on the command line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cartauth::auth::{InMemoryUserDirectory, StaticTokenIssuer};
use cartauth::models::UserRecord;
use cartauth::{CardLoginService, CardUpload, PipelineConfig};

#[derive(Parser)]
#[command(name = "cartauth", about = "Student-card OCR authentication demo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recognize a card image and print what was extracted
    Scan {
        /// Path to the card photo (JPEG, PNG or WebP)
        image: PathBuf,
    },
    /// Run the full card login against one registered account
    Login {
        /// Path to the card photo (JPEG, PNG or WebP)
        image: PathBuf,
        /// Matricule of the registered account
        #[arg(long)]
        matricule: String,
        /// Given name of the registered account
        #[arg(long)]
        first_name: String,
        /// Family name of the registered account
        #[arg(long)]
        last_name: String,
    },
}

fn read_upload(path: &Path) -> Result<CardUpload, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let mime_type = match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };
    Ok(CardUpload::new(
        bytes,
        mime_type,
        path.file_name().map(|n| n.to_string_lossy().into_owned()),
    ))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(status) => {
            if status < 400 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<u16, String> {
    match cli.command {
        Command::Scan { image } => {
            let upload = read_upload(&image)?;
            let service = CardLoginService::new(
                PipelineConfig::default(),
                InMemoryUserDirectory::new(),
                StaticTokenIssuer::new("demo-token"),
            );
            let (status, body) = match service.scan(&upload) {
                Ok(scan) => (scan.status_code(), scan.to_response()),
                Err(err) => (err.status_code(), err.to_response()),
            };
            println!("HTTP {}", status);
            println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
            Ok(status)
        }
        Command::Login {
            image,
            matricule,
            first_name,
            last_name,
        } => {
            let upload = read_upload(&image)?;
            let directory = InMemoryUserDirectory::with_users(vec![UserRecord {
                id: "demo-user".to_string(),
                email: format!("{}@demo.local", matricule),
                first_name,
                last_name,
                role: "STUDENT".to_string(),
                matricule,
                class_id: None,
            }]);
            let service = CardLoginService::new(
                PipelineConfig::default(),
                directory,
                StaticTokenIssuer::new("demo-token"),
            );
            let (status, body) = match service.login(&upload) {
                Ok(outcome) => (outcome.status_code(), outcome.to_response()),
                Err(err) => (err.status_code(), err.to_response()),
            };
            println!("HTTP {}", status);
            println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
            Ok(status)
        }
    }
}
