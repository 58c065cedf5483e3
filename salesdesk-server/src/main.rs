use clap::{Parser, Subcommand};
use std::path::PathBuf;

use salesdesk::{LocalBackupStore, StoreConfig};
use salesdesk_http::{serve, ServerConfig};
use salesdesk_sheets::{ServiceAccountKey, SheetsClient, SheetsConfig};

#[derive(Parser)]
#[command(name = "salesdesk")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(long, env = "SALESDESK_BIND_ADDR", default_value = "0.0.0.0:5000")]
    bind_addr: String,
    #[arg(long, env = "SALESDESK_MAX_BODY_KB", default_value = "64")]
    max_body_kb: usize,

    #[arg(long, env = "SALESDESK_BACKUP_FILE", default_value = "sales_data_backup.json")]
    backup_file: PathBuf,
    #[arg(long, env = "SALESDESK_BACKUP_CAPACITY", default_value = "100")]
    backup_capacity: usize,
    /// Fail submits whose fallback write to the backup file fails
    #[arg(long, env = "SALESDESK_STRICT_BACKUP")]
    strict_backup: bool,

    #[arg(long, env = "GOOGLE_CREDENTIALS_FILE", default_value = "credentials.json")]
    credentials_file: PathBuf,
    #[arg(long, env = "GOOGLE_SHEET_ID")]
    sheet_id: Option<String>,
    #[arg(long, env = "SALESDESK_SHEET_RANGE", default_value = "Sheet1!A:F")]
    sheet_range: String,
    #[arg(
        long,
        env = "SALESDESK_SHEETS_API_BASE",
        default_value = "https://sheets.googleapis.com"
    )]
    sheets_api_base: String,
    #[arg(long, env = "SALESDESK_REQUEST_TIMEOUT_SECS", default_value = "30")]
    request_timeout_secs: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Check credentials, spreadsheet and backup configuration, then report the launch mode
    Check,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind_addr.clone(),
            max_body_kb: self.max_body_kb,
            store: StoreConfig::default()
                .with_backup_file(&self.backup_file)
                .with_capacity(self.backup_capacity)
                .strict(self.strict_backup),
            sheets: SheetsConfig {
                credentials_file: self.credentials_file.clone(),
                spreadsheet_id: self.sheet_id.clone(),
                range: self.sheet_range.clone(),
                api_base: self.sheets_api_base.clone(),
                request_timeout_secs: self.request_timeout_secs,
            },
        }
    }
}

fn run_check(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Salesdesk setup check");
    println!();

    let sheets = &config.sheets;
    let credentials = sheets.credentials_file.display();
    if sheets.credentials_file_exists() {
        match ServiceAccountKey::from_file(&sheets.credentials_file) {
            Ok(key) => println!(
                "[ok]   {} found (service account {})",
                credentials, key.client_email
            ),
            Err(e) => println!(
                "[warn] {} is not a usable service-account key: {}",
                credentials, e
            ),
        }
    } else {
        println!(
            "[warn] {} not found; Google Sheets integration will not work",
            credentials
        );
    }

    match sheets.spreadsheet_id() {
        Some(id) => println!("[ok]   spreadsheet {} (range {})", id, sheets.range),
        None => println!("[warn] GOOGLE_SHEET_ID is not set"),
    }

    let backup = LocalBackupStore::from_config(&config.store);
    let backup_ok = match backup.check_writable() {
        Ok(()) => {
            let entries = match backup.try_read_all() {
                Ok(records) => records.len().to_string(),
                Err(e) => format!("unreadable ({}), will be replaced on next write", e),
            };
            println!(
                "[ok]   backup file {} (capacity {}, entries {})",
                backup.path().display(),
                backup.capacity(),
                entries
            );
            true
        }
        Err(e) => {
            println!(
                "[fail] backup file {} is not writable: {}",
                backup.path().display(),
                e
            );
            false
        }
    };

    let bind_ok = match config.socket_addr() {
        Ok(addr) => {
            println!("[ok]   bind address {}", addr);
            true
        }
        Err(e) => {
            println!("[fail] {}", e);
            false
        }
    };

    println!();
    match SheetsClient::from_config(sheets) {
        Ok(_) => println!("Launch mode: spreadsheet (falls back to the backup file on errors)"),
        Err(e) => println!("Launch mode: local backup only ({})", e),
    }

    if !backup_ok {
        return Err("backup file location is not usable".into());
    }
    if !bind_ok {
        return Err("bind address is not usable".into());
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = cli.server_config();

    let result = match cli.command {
        Some(Command::Check) => run_check(&config),
        None => serve(config).await,
    };

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
