use clap::Parser;

use ledgerdesk_client::cli::{self, Cli, Commands};
use ledgerdesk_client::ApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ledgerdesk_observability::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            let draft = cli::load_draft(&path)?;
            let report = cli::validation_report(&draft);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if report["isValid"] != serde_json::Value::Bool(true) {
                std::process::exit(1);
            }
        }
        Commands::Submit { path } => {
            let draft = cli::load_draft(&path)?;
            let client = ApiClient::from_env()?;
            let entry = cli::submit(&client, &draft).await?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
    }

    Ok(())
}
