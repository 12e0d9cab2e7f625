use crate::cli::{CliOptions, Command};
use clap::Parser;
use shared::contracts::{provider::RpcWallet, registry::ContractSettings};
use shared::form::EventForm;
use shared::repo::event_directory::EventDirectory;
use shared::seed;
use shared::wallet::WalletConnector;
use shared::AppConfig;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let opts = CliOptions::parse();
    tracing::debug!(?opts, "starting");

    match opts.command {
        Command::Events { query } => {
            let directory = EventDirectory::new(seed::sample_events()?);
            print_json(&directory.filter(&query))
        }
        Command::Show { id } => {
            let directory = EventDirectory::new(seed::sample_events()?);
            match directory.find(id) {
                Some(record) => print_json(record),
                None => anyhow::bail!("no event with id {id}"),
            }
        }
        Command::Connect => {
            let cfg = AppConfig::from_env()?;
            let connector = WalletConnector::new(RpcWallet::from_config(&cfg)?.map(Arc::new));
            let signer = connector.connect().await?;
            print_json(&serde_json::json!({ "address": signer.address().to_string() }))
        }
        Command::Create(args) => {
            let cfg = AppConfig::from_env()?;
            let connector = WalletConnector::new(RpcWallet::from_config(&cfg)?.map(Arc::new));
            let contract = ContractSettings::from_config(&cfg)?;
            let mut form = EventForm::new(connector, contract, cfg.success_display_delay());
            form.fill(args.into());
            let outcome = form.submit().await?;
            print_json(&outcome)
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
