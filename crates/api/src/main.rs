use shared::contracts::provider::RpcWallet;
use shared::contracts::registry::ContractSettings;
use shared::repo::event_directory::EventDirectory;
use shared::seed;
use shared::wallet::WalletConnector;
use shared::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use ticketing_api::{router, AppState};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cfg = AppConfig::from_env()?;
    let contract = ContractSettings::from_config(&cfg)?;
    let wallet = RpcWallet::from_config(&cfg)?;

    let state = Arc::new(AppState {
        directory: EventDirectory::new(seed::sample_events()?),
        connector: WalletConnector::new(wallet.map(Arc::new)),
        contract,
        display_delay: cfg.success_display_delay(),
    });

    let addr: SocketAddr = cfg.listen_addr.parse()?;
    tracing::info!(?addr, "api listening");
    axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();
}
