use std::sync::Arc;

use olahire::config::AppConfig;
use olahire::error::AppError;
use olahire::remote::InMemoryRemote;
use olahire::telemetry;
use tracing::info;

use crate::cli::StubArgs;
use crate::stub;

pub(crate) async fn run(mut args: StubArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.stub.host = host;
    }
    if let Some(port) = args.port.take() {
        config.stub.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let app = stub::router(Arc::new(InMemoryRemote::seeded()));

    let addr = config.stub.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(?config.environment, %addr, "olahire stub backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
