use anyhow::Result;
use panel_api::{serve, ApiConfig};
use panel_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("panel_api");

    let config = ApiConfig::from_env()?;
    serve(config).await
}
