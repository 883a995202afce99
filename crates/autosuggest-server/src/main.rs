use anyhow::Result;
use autosuggest_common::config::load_server_config;
use autosuggest_server::{Catalog, SuggestionServer};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_server_config()?;

    // Environment variable takes precedence over config file
    let listen_addr =
        std::env::var("AUTOSUGGEST_LISTEN").unwrap_or_else(|_| config.listen_addr.clone());

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(Path::new(path))?,
        None => Catalog::countries(),
    };

    let server = SuggestionServer::bind(&listen_addr, catalog).await?;
    tracing::info!("serving suggestions at http://{}/suggestions", server.local_addr()?);
    server.serve().await
}
