use clap::Parser;
use notebox::config::Config;
use notebox::error::AppResult;
use notebox::server;
use notebox::shelf::{NoteStore, Shelf};

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_millis()
        .init();

    let shelf = Shelf::ensure_exists(&config.storage_dir)?;
    let store = NoteStore::new(shelf);

    server::serve(&config, store).await
}
