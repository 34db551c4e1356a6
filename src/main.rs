use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use wikkid::handlers::router;
use wikkid::logger::Logger;
use wikkid::{AppState, Config, DiskFileStore, Skin, WikiError};

/// Run a Wikkid Wiki server.
#[derive(Debug, Parser)]
#[command(name = "wikkid", version)]
struct Args {
    /// The branch (working tree) to use as a wiki.
    #[arg(long, default_value = "wiki")]
    branch: PathBuf,

    /// The port to listen on.
    #[arg(long)]
    port: Option<u16>,

    #[arg(long)]
    host: Option<String>,

    /// Skin name, looked up under `skins/`.
    #[arg(long)]
    skin: Option<String>,

    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    let args = Args::parse();
    if let Err(e) = Logger::init() {
        eprintln!("Failed to install logger: {}", e);
    }

    let config =
        Config::with_custom(args.branch, args.static_dir, args.skin, args.port, args.host);
    if let Err(e) = config.check_wiki_dir() {
        log::error!("{}", e);
        return Err(e);
    }
    log::info!("Using: {:?}", config.wiki_dir);

    let store = Arc::new(DiskFileStore::new(config.wiki_dir.as_ref().clone()));
    let skin = Skin::load(&PathBuf::from("skins"), &config.skin);
    let state = AppState::new(store, skin, config.static_dir.as_ref().clone());

    let addr = config.socket_addr();
    log::info!("Wiki listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await.map_err(WikiError::from)
}
