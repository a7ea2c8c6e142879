//! Server shell (C7): wires the ring, store, peers, legacy client, and
//! persistence writer into a `Coordinator`, then serves it over `tonic`
//! alongside the `axum` health endpoints.

mod address;
mod args;
mod error;
mod health;
mod service;

use std::sync::Arc;

use clap::Parser;
use coordinator::{Coordinator, CoordinatorConfig};
use legacy::LegacyClient;
use peers::PeerPool;
use persistence::PersistenceWriter;
use proto::cache_service_server::CacheServiceServer;
use ring::{Ring, RingConfig};
use store::LocalStore;

use args::Args;
use service::CacheServiceImpl;

const LEGACY_BASE_URL: &str = "http://legacy_api:8001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let config = CoordinatorConfig::new(args.address.clone());
    let port = address::bind_port(&args.address)?;
    let peer_addresses = address::discover_peers(&args.address, config.replication_factor)?;

    tracing::info!(my_address = %args.address, ?peer_addresses, "servicer initialized");
    tracing::info!(my_address = %args.address, virtual_nodes = ring::DEFAULT_VIRTUAL_NODES, "hash ring configured");

    let ring = Ring::new(peer_addresses, RingConfig::default());
    let store = Arc::new(LocalStore::new());
    let peers = Arc::new(PeerPool::new());
    let legacy = Arc::new(LegacyClient::new(LEGACY_BASE_URL)?);

    let persistence = match &args.database_url {
        Some(database_url) => match PersistenceWriter::connect(database_url).await {
            Ok(writer) => {
                tracing::info!(my_address = %args.address, "connected to persistence layer");
                Some(Arc::new(writer))
            }
            Err(err) => {
                tracing::warn!(my_address = %args.address, error = %err, "persistence connect failed, running in-memory only");
                None
            }
        },
        None => {
            tracing::info!(my_address = %args.address, "no DATABASE_URL set, running in-memory only");
            None
        }
    };

    let coordinator = Arc::new(Coordinator::new(
        config, ring, store, peers, legacy, persistence,
    ));

    let bind_addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%bind_addr, identity = %args.address, "starting gRPC server");

    let rpc_server = tonic::transport::Server::builder()
        .add_service(CacheServiceServer::new(CacheServiceImpl::new(coordinator)))
        .serve(bind_addr);

    tokio::select! {
        result = rpc_server => result.map_err(anyhow::Error::from),
        result = health::serve() => result.map_err(anyhow::Error::from),
    }
}
