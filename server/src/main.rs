use anyhow::Result;
use axum::Router;
use clap::Parser;
use hits_core::IndexPaths;
use hits_server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "index-server")]
#[command(about = "Serve tf-idf + PageRank search over a static inverted index")]
struct Args {
    /// Directory holding stopwords.txt, pagerank.out and inverted_index/
    #[arg(long, env = "INDEX_DIR", default_value = "./index_server")]
    index_dir: PathBuf,
    /// Inverted index segment to serve
    #[arg(long, env = "INVERTED_INDEX_SEGMENT_ID", default_value = "0")]
    segment: String,
    /// Explicit inverted index file, overrides --segment
    #[arg(long, env = "INDEX_PATH")]
    index_path: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut paths = IndexPaths::new(&args.index_dir).with_segment(args.segment);
    if let Some(file) = &args.index_path {
        paths = paths.with_index_file(file);
    }
    let app: Router = build_app(&paths)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
