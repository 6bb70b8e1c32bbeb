use cartx_api::{AppState, RestApi};
use cartx_core::{
    CatalogResolver, CatalogSnapshot, RecommendationEngine, ResolverConfig, SgdTrainer,
    SgdTrainerConfig, Trainer,
};
use cartx_ingest::CsvBasketSource;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Basket-driven add-on recommender
#[derive(Parser, Debug)]
#[command(name = "cartx")]
#[command(about = "Recommends add-on products from basket co-purchase history", long_about = None)]
struct Args {
    /// Path to the transaction-export CSV (Transaction ID, Product Description)
    #[arg(short, long)]
    products_csv: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 5050)]
    http_port: u16,

    /// Embedding dimension
    #[arg(long, default_value_t = 8)]
    embedding_dim: usize,

    /// Training epochs over the pair multiset
    #[arg(long, default_value_t = 7)]
    epochs: usize,

    /// Trainer RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Add-ons returned per resolved variant
    #[arg(long, default_value_t = 5)]
    top_k: usize,

    /// Fuzzy-match cutoff for query resolution
    #[arg(long, default_value_t = 0.6)]
    fuzzy_cutoff: f32,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cartX v{}", env!("CARGO_PKG_VERSION"));
    info!("Products CSV: {:?}", args.products_csv);

    // Build phase: one offline pass from raw rows to a frozen snapshot
    let source = CsvBasketSource::new(&args.products_csv);
    let records = source.load()?;
    let trainer: Arc<dyn Trainer> = Arc::new(SgdTrainer::new(SgdTrainerConfig {
        epochs: args.epochs,
        seed: args.seed,
        ..SgdTrainerConfig::default()
    }));
    let snapshot = CatalogSnapshot::build(&records, trainer.as_ref(), args.embedding_dim)?;

    let resolver = CatalogResolver::new(ResolverConfig {
        fuzzy_cutoff: args.fuzzy_cutoff,
        ..ResolverConfig::default()
    });
    let engine = Arc::new(RecommendationEngine::new(snapshot, resolver));

    let state = Arc::new(AppState::new(
        engine,
        source,
        trainer,
        args.embedding_dim,
        args.top_k,
    ));

    info!("HTTP API: http://localhost:{}/", args.http_port);
    RestApi::start(state, args.http_port).await?;

    info!("Shutting down...");
    Ok(())
}
