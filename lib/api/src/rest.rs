use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use cartx_core::{
    CatalogSnapshot, Error as CoreError, RecommendationEngine, RecommendationResult, Trainer,
};
use cartx_ingest::CsvBasketSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Deserialize)]
struct PredictRequest {
    query: Option<String>,
}

#[derive(Serialize)]
struct PredictResponse {
    query: String,
    results: Vec<VariantResponse>,
}

#[derive(Serialize)]
struct VariantResponse {
    product: String,
    popularity: u64,
    suggested_addons: Vec<String>,
}

/// Everything the handlers need: the serving engine plus what a rebuild
/// takes to produce a replacement snapshot.
pub struct AppState {
    engine: Arc<RecommendationEngine>,
    source: CsvBasketSource,
    trainer: Arc<dyn Trainer>,
    embedding_dim: usize,
    top_k: usize,
}

impl AppState {
    #[must_use]
    pub fn new(
        engine: Arc<RecommendationEngine>,
        source: CsvBasketSource,
        trainer: Arc<dyn Trainer>,
        embedding_dim: usize,
        top_k: usize,
    ) -> Self {
        Self {
            engine,
            source,
            trainer,
            embedding_dim,
            top_k,
        }
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .route("/predict", web::post().to(predict))
                .route("/rebuild", web::post().to(rebuild))
                .route("/healthz", web::get().to(healthz))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn predict(
    state: web::Data<Arc<AppState>>,
    req: web::Json<PredictRequest>,
) -> ActixResult<HttpResponse> {
    let query = req.query.as_deref().unwrap_or("");

    match state.engine.recommend(query, state.top_k) {
        Ok(RecommendationResult::NoMatch { query }) => {
            Ok(HttpResponse::NotFound().json(serde_json::json!({
                "message": format!("no matches for '{query}'")
            })))
        }
        Ok(RecommendationResult::Matches { query, results }) => {
            let results = results
                .into_iter()
                .map(|variant| VariantResponse {
                    product: variant.product.name,
                    popularity: variant.popularity,
                    suggested_addons: variant
                        .addons
                        .into_iter()
                        .map(|addon| addon.product.name)
                        .collect(),
                })
                .collect();
            Ok(HttpResponse::Ok().json(PredictResponse {
                query,
                results,
            }))
        }
        Err(CoreError::InvalidQuery) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "missing query"
        }))),
        Err(e) => {
            error!(error = %e, "predict failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

async fn rebuild(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    let source = state.source.clone();
    let trainer = state.trainer.clone();
    let embedding_dim = state.embedding_dim;

    let built = web::block(move || -> anyhow::Result<CatalogSnapshot> {
        let records = source.load()?;
        Ok(CatalogSnapshot::build(
            &records,
            trainer.as_ref(),
            embedding_dim,
        )?)
    })
    .await;

    match built {
        Ok(Ok(snapshot)) => {
            let vocab_size = snapshot.catalog().len();
            state.engine.swap_snapshot(snapshot);
            info!(vocab_size, "rebuild complete");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "result": true,
                "vocab_size": vocab_size
            })))
        }
        Ok(Err(e)) => {
            error!(error = %e, "rebuild failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
        Err(e) => {
            error!(error = %e, "rebuild task failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

async fn healthz(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    let snapshot = state.engine.snapshot();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "vocab_size": snapshot.catalog().len(),
        "embedding_dim": snapshot.embeddings().dim()
    })))
}
