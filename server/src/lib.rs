use anyhow::Result;
use axum::{extract::{Query, State}, http::HeaderValue, routing::get, Json, Router};
use hits_core::{IndexPaths, ScoredResult, SearchContext, DEFAULT_WEIGHT};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Default, PartialEq)]
pub struct HitsParams {
    pub q: String,
    /// Kept as text so that an unparseable weight falls back to the default.
    pub w: Option<String>,
}

impl HitsParams {
    /// Pick `q` and `w` out of the raw query pairs. The first value of a repeated key wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut q = None;
        let mut w = None;
        for (key, value) in pairs {
            match key.as_str() {
                "q" if q.is_none() => q = Some(value),
                "w" if w.is_none() => w = Some(value),
                _ => {}
            }
        }
        Self { q: q.unwrap_or_default(), w }
    }
}

#[derive(Serialize)]
pub struct HitsResponse {
    pub hits: Vec<ScoredResult>,
}

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<SearchContext>,
}

pub fn build_app(paths: &IndexPaths) -> Result<Router> {
    // Load stopwords, pagerank and the index segment at startup
    let ctx = SearchContext::load(paths)?;
    Ok(router(Arc::new(ctx)))
}

pub fn router(ctx: Arc<SearchContext>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/v1/", get(api_handler))
        .route("/api/v1/hits/", get(hits_handler))
        .with_state(AppState { ctx })
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

// CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = std::env::var("CORS_ALLOW_ORIGIN")
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn parse_weight(raw: Option<&str>) -> f64 {
    raw.and_then(|w| w.trim().parse().ok())
        .filter(|w: &f64| w.is_finite())
        .unwrap_or(DEFAULT_WEIGHT)
}

pub async fn api_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "hits": "/api/v1/hits/",
        "url": "/api/v1/",
    }))
}

pub async fn hits_handler(State(state): State<AppState>, Query(pairs): Query<Vec<(String, String)>>) -> Json<HitsResponse> {
    let start = std::time::Instant::now();
    let params = HitsParams::from_pairs(pairs);
    let weight = parse_weight(params.w.as_deref());
    let terms = state.ctx.normalize(&params.q);
    let hits = state.ctx.rank(&terms, weight);
    tracing::debug!(query = %params.q, weight, terms = terms.len(), hits = hits.len(), took_s = start.elapsed().as_secs_f64(), "ranked query");
    Json(HitsResponse { hits })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_falls_back_to_default() {
        assert_eq!(parse_weight(None), 0.5);
        assert_eq!(parse_weight(Some("abc")), 0.5);
        assert_eq!(parse_weight(Some("")), 0.5);
        assert_eq!(parse_weight(Some("0.25")), 0.25);
        assert_eq!(parse_weight(Some("-3")), -3.0);
    }

    #[test]
    fn non_finite_weight_falls_back_to_default() {
        for raw in ["NaN", "nan", "inf", "-inf", "infinity"] {
            assert_eq!(parse_weight(Some(raw)), 0.5, "{raw}");
        }
    }

    #[test]
    fn first_value_of_repeated_key_wins() {
        let pairs = vec![
            ("q".to_string(), "cat".to_string()),
            ("w".to_string(), "1".to_string()),
            ("q".to_string(), "dog".to_string()),
            ("w".to_string(), "2".to_string()),
            ("k".to_string(), "10".to_string()),
        ];
        assert_eq!(HitsParams::from_pairs(pairs), HitsParams { q: "cat".into(), w: Some("1".into()) });
        assert_eq!(HitsParams::from_pairs(vec![]), HitsParams::default());
    }
}
