use axum::extract::{Path, Query, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use marquee_core::embed::Episode;
use marquee_core::error::ApiError;
use marquee_core::release::ClassificationResult;
use marquee_core::types::{MediaKind, TitleKey, UnknownMediaKind};
use marquee_metadata::TitleDetails;
use marquee_metadata::provider::{ResultPage, SearchResult};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        // Discovery
        .route("/search", get(search))
        .route("/upcoming", get(upcoming))
        .route("/trending/{kind}", get(trending))
        // Titles
        .route("/titles/{kind}/{id}", get(get_title))
        .route("/titles/{kind}/{id}/availability", get(get_availability))
        .route("/titles/{kind}/{id}/embed", get(get_embed))
        .route("/availability/cache", delete(clear_availability_cache))
        // Embed providers
        .route("/embed/providers", get(list_embed_providers))
}

/// Shorter queries return no results without reaching the provider.
const MIN_QUERY_CHARS: usize = 2;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn title_key(kind: &str, id: u64) -> Result<TitleKey, AppError> {
    let kind: MediaKind = kind
        .parse()
        .map_err(|e: UnknownMediaKind| ApiError::BadRequest(e.to_string()))?;
    Ok(TitleKey::new(id, kind))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    query: String,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, AppError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".into()).into());
    }
    if query.chars().count() < MIN_QUERY_CHARS {
        return Ok(Json(Vec::new()));
    }

    let results = state.metadata.search(query).await?;
    debug!(query, hits = results.len(), "search");
    Ok(Json(results))
}

async fn upcoming(State(state): State<AppState>) -> Result<Json<Vec<SearchResult>>, AppError> {
    let today = today();
    let results = state
        .metadata
        .upcoming()
        .await?
        .into_iter()
        .filter(|r| r.release_date.is_some_and(|d| d > today))
        .collect();
    Ok(Json(results))
}

#[derive(Deserialize)]
struct TrendingQuery {
    page: Option<u32>,
}

async fn trending(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<TrendingQuery>,
) -> Result<Json<ResultPage>, AppError> {
    let kind: MediaKind = kind
        .parse()
        .map_err(|e: UnknownMediaKind| ApiError::BadRequest(e.to_string()))?;
    let page = params.page.unwrap_or(1);
    if page == 0 {
        return Err(ApiError::BadRequest("page starts at 1".into()).into());
    }

    let mut listing = state.metadata.trending(kind, page).await?;
    listing.sort_by_rating();
    Ok(Json(listing))
}

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TitleResponse {
    #[serde(flatten)]
    details: TitleDetails,
    kind_label: &'static str,
    trailer_url: Option<String>,
}

async fn get_title(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
) -> Result<Json<TitleResponse>, AppError> {
    let key = title_key(&kind, id)?;

    let (details, trailer) = tokio::join!(
        state.metadata.get_title(key),
        state.metadata.trailer(key)
    );
    let details = details?;

    // A missing trailer never blocks the detail page
    let trailer_url = trailer.unwrap_or_else(|e| {
        warn!(title = %key, error = %e, "trailer lookup failed");
        None
    });

    Ok(Json(TitleResponse {
        details,
        kind_label: key.kind.label(),
        trailer_url,
    }))
}

#[derive(Deserialize)]
struct AvailabilityQuery {
    country: Option<String>,
}

async fn get_availability(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<ClassificationResult>, AppError> {
    let key = title_key(&kind, id)?;

    let country = match params.country.as_deref().map(str::trim) {
        Some(c) if c.len() == 2 && c.chars().all(|ch| ch.is_ascii_alphabetic()) => {
            c.to_ascii_uppercase()
        }
        Some(c) if !c.is_empty() => {
            return Err(ApiError::BadRequest(format!("invalid country code: {c}")).into());
        }
        _ => state.home_country.clone(),
    };
    // The cache holds home-country results only
    let cacheable = country == state.home_country;

    if cacheable {
        if let Some(hit) = state.cache.lock().await.get(&key) {
            debug!(title = %key, "availability cache hit");
            return Ok(Json(hit.clone()));
        }
    }

    // Failed lookups stay uncached so the next view retries
    let result = match state.availability.try_lookup(key, today(), &country).await {
        Ok(result) => {
            if cacheable {
                state.cache.lock().await.set(key, result.clone());
            }
            result
        }
        Err(_) => ClassificationResult::unavailable(),
    };

    Ok(Json(result))
}

#[derive(Serialize)]
struct ClearCacheResponse {
    cleared: usize,
}

async fn clear_availability_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.cache.lock().await.clear();
    Json(ClearCacheResponse { cleared })
}

// ---------------------------------------------------------------------------
// Embeds
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct EmbedProvidersResponse {
    movie: Vec<String>,
    tv: Vec<String>,
}

async fn list_embed_providers(State(state): State<AppState>) -> Json<EmbedProvidersResponse> {
    let names = |kind: MediaKind| -> Vec<String> {
        state
            .embeds
            .providers(kind)
            .into_iter()
            .map(str::to_string)
            .collect()
    };
    Json(EmbedProvidersResponse {
        movie: names(MediaKind::Movie),
        tv: names(MediaKind::Tv),
    })
}

#[derive(Deserialize)]
struct EmbedQuery {
    provider: String,
    season: Option<u32>,
    episode: Option<u32>,
}

#[derive(Serialize)]
struct EmbedResponse {
    provider: String,
    url: String,
}

async fn get_embed(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
    Query(params): Query<EmbedQuery>,
) -> Result<Json<EmbedResponse>, AppError> {
    let key = title_key(&kind, id)?;

    let defaults = Episode::default();
    let episode = Episode {
        season: params.season.unwrap_or(defaults.season),
        episode: params.episode.unwrap_or(defaults.episode),
    };

    let url = state.embeds.render(key, &params.provider, episode)?;
    Ok(Json(EmbedResponse {
        provider: params.provider,
        url,
    }))
}
