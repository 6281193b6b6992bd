//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::collections::HashMap;

use chrono::NaiveDate;
use marquee_core::release::{ReleaseRecord, WatchProviders};
use marquee_core::types::{MediaKind, TitleKey};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::provider::{MetadataProvider, ResultPage, SearchResult};
use crate::releases::{
    parse_movie_release_dates, parse_release_date, parse_tv_releases, parse_watch_providers,
};
use crate::{MetadataError, PersonInfo, SeasonInfo, TitleDetails};

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const CAST_LIMIT: usize = 5;
const SEARCH_LIMIT: usize = 10;
const UNKNOWN_GENRE: &str = "Unknown";

/// Genre ID to display name, movie and TV lists combined.
pub type GenreMap = HashMap<u64, String>;

pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    genres: OnceCell<GenreMap>,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_client(api_key, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(api_key: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            base_url: BASE_URL.to_string(),
            client,
            genres: OnceCell::new(),
        }
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }

    /// Movie and TV genre names. Fetched on first use and kept for the
    /// lifetime of the client; a failed fetch is retried on the next call.
    pub async fn genre_map(&self) -> Result<&GenreMap, MetadataError> {
        self.genres
            .get_or_try_init(|| async {
                let (movie, tv) = tokio::join!(
                    self.get_json("/genre/movie/list", &[("language", "en-US")]),
                    self.get_json("/genre/tv/list", &[("language", "en-US")]),
                );
                let mut map = parse_genre_list(&movie?);
                map.extend(parse_genre_list(&tv?));
                debug!(genres = map.len(), "genre lists loaded");
                Ok::<_, MetadataError>(map)
            })
            .await
    }

    /// Fetch a result listing together with the genre names its cards show.
    /// Missing genre lists degrade to "Unknown" names.
    async fn get_listing(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<(serde_json::Value, Option<&GenreMap>), MetadataError> {
        let (data, genres) = tokio::join!(self.get_json(path, params), self.genre_map());
        let genres = genres
            .inspect_err(|e| warn!(error = %e, "genre lists unavailable"))
            .ok();
        Ok((data?, genres))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MetadataError> {
        let (data, genres) = self
            .get_listing("/search/multi", &[("query", query), ("include_adult", "false")])
            .await?;
        let mut results = parse_search_results(&data, None, genres);
        results.truncate(SEARCH_LIMIT);
        Ok(results)
    }

    async fn upcoming(&self) -> Result<Vec<SearchResult>, MetadataError> {
        let (data, genres) = self
            .get_listing("/movie/upcoming", &[("language", "en-US"), ("page", "1")])
            .await?;
        Ok(parse_search_results(&data, Some(MediaKind::Movie), genres))
    }

    async fn trending(&self, kind: MediaKind, page: u32) -> Result<ResultPage, MetadataError> {
        let page = page.to_string();
        let (data, genres) = self
            .get_listing(&format!("/trending/{kind}/week"), &[("page", page.as_str())])
            .await?;
        Ok(parse_result_page(&data, kind, genres))
    }

    async fn get_title(&self, key: TitleKey) -> Result<TitleDetails, MetadataError> {
        let data = self
            .get_json(
                &format!("/{}/{}", key.kind, key.id),
                &[("append_to_response", "credits")],
            )
            .await?;

        Ok(parse_title_details(key, &data))
    }

    async fn trailer(&self, key: TitleKey) -> Result<Option<String>, MetadataError> {
        let data = self
            .get_json(&format!("/{}/{}/videos", key.kind, key.id), &[])
            .await?;
        Ok(find_trailer(&data))
    }

    async fn release_dates(&self, key: TitleKey) -> Result<Vec<ReleaseRecord>, MetadataError> {
        match key.kind {
            MediaKind::Movie => {
                let data = self
                    .get_json(&format!("/movie/{}/release_dates", key.id), &[])
                    .await?;
                Ok(parse_movie_release_dates(&data))
            }
            MediaKind::Tv => {
                let data = self
                    .get_json(
                        &format!("/tv/{}", key.id),
                        &[("append_to_response", "content_ratings")],
                    )
                    .await?;
                Ok(parse_tv_releases(&data))
            }
        }
    }

    async fn watch_providers(&self, key: TitleKey) -> Result<WatchProviders, MetadataError> {
        let data = self
            .get_json(&format!("/{}/{}/watch/providers", key.kind, key.id), &[])
            .await?;
        Ok(parse_watch_providers(&data))
    }
}

fn year_of(date: Option<NaiveDate>) -> Option<i32> {
    use chrono::Datelike;
    date.map(|d| d.year())
}

fn parse_genre_list(data: &serde_json::Value) -> GenreMap {
    data["genres"]
        .as_array()
        .map(|gs| {
            gs.iter()
                .filter_map(|g| Some((g["id"].as_u64()?, g["name"].as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// Parse the entries of a result listing. Multi-search entries carry
/// `media_type`; single-kind endpoints pass `kind` instead.
fn parse_search_results(
    data: &serde_json::Value,
    kind: Option<MediaKind>,
    genres: Option<&GenreMap>,
) -> Vec<SearchResult> {
    let results = data["results"].as_array().cloned().unwrap_or_default();

    results
        .iter()
        .filter_map(|r| {
            let kind = match kind {
                Some(k) => k,
                None => r["media_type"].as_str()?.parse().ok()?,
            };
            let id = r["id"].as_u64()?;
            let release_date = r["release_date"]
                .as_str()
                .or_else(|| r["first_air_date"].as_str())
                .and_then(parse_release_date);

            Some(SearchResult {
                key: TitleKey::new(id, kind),
                title: r["title"]
                    .as_str()
                    .or_else(|| r["name"].as_str())
                    .unwrap_or("Unknown")
                    .to_string(),
                year: year_of(release_date),
                release_date,
                overview: r["overview"].as_str().map(|s| s.to_string()),
                poster_url: r["poster_path"]
                    .as_str()
                    .map(|p| format!("{IMAGE_BASE}/w500{p}")),
                community_rating: r["vote_average"].as_f64(),
                genres: r["genre_ids"]
                    .as_array()
                    .map(|ids| {
                        ids.iter()
                            .filter_map(|id| id.as_u64())
                            .map(|id| {
                                genres
                                    .and_then(|m| m.get(&id))
                                    .map_or(UNKNOWN_GENRE, String::as_str)
                                    .to_string()
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
        })
        .collect()
}

fn parse_result_page(
    data: &serde_json::Value,
    kind: MediaKind,
    genres: Option<&GenreMap>,
) -> ResultPage {
    let page = data["page"]
        .as_u64()
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(1);
    ResultPage {
        page,
        total_pages: data["total_pages"]
            .as_u64()
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(page),
        results: parse_search_results(data, Some(kind), genres),
    }
}

fn parse_title_details(key: TitleKey, data: &serde_json::Value) -> TitleDetails {
    let (title_field, original_field, date_field) = match key.kind {
        MediaKind::Movie => ("title", "original_title", "release_date"),
        MediaKind::Tv => ("name", "original_name", "first_air_date"),
    };

    let release_date = data[date_field]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let runtime_minutes = match key.kind {
        MediaKind::Movie => data["runtime"].as_i64(),
        MediaKind::Tv => average_episode_runtime(&data["episode_run_time"]),
    }
    .map(|r| r as i32);

    // Unknown amounts come back as zero; series never carry them
    let money = |field: &str| match key.kind {
        MediaKind::Movie => data[field].as_u64().filter(|&n| n > 0),
        MediaKind::Tv => None,
    };

    // Season 0 holds specials
    let seasons = data["seasons"]
        .as_array()
        .map(|ss| {
            ss.iter()
                .filter(|s| s["season_number"].as_i64() != Some(0))
                .filter_map(|s| {
                    Some(SeasonInfo {
                        season_number: s["season_number"].as_i64()? as i32,
                        name: s["name"].as_str().unwrap_or("").to_string(),
                        episode_count: s["episode_count"].as_i64().map(|c| c as i32),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    TitleDetails {
        key,
        title: data[title_field].as_str().unwrap_or("Unknown").to_string(),
        original_title: data[original_field].as_str().map(|s| s.to_string()),
        overview: data["overview"].as_str().map(|s| s.to_string()),
        tagline: data["tagline"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string()),
        year: year_of(release_date.as_deref().and_then(parse_release_date)),
        release_date,
        runtime_minutes,
        original_language: data["original_language"]
            .as_str()
            .map(|s| s.to_uppercase()),
        community_rating: data["vote_average"].as_f64(),
        popularity: data["popularity"].as_f64(),
        budget: money("budget"),
        revenue: money("revenue"),
        genres: names_of(&data["genres"]),
        production_companies: names_of(&data["production_companies"]),
        people: extract_credits(data.get("credits")),
        seasons,
        poster_url: data["poster_path"]
            .as_str()
            .map(|p| format!("{IMAGE_BASE}/w500{p}")),
        backdrop_url: data["backdrop_path"]
            .as_str()
            .map(|p| format!("{IMAGE_BASE}/original{p}")),
    }
}

/// Rounded mean of the listed episode lengths.
fn average_episode_runtime(runs: &serde_json::Value) -> Option<i64> {
    let runs: Vec<i64> = runs.as_array()?.iter().filter_map(|v| v.as_i64()).collect();
    if runs.is_empty() {
        return None;
    }
    let mean = runs.iter().sum::<i64>() as f64 / runs.len() as f64;
    Some(mean.round() as i64)
}

fn names_of(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .map(|xs| {
            xs.iter()
                .filter_map(|x| x["name"].as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn extract_credits(credits: Option<&serde_json::Value>) -> Vec<PersonInfo> {
    let mut people = Vec::new();

    if let Some(credits) = credits {
        // Top-billed cast
        if let Some(cast) = credits["cast"].as_array() {
            for person in cast.iter().take(CAST_LIMIT) {
                people.push(PersonInfo {
                    name: person["name"].as_str().unwrap_or("").to_string(),
                    role: "Actor".to_string(),
                    character: person["character"].as_str().map(|s| s.to_string()),
                    thumb_url: person["profile_path"]
                        .as_str()
                        .map(|p| format!("{IMAGE_BASE}/w185{p}")),
                });
            }
        }

        // Crew (directors only)
        if let Some(crew) = credits["crew"].as_array() {
            for person in crew {
                if person["job"].as_str() == Some("Director") {
                    people.push(PersonInfo {
                        name: person["name"].as_str().unwrap_or("").to_string(),
                        role: "Director".to_string(),
                        character: None,
                        thumb_url: person["profile_path"]
                            .as_str()
                            .map(|p| format!("{IMAGE_BASE}/w185{p}")),
                    });
                }
            }
        }
    }

    people
}

fn find_trailer(data: &serde_json::Value) -> Option<String> {
    data["results"]
        .as_array()?
        .iter()
        .find(|v| v["type"].as_str() == Some("Trailer") && v["site"].as_str() == Some("YouTube"))
        .and_then(|v| v["key"].as_str())
        .map(|key| format!("https://www.youtube.com/embed/{key}"))
}
