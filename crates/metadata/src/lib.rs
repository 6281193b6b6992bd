pub mod provider;
pub mod releases;
pub mod tmdb;

use marquee_core::types::TitleKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// Everything the title-detail view renders about a movie or series.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TitleDetails {
    pub key: TitleKey,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub year: Option<i32>,
    pub release_date: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub original_language: Option<String>,
    pub community_rating: Option<f64>,
    pub popularity: Option<f64>,
    /// Movies only. TMDB reports unknown amounts as zero.
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub genres: Vec<String>,
    pub production_companies: Vec<String>,
    pub people: Vec<PersonInfo>,
    pub seasons: Vec<SeasonInfo>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PersonInfo {
    pub name: String,
    pub role: String, // "Actor", "Director"
    pub character: Option<String>,
    pub thumb_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeasonInfo {
    pub season_number: i32,
    pub name: String,
    pub episode_count: Option<i32>,
}
