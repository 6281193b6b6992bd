use chrono::NaiveDate;
use marquee_core::release::{ReleaseRecord, WatchProviders};
use marquee_core::types::{MediaKind, TitleKey};

use crate::{MetadataError, TitleDetails};

/// A metadata source for discovery, detail pages and availability inputs.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Search movies and TV series by free text. People are never returned.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MetadataError>;

    /// Movies the provider lists as upcoming.
    async fn upcoming(&self) -> Result<Vec<SearchResult>, MetadataError>;

    /// Titles of one kind trending this week. `page` is 1-based.
    async fn trending(&self, kind: MediaKind, page: u32) -> Result<ResultPage, MetadataError>;

    /// Full details for a title, including credits.
    async fn get_title(&self, key: TitleKey) -> Result<TitleDetails, MetadataError>;

    /// Embeddable trailer URL, if the title has one.
    async fn trailer(&self, key: TitleKey) -> Result<Option<String>, MetadataError>;

    /// Release records across all countries.
    async fn release_dates(&self, key: TitleKey) -> Result<Vec<ReleaseRecord>, MetadataError>;

    /// Watch-provider listings keyed by country code.
    async fn watch_providers(&self, key: TitleKey) -> Result<WatchProviders, MetadataError>;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResult {
    pub key: TitleKey,
    pub title: String,
    pub year: Option<i32>,
    pub release_date: Option<NaiveDate>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub community_rating: Option<f64>,
    /// Genre names in provider order. Unmapped IDs read "Unknown".
    #[serde(default)]
    pub genres: Vec<String>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResultPage {
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<SearchResult>,
}

impl ResultPage {
    /// Order results by community rating, highest first. Unrated titles sink.
    pub fn sort_by_rating(&mut self) {
        let rating = |r: &SearchResult| r.community_rating.unwrap_or(0.0);
        self.results.sort_by(|a, b| rating(b).total_cmp(&rating(a)));
    }
}
