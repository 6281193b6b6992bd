//! Boundary parsing for release dates and watch providers.
//!
//! TMDB payloads are loosely shaped; missing lists become empty, records
//! without a usable date or with an unknown type code are dropped.

use chrono::{DateTime, NaiveDate};
use marquee_core::release::{
    Provider, ReleaseRecord, ReleaseType, WatchProviderListing, WatchProviders,
};
use serde_json::Value;
use tracing::debug;

/// Parse a TMDB date (`2024-01-01T00:00:00.000Z` or `2024-01-01`) as a UTC calendar date.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.to_utc().date_naive());
    }
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

fn non_empty(v: &Value) -> Option<String> {
    v.as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a `/movie/{id}/release_dates` response.
pub fn parse_movie_release_dates(data: &Value) -> Vec<ReleaseRecord> {
    let mut records = Vec::new();

    for group in data["results"].as_array().into_iter().flatten() {
        let Some(country) = non_empty(&group["iso_3166_1"]) else {
            continue;
        };

        for entry in group["release_dates"].as_array().into_iter().flatten() {
            let Some(release_type) = entry["type"].as_u64().and_then(ReleaseType::from_code) else {
                debug!(country = %country, kind = %entry["type"], "skipping unknown release type");
                continue;
            };
            let Some(release_date) = entry["release_date"].as_str().and_then(parse_release_date)
            else {
                debug!(country = %country, "skipping release without date");
                continue;
            };

            records.push(ReleaseRecord {
                country_code: country.clone(),
                release_type,
                release_date,
                certification: non_empty(&entry["certification"]),
            });
        }
    }

    records
}

/// Parse a `/tv/{id}?append_to_response=content_ratings` response.
///
/// Series carry no per-country release dates, so every rated country gets a
/// TV release dated at the first air date. Unrated series fall back to their
/// origin countries.
pub fn parse_tv_releases(data: &Value) -> Vec<ReleaseRecord> {
    let Some(first_air) = data["first_air_date"].as_str().and_then(parse_release_date) else {
        return Vec::new();
    };

    let ratings: Vec<(String, Option<String>)> = data["content_ratings"]["results"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|r| Some((non_empty(&r["iso_3166_1"])?, non_empty(&r["rating"]))))
        .collect();

    let countries = if ratings.is_empty() {
        data["origin_country"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(non_empty)
            .map(|c| (c, None))
            .collect()
    } else {
        ratings
    };

    countries
        .into_iter()
        .map(|(country_code, certification)| ReleaseRecord {
            country_code,
            release_type: ReleaseType::Tv,
            release_date: first_air,
            certification,
        })
        .collect()
}

fn parse_providers(list: &Value) -> Vec<Provider> {
    list.as_array()
        .into_iter()
        .flatten()
        .filter_map(|p| {
            Some(Provider {
                provider_id: p["provider_id"].as_u64(),
                name: non_empty(&p["provider_name"])?,
                logo_path: non_empty(&p["logo_path"]),
            })
        })
        .collect()
}

/// Parse a `/{kind}/{id}/watch/providers` response.
pub fn parse_watch_providers(data: &Value) -> WatchProviders {
    let mut out = WatchProviders::new();

    if let Some(results) = data["results"].as_object() {
        for (country, listing) in results {
            out.insert(
                country.clone(),
                WatchProviderListing {
                    country_code: country.clone(),
                    flatrate: parse_providers(&listing["flatrate"]),
                    rent: parse_providers(&listing["rent"]),
                    buy: parse_providers(&listing["buy"]),
                },
            );
        }
    }

    out
}
