//! Typed release-date and watch-provider model.
//!
//! Upstream JSON is validated into these types once, at the metadata
//! boundary; everything downstream works on non-optional fields.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Certification reported when the home country has none.
pub const NO_CERTIFICATION: &str = "No Certification Available";

/// TMDB release type, keyed by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseType {
    Premiere,
    TheatricalLimited,
    Theatrical,
    Digital,
    Physical,
    Tv,
}

impl ReleaseType {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Premiere),
            2 => Some(Self::TheatricalLimited),
            3 => Some(Self::Theatrical),
            4 => Some(Self::Digital),
            5 => Some(Self::Physical),
            6 => Some(Self::Tv),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Premiere => 1,
            Self::TheatricalLimited => 2,
            Self::Theatrical => 3,
            Self::Digital => 4,
            Self::Physical => 5,
            Self::Tv => 6,
        }
    }

    /// Releases that put a clean copy in viewers' hands.
    pub fn is_home_release(self) -> bool {
        matches!(self, Self::Digital | Self::Physical | Self::Tv)
    }
}

/// One dated release event for a title in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub country_code: String,
    pub release_type: ReleaseType,
    pub release_date: NaiveDate,
    pub certification: Option<String>,
}

/// A streaming, rental or purchase service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: Option<u64>,
    pub name: String,
    pub logo_path: Option<String>,
}

impl Provider {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            provider_id: None,
            name: name.into(),
            logo_path: None,
        }
    }
}

/// Per-country snapshot of where a title can be watched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProviderListing {
    pub country_code: String,
    pub flatrate: Vec<Provider>,
    pub rent: Vec<Provider>,
    pub buy: Vec<Provider>,
}

impl WatchProviderListing {
    pub fn has_rent_or_buy(&self) -> bool {
        !self.rent.is_empty() || !self.buy.is_empty()
    }
}

/// Watch-provider listings keyed by ISO 3166-1 country code.
pub type WatchProviders = BTreeMap<String, WatchProviderListing>;

/// Availability label shown next to a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseLabel {
    #[serde(rename = "Cam")]
    Cam,
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "Not Released Yet")]
    NotReleasedYet,
    #[serde(rename = "Rental/Buy Available")]
    RentalBuyAvailable,
    #[serde(rename = "Unknown Quality")]
    UnknownQuality,
}

impl ReleaseLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cam => "Cam",
            Self::Hd => "HD",
            Self::NotReleasedYet => "Not Released Yet",
            Self::RentalBuyAvailable => "Rental/Buy Available",
            Self::UnknownQuality => "Unknown Quality",
        }
    }
}

impl std::fmt::Display for ReleaseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one title.
///
/// `certification` is `None` only when the inputs could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub release_type: ReleaseLabel,
    pub certification: Option<String>,
}

impl ClassificationResult {
    /// Neutral result used when release data could not be fetched.
    pub fn unavailable() -> Self {
        Self {
            release_type: ReleaseLabel::UnknownQuality,
            certification: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_type_codes_round_trip() {
        for code in 1..=6 {
            let ty = ReleaseType::from_code(code).unwrap();
            assert_eq!(u64::from(ty.code()), code);
        }
        assert_eq!(ReleaseType::from_code(0), None);
        assert_eq!(ReleaseType::from_code(7), None);
    }

    #[test]
    fn home_release_types() {
        assert!(ReleaseType::Digital.is_home_release());
        assert!(ReleaseType::Physical.is_home_release());
        assert!(ReleaseType::Tv.is_home_release());
        assert!(!ReleaseType::Theatrical.is_home_release());
        assert!(!ReleaseType::Premiere.is_home_release());
    }

    #[test]
    fn labels_serialize_as_display_strings() {
        let result = ClassificationResult {
            release_type: ReleaseLabel::RentalBuyAvailable,
            certification: Some("PG-13".into()),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["release_type"], "Rental/Buy Available");
        assert_eq!(json["certification"], "PG-13");

        let json = serde_json::to_value(ClassificationResult::unavailable()).unwrap();
        assert_eq!(json["release_type"], "Unknown Quality");
        assert!(json["certification"].is_null());
    }
}
