use chrono::NaiveDate;
use marquee_core::release::{
    ClassificationResult, NO_CERTIFICATION, ReleaseLabel, ReleaseRecord, ReleaseType,
    WatchProviders,
};

pub const DEFAULT_HOME_COUNTRY: &str = "US";

/// Label a title from its release records and watch providers as of `now`.
///
/// Precedence, first match wins:
/// 1. Cam: in theaters, with no streaming and no home release yet.
/// 2. HD: streaming somewhere, or a home release has happened.
/// 3. Not Released Yet: some release is still in the future.
/// 4. Rental/Buy Available: rentable or purchasable somewhere.
/// 5. Unknown Quality.
pub fn classify(
    releases: &[ReleaseRecord],
    watch_providers: &WatchProviders,
    now: NaiveDate,
    home_country: &str,
) -> ClassificationResult {
    let released = |r: &&ReleaseRecord| r.release_date <= now;

    let theatrical_now = releases
        .iter()
        .filter(released)
        .any(|r| r.release_type == ReleaseType::Theatrical);
    let home_release_now = releases
        .iter()
        .filter(released)
        .any(|r| r.release_type.is_home_release());
    let streaming = watch_providers.values().any(|l| !l.flatrate.is_empty());
    let future_release = releases.iter().any(|r| r.release_date > now);
    let rent_or_buy = watch_providers.values().any(|l| l.has_rent_or_buy());

    let release_type = if theatrical_now && !streaming && !home_release_now {
        ReleaseLabel::Cam
    } else if streaming || home_release_now {
        ReleaseLabel::Hd
    } else if future_release && !theatrical_now {
        ReleaseLabel::NotReleasedYet
    } else if rent_or_buy {
        ReleaseLabel::RentalBuyAvailable
    } else {
        ReleaseLabel::UnknownQuality
    };

    ClassificationResult {
        release_type,
        certification: Some(certification_for(releases, home_country)),
    }
}

fn certification_for(releases: &[ReleaseRecord], home_country: &str) -> String {
    releases
        .iter()
        .filter(|r| r.country_code.eq_ignore_ascii_case(home_country))
        .find_map(|r| r.certification.as_deref().filter(|c| !c.is_empty()))
        .unwrap_or(NO_CERTIFICATION)
        .to_string()
}

#[cfg(test)]
mod tests {
    use marquee_core::release::{Provider, WatchProviderListing};

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn release(ty: ReleaseType, d: &str) -> ReleaseRecord {
        ReleaseRecord {
            country_code: "US".into(),
            release_type: ty,
            release_date: date(d),
            certification: None,
        }
    }

    fn listing(flatrate: &[&str], rent: &[&str], buy: &[&str]) -> WatchProviders {
        let names = |xs: &[&str]| xs.iter().map(|n| Provider::named(*n)).collect::<Vec<_>>();
        WatchProviders::from([(
            "US".to_string(),
            WatchProviderListing {
                country_code: "US".into(),
                flatrate: names(flatrate),
                rent: names(rent),
                buy: names(buy),
            },
        )])
    }

    fn label(releases: &[ReleaseRecord], providers: &WatchProviders) -> ReleaseLabel {
        classify(releases, providers, date("2024-06-01"), DEFAULT_HOME_COUNTRY).release_type
    }

    #[test]
    fn theatrical_only_is_cam() {
        let releases = [release(ReleaseType::Theatrical, "2024-01-01")];
        assert_eq!(label(&releases, &WatchProviders::new()), ReleaseLabel::Cam);
    }

    #[test]
    fn streaming_wins_over_theatrical() {
        let releases = [release(ReleaseType::Theatrical, "2024-01-01")];
        let providers = listing(&["Netflix"], &[], &[]);
        assert_eq!(label(&releases, &providers), ReleaseLabel::Hd);
    }

    #[test]
    fn future_theatrical_is_not_released_yet() {
        let releases = [release(ReleaseType::Theatrical, "2099-01-01")];
        assert_eq!(
            label(&releases, &WatchProviders::new()),
            ReleaseLabel::NotReleasedYet
        );
    }

    #[test]
    fn rent_only_is_rental_buy_available() {
        let providers = listing(&[], &["Amazon"], &[]);
        assert_eq!(label(&[], &providers), ReleaseLabel::RentalBuyAvailable);

        let providers = listing(&[], &[], &["Apple TV"]);
        assert_eq!(label(&[], &providers), ReleaseLabel::RentalBuyAvailable);
    }

    #[test]
    fn no_inputs_is_unknown_quality() {
        let result = classify(&[], &WatchProviders::new(), date("2024-06-01"), "US");
        assert_eq!(result.release_type, ReleaseLabel::UnknownQuality);
        assert_eq!(result.certification.as_deref(), Some(NO_CERTIFICATION));
    }

    #[test]
    fn past_home_release_is_hd() {
        for ty in [ReleaseType::Digital, ReleaseType::Physical, ReleaseType::Tv] {
            let releases = [
                release(ReleaseType::Theatrical, "2024-01-01"),
                release(ty, "2024-03-01"),
            ];
            assert_eq!(label(&releases, &WatchProviders::new()), ReleaseLabel::Hd);
        }
    }

    #[test]
    fn theatrical_now_with_future_digital_is_still_cam() {
        let releases = [
            release(ReleaseType::Theatrical, "2024-05-01"),
            release(ReleaseType::Digital, "2024-08-01"),
        ];
        assert_eq!(label(&releases, &WatchProviders::new()), ReleaseLabel::Cam);
    }

    #[test]
    fn cam_beats_rental() {
        let releases = [release(ReleaseType::Theatrical, "2024-05-01")];
        let providers = listing(&[], &["Amazon"], &["Amazon"]);
        assert_eq!(label(&releases, &providers), ReleaseLabel::Cam);
    }

    #[test]
    fn release_on_the_current_day_counts_as_released() {
        let releases = [release(ReleaseType::Theatrical, "2024-06-01")];
        assert_eq!(label(&releases, &WatchProviders::new()), ReleaseLabel::Cam);
    }

    #[test]
    fn past_premiere_alone_falls_through_to_rental() {
        let releases = [release(ReleaseType::Premiere, "2024-02-01")];
        let providers = listing(&[], &["Amazon"], &[]);
        assert_eq!(
            label(&releases, &providers),
            ReleaseLabel::RentalBuyAvailable
        );
        assert_eq!(
            label(&releases, &WatchProviders::new()),
            ReleaseLabel::UnknownQuality
        );
    }

    #[test]
    fn empty_provider_lists_are_ignored() {
        let providers = listing(&[], &[], &[]);
        assert_eq!(label(&[], &providers), ReleaseLabel::UnknownQuality);
    }

    #[test]
    fn certification_comes_from_home_country() {
        let mut gb = release(ReleaseType::Theatrical, "2024-01-01");
        gb.country_code = "GB".into();
        gb.certification = Some("12A".into());
        let mut us_blank = release(ReleaseType::Premiere, "2023-12-01");
        us_blank.certification = Some(String::new());
        let mut us = release(ReleaseType::Theatrical, "2024-01-01");
        us.certification = Some("PG-13".into());
        let releases = [gb, us_blank, us];

        let now = date("2024-06-01");
        let providers = WatchProviders::new();
        assert_eq!(
            classify(&releases, &providers, now, "US").certification.as_deref(),
            Some("PG-13")
        );
        assert_eq!(
            classify(&releases, &providers, now, "gb").certification.as_deref(),
            Some("12A")
        );
        assert_eq!(
            classify(&releases, &providers, now, "FR").certification.as_deref(),
            Some(NO_CERTIFICATION)
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let releases = [
            release(ReleaseType::Theatrical, "2024-01-01"),
            release(ReleaseType::Digital, "2099-01-01"),
        ];
        let providers = listing(&[], &["Amazon"], &[]);
        let now = date("2024-06-01");
        let first = classify(&releases, &providers, now, "US");
        for _ in 0..10 {
            assert_eq!(classify(&releases, &providers, now, "US"), first);
        }
    }
}
