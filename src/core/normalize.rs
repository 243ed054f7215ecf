//! Turns raw movie metadata into a [`MovieRecord`].
use crate::core::movie::{
    BoxOffice, HitStatus, LookupError, MovieMetadata, MovieProvider, MovieRecord, NOT_AVAILABLE,
};
use tracing::{debug, instrument};

/// Fetches `title` from the provider and normalizes the result.
#[instrument(name = "MovieLookup", skip(provider, rate), fields(title = %title))]
pub async fn lookup(
    provider: &dyn MovieProvider,
    title: &str,
    rate: Option<f64>,
) -> Result<MovieRecord, LookupError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LookupError::EmptyTitle);
    }
    let metadata = provider.fetch_movie(title).await?;
    normalize(title, metadata, rate)
}

/// Applies the regional filter and shapes the metadata into a record.
pub fn normalize(
    query: &str,
    metadata: MovieMetadata,
    rate: Option<f64>,
) -> Result<MovieRecord, LookupError> {
    if !is_regional(metadata.country.as_deref(), metadata.language.as_deref()) {
        debug!(
            country = ?metadata.country,
            language = ?metadata.language,
            "Rejecting non-regional result"
        );
        return Err(LookupError::NotRegional(
            present(metadata.title).unwrap_or_else(|| query.to_string()),
        ));
    }

    let imdb_rating = present(metadata.imdb_rating);
    let hit_status = HitStatus::from_rating(imdb_rating.as_deref());
    let box_office = convert_box_office(present(metadata.box_office), rate);

    Ok(MovieRecord {
        title: present(metadata.title).unwrap_or_else(|| query.to_string()),
        director: present(metadata.director),
        actors: split_actors(present(metadata.actors).as_deref()),
        release_date: present(metadata.released),
        imdb_rating,
        box_office,
        hit_status,
        poster_url: present(metadata.poster),
        plot: present(metadata.plot),
    })
}

/// India by country, or Hindi by language. Case-insensitive substring match.
pub fn is_regional(country: Option<&str>, language: Option<&str>) -> bool {
    let contains = |field: Option<&str>, needle: &str| {
        field.is_some_and(|value| value.to_lowercase().contains(needle))
    };
    contains(country, "india") || contains(language, "hindi")
}

/// Converts a USD figure such as `$13,000,000` to rupees.
///
/// The upstream text is kept when there is no rate or it does not parse.
pub fn convert_box_office(raw: Option<String>, rate: Option<f64>) -> BoxOffice {
    let Some(raw) = raw else {
        return BoxOffice::Unavailable;
    };
    match (parse_usd(&raw), rate) {
        (Some(usd), Some(rate)) if rate.is_finite() => BoxOffice::Converted {
            inr: (usd * rate).round_ties_even(),
        },
        _ => BoxOffice::Raw(raw),
    }
}

fn parse_usd(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn split_actors(actors: Option<&str>) -> Vec<String> {
    actors
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Drops empty and "N/A" values.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn dangal() -> MovieMetadata {
        MovieMetadata {
            title: Some("Dangal".into()),
            director: Some("Nitesh Tiwari".into()),
            actors: Some("Aamir Khan, Sakshi Tanwar, Fatima Sana Shaikh".into()),
            released: Some("21 Dec 2016".into()),
            imdb_rating: Some("8.4".into()),
            plot: Some("Former wrestler Mahavir Singh Phogat trains his daughters.".into()),
            box_office: Some("$13,000,000".into()),
            poster: Some("https://example.com/dangal.jpg".into()),
            country: Some("India".into()),
            language: Some("Hindi".into()),
        }
    }

    #[test]
    fn test_dangal_scenario() {
        let record = normalize("dangal", dangal(), Some(83.0)).unwrap();
        assert_eq!(record.title, "Dangal");
        assert_eq!(record.hit_status, HitStatus::Hit);
        assert_eq!(record.box_office.to_string(), "₹1,079,000,000");
        assert_eq!(
            record.actors,
            vec!["Aamir Khan", "Sakshi Tanwar", "Fatima Sana Shaikh"]
        );
        assert_eq!(record.imdb_rating.as_deref(), Some("8.4"));
        assert_eq!(record.release_date.as_deref(), Some("21 Dec 2016"));
    }

    #[test]
    fn test_non_regional_rejected() {
        let metadata = MovieMetadata {
            title: Some("Avatar".into()),
            country: Some("United States, United Kingdom".into()),
            language: Some("English, Spanish".into()),
            ..Default::default()
        };
        let err = normalize("Avatar", metadata, Some(83.0)).unwrap_err();
        assert!(matches!(err, LookupError::NotRegional(ref t) if t == "Avatar"));
    }

    #[test]
    fn test_regional_filter_either_field() {
        assert!(is_regional(Some("INDIA"), Some("English")));
        assert!(is_regional(Some("USA"), Some("Hindi, English")));
        assert!(is_regional(Some("United Kingdom, India"), None));
        assert!(is_regional(None, Some("hindi")));
        assert!(!is_regional(Some("USA"), Some("English")));
        assert!(!is_regional(None, None));
    }

    #[test]
    fn test_box_office_conversion() {
        assert_eq!(
            convert_box_office(Some("$1,234".into()), Some(83.5)),
            BoxOffice::Converted {
                inr: (1234.0_f64 * 83.5).round_ties_even()
            }
        );
        assert_eq!(
            convert_box_office(Some("$1,234".into()), None),
            BoxOffice::Raw("$1,234".into())
        );
        assert_eq!(
            convert_box_office(Some("about a lot".into()), Some(83.0)),
            BoxOffice::Raw("about a lot".into())
        );
        assert_eq!(convert_box_office(None, Some(83.0)), BoxOffice::Unavailable);
    }

    #[test]
    fn test_box_office_conversion_rounds_half_to_even() {
        assert_eq!(
            convert_box_office(Some("$3".into()), Some(83.5)),
            BoxOffice::Converted { inr: 250.0 }
        );
        assert_eq!(
            convert_box_office(Some("$5".into()), Some(83.5)),
            BoxOffice::Converted { inr: 418.0 }
        );
    }

    #[test]
    fn test_box_office_with_inner_whitespace_stays_raw() {
        assert_eq!(
            convert_box_office(Some(" $1 234 ".into()), Some(83.0)),
            BoxOffice::Raw(" $1 234 ".into())
        );
        assert_eq!(
            convert_box_office(Some(" $1,000 ".into()), Some(83.0)),
            BoxOffice::Converted { inr: 83_000.0 }
        );
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let metadata = MovieMetadata {
            title: Some("Sholay".into()),
            director: Some("N/A".into()),
            actors: Some("N/A".into()),
            imdb_rating: Some("N/A".into()),
            box_office: Some("N/A".into()),
            poster: Some("N/A".into()),
            country: Some("India".into()),
            ..Default::default()
        };
        let record = normalize("Sholay", metadata, Some(83.0)).unwrap();
        assert!(record.director.is_none());
        assert!(record.actors.is_empty());
        assert!(record.poster_url.is_none());
        assert!(record.plot.is_none());
        assert_eq!(record.box_office, BoxOffice::Unavailable);
        assert_eq!(record.hit_status, HitStatus::RatingUnavailable);
    }

    #[test]
    fn test_title_falls_back_to_query() {
        let metadata = MovieMetadata {
            language: Some("Hindi".into()),
            ..Default::default()
        };
        let record = normalize("Lagaan", metadata, None).unwrap();
        assert_eq!(record.title, "Lagaan");
    }

    struct FixedProvider(MovieMetadata);

    #[async_trait]
    impl MovieProvider for FixedProvider {
        async fn fetch_movie(&self, _title: &str) -> Result<MovieMetadata, LookupError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_lookup_rejects_blank_title() {
        let provider = FixedProvider(dangal());
        let result = lookup(&provider, "   ", Some(83.0)).await;
        assert!(matches!(result, Err(LookupError::EmptyTitle)));
    }

    #[tokio::test]
    async fn test_lookup_without_rate_keeps_raw_box_office() {
        let provider = FixedProvider(dangal());
        let record = lookup(&provider, "Dangal", None).await.unwrap();
        assert_eq!(record.box_office, BoxOffice::Raw("$13,000,000".into()));
        assert_eq!(record.hit_status, HitStatus::Hit);
    }
}
