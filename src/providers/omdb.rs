use crate::core::movie::{LookupError, MovieMetadata, MovieProvider};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

pub struct OmdbProvider {
    base_url: String,
    api_key: Option<String>,
}

impl OmdbProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        OmdbProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: String,
    error: Option<String>,
    title: Option<String>,
    director: Option<String>,
    actors: Option<String>,
    released: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    plot: Option<String>,
    box_office: Option<String>,
    poster: Option<String>,
    country: Option<String>,
    language: Option<String>,
}

impl From<OmdbResponse> for MovieMetadata {
    fn from(response: OmdbResponse) -> Self {
        MovieMetadata {
            title: response.title,
            director: response.director,
            actors: response.actors,
            released: response.released,
            imdb_rating: response.imdb_rating,
            plot: response.plot,
            box_office: response.box_office,
            poster: response.poster,
            country: response.country,
            language: response.language,
        }
    }
}

#[async_trait]
impl MovieProvider for OmdbProvider {
    #[instrument(name = "OmdbFetch", skip(self), fields(title = %title))]
    async fn fetch_movie(&self, title: &str) -> Result<MovieMetadata, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::MissingApiKey)?;

        let encoded_title = urlencoding::encode(title);
        debug!(
            "Requesting movie data from {}/?t={}&apikey=***&plot=full",
            self.base_url, encoded_title
        );
        let url = format!(
            "{}/?t={}&apikey={}&plot=full",
            self.base_url,
            encoded_title,
            urlencoding::encode(api_key)
        );

        let client = reqwest::Client::builder()
            .user_agent("bollyinfo/1.0")
            .build()?;
        // Request URLs carry the API key, so errors are stripped of them
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        debug!(status = %response.status(), "Received OMDb response");

        // OMDb answers bad keys with 401 and a JSON body; anything else non-2xx is opaque
        let status = response.status();
        if !status.is_success() && status != reqwest::StatusCode::UNAUTHORIZED {
            return Err(LookupError::Http(status));
        }

        let text = response.text().await.map_err(reqwest::Error::without_url)?;
        let data: OmdbResponse = serde_json::from_str(&text)?;

        if data.response != "True" {
            let message = data.error.unwrap_or_default();
            if message.is_empty() || message.to_lowercase().contains("not found") {
                return Err(LookupError::NotFound(title.to_string()));
            }
            return Err(LookupError::Rejected(message));
        }

        Ok(data.into())
    }
}
