//! omdb_client - Blocking client for the OMDb movie metadata API
//!
//! This library builds OMDb requests, sends them through a pluggable
//! transport, classifies the loosely-typed JSON answer and turns successful
//! single-title lookups into strongly typed `Movie` records.

mod classifier;
mod config;
mod movie;
mod query;
mod record;
mod transport;

pub use classifier::{ApiFailure, ClassifiedResponse, Payload, classify};
pub use config::{ConfigError, OmdbConfig};
pub use movie::Movie;
pub use query::{Operation, QueryIntent, ResponseFormat, TitleType, build_params, build_uri};
pub use record::{NOT_AVAILABLE, RecordError, build_movie};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};

use thiserror::Error;
use tracing::debug;

/// Top-level error type for OMDb operations
#[derive(Debug, Error)]
pub enum OmdbError {
    /// The API answered with an error or an unusable payload
    #[error(transparent)]
    Api(#[from] ApiFailure),

    /// A successful payload could not be turned into a movie record
    #[error("Invalid movie record: {0}")]
    Record(#[from] RecordError),

    /// The request could not be performed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The configured host does not form a valid request URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Client for the OMDb API.
///
/// Each call sends exactly one request and blocks until the transport
/// returns. The client holds no state besides its configuration, so calls
/// are independent of each other.
///
/// # Examples
///
/// ```no_run
/// use omdb_client::{OmdbClient, OmdbConfig, TitleType};
///
/// let client = OmdbClient::new(OmdbConfig::new("your-api-key"));
///
/// let movie = client.lookup_by_id("tt0241527").unwrap();
/// println!("{} ({}) - {}/10", movie.title(), movie.year(), movie.imdb_rating());
///
/// let results = client
///     .search("Harry Potter", Some(TitleType::Movie), None, None)
///     .unwrap();
/// println!("{} results", results["totalResults"]);
/// ```
pub struct OmdbClient<T = HttpTransport>
where
    T: Transport,
{
    config: OmdbConfig,
    transport: T,
}

impl OmdbClient<HttpTransport> {
    /// Creates a client that talks to the API over HTTP.
    pub fn new(config: OmdbConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }

    /// Creates an HTTP client configured from the environment.
    ///
    /// See `OmdbConfig::from_env` for the variables read.
    pub fn from_env() -> Result<Self, OmdbError> {
        Ok(Self::new(OmdbConfig::from_env()?))
    }
}

impl<T> OmdbClient<T>
where
    T: Transport,
{
    /// Creates a client using the given transport.
    pub fn with_transport(config: OmdbConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &OmdbConfig {
        &self.config
    }

    /// Looks up a single title by IMDb ID.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::Api` with the classified failure if the API
    /// rejects the request, and `OmdbError::Record` if the payload lacks a
    /// mandatory field.
    pub fn lookup_by_id(&self, imdb_id: &str) -> Result<Movie, OmdbError> {
        let payload = self.fetch(&QueryIntent::by_id(imdb_id))?;
        Ok(build_movie(&payload)?)
    }

    /// Looks up a single title by its title, optionally restricted by type
    /// and release year.
    pub fn lookup_by_title(
        &self,
        title: &str,
        title_type: Option<TitleType>,
        year: Option<i32>,
    ) -> Result<Movie, OmdbError> {
        let intent = QueryIntent::by_title(title)
            .with_type(title_type)
            .with_year(year);

        let payload = self.fetch(&intent)?;
        Ok(build_movie(&payload)?)
    }

    /// Searches titles.
    ///
    /// The decoded search payload (`Search`, `totalResults`, `Response`) is
    /// returned as is. Without an explicit page the first page is requested.
    pub fn search(
        &self,
        title: &str,
        title_type: Option<TitleType>,
        year: Option<i32>,
        page: Option<i32>,
    ) -> Result<Payload, OmdbError> {
        let mut intent = QueryIntent::search(title)
            .with_type(title_type)
            .with_year(year);
        if page.is_some() {
            intent = intent.with_page(page);
        }

        self.fetch(&intent)
    }

    /// Sends one request for `intent` and classifies the answer.
    fn fetch(&self, intent: &QueryIntent) -> Result<Payload, OmdbError> {
        let url = build_uri(&self.config, intent).map_err(OmdbError::InvalidUrl)?;

        debug!(
            operation = intent.operation.key(),
            value = %intent.value,
            host = %self.config.host(),
            "Sending OMDb request"
        );

        let raw = self.transport.execute(&url)?;
        debug!(status = raw.status, bytes = raw.body.len(), "Received OMDb response");

        Ok(classify(raw, &intent.value, self.config.api_key())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use reqwest::Url;

    const MOVIE: &str = include_str!("../tests/fixtures/movie.json");
    const SEARCH: &str = include_str!("../tests/fixtures/search.json");
    const NOT_FOUND: &str = include_str!("../tests/fixtures/not_found.json");

    fn query_pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn client_answering(
        expected_query: Vec<(String, String)>,
        body: &'static str,
        status: u16,
    ) -> OmdbClient<MockTransport> {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(move |url| query_pairs(url) == expected_query)
            .times(1)
            .returning(move |_| Ok(RawResponse::new(body, status)));

        OmdbClient::with_transport(OmdbConfig::new("testapikey"), transport)
    }

    #[test]
    fn test_lookup_by_id() {
        let client = client_answering(
            pairs(&[
                ("i", "tt0241527"),
                ("v", "1"),
                ("r", "json"),
                ("apikey", "testapikey"),
            ]),
            MOVIE,
            200,
        );

        let movie = client.lookup_by_id("tt0241527").unwrap();
        assert_eq!(movie.imdb_id(), "tt0241527");
        assert_eq!(movie.rotten_tomatoes_rating(), 81);
    }

    #[test]
    fn test_lookup_by_title_with_refinements() {
        let client = client_answering(
            pairs(&[
                ("t", "Harry Potter and the Sorcerer's Stone"),
                ("type", "movie"),
                ("y", "2001"),
                ("v", "1"),
                ("r", "json"),
                ("apikey", "testapikey"),
            ]),
            MOVIE,
            200,
        );

        let movie = client
            .lookup_by_title(
                "Harry Potter and the Sorcerer's Stone",
                Some(TitleType::Movie),
                Some(2001),
            )
            .unwrap();
        assert_eq!(movie.year(), "2001");
    }

    #[test]
    fn test_search_returns_raw_collection() {
        let client = client_answering(
            pairs(&[
                ("s", "Harry Potter"),
                ("page", "1"),
                ("v", "1"),
                ("r", "json"),
                ("apikey", "testapikey"),
            ]),
            SEARCH,
            200,
        );

        let results = client.search("Harry Potter", None, None, None).unwrap();
        let expected: serde_json::Value = serde_json::from_str(SEARCH).unwrap();
        assert_eq!(serde_json::Value::Object(results), expected);
    }

    #[test]
    fn test_search_with_page() {
        let client = client_answering(
            pairs(&[
                ("s", "Harry Potter"),
                ("type", "series"),
                ("page", "3"),
                ("v", "1"),
                ("r", "json"),
                ("apikey", "testapikey"),
            ]),
            SEARCH,
            200,
        );

        assert!(
            client
                .search("Harry Potter", Some(TitleType::Series), None, Some(3))
                .is_ok()
        );
    }

    #[test]
    fn test_not_found_is_surfaced() {
        let client = client_answering(
            pairs(&[
                ("t", "Nonexistent Movie"),
                ("v", "1"),
                ("r", "json"),
                ("apikey", "testapikey"),
            ]),
            NOT_FOUND,
            200,
        );

        let err = client
            .lookup_by_title("Nonexistent Movie", None, None)
            .unwrap_err();
        assert!(matches!(
            err,
            OmdbError::Api(ApiFailure::MovieNotFound { ref value, status: 200 })
                if value == "Nonexistent Movie"
        ));
        assert_eq!(err.to_string(), "Could not find movie \"Nonexistent Movie\"");
    }

    #[test]
    fn test_missing_mandatory_field_is_surfaced() {
        let mut transport = MockTransport::new();
        transport.expect_execute().returning(|_| {
            Ok(RawResponse::new(
                r#"{"Title":"Incomplete","Response":"True"}"#,
                200,
            ))
        });
        let client = OmdbClient::with_transport(OmdbConfig::new("key"), transport);

        assert!(matches!(
            client.lookup_by_id("tt0000001"),
            Err(OmdbError::Record(RecordError::MissingField("imdbID")))
        ));
    }

    #[test]
    fn test_transport_error_is_surfaced() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(|_| Err(TransportError::Request("connection refused".to_string())));
        let client = OmdbClient::with_transport(OmdbConfig::new("key"), transport);

        assert!(matches!(
            client.lookup_by_id("tt0241527"),
            Err(OmdbError::Transport(TransportError::Request(_)))
        ));
    }

    #[test]
    fn test_config_error_is_surfaced() {
        let err = OmdbError::from(ConfigError::MissingApiKey("OMDB_API_KEY"));
        assert!(matches!(
            err,
            OmdbError::Config(ConfigError::MissingApiKey("OMDB_API_KEY"))
        ));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing API key: set the OMDB_API_KEY environment variable"
        );
    }

    #[test]
    fn test_invalid_host_never_reaches_transport() {
        let mut transport = MockTransport::new();
        transport.expect_execute().never();
        let config = OmdbConfig::new("key").with_host("not a host");
        let client = OmdbClient::with_transport(config, transport);

        assert!(matches!(
            client.lookup_by_id("tt0241527"),
            Err(OmdbError::InvalidUrl(_))
        ));
    }
}
