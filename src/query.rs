//! Query building
//!
//! Turns a query intent (lookup by IMDb ID, lookup by title, search) into the
//! ordered parameter list the OMDb API expects and assembles the request URL.
//! Parameter order is part of the wire format: operation key first, then the
//! optional refinements, then the fixed version, format and key suffix.

use crate::config::OmdbConfig;
use reqwest::Url;
use std::fmt;

/// The three operations supported by the API, keyed by their single-letter
/// discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Lookup by IMDb ID (`i`)
    ById,
    /// Lookup by exact title (`t`)
    ByTitle,
    /// Search by title (`s`)
    Search,
}

impl Operation {
    /// The query parameter name selecting this operation
    pub fn key(self) -> &'static str {
        match self {
            Operation::ById => "i",
            Operation::ByTitle => "t",
            Operation::Search => "s",
        }
    }
}

/// Type of title to restrict a lookup or search to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleType {
    Movie,
    Series,
    Episode,
}

impl TitleType {
    pub fn as_str(self) -> &'static str {
        match self {
            TitleType::Movie => "movie",
            TitleType::Series => "series",
            TitleType::Episode => "episode",
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response format requested through the `r` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Xml,
}

impl ResponseFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
        }
    }
}

/// Describes a single request: which operation, the query term and the
/// optional refinements.
///
/// Year and page are passed through as given. A year or page that is not
/// positive is left out of the request rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryIntent {
    pub operation: Operation,
    pub value: String,
    pub title_type: Option<TitleType>,
    pub year: Option<i32>,
    pub page: Option<i32>,
}

impl QueryIntent {
    /// Lookup of a single title by IMDb ID (e.g. `tt0241527`)
    pub fn by_id(imdb_id: impl Into<String>) -> Self {
        Self::new(Operation::ById, imdb_id.into())
    }

    /// Lookup of a single title by its exact title
    pub fn by_title(title: impl Into<String>) -> Self {
        Self::new(Operation::ByTitle, title.into())
    }

    /// Search by title, starting at the first page
    pub fn search(title: impl Into<String>) -> Self {
        Self {
            page: Some(1),
            ..Self::new(Operation::Search, title.into())
        }
    }

    fn new(operation: Operation, value: String) -> Self {
        Self {
            operation,
            value,
            title_type: None,
            year: None,
            page: None,
        }
    }

    pub fn with_type(mut self, title_type: Option<TitleType>) -> Self {
        self.title_type = title_type;
        self
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_page(mut self, page: Option<i32>) -> Self {
        self.page = page;
        self
    }
}

/// Builds the ordered parameter list for a query.
///
/// Order: operation key, `type`, `y`, `page` (each only when set and
/// positive), then `v`, `r` and `apikey`.
pub fn build_params(config: &OmdbConfig, intent: &QueryIntent) -> Vec<(&'static str, String)> {
    let mut params = vec![(intent.operation.key(), intent.value.clone())];

    if let Some(title_type) = intent.title_type {
        params.push(("type", title_type.as_str().to_string()));
    }
    if let Some(year) = intent.year.filter(|y| *y > 0) {
        params.push(("y", year.to_string()));
    }
    if let Some(page) = intent.page.filter(|p| *p > 0) {
        params.push(("page", page.to_string()));
    }

    params.push(("v", config.version().to_string()));
    params.push(("r", config.format().as_str().to_string()));
    params.push(("apikey", config.api_key().to_string()));

    params
}

/// Builds the full, form-urlencoded request URL for a query.
///
/// Fails only if the configured host is not a valid base URL.
pub fn build_uri(config: &OmdbConfig, intent: &QueryIntent) -> Result<Url, String> {
    let base = format!("{}/", config.host().trim_end_matches('/'));
    let params = build_params(config, intent);

    Url::parse_with_params(&base, &params).map_err(|e| format!("{}: {}", config.host(), e))
}
