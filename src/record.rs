//! Movie record construction
//!
//! Converts a successful single-title payload into a `Movie`. Which fields
//! must be present and which fall back to `"N/A"` is decided by one policy
//! table, so adding or dropping an optional field is a one-line change.

use crate::classifier::Payload;
use crate::movie::Movie;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Sentinel the API uses for "not available"
pub const NOT_AVAILABLE: &str = "N/A";

/// Source name of the Rotten Tomatoes entry in the `Ratings` list
pub(crate) const ROTTEN_TOMATOES: &str = "Rotten Tomatoes";

/// Delimiter of list-valued fields such as `Genre` or `Actors`
const LIST_DELIMITER: &str = ", ";

/// Errors that can occur while building a movie record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A mandatory field is absent from the payload
    #[error("Missing mandatory field \"{0}\" in API response")]
    MissingField(&'static str),

    /// A field is present but does not have the expected JSON type
    #[error("Field \"{field}\" in API response is not a {expected}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
    },
}

/// How a payload field is treated when it is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldPolicy {
    /// Absence is a construction error
    Mandatory,
    /// Absence yields the given value
    OrDefault(&'static str),
}

use FieldPolicy::{Mandatory, OrDefault};

/// Text fields read from the payload. Keys not listed here are mandatory.
const FIELD_POLICIES: &[(&str, FieldPolicy)] = &[
    ("imdbID", Mandatory),
    ("Title", Mandatory),
    ("Year", Mandatory),
    ("Rated", Mandatory),
    ("Released", Mandatory),
    ("Runtime", Mandatory),
    ("Genre", Mandatory),
    ("Director", Mandatory),
    ("Writer", Mandatory),
    ("Actors", Mandatory),
    ("Plot", Mandatory),
    ("Language", Mandatory),
    ("Country", Mandatory),
    ("Awards", Mandatory),
    ("Poster", Mandatory),
    ("Type", Mandatory),
    ("Metascore", Mandatory),
    ("imdbRating", Mandatory),
    ("imdbVotes", Mandatory),
    ("DVD", OrDefault(NOT_AVAILABLE)),
    ("BoxOffice", OrDefault(NOT_AVAILABLE)),
    ("Production", OrDefault(NOT_AVAILABLE)),
    ("Website", OrDefault(NOT_AVAILABLE)),
    ("totalSeasons", OrDefault(NOT_AVAILABLE)),
    ("seriesID", OrDefault(NOT_AVAILABLE)),
    ("Season", OrDefault(NOT_AVAILABLE)),
    ("Episode", OrDefault(NOT_AVAILABLE)),
];

fn policy(key: &str) -> FieldPolicy {
    FIELD_POLICIES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, policy)| *policy)
        .unwrap_or(Mandatory)
}

/// Read access to payload fields according to `FIELD_POLICIES`
struct Fields<'a> {
    payload: &'a Payload,
}

impl<'a> Fields<'a> {
    fn text(&self, key: &'static str) -> Result<&'a str, RecordError> {
        match self.payload.get(key) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(RecordError::InvalidFieldType {
                field: key,
                expected: "string",
            }),
            None => match policy(key) {
                Mandatory => Err(RecordError::MissingField(key)),
                OrDefault(default) => Ok(default),
            },
        }
    }

    fn owned(&self, key: &'static str) -> Result<String, RecordError> {
        self.text(key).map(str::to_string)
    }

    fn list(&self, key: &'static str) -> Result<Vec<String>, RecordError> {
        self.text(key).map(split_list)
    }
}

/// Builds a `Movie` from a successful single-title payload.
///
/// # Errors
///
/// Returns `RecordError::MissingField` if a mandatory field is absent and
/// `RecordError::InvalidFieldType` if a field is not a string.
pub fn build_movie(payload: &Payload) -> Result<Movie, RecordError> {
    let fields = Fields { payload };

    let movie = Movie {
        imdb_id: fields.owned("imdbID")?,
        title: fields.owned("Title")?,
        year: fields.owned("Year")?,
        rated: fields.owned("Rated")?,
        released: fields.owned("Released")?,
        runtime: saturating_u32(leading_number(fields.text("Runtime")?)),
        genre: fields.list("Genre")?,
        director: fields.list("Director")?,
        writer: fields.list("Writer")?,
        actors: fields.list("Actors")?,
        plot: fields.owned("Plot")?,
        language: fields.list("Language")?,
        country: fields.list("Country")?,
        awards: fields.owned("Awards")?,
        poster_url: fields.owned("Poster")?,
        kind: fields.owned("Type")?,
        dvd: fields.owned("DVD")?,
        box_office: fields.owned("BoxOffice")?,
        production: fields.owned("Production")?,
        website: fields.owned("Website")?,
        metascore: match fields.text("Metascore")? {
            NOT_AVAILABLE => 0,
            score => saturating_u32(leading_number(score)),
        },
        rotten_tomatoes_rating: rotten_tomatoes_rating(payload),
        imdb_rating: leading_float(fields.text("imdbRating")?),
        imdb_votes: leading_number(&fields.text("imdbVotes")?.replace(',', "")),
        total_seasons: fields.owned("totalSeasons")?,
        series_imdb_id: fields.owned("seriesID")?,
        season: fields.owned("Season")?,
        episode: fields.owned("Episode")?,
    };

    debug!(imdb_id = %movie.imdb_id, title = %movie.title, "Built movie record");

    Ok(movie)
}

/// Finds the first `Ratings` entry from Rotten Tomatoes and returns its
/// score, or 0 if there is none.
fn rotten_tomatoes_rating(payload: &Payload) -> u32 {
    payload
        .get("Ratings")
        .and_then(Value::as_array)
        .and_then(|ratings| {
            ratings.iter().find(|rating| {
                rating.get("Source").and_then(Value::as_str) == Some(ROTTEN_TOMATOES)
            })
        })
        .and_then(|rating| rating.get("Value"))
        .and_then(Value::as_str)
        .map(|score| saturating_u32(leading_number(score)))
        .unwrap_or(0)
}

/// Splits a comma-separated field into its parts, always yielding at least
/// one element.
fn split_list(value: &str) -> Vec<String> {
    value.split(LIST_DELIMITER).map(str::to_string).collect()
}

/// Parses the leading digits of a string (`"152 min"` -> 152, `"81%"` -> 81).
/// Strings without leading digits parse as 0, digit runs beyond `u64`
/// saturate at `u64::MAX`.
fn leading_number(value: &str) -> u64 {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    match &trimmed[..end] {
        "" => 0,
        digits => digits.parse().unwrap_or(u64::MAX),
    }
}

fn saturating_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Parses the leading decimal number of a string (`"7.6"` -> 7.6).
/// Strings without a leading number parse as 0.0.
fn leading_float(value: &str) -> f64 {
    let trimmed = value.trim_start();
    let mut seen_dot = false;
    let end = trimmed
        .find(|c: char| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .unwrap_or(trimmed.len());

    trimmed[..end].parse().unwrap_or(0.0)
}
