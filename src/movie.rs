//! The normalized movie record.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Metadata of a single title (movie, series or episode).
///
/// A `Movie` is built once from a successful lookup payload and never
/// modified afterwards. Optional upstream fields hold the literal `"N/A"`
/// when the API omits them.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub(crate) imdb_id: String,
    pub(crate) title: String,
    pub(crate) year: String,
    pub(crate) rated: String,
    pub(crate) released: String,
    pub(crate) runtime: u32,
    pub(crate) genre: Vec<String>,
    pub(crate) director: Vec<String>,
    pub(crate) writer: Vec<String>,
    pub(crate) actors: Vec<String>,
    pub(crate) plot: String,
    pub(crate) language: Vec<String>,
    pub(crate) country: Vec<String>,
    pub(crate) awards: String,
    pub(crate) poster_url: String,
    pub(crate) kind: String,
    pub(crate) dvd: String,
    pub(crate) box_office: String,
    pub(crate) production: String,
    pub(crate) website: String,
    pub(crate) metascore: u32,
    pub(crate) rotten_tomatoes_rating: u32,
    pub(crate) imdb_rating: f64,
    pub(crate) imdb_votes: u64,
    pub(crate) total_seasons: String,
    pub(crate) series_imdb_id: String,
    pub(crate) season: String,
    pub(crate) episode: String,
}

impl Movie {
    /// IMDb ID, e.g. `tt0241527`
    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Release year as reported, e.g. `2001` or `2008–2013` for series
    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn rated(&self) -> &str {
        &self.rated
    }

    pub fn released(&self) -> &str {
        &self.released
    }

    /// Runtime in minutes
    pub fn runtime(&self) -> u32 {
        self.runtime
    }

    pub fn genre(&self) -> &[String] {
        &self.genre
    }

    pub fn director(&self) -> &[String] {
        &self.director
    }

    pub fn writer(&self) -> &[String] {
        &self.writer
    }

    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    pub fn plot(&self) -> &str {
        &self.plot
    }

    pub fn language(&self) -> &[String] {
        &self.language
    }

    pub fn country(&self) -> &[String] {
        &self.country
    }

    pub fn awards(&self) -> &str {
        &self.awards
    }

    pub fn poster_url(&self) -> &str {
        &self.poster_url
    }

    /// Title type: `movie`, `series` or `episode`
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn dvd(&self) -> &str {
        &self.dvd
    }

    pub fn box_office(&self) -> &str {
        &self.box_office
    }

    pub fn production(&self) -> &str {
        &self.production
    }

    pub fn website(&self) -> &str {
        &self.website
    }

    /// Metacritic score, 0 when unavailable
    pub fn metascore(&self) -> u32 {
        self.metascore
    }

    /// Rotten Tomatoes score in percent, 0 when unavailable
    pub fn rotten_tomatoes_rating(&self) -> u32 {
        self.rotten_tomatoes_rating
    }

    pub fn imdb_rating(&self) -> f64 {
        self.imdb_rating
    }

    pub fn imdb_votes(&self) -> u64 {
        self.imdb_votes
    }

    pub fn total_seasons(&self) -> &str {
        &self.total_seasons
    }

    /// IMDb ID of the parent series (episodes only)
    pub fn series_imdb_id(&self) -> &str {
        &self.series_imdb_id
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    pub fn episode(&self) -> &str {
        &self.episode
    }

    /// Converts the record into a JSON object.
    ///
    /// Every accessor has exactly one entry in the returned map and vice
    /// versa. Serializing a `Movie` with serde produces the same object.
    pub fn to_map(&self) -> Map<String, Value> {
        let entries: [(&str, Value); 28] = [
            ("ImdbId", self.imdb_id.clone().into()),
            ("Title", self.title.clone().into()),
            ("Year", self.year.clone().into()),
            ("Rated", self.rated.clone().into()),
            ("Released", self.released.clone().into()),
            ("Runtime", self.runtime.into()),
            ("Genre", self.genre.clone().into()),
            ("Director", self.director.clone().into()),
            ("Writer", self.writer.clone().into()),
            ("Actors", self.actors.clone().into()),
            ("Plot", self.plot.clone().into()),
            ("Language", self.language.clone().into()),
            ("Country", self.country.clone().into()),
            ("Awards", self.awards.clone().into()),
            ("Poster", self.poster_url.clone().into()),
            ("Type", self.kind.clone().into()),
            ("DVD", self.dvd.clone().into()),
            ("BoxOffice", self.box_office.clone().into()),
            ("Production", self.production.clone().into()),
            ("Website", self.website.clone().into()),
            ("Metascore", self.metascore.into()),
            ("RottenTomatoesRating", self.rotten_tomatoes_rating.into()),
            ("IMDbRating", self.imdb_rating.into()),
            ("IMDbVotes", self.imdb_votes.into()),
            ("TotalSeasons", self.total_seasons.clone().into()),
            ("SeriesID", self.series_imdb_id.clone().into()),
            ("Season", self.season.clone().into()),
            ("Episode", self.episode.clone().into()),
        ];

        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

impl Serialize for Movie {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_map().serialize(serializer)
    }
}
