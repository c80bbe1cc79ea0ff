use clap::{Parser, Subcommand, ValueEnum};
use omdb_client::{Movie, OmdbClient, OmdbConfig, OmdbError, Payload, TitleType};
use serde::Serialize;
use serde_json::Value;
use std::process;
use tracing_subscriber::EnvFilter;

/// Look up movies, series and episodes in the OMDb API
#[derive(Debug, Parser)]
#[command(name = "omdb", version, about)]
struct Cli {
    /// OMDb API key
    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Override the API host (e.g. https://www.omdbapi.com)
    #[arg(long, env = "OMDB_HOST")]
    host: Option<String>,

    /// Print the result as JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a title by IMDb ID
    Id {
        /// IMDb ID, e.g. tt0241527
        imdb_id: String,
    },

    /// Look up a title by its exact title
    Title {
        title: String,

        /// Restrict to a title type
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,

        /// Restrict to a release year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Search titles
    Search {
        title: String,

        /// Restrict to a title type
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,

        /// Restrict to a release year
        #[arg(long)]
        year: Option<i32>,

        /// Result page (10 results per page)
        #[arg(long)]
        page: Option<i32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Movie,
    Series,
    Episode,
}

impl From<KindArg> for TitleType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => TitleType::Movie,
            KindArg::Series => TitleType::Series,
            KindArg::Episode => TitleType::Episode,
        }
    }
}

/// Installs the stderr log subscriber
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Prints a list field, or nothing if it only carries the "N/A" sentinel
fn print_list(label: &str, values: &[String]) {
    if values.iter().any(|v| v != omdb_client::NOT_AVAILABLE) {
        println!("  {:<12} {}", label, values.join(", "));
    }
}

/// Prints a text field, or nothing if it is "N/A"
fn print_text(label: &str, value: &str) {
    if value != omdb_client::NOT_AVAILABLE {
        println!("  {:<12} {}", label, value);
    }
}

fn print_movie(movie: &Movie) {
    println!("\n=== {} ({}) ===\n", movie.title(), movie.year());

    print_text("IMDb ID:", movie.imdb_id());
    print_text("Type:", movie.kind());
    print_text("Rated:", movie.rated());
    print_text("Released:", movie.released());
    if movie.runtime() > 0 {
        println!("  {:<12} {} min", "Runtime:", movie.runtime());
    }
    print_list("Genre:", movie.genre());
    print_list("Director:", movie.director());
    print_list("Writer:", movie.writer());
    print_list("Actors:", movie.actors());
    print_list("Language:", movie.language());
    print_list("Country:", movie.country());
    print_text("Season:", movie.season());
    print_text("Episode:", movie.episode());
    print_text("Seasons:", movie.total_seasons());
    print_text("Series:", movie.series_imdb_id());

    println!(
        "  {:<12} {}/10 ({} votes)",
        "IMDb:",
        movie.imdb_rating(),
        movie.imdb_votes()
    );
    if movie.metascore() > 0 {
        println!("  {:<12} {}", "Metascore:", movie.metascore());
    }
    if movie.rotten_tomatoes_rating() > 0 {
        println!(
            "  {:<12} {}%",
            "Tomatometer:",
            movie.rotten_tomatoes_rating()
        );
    }

    print_text("Box office:", movie.box_office());
    print_text("Awards:", movie.awards());
    print_text("Plot:", movie.plot());
}

/// The `Search` entries of a search payload, empty when absent.
fn search_entries(results: &Payload) -> &[Value] {
    results
        .get("Search")
        .and_then(|s| s.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn print_search(results: &Payload) {
    let entries = search_entries(results);

    if entries.is_empty() {
        println!("No results found.");
        return;
    }

    for (index, entry) in entries.iter().enumerate() {
        let field = |key: &str| entry.get(key).and_then(|v| v.as_str()).unwrap_or("?");
        println!(
            "{:>3}. {} ({}) [{}] {}",
            index + 1,
            field("Title"),
            field("Year"),
            field("Type"),
            field("imdbID")
        );
    }

    if let Some(total) = results.get("totalResults").and_then(|t| t.as_str()) {
        println!("\n{} result(s) in total", total);
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: Failed to encode result as JSON: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<(), OmdbError> {
    let mut config = OmdbConfig::new(cli.api_key);
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }
    let client = OmdbClient::new(config);

    match cli.command {
        Command::Id { imdb_id } => {
            let movie = client.lookup_by_id(&imdb_id)?;
            if cli.json {
                print_json(&movie);
            } else {
                print_movie(&movie);
            }
        }
        Command::Title { title, kind, year } => {
            let movie = client.lookup_by_title(&title, kind.map(TitleType::from), year)?;
            if cli.json {
                print_json(&movie);
            } else {
                print_movie(&movie);
            }
        }
        Command::Search {
            title,
            kind,
            year,
            page,
        } => {
            let results = client.search(&title, kind.map(TitleType::from), year, page)?;
            if cli.json {
                print_json(&results);
            } else {
                print_search(&results);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
