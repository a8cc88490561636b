use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediadex")]
#[command(author, version, about = "Movie, series and game catalog with a daily trivia")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the JSON HTTP server
    Start {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// List popular movies, or movies in the given genres
    Movies {
        #[arg(long, default_value = "1")]
        page: u32,

        /// Comma-separated genre IDs
        #[arg(long)]
        genres: Option<String>,
    },

    /// List popular series, or series in the given genres
    Series {
        #[arg(long, default_value = "1")]
        page: u32,

        /// Comma-separated genre IDs
        #[arg(long)]
        genres: Option<String>,
    },

    /// List the best-rated movies of all time
    Classics {
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// List series first aired between 1990 and 2014
    Nostalgia {
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// List popular games, or search games by name
    Games {
        #[arg(long, default_value = "1")]
        page: u32,

        /// Items per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<u32>,

        /// Search by name instead of listing popular games
        #[arg(long)]
        search: Option<String>,
    },

    /// Search movies and series
    Search {
        #[arg(required = true)]
        query: String,

        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Show a single movie or game
    Show {
        /// Item kind: movie or game
        kind: String,

        /// Provider ID
        id: String,
    },

    /// Compute and print today's trivia
    Trivia,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
