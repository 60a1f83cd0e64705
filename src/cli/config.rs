// CLI configuration
use clap::{Args, Parser, Subcommand, ValueEnum};
use id3v1tag::Field;
use log::LevelFilter;
use std::path::PathBuf;

/// id3v1tag - read and write ID3v1 tags
#[derive(Parser, Debug)]
#[command(name = "id3v1tag")]
#[command(about = "Read and write the 128-byte ID3v1 tag at the end of audio files", long_about = None)]
#[command(version)]
#[command(propagate_version = true)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log level
    #[arg(short, long, value_enum, default_value = "off", global = true)]
    pub log_level: LogLevel,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read the tag from audio file(s)
    Read {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Only show these fields (comma separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<Field>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write or update the tag of an audio file
    Write {
        /// Audio file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        values: TagValues,

        /// Start from a JSON tag document instead of the file's current tag
        #[arg(long, value_name = "JSON_FILE")]
        from_json: Option<PathBuf>,

        /// Start from an empty tag instead of the file's current tag
        #[arg(long, conflicts_with = "from_json")]
        clear: bool,
    },

    /// Remove the tag from audio file(s)
    Remove {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// List the genre table
    Genres,
}

/// Field values given on the command line
#[derive(Args, Debug, Default)]
pub struct TagValues {
    /// Title (max 30 bytes)
    #[arg(long)]
    pub title: Option<String>,

    /// Artist (max 30 bytes)
    #[arg(long)]
    pub artist: Option<String>,

    /// Album (max 30 bytes)
    #[arg(long)]
    pub album: Option<String>,

    /// Year (max 4 bytes)
    #[arg(long)]
    pub year: Option<String>,

    /// Comment (max 30 bytes, 29 when a track is set)
    #[arg(long)]
    pub comment: Option<String>,

    /// Track number, 0 to clear
    #[arg(long)]
    pub track: Option<u8>,

    /// Genre name or code
    #[arg(long)]
    pub genre: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn filter(&self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}
