use chrono::NaiveDateTime;
use clap::Parser;

use crate::collect::{CollectOptions, DEFAULT_CONCURRENCY, MediaItem};
use crate::io::DEFAULT_MAX_RETRY;
use crate::policy::{
    ArchivePolicy, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FILENAME_LENGTH, DEFAULT_MAX_FILES,
};

#[derive(Parser, Debug)]
#[command(name = "mediazip")]
#[command(version)]
#[command(about = "Pack media files and URLs into one store-only ZIP archive", long_about = None)]
#[command(after_help = "Examples:\n  \
  mediazip -o album.zip a.jpg b.png          pack two local files\n  \
  mediazip -l https://example.com/v.mp4 c.gif   fetch, pack and list\n  \
  mediazip -p *.jpg > photos.zip             write the archive to stdout")]
pub struct Cli {
    /// Media file paths or HTTP URLs
    #[arg(value_name = "SOURCES", required = true)]
    pub sources: Vec<String>,

    /// Archive to create (default: download_<millis>.zip)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,

    /// Write the archive to stdout, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// Overwrite an existing archive
    #[arg(short = 'f')]
    pub force: bool,

    /// Timestamp for every entry (default: now)
    #[arg(short = 't', long = "timestamp", value_name = "YYYY-MM-DDTHH:MM:SS", value_parser = parse_timestamp)]
    pub timestamp: Option<NaiveDateTime>,

    /// Simultaneous downloads
    #[arg(short = 'j', long = "concurrency", env = "MEDIAZIP_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Attempts per URL
    #[arg(short = 'r', long = "retries", env = "MEDIAZIP_RETRIES", default_value_t = DEFAULT_MAX_RETRY)]
    pub retries: u32,

    /// Maximum number of files
    #[arg(long = "max-files", env = "MEDIAZIP_MAX_FILES", default_value_t = DEFAULT_MAX_FILES)]
    pub max_files: usize,

    /// Maximum size of a single file in bytes
    #[arg(long = "max-file-size", env = "MEDIAZIP_MAX_FILE_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Maximum file name length in characters
    #[arg(long = "max-name-len", env = "MEDIAZIP_MAX_NAME_LEN", default_value_t = DEFAULT_MAX_FILENAME_LENGTH)]
    pub max_name_len: usize,

    /// Skip files that are not JPEG, PNG, GIF or WebP
    #[arg(long = "images-only", env = "MEDIAZIP_IMAGES_ONLY")]
    pub images_only: bool,

    /// List the packed entries
    #[arg(short = 'l')]
    pub list: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.pipe
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    pub fn policy(&self) -> ArchivePolicy {
        ArchivePolicy {
            max_files: self.max_files,
            max_file_size: self.max_file_size,
            max_filename_length: self.max_name_len,
            images_only: self.images_only,
        }
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            concurrency: self.concurrency,
        }
    }

    pub fn items(&self) -> Vec<MediaItem> {
        self.sources.iter().map(MediaItem::new).collect()
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_sources_and_flags() {
        let cli = Cli::try_parse_from([
            "mediazip",
            "-o",
            "out.zip",
            "-t",
            "2025-10-06T14:30:00",
            "-j",
            "8",
            "a.jpg",
            "https://example.com/b.png",
        ])
        .unwrap();

        assert_eq!(cli.output.as_deref(), Some("out.zip"));
        assert_eq!(cli.sources, ["a.jpg", "https://example.com/b.png"]);
        assert_eq!(cli.collect_options().concurrency, 8);
        let ts = cli.timestamp.unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2025, 10, 6));
        assert_eq!((ts.hour(), ts.minute()), (14, 30));
        assert_eq!(cli.items()[1], MediaItem::new("https://example.com/b.png"));
    }

    #[test]
    fn policy_from_flags() {
        let cli = Cli::try_parse_from([
            "mediazip",
            "--max-files",
            "5",
            "--max-file-size",
            "1024",
            "--max-name-len",
            "32",
            "--images-only",
            "x",
        ])
        .unwrap();
        assert_eq!(
            cli.policy(),
            ArchivePolicy {
                max_files: 5,
                max_file_size: 1024,
                max_filename_length: 32,
                images_only: true,
            }
        );
    }

    #[test]
    fn pipe_implies_quiet() {
        let cli = Cli::try_parse_from(["mediazip", "-p", "x"]).unwrap();
        assert!(cli.is_quiet());
        assert!(!cli.is_very_quiet());

        let cli = Cli::try_parse_from(["mediazip", "-qq", "x"]).unwrap();
        assert!(cli.is_very_quiet());
    }

    #[test]
    fn requires_a_source() {
        assert!(Cli::try_parse_from(["mediazip", "-o", "out.zip"]).is_err());
    }

    #[test]
    fn rejects_bad_timestamp() {
        assert!(Cli::try_parse_from(["mediazip", "-t", "yesterday", "x"]).is_err());
        assert!(parse_timestamp("2025-10-06 14:30:00").is_ok());
    }
}
