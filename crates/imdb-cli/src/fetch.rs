//! Download and decompression of the published snapshot archives.
//!
//! Each archive is streamed through a gzip decoder straight to disk, so the
//! compressed file never lands in the data directory. The pipeline itself never
//! calls into this module.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use flate2::read::GzDecoder;
use imdb_model::SourceFile;
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{info, warn};

/// Where the public snapshot is published.
pub const DEFAULT_BASE_URL: &str = "https://datasets.imdbws.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

const USER_AGENT_VALUE: &str = concat!("imdb-normalize/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cannot derive a file name from {url}")]
    InvalidUrl { url: String },

    #[error("failed to create data directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decompress into {}", path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Archive URLs for the six sources, in download order.
pub fn source_urls(base_url: &str) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    SourceFile::ALL
        .iter()
        .map(|source| format!("{base}/{}", source.archive_name()))
        .collect()
}

/// Local file name for an archive URL: the last path segment without `.gz`.
pub fn extracted_name(url: &str) -> Result<String> {
    let segment = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .ok_or_else(|| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;
    let name = segment.strip_suffix(".gz").unwrap_or(segment);
    if name.is_empty() {
        return Err(FetchError::InvalidUrl {
            url: url.to_string(),
        });
    }
    Ok(name.to_string())
}

/// Downloads every URL into `dir`, decompressing on the fly.
///
/// Returns the extracted paths in `urls` order. Existing files are replaced.
pub fn fetch_sources(dir: &Path, urls: &[String], show_progress: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| FetchError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT_VALUE)
        .build()
        .map_err(FetchError::Client)?;

    let mut paths = Vec::with_capacity(urls.len());
    for url in urls {
        let target = dir.join(extracted_name(url)?);
        info!(url = %url, path = %target.display(), "downloading source");
        let response = client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let bar = progress_bar(response.content_length(), &target, show_progress);
        let bytes = decompress_to(bar.wrap_read(response), &target)?;
        bar.finish_and_clear();
        info!(path = %target.display(), bytes, "source extracted");
        paths.push(target);
    }
    Ok(paths)
}

/// Streams a gzip `reader` into `target`, returning the decompressed size.
///
/// The data goes to a `.part` sibling first and is renamed once complete, so
/// an interrupted download never leaves a truncated source behind.
pub fn decompress_to(reader: impl Read, target: &Path) -> Result<u64> {
    let partial = target.with_extension("part");
    let decompress_error = |source| FetchError::Decompress {
        path: target.to_path_buf(),
        source,
    };

    match write_decompressed(reader, &partial) {
        Ok(written) => {
            fs::rename(&partial, target).map_err(decompress_error)?;
            Ok(written)
        }
        Err(err) => {
            let _ = fs::remove_file(&partial);
            Err(decompress_error(err))
        }
    }
}

fn write_decompressed(reader: impl Read, path: &Path) -> io::Result<u64> {
    let mut decoder = GzDecoder::new(reader);
    let mut file = BufWriter::new(File::create(path)?);
    let written = io::copy(&mut decoder, &mut file)?;
    file.flush()?;
    file.get_ref().sync_all()?;
    Ok(written)
}

/// Deletes the files extracted for `urls`. Missing files are logged and skipped.
pub fn remove_sources(dir: &Path, urls: &[String]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for url in urls {
        let path = dir.join(extracted_name(url)?);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "source removed");
                removed.push(path);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "source already absent, skipping");
            }
            Err(source) => return Err(FetchError::Remove { path, source }),
        }
    }
    Ok(removed)
}

fn progress_bar(total: Option<u64>, target: &Path, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = match total {
        Some(total) => ProgressBar::new(total),
        None => ProgressBar::new_spinner(),
    };
    let style = ProgressStyle::with_template(
        "{msg} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    bar.set_style(style);
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    bar.set_message(name);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_urls() {
        let urls = source_urls("https://datasets.imdbws.com/");
        assert_eq!(urls.len(), 6);
        assert_eq!(urls[0], "https://datasets.imdbws.com/title.ratings.tsv.gz");
        assert_eq!(urls[5], "https://datasets.imdbws.com/title.principals.tsv.gz");
        assert!(urls.iter().all(|url| !url.contains("com//")));
    }

    #[test]
    fn test_extracted_name() {
        assert_eq!(
            extracted_name("https://datasets.imdbws.com/name.basics.tsv.gz").unwrap(),
            "name.basics.tsv"
        );
        assert_eq!(extracted_name("http://host/plain.tsv").unwrap(), "plain.tsv");
        assert!(matches!(
            extracted_name("https://"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            extracted_name("http://host/.gz"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }
}
