//! Header line parsing and column resolution.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Literal marker the snapshot uses for a missing value.
pub const NULL_TOKEN: &str = "\\N";

/// Column names from a source's header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvHeader {
    pub path: PathBuf,
    pub columns: Vec<String>,
}

impl TsvHeader {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by exact name.
    pub fn position(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| IngestError::MissingColumn {
                column: column.to_string(),
                path: self.path.clone(),
            })
    }

    /// Header name at a fixed position.
    pub fn name_at(&self, index: usize) -> Result<&str> {
        self.columns
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| IngestError::ColumnIndexOutOfRange {
                index,
                width: self.columns.len(),
                path: self.path.clone(),
            })
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reads and splits the header line of a tab-separated file.
pub fn read_header(path: &Path) -> Result<TsvHeader> {
    let mut reader = BufReader::new(open(path)?);
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    if bytes == 0 {
        return Err(IngestError::EmptySource {
            path: path.to_path_buf(),
        });
    }
    // Skip BOM if present
    let line = line.strip_prefix('\u{feff}').unwrap_or(&line);
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(IngestError::EmptySource {
            path: path.to_path_buf(),
        });
    }
    Ok(TsvHeader {
        path: path.to_path_buf(),
        columns: line.split('\t').map(|name| name.trim().to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_tsv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_header_splits_on_tabs() {
        let file = create_temp_tsv("tconst\ttitleType\tgenres\ntt1\tmovie\tDrama\n");
        let header = read_header(file.path()).unwrap();

        assert_eq!(header.columns, vec!["tconst", "titleType", "genres"]);
        assert_eq!(header.position("genres").unwrap(), 2);
        assert_eq!(header.name_at(1).unwrap(), "titleType");
    }

    #[test]
    fn test_read_header_with_bom_and_crlf() {
        let file = create_temp_tsv("\u{feff}nconst\tprimaryName\r\nnm1\tA\r\n");
        let header = read_header(file.path()).unwrap();

        assert_eq!(header.columns, vec!["nconst", "primaryName"]);
    }

    #[test]
    fn test_read_header_empty_file() {
        let file = create_temp_tsv("");
        let result = read_header(file.path());

        assert!(matches!(result, Err(IngestError::EmptySource { .. })));
    }

    #[test]
    fn test_missing_column_and_index() {
        let file = create_temp_tsv("a\tb\n");
        let header = read_header(file.path()).unwrap();

        assert!(matches!(
            header.position("c"),
            Err(IngestError::MissingColumn { .. })
        ));
        assert!(matches!(
            header.name_at(5),
            Err(IngestError::ColumnIndexOutOfRange { index: 5, width: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_header(Path::new("/nonexistent/title.basics.tsv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
