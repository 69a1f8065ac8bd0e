//! Shared fixtures: a miniature snapshot and an in-memory table writer.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use imdb_model::{SourceFile, TableName};
use imdb_output::{OutputError, TableWriter, partition_file_name};
use polars::prelude::*;
use tempfile::TempDir;

pub const LONG_JOB: &str = "producer_of_a_very_long_job_title_exceeding";

pub fn write_source(dir: &Path, source: SourceFile, header: &[&str], rows: &[&[&str]]) {
    let mut content = header.join("\t");
    content.push('\n');
    for row in rows {
        content.push_str(&row.join("\t"));
        content.push('\n');
    }
    fs::write(dir.join(source.file_name()), content).unwrap();
}

pub fn write_principals(dir: &Path, rows: &[&[&str]]) {
    write_source(
        dir,
        SourceFile::TitlePrincipals,
        &["tconst", "ordering", "nconst", "category", "job", "characters"],
        rows,
    );
}

/// Six small sources covering every table.
pub fn snapshot() -> TempDir {
    let dir = TempDir::new().unwrap();
    let path = dir.path();

    write_source(
        path,
        SourceFile::TitleBasics,
        &[
            "tconst",
            "titleType",
            "primaryTitle",
            "originalTitle",
            "isAdult",
            "startYear",
            "endYear",
            "runtimeMinutes",
            "genres",
        ],
        &[
            &["tt1", "Movie", "Heat", "Heat", "0", "1995", "\\N", "170", "Crime,Drama"],
            &["tt2", "Short", "Alpha", "Alpha", "0", "2001", "\\N", "Reality-TV", "\\N"],
            &["tt3", "tvSeries", "Bravo", "Bravo", "1", "2010", "2012", "45", "Comedy"],
        ],
    );
    write_source(
        path,
        SourceFile::TitleRatings,
        &["tconst", "averageRating", "numVotes"],
        &[&["tt3", "7.0", "12"], &["tt1", "8.3", "700000"]],
    );
    write_source(
        path,
        SourceFile::TitleEpisode,
        &["tconst", "parentTconst", "seasonNumber", "episodeNumber"],
        &[
            &["tt3", "tt1", "1", "2"],
            &["tt2", "tt1", "\\N", "\\N"],
            &["tt9", "tt1", "1", "1"],
        ],
    );
    write_source(
        path,
        SourceFile::TitleAkas,
        &[
            "titleId",
            "ordering",
            "title",
            "region",
            "language",
            "types",
            "attributes",
            "isOriginalTitle",
        ],
        &[
            &["tt1", "1", "Heat", "US", "\\N", "\\N", "\\N", "0"],
            &["tt1", "2", "Heat", "\\N", "\\N", "original", "\\N", "1"],
            &["tt1", "2", "Heat (dup)", "\\N", "\\N", "original", "\\N", "1"],
            &["tt9", "1", "Ghost", "US", "\\N", "\\N", "\\N", "0"],
        ],
    );
    write_principals(
        path,
        &[
            &["tt1", "1", "nm1", "actor", "\\N", r#"["Neil McCauley"]"#],
            &["tt1", "2", "nm2", "actor", "\\N", r#"["Vincent Hanna"]"#],
            &["tt1", "3", "nm3", "director", "\\N", "\\N"],
            &["tt2", "1", "nm1", "self", "\\N", r#"["Himself","Host"]"#],
            &["tt9", "1", "nm4", "producer", "producer", "\\N"],
            &["tt3", "1", "nm2", "writer", LONG_JOB, "\\N"],
        ],
    );
    write_source(
        path,
        SourceFile::NameBasics,
        &[
            "nconst",
            "primaryName",
            "birthYear",
            "deathYear",
            "primaryProfession",
            "knownForTitles",
        ],
        &[
            &["nm1", "Robert De Niro", "1943", "\\N", "actor,producer", "tt1"],
            &["nm2", "Al Pacino", "1940", "\\N", "actor,soundtrack", "tt1"],
            &["nm3", "Michael Mann", "1943", "\\N", "\\N", "tt1"],
            &["nm3", "Michael Mann", "1943", "\\N", "\\N", "tt1"],
        ],
    );
    dir
}

/// Keeps every written frame in memory.
#[derive(Default)]
pub struct MemoryWriter {
    written: Mutex<Vec<(TableName, Option<usize>, DataFrame)>>,
}

impl MemoryWriter {
    pub fn tables(&self) -> Vec<TableName> {
        let mut tables: Vec<TableName> = self
            .written
            .lock()
            .unwrap()
            .iter()
            .map(|(table, _, _)| *table)
            .collect();
        tables.dedup();
        tables
    }

    pub fn partitions(&self, table: TableName) -> Vec<(Option<usize>, DataFrame)> {
        self.written
            .lock()
            .unwrap()
            .iter()
            .filter(|(written, _, _)| *written == table)
            .map(|(_, partition, frame)| (*partition, frame.clone()))
            .collect()
    }

    /// The single frame written for a non-batched table.
    pub fn frame(&self, table: TableName) -> DataFrame {
        let partitions = self.partitions(table);
        assert_eq!(partitions.len(), 1, "{table} written {} times", partitions.len());
        partitions.into_iter().next().unwrap().1
    }

    /// All partitions of a table stacked in partition order.
    pub fn stacked(&self, table: TableName) -> DataFrame {
        let mut partitions = self.partitions(table).into_iter().map(|(_, frame)| frame);
        let mut stacked = partitions.next().unwrap();
        for frame in partitions {
            stacked.vstack_mut(&frame).unwrap();
        }
        stacked
    }
}

impl TableWriter for MemoryWriter {
    fn write(
        &self,
        table: TableName,
        partition: Option<usize>,
        frame: &mut DataFrame,
    ) -> Result<PathBuf, OutputError> {
        self.written
            .lock()
            .unwrap()
            .push((table, partition, frame.clone()));
        Ok(PathBuf::from(partition_file_name(table, partition)))
    }
}

/// Rejects every write.
pub struct FailingWriter;

impl TableWriter for FailingWriter {
    fn write(
        &self,
        _table: TableName,
        _partition: Option<usize>,
        _frame: &mut DataFrame,
    ) -> Result<PathBuf, OutputError> {
        Err(OutputError::DataFrame {
            message: "disk full".to_string(),
        })
    }
}

pub fn strings(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect()
}

pub fn ints(df: &DataFrame, column: &str) -> Vec<Option<i64>> {
    df.column(column).unwrap().i64().unwrap().into_iter().collect()
}

pub fn some(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|value| Some((*value).to_string())).collect()
}
