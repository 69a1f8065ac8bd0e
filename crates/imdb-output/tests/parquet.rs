//! Tests for the Parquet table writer.

use std::fs::File;

use imdb_model::TableName;
use imdb_output::{OutputError, ParquetTableWriter, TableWriter, partition_file_name};
use polars::prelude::*;
use tempfile::TempDir;

fn sample() -> DataFrame {
    DataFrame::new(vec![
        Series::new("id".into(), ["a", "b"]).into_column(),
        Series::new("season_number".into(), [Some(1i64), None]).into_column(),
    ])
    .unwrap()
}

#[test]
fn partition_names_for_a_batched_table() {
    let names: Vec<String> = (1..=3)
        .map(|partition| partition_file_name(TableName::PrincipalsCharacters, Some(partition)))
        .collect();
    insta::assert_snapshot!(names.join("\n"), @r"
    PrincipalsCharacters_01.parquet
    PrincipalsCharacters_02.parquet
    PrincipalsCharacters_03.parquet
    ");
}

#[test]
fn writes_and_reads_back() {
    let dir = TempDir::new().unwrap();
    let writer = ParquetTableWriter::new(dir.path().join("out"));
    let mut df = sample();

    let path = writer.write(TableName::Episodes, None, &mut df).unwrap();
    assert_eq!(path, dir.path().join("out").join("Episodes.parquet"));

    let read = ParquetReader::new(File::open(&path).unwrap()).finish().unwrap();
    assert!(read.equals_missing(&sample()));
}

#[test]
fn rerun_replaces_previous_file() {
    let dir = TempDir::new().unwrap();
    let writer = ParquetTableWriter::new(dir.path());
    let mut first = sample();
    writer.write(TableName::Genres, Some(1), &mut first).unwrap();

    let mut second = sample().head(Some(1));
    let path = writer.write(TableName::Genres, Some(1), &mut second).unwrap();

    let read = ParquetReader::new(File::open(path).unwrap()).finish().unwrap();
    assert_eq!(read.height(), 1);
}

#[test]
fn unwritable_target_is_an_output_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let writer = ParquetTableWriter::new(&blocker);

    let result = writer.write(TableName::Jobs, None, &mut sample());
    assert!(matches!(result, Err(OutputError::CreateDir { .. })));
}
