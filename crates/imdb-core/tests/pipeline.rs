//! Tests for run orchestration: order, batching, debug sampling, failures.

mod common;

use std::fs;

use common::{FailingWriter, MemoryWriter, ints, snapshot, strings, write_principals};
use imdb_core::{Pipeline, PipelineError, RunContext, SourceError, TableError, run_pipeline};
use imdb_ingest::{IngestError, NULL_TOKEN};
use imdb_model::{ConfigError, PipelineConfig, SourceFile, TableName};
use imdb_transform::TransformError;
use polars::prelude::*;
use proptest::prelude::*;
use tempfile::TempDir;

fn production(dir: &TempDir, batch_size: usize) -> RunContext {
    RunContext::new(PipelineConfig::production(dir.path()).with_batch_size(batch_size)).unwrap()
}

// ============================================================================
// Full runs
// ============================================================================

#[test]
fn writes_every_table_in_order() {
    let dir = snapshot();
    let writer = MemoryWriter::default();
    let report = run_pipeline(
        PipelineConfig::production(dir.path()).with_batch_size(2),
        &writer,
    )
    .unwrap();

    assert_eq!(writer.tables(), TableName::ALL.to_vec());
    let tables: Vec<TableName> = report.tables.iter().map(|table| table.table).collect();
    assert_eq!(tables, TableName::ALL.to_vec());

    let principals = &report.tables[6];
    assert_eq!(principals.table, TableName::Principals);
    assert_eq!(principals.rows, 5);
    insta::assert_debug_snapshot!(principals.partitions, @r#"
    [
        "Principals_01.parquet",
        "Principals_02.parquet",
        "Principals_03.parquet",
    ]
    "#);
}

#[test]
fn sentinel_never_reaches_output() {
    let dir = snapshot();
    let writer = MemoryWriter::default();
    Pipeline::standard().run(&production(&dir, 2), &writer).unwrap();

    for table in TableName::ALL {
        for (_, frame) in writer.partitions(table) {
            for column in frame.get_columns() {
                if let Ok(values) = column.str() {
                    assert!(
                        values.into_iter().all(|value| value != Some(NULL_TOKEN)),
                        "{table}.{} holds the sentinel",
                        column.name()
                    );
                }
            }
        }
    }
}

#[test]
fn batch_size_does_not_change_batched_rows() {
    let dir = snapshot();
    let pipeline = Pipeline::standard().retain_tables(&[TableName::Principals]);

    let small = MemoryWriter::default();
    pipeline.run(&production(&dir, 1), &small).unwrap();
    let whole = MemoryWriter::default();
    pipeline.run(&production(&dir, 1_000), &whole).unwrap();

    assert_eq!(small.partitions(TableName::Principals).len(), 6);
    assert_eq!(whole.partitions(TableName::Principals).len(), 1);
    assert!(
        small
            .stacked(TableName::Principals)
            .equals_missing(&whole.stacked(TableName::Principals))
    );
}

// ============================================================================
// Debug sampling
// ============================================================================

#[test]
fn debug_mode_runs_one_batch_plus_remainder() {
    let dir = snapshot();
    let config = PipelineConfig::debug(dir.path())
        .with_row_limit(2)
        .with_batch_size(4);
    let writer = MemoryWriter::default();
    run_pipeline(config, &writer).unwrap();

    let titles = writer.frame(TableName::Titles);
    assert_eq!(titles.height(), 2);

    // Six source rows, batch of four: one full window, then the two-row tail
    // (tt9 has no title and drops out of the inner join).
    let principals = writer.partitions(TableName::Principals);
    assert_eq!(principals.len(), 2);
    assert_eq!(principals[0].0, Some(1));
    assert_eq!(principals[0].1.height(), 4);
    assert_eq!(principals[1].0, Some(2));
    assert_eq!(strings(&principals[1].1, "title_id"), vec![Some("tt3".to_string())]);

    // The lookup is never sampled: tt3 is past the row limit of title.basics.
    let episodes = writer.frame(TableName::Episodes);
    assert_eq!(strings(&episodes, "id"), vec![Some("tt3".to_string())]);
}

#[test]
fn invalid_configuration_is_rejected() {
    let dir = snapshot();
    let config = PipelineConfig::debug(dir.path()).with_row_limit(0);
    let writer = MemoryWriter::default();
    let err = run_pipeline(config, &writer).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::InvalidConfig(ConfigError::ZeroRowLimit)
    ));
    assert!(writer.tables().is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn missing_source_aborts_remaining_tables() {
    let dir = snapshot();
    fs::remove_file(dir.path().join(SourceFile::NameBasics.file_name())).unwrap();
    let writer = MemoryWriter::default();
    let err = Pipeline::standard()
        .run(&production(&dir, 2), &writer)
        .unwrap_err();

    match err {
        PipelineError::Table {
            table,
            source:
                TableError::FileProcessing {
                    source: SourceError::Read(IngestError::FileNotFound { .. }),
                    ..
                },
        } => assert_eq!(table, TableName::Persons),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(writer.tables(), TableName::ALL[..9].to_vec());
}

#[test]
fn bad_value_is_a_transformation_error() {
    let dir = snapshot();
    write_principals(dir.path(), &[&["tt1", "first", "nm1", "actor", "\\N", "\\N"]]);
    let writer = MemoryWriter::default();
    let err = Pipeline::standard()
        .retain_tables(&[TableName::Principals])
        .run(&production(&dir, 2), &writer)
        .unwrap_err();

    match err {
        PipelineError::Table {
            source: TableError::DataTransformation { table, source },
            ..
        } => {
            assert_eq!(table, TableName::Principals);
            assert!(matches!(source, TransformError::Step { step: "cast", .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn absent_appearance_field_fails_instead_of_merging() {
    let dir = snapshot();
    write_principals(
        dir.path(),
        &[
            &["tt1", "1", "\\N", "actor", "\\N", r#"["A"]"#],
            &["tt1", "2", "\\N", "actor", "\\N", r#"["B"]"#],
        ],
    );

    for table in [TableName::Principals, TableName::PrincipalsCharacters] {
        let writer = MemoryWriter::default();
        let err = Pipeline::standard()
            .retain_tables(&[table])
            .run(&production(&dir, 10), &writer)
            .unwrap_err();

        match err {
            PipelineError::Table {
                source: TableError::DataTransformation { source, .. },
                ..
            } => match source {
                TransformError::Step { step, source } => {
                    assert_eq!(step, "derive_composite_id");
                    assert!(matches!(
                        *source,
                        TransformError::MissingKeyPart { ref column, row: 0 } if column == "nconst"
                    ));
                }
                other => panic!("unexpected cause: {other:?}"),
            },
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(writer.tables().is_empty());
    }
}

#[test]
fn missing_column_is_a_file_processing_error() {
    let dir = snapshot();
    fs::write(
        dir.path().join(SourceFile::TitleBasics.file_name()),
        "tconst\ttitleType\ntt1\tmovie\n",
    )
    .unwrap();
    let err = Pipeline::standard()
        .retain_tables(&[TableName::Titles])
        .run(&production(&dir, 2), &MemoryWriter::default())
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Table {
            source: TableError::FileProcessing {
                source: SourceError::Read(IngestError::MissingColumn { .. }),
                ..
            },
            ..
        }
    ));
}

#[test]
fn writer_failure_is_an_output_error() {
    let dir = snapshot();
    let err = Pipeline::standard()
        .run(&production(&dir, 2), &FailingWriter)
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Table {
            table: TableName::Titles,
            source: TableError::OutputWrite {
                partition: None,
                ..
            },
        }
    ));
}

// ============================================================================
// Batch completeness
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn batched_partitions_cover_every_row(total in 1usize..25, batch in 1usize..8) {
        let dir = snapshot();
        let orderings: Vec<String> = (0..total).map(|i| i.to_string()).collect();
        let people: Vec<String> = (0..total).map(|i| format!("nm{i}")).collect();
        let rows: Vec<Vec<&str>> = orderings
            .iter()
            .zip(&people)
            .map(|(ordering, person)| vec!["tt1", ordering.as_str(), person.as_str(), "actor", "\\N", "\\N"])
            .collect();
        let row_refs: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
        write_principals(dir.path(), &row_refs);

        let writer = MemoryWriter::default();
        Pipeline::standard()
            .retain_tables(&[TableName::Principals])
            .run(&production(&dir, batch), &writer)
            .unwrap();

        let partitions = writer.partitions(TableName::Principals);
        prop_assert_eq!(partitions.len(), total.div_ceil(batch));
        let stacked = writer.stacked(TableName::Principals);
        let expected: Vec<Option<i64>> = (0..total as i64).map(Some).collect();
        prop_assert_eq!(ints(&stacked, "ordering"), expected);
    }
}
