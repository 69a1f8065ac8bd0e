//! Tables read from `title.principals`.
//!
//! The appearance rules address columns by position; the file is the
//! largest source, so three of them run in batches.

use imdb_ingest::{NULL_TOKEN, Projection, ReadRequest};
use imdb_model::{SourceFile, TableName};
use imdb_transform::{CastKind, LabelRule, ListFormat, Step, TransformPlan};

use super::titles::title_keys;
use crate::rule::TableDefinition;

/// Job labels and job keys use at most this many characters.
pub const JOB_LABEL_CHARS: usize = 36;

const APPEARANCE_KEY: [&str; 3] = ["tconst", "ordering", "nconst"];

fn positional(columns: &[(usize, &str)]) -> Projection {
    ReadRequest::positional(columns.iter().copied()).projection
}

fn named(column: &str) -> Projection {
    ReadRequest::named([column]).projection
}

pub fn principals() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::derive_composite_id(APPEARANCE_KEY, "id"))
        .then(Step::derive_id("category", "category_id"))
        .then(Step::derive_truncated_id("job", "job_id", JOB_LABEL_CHARS))
        .then(Step::select(&[
            ("id", "id"),
            ("tconst", "title_id"),
            ("ordering", "ordering"),
            ("nconst", "person_id"),
            ("category_id", "category_id"),
            ("job_id", "job_id"),
        ]))
        .then(Step::dedupe(&["id"]))
        .then(Step::cast(&[("ordering", CastKind::Int64 { strict: true })]));

    TableDefinition::new(
        TableName::Principals,
        SourceFile::TitlePrincipals,
        positional(&[
            (0, "tconst"),
            (1, "ordering"),
            (2, "nconst"),
            (3, "category"),
            (4, "job"),
        ]),
        plan,
    )
    .with_description("Credited appearances of persons on titles")
    .with_lookup(title_keys("tconst"))
    .batched()
}

pub fn principals_characters() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::derive_composite_id(APPEARANCE_KEY, "id"))
        .then(Step::explode("characters", "character", ListFormat::JsonArray))
        .then(Step::derive_id("character", "character_id"))
        .then(Step::select(&[("id", "id"), ("character_id", "character_id")]))
        .then(Step::dedupe(&["id", "character_id"]));

    TableDefinition::new(
        TableName::PrincipalsCharacters,
        SourceFile::TitlePrincipals,
        positional(&[(0, "tconst"), (1, "ordering"), (2, "nconst"), (5, "characters")]),
        plan,
    )
    .with_description("Appearance to character membership")
    .with_lookup(title_keys("tconst"))
    .batched()
}

pub fn characters() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::explode("characters", "character", ListFormat::JsonArray))
        .then(Step::derive_id("character", "id"))
        .then(Step::select(&[("id", "id"), ("character", "character")]))
        .then(Step::dedupe(&["id", "character"]))
        .then(Step::sort("character"));

    TableDefinition::new(
        TableName::Characters,
        SourceFile::TitlePrincipals,
        positional(&[(5, "characters")]),
        plan,
    )
    .with_description("Distinct character names")
    .batched()
}

pub fn categories() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::drop_nulls(&["category"]))
        .then(Step::derive_id("category", "id"))
        .then(Step::relabel("category", LabelRule::Humanize { max_chars: None }))
        .then(Step::select(&[("id", "id"), ("category", "category")]))
        .then(Step::dedupe(&["id", "category"]))
        .then(Step::sort("category"));

    TableDefinition::new(
        TableName::Categories,
        SourceFile::TitlePrincipals,
        named("category"),
        plan,
    )
    .with_description("Distinct appearance categories")
}

pub fn jobs() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::drop_nulls(&["job"]))
        .then(Step::derive_truncated_id("job", "id", JOB_LABEL_CHARS))
        .then(Step::relabel(
            "job",
            LabelRule::Humanize {
                max_chars: Some(JOB_LABEL_CHARS),
            },
        ))
        .then(Step::select(&[("id", "id"), ("job", "job")]))
        .then(Step::dedupe(&["id", "job"]))
        .then(Step::sort("job"));

    TableDefinition::new(TableName::Jobs, SourceFile::TitlePrincipals, named("job"), plan)
        .with_description("Distinct job labels")
}
