//! Tables read from `name.basics`.

use imdb_ingest::{NULL_TOKEN, ReadRequest};
use imdb_model::{SourceFile, TableName};
use imdb_transform::{CastKind, LabelRule, ListFormat, Step, TransformPlan};

use crate::rule::TableDefinition;

fn professions_exploded() -> TransformPlan {
    TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::explode(
            "primaryProfession",
            "profession",
            ListFormat::Delimited(','),
        ))
}

pub fn persons() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::select(&[
            ("nconst", "id"),
            ("primaryName", "full_name"),
            ("birthYear", "birth_year"),
            ("deathYear", "death_year"),
        ]))
        .then(Step::dedupe(&["id", "full_name", "birth_year", "death_year"]))
        .then(Step::cast(&[
            ("birth_year", CastKind::Int64 { strict: true }),
            ("death_year", CastKind::Int64 { strict: true }),
        ]));

    TableDefinition::new(
        TableName::Persons,
        SourceFile::NameBasics,
        ReadRequest::named(["nconst", "primaryName", "birthYear", "deathYear"]).projection,
        plan,
    )
    .with_description("Contributors with birth and death years")
}

pub fn persons_professions() -> TableDefinition {
    let plan = professions_exploded()
        .then(Step::derive_id("profession", "profession_id"))
        .then(Step::select(&[("nconst", "id"), ("profession_id", "profession_id")]))
        .then(Step::dedupe(&["id", "profession_id"]));

    TableDefinition::new(
        TableName::PersonsProfessions,
        SourceFile::NameBasics,
        ReadRequest::named(["nconst", "primaryProfession"]).projection,
        plan,
    )
    .with_description("Person to profession membership")
}

pub fn professions() -> TableDefinition {
    let plan = professions_exploded()
        .then(Step::derive_id("profession", "id"))
        .then(Step::relabel("profession", LabelRule::Humanize { max_chars: None }))
        .then(Step::select(&[("id", "id"), ("profession", "profession")]))
        .then(Step::dedupe(&["profession"]))
        .then(Step::sort("profession"));

    TableDefinition::new(
        TableName::Professions,
        SourceFile::NameBasics,
        ReadRequest::named(["primaryProfession"]).projection,
        plan,
    )
    .with_description("Distinct professions")
}
