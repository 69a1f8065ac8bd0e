//! Tables read from `title.basics` (and the episode and alternate-title
//! sources that are filtered against it).

use imdb_ingest::{NULL_TOKEN, Projection, ReadRequest};
use imdb_model::{SourceFile, TableName};
use imdb_transform::{CastKind, JoinSpec, LabelRule, ListFormat, Step, TITLE_TYPE_LABELS, TransformPlan};

use crate::rule::{Lookup, TableDefinition};

const STRICT_INT: CastKind = CastKind::Int64 { strict: true };

fn named(columns: &[&str]) -> Projection {
    ReadRequest::named(columns.iter().copied()).projection
}

/// The title key set, used to filter dependent sources.
pub(crate) fn title_keys(left_on: &str) -> Lookup {
    Lookup::new(
        SourceFile::TitleBasics,
        named(&["tconst"]),
        JoinSpec::inner(left_on, "tconst"),
    )
}

pub fn titles() -> TableDefinition {
    let columns = named(&[
        "tconst",
        "titleType",
        "primaryTitle",
        "isAdult",
        "startYear",
        "endYear",
        "runtimeMinutes",
        "genres",
    ]);
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::derive_id("titleType", "type_id"))
        .then(Step::derive_id("genres", "genre_id"))
        .then(Step::select(&[
            ("tconst", "id"),
            ("primaryTitle", "name"),
            ("type_id", "type_id"),
            ("genre_id", "genre_id"),
            ("isAdult", "is_adult"),
            ("startYear", "start_year"),
            ("endYear", "end_year"),
            ("averageRating", "average_rating"),
            ("numVotes", "number_of_votes"),
            ("runtimeMinutes", "runtime_minutes"),
        ]))
        .then(Step::dedupe(&["id"]))
        .then(Step::sort("name"))
        .then(Step::cast(&[
            ("is_adult", CastKind::Boolean),
            ("start_year", STRICT_INT),
            ("end_year", STRICT_INT),
            ("average_rating", CastKind::Float64),
            ("number_of_votes", STRICT_INT),
            // Some rows carry text in the runtime field.
            ("runtime_minutes", CastKind::Int64 { strict: false }),
        ]));

    TableDefinition::new(TableName::Titles, SourceFile::TitleBasics, columns, plan)
        .with_description("Titles with ratings, one row per title")
        .with_lookup(Lookup::new(
            SourceFile::TitleRatings,
            Projection::All,
            JoinSpec::left("tconst", "tconst"),
        ))
}

pub fn types() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::drop_nulls(&["titleType"]))
        .then(Step::derive_id("titleType", "id"))
        .then(Step::relabel("titleType", LabelRule::Lookup(TITLE_TYPE_LABELS)))
        .then(Step::select(&[("id", "id"), ("titleType", "type")]))
        .then(Step::dedupe(&["id"]))
        .then(Step::sort("type"));

    TableDefinition::new(
        TableName::Types,
        SourceFile::TitleBasics,
        named(&["titleType"]),
        plan,
    )
    .with_description("Distinct title kinds with display labels")
}

pub fn episodes() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::drop_nulls(&["seasonNumber", "episodeNumber"]))
        .then(Step::select(&[
            ("tconst", "id"),
            ("parentTconst", "episode_id"),
            ("seasonNumber", "season_number"),
            ("episodeNumber", "episode_number"),
        ]))
        .then(Step::dedupe(&["id", "episode_id"]))
        .then(Step::cast(&[
            ("season_number", STRICT_INT),
            ("episode_number", STRICT_INT),
        ]));

    TableDefinition::new(
        TableName::Episodes,
        SourceFile::TitleEpisode,
        named(&["tconst", "parentTconst", "seasonNumber", "episodeNumber"]),
        plan,
    )
    .with_description("Episode to parent series links with season and episode numbers")
    .with_lookup(title_keys("tconst"))
}

pub fn names() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::drop_nulls(&["titleId"]))
        .then(Step::select(&[
            ("titleId", "id"),
            ("ordering", "ordering"),
            ("title", "name"),
            ("region", "region"),
            ("language", "language"),
            ("isOriginalTitle", "is_original_title"),
        ]))
        .then(Step::dedupe(&["id", "ordering"]))
        .then(Step::sort("name"))
        .then(Step::cast(&[
            ("ordering", STRICT_INT),
            ("is_original_title", CastKind::Boolean),
        ]));

    TableDefinition::new(
        TableName::Names,
        SourceFile::TitleAkas,
        named(&[
            "titleId",
            "ordering",
            "title",
            "region",
            "language",
            "isOriginalTitle",
        ]),
        plan,
    )
    .with_description("Localized alternate titles")
    .with_lookup(title_keys("titleId"))
}

pub fn titles_genres() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::explode("genres", "genre", ListFormat::Delimited(',')))
        .then(Step::derive_id("genre", "genre_id"))
        .then(Step::select(&[("tconst", "id"), ("genre_id", "genre_id")]))
        .then(Step::dedupe(&["id", "genre_id"]));

    TableDefinition::new(
        TableName::TitlesGenres,
        SourceFile::TitleBasics,
        named(&["tconst", "genres"]),
        plan,
    )
    .with_description("Title to genre membership")
}

pub fn genres() -> TableDefinition {
    let plan = TransformPlan::new()
        .then(Step::normalize_nulls(NULL_TOKEN))
        .then(Step::explode("genres", "genre", ListFormat::Delimited(',')))
        .then(Step::derive_id("genre", "id"))
        .then(Step::select(&[("id", "id"), ("genre", "genre")]))
        .then(Step::dedupe(&["genre"]))
        .then(Step::sort("genre"));

    TableDefinition::new(
        TableName::Genres,
        SourceFile::TitleBasics,
        named(&["genres"]),
        plan,
    )
    .with_description("Distinct genres")
}
