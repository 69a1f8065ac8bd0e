//! Names of the source snapshot files and of the normalized output tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Plain-text source files expected in the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceFile {
    TitleBasics,
    TitleRatings,
    TitleEpisode,
    TitleAkas,
    TitlePrincipals,
    NameBasics,
}

impl SourceFile {
    /// Download order used by the fetcher.
    pub const ALL: [SourceFile; 6] = [
        SourceFile::TitleRatings,
        SourceFile::TitleEpisode,
        SourceFile::NameBasics,
        SourceFile::TitleBasics,
        SourceFile::TitleAkas,
        SourceFile::TitlePrincipals,
    ];

    /// Decompressed file name, e.g. `title.basics.tsv`.
    pub fn file_name(self) -> &'static str {
        match self {
            SourceFile::TitleBasics => "title.basics.tsv",
            SourceFile::TitleRatings => "title.ratings.tsv",
            SourceFile::TitleEpisode => "title.episode.tsv",
            SourceFile::TitleAkas => "title.akas.tsv",
            SourceFile::TitlePrincipals => "title.principals.tsv",
            SourceFile::NameBasics => "name.basics.tsv",
        }
    }

    /// Published archive name, e.g. `title.basics.tsv.gz`.
    pub fn archive_name(self) -> String {
        format!("{}.gz", self.file_name())
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// The fourteen normalized output tables.
///
/// The variant name doubles as the output file stem (`Titles.parquet`,
/// `Principals_03.parquet`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableName {
    Titles,
    Types,
    Episodes,
    Names,
    TitlesGenres,
    Genres,
    Principals,
    PrincipalsCharacters,
    Characters,
    Persons,
    PersonsProfessions,
    Professions,
    Categories,
    Jobs,
}

impl TableName {
    /// Pipeline execution order.
    pub const ALL: [TableName; 14] = [
        TableName::Titles,
        TableName::Types,
        TableName::Episodes,
        TableName::Names,
        TableName::TitlesGenres,
        TableName::Genres,
        TableName::Principals,
        TableName::PrincipalsCharacters,
        TableName::Characters,
        TableName::Persons,
        TableName::PersonsProfessions,
        TableName::Professions,
        TableName::Categories,
        TableName::Jobs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableName::Titles => "Titles",
            TableName::Types => "Types",
            TableName::Episodes => "Episodes",
            TableName::Names => "Names",
            TableName::TitlesGenres => "TitlesGenres",
            TableName::Genres => "Genres",
            TableName::Principals => "Principals",
            TableName::PrincipalsCharacters => "PrincipalsCharacters",
            TableName::Characters => "Characters",
            TableName::Persons => "Persons",
            TableName::PersonsProfessions => "PersonsProfessions",
            TableName::Professions => "Professions",
            TableName::Categories => "Categories",
            TableName::Jobs => "Jobs",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        TableName::ALL
            .into_iter()
            .find(|table| table.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownTable(trimmed.to_string()))
    }
}
