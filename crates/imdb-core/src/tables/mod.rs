//! The standard table definitions.

mod persons;
mod principals;
mod titles;

pub use persons::{persons, persons_professions, professions};
pub use principals::{
    JOB_LABEL_CHARS, categories, characters, jobs, principals, principals_characters,
};
pub use titles::{episodes, genres, names, titles, titles_genres, types};

use imdb_model::TableName;

use crate::rule::TableDefinition;

/// The standard rule for `table`.
pub fn definition(table: TableName) -> TableDefinition {
    match table {
        TableName::Titles => titles(),
        TableName::Types => types(),
        TableName::Episodes => episodes(),
        TableName::Names => names(),
        TableName::TitlesGenres => titles_genres(),
        TableName::Genres => genres(),
        TableName::Principals => principals(),
        TableName::PrincipalsCharacters => principals_characters(),
        TableName::Characters => characters(),
        TableName::Persons => persons(),
        TableName::PersonsProfessions => persons_professions(),
        TableName::Professions => professions(),
        TableName::Categories => categories(),
        TableName::Jobs => jobs(),
    }
}

/// All fourteen rules in pipeline order.
pub fn standard_tables() -> Vec<TableDefinition> {
    TableName::ALL.into_iter().map(definition).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_has_a_definition() {
        for table in TableName::ALL {
            assert_eq!(definition(table).table, table);
        }
    }

    #[test]
    fn test_batched_tables() {
        let batched: Vec<TableName> = standard_tables()
            .into_iter()
            .filter(|definition| definition.batched)
            .map(|definition| definition.table)
            .collect();
        assert_eq!(
            batched,
            vec![
                TableName::Principals,
                TableName::PrincipalsCharacters,
                TableName::Characters
            ]
        );
    }

    #[test]
    fn test_null_normalization_runs_first() {
        for definition in standard_tables() {
            assert_eq!(
                definition.plan.step_names().first(),
                Some(&"normalize_nulls"),
                "{}",
                definition.table
            );
        }
    }
}
