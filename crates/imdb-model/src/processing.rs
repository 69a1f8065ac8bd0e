use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::table::TableName;

/// Outcome of one table rule: rows written and the files holding them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableName,
    pub rows: usize,
    pub partitions: Vec<PathBuf>,
}

impl TableReport {
    pub fn new(table: TableName) -> Self {
        Self {
            table,
            rows: 0,
            partitions: Vec::new(),
        }
    }

    /// Records one written partition.
    pub fn push_partition(&mut self, path: PathBuf, rows: usize) {
        self.rows += rows;
        self.partitions.push(path);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub tables: Vec<TableReport>,
    pub duration_ms: u128,
}

impl RunReport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|table| table.rows).sum()
    }

    pub fn total_partitions(&self) -> usize {
        self.tables.iter().map(|table| table.partitions.len()).sum()
    }
}
