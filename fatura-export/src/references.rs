//! Category reference table.
//!
//! From an already-categorised transaction sheet, derive one category per
//! `(description, comment, who)` key. Keys that were categorised two
//! different ways are conflicts and must be fixed by hand first.

use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Write};

use crate::ReferenceError;

pub const COL_DESCRIPTION: &str = "Descrição";
pub const COL_COMMENT: &str = "Comentário";
pub const COL_WHO: &str = "Quem";
pub const COL_CATEGORY: &str = "Categoria";

pub const REFERENCE_HEADER: [&str; 4] = [COL_DESCRIPTION, COL_COMMENT, COL_WHO, COL_CATEGORY];

/// A key that maps to more than one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceConflict {
    pub description: String,
    pub comment: String,
    pub who: String,
    /// Distinct categories, first-seen order.
    pub categories: Vec<String>,
}

impl fmt::Display for ReferenceConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:?}, {:?}, {:?}) has categories: {}",
            self.description,
            self.comment,
            self.who,
            self.categories.join(", ")
        )
    }
}

type Key = (String, String, String);

/// Build the reference table (header row first).
///
/// Rows without a category are skipped. Missing description/comment/who
/// columns read as empty; a missing category column is an error.
pub fn generate_references(
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<Vec<Vec<String>>, ReferenceError> {
    if rows.is_empty() {
        return Err(ReferenceError::MissingData);
    }

    let col = |name: &str| headers.iter().position(|h| h.trim() == name);
    let col_category =
        col(COL_CATEGORY).ok_or_else(|| ReferenceError::MissingColumn(COL_CATEGORY.to_string()))?;
    let col_description = col(COL_DESCRIPTION);
    let col_comment = col(COL_COMMENT);
    let col_who = col(COL_WHO);

    let cell = |row: &[String], idx: Option<usize>| -> String {
        idx.and_then(|i| row.get(i)).cloned().unwrap_or_default()
    };

    // first-seen order of keys, and all categories seen per key
    let mut order: Vec<Key> = Vec::new();
    let mut seen: HashMap<Key, Vec<String>> = HashMap::new();

    for row in rows {
        let category = cell(row, Some(col_category));
        if category.is_empty() {
            continue;
        }
        let key = (
            cell(row, col_description),
            cell(row, col_comment),
            cell(row, col_who),
        );
        let categories = seen.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    let mut table = vec![REFERENCE_HEADER.iter().map(|h| h.to_string()).collect()];
    let mut conflicts = Vec::new();

    for key in order {
        let categories = seen.remove(&key).unwrap_or_default();
        let (description, comment, who) = key;
        if categories.len() > 1 {
            conflicts.push(ReferenceConflict {
                description,
                comment,
                who,
                categories,
            });
            continue;
        }
        let category = categories.into_iter().next().unwrap_or_default();
        table.push(vec![description, comment, who, category]);
    }

    if !conflicts.is_empty() {
        return Err(ReferenceError::Conflicts(conflicts));
    }

    Ok(table)
}

/// Read a sheet export: first record is the header row.
pub fn read_table<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Vec<String>>), ReferenceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut records = rdr.records();
    let headers = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Err(ReferenceError::MissingData),
    };

    let mut rows = Vec::new();
    for record in records {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    Ok((headers, rows))
}

pub fn write_table<W: Write>(writer: W, table: &[Vec<String>]) -> Result<(), ReferenceError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in table {
        wtr.write_record(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
