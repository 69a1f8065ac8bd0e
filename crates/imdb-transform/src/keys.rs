//! Surrogate key derivation.
//!
//! Keys are the lower-case hex MD5 digest of the value's UTF-8 bytes. Every
//! foreign key in the output refers to a key produced here, so the algorithm
//! must never change between runs.

use std::collections::HashMap;

use polars::prelude::{NamedFrom, Series, StringChunked};

use crate::error::{Result, TransformError};
use crate::labels::truncate_chars;

/// Hex digest of `value`.
pub fn hash_hex(value: &str) -> String {
    format!("{:x}", md5::compute(value.as_bytes()))
}

/// Derives a key from a possibly absent value.
///
/// Absence propagates: no real value can collide with a missing one.
pub fn derive_id(value: Option<&str>) -> Option<String> {
    value.map(hash_hex)
}

/// Derives the synthetic appearance key from three fields.
///
/// The fields are concatenated with no separator, so `("tt1", "2", "3")` and
/// `("tt1", "23", "")` share a key.
pub fn derive_composite_id(a: &str, b: &str, c: &str) -> String {
    let mut combined = String::with_capacity(a.len() + b.len() + c.len());
    combined.push_str(a);
    combined.push_str(b);
    combined.push_str(c);
    hash_hex(&combined)
}

/// Hashes every value of a text column, optionally truncating first.
///
/// Repeated values are hashed once.
pub fn derive_id_column(values: &StringChunked, into: &str, truncate: Option<usize>) -> Series {
    let mut memo: HashMap<&str, String> = HashMap::new();
    let ids: Vec<Option<String>> = values
        .into_iter()
        .map(|value| {
            value.map(|raw| {
                let raw = match truncate {
                    Some(max_chars) => truncate_chars(raw, max_chars),
                    None => raw,
                };
                memo.entry(raw).or_insert_with(|| hash_hex(raw)).clone()
            })
        })
        .collect();
    Series::new(into.into(), ids)
}

/// Composite key column.
///
/// The key is never absent: a row missing any part fails with
/// [`TransformError::MissingKeyPart`] naming the first absent column.
pub fn derive_composite_id_column(
    parts: [(&str, &StringChunked); 3],
    into: &str,
) -> Result<Series> {
    let [(a_name, a), (b_name, b), (c_name, c)] = parts;
    let missing = |column: &str, row: usize| TransformError::MissingKeyPart {
        column: column.to_string(),
        row,
    };
    let ids = a
        .into_iter()
        .zip(b)
        .zip(c)
        .enumerate()
        .map(|(row, ((a, b), c))| {
            let a = a.ok_or_else(|| missing(a_name, row))?;
            let b = b.ok_or_else(|| missing(b_name, row))?;
            let c = c.ok_or_else(|| missing(c_name, row))?;
            Ok(derive_composite_id(a, b, c))
        })
        .collect::<Result<Vec<String>>>()?;
    Ok(Series::new(into.into(), ids))
}
