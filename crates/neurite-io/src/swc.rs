// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
SWC reader - the standard whitespace-separated point-list format.

Each data line carries `id type x y z radius parent`; `#` starts a comment
that runs to the end of the line. Points are kept in file order, so the
reconstruction scan sees exactly the traversal the file was written in.
*/

use crate::{LoadError, LoadResult};
use ndarray::Array2;
use neurite_structures::{point_table::col, PointTable};
use std::path::Path;

/// Parses SWC text into a point table.
///
/// # Errors
/// [`LoadError::Parse`] with a 1-based line number for malformed lines, and
/// any [`PointTable::new`] validation failure for structural problems
/// (duplicate ids, unresolvable parents).
pub fn read_str(text: &str) -> LoadResult<PointTable> {
    let mut flat: Vec<f64> = Vec::new();
    let mut count = 0;

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != col::COUNT {
            return Err(LoadError::Parse {
                line: index + 1,
                reason: format!("expected {} fields, got {}", col::COUNT, fields.len()),
            });
        }

        let mut values = [0.0f64; col::COUNT];
        for (field, value) in fields.iter().zip(values.iter_mut()) {
            *value = field.parse().map_err(|_| LoadError::Parse {
                line: index + 1,
                reason: format!("invalid number {:?}", field),
            })?;
        }

        // file order is id type x y z r parent; table order is x y z r type id parent
        let [id, type_tag, x, y, z, radius, parent] = values;
        flat.extend_from_slice(&[x, y, z, radius, type_tag, id, parent]);
        count += 1;
    }

    let data = Array2::from_shape_vec((count, col::COUNT), flat)
        .expect("row count tracks the flat buffer");
    Ok(PointTable::new(data)?)
}

/// Reads an SWC file into a point table.
pub fn read_file(path: impl AsRef<Path>) -> LoadResult<PointTable> {
    let text = std::fs::read_to_string(path)?;
    read_str(&text)
}
