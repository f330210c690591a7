// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Format dispatch - resolves a file path to its reader strategy once, at load
time.

Each supported format pairs a table reader with an optional per-trunk fix-up
applied after tree construction. SWC files duplicate the soma point at the
head of every trunk section, so their fix-up strips it.
*/

use crate::{swc, LoadError, LoadResult};
use neurite_reconstruction::TrunkFixup;
use neurite_structures::{NeuriteKind, NodeId, PointTable, SectionTree};
use std::path::Path;

/// The closed set of morphology file formats this crate can read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    /// Whitespace-separated point list (`.swc`)
    Swc,
}

impl FileFormat {
    /// Resolves a format from a file extension.
    ///
    /// # Errors
    /// [`LoadError::UnsupportedFormat`] for unknown extensions.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "swc" => Ok(FileFormat::Swc),
            _ => Err(LoadError::UnsupportedFormat(extension)),
        }
    }

    /// Reads `path` into a point table with this format's reader.
    pub fn read(self, path: &Path) -> LoadResult<PointTable> {
        match self {
            FileFormat::Swc => swc::read_file(path),
        }
    }

    /// The post-construction trunk fix-up this format requires, if any.
    pub fn trunk_fixup(self) -> Option<TrunkFixup> {
        match self {
            FileFormat::Swc => Some(strip_soma_initial_point),
        }
    }
}

/// Removes a trunk's leading point when it is soma-typed.
///
/// SWC trunk sections start with the soma point they hang off; the point
/// belongs to the soma, not the neurite, so it must not surface in the
/// neurite's point block.
fn strip_soma_initial_point(tree: &mut SectionTree, trunk: NodeId, table: &PointTable) {
    if let Some(node) = tree.get_mut(trunk) {
        if node
            .point_rows
            .first()
            .is_some_and(|&row| table.type_tag(row) == NeuriteKind::Soma.tag())
        {
            node.point_rows.remove(0);
        }
    }
}
