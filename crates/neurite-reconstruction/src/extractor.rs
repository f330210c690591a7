// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Section extraction - partitions a flat point table into contiguous runs.

A single scan over the table in row order accumulates runs of points whose
parents are contiguous. Points whose child count differs from one (leaves and
branch points) end the running section; a point whose parent is not the last
accumulated point opens a discontinuity, handled by seeding a two-point bridge
section that the gap resolver later folds away.
*/

use crate::{ReconstructionError, ReconstructionResult};
use ahash::{AHashMap, AHashSet};
use neurite_structures::{PointTable, SectionDescriptor};
use tracing::debug;

/// Output of the extraction scan.
#[derive(Clone, Debug, Default)]
pub struct ExtractedSections {
    /// Section descriptors in discovery order, parents resolved.
    pub sections: Vec<SectionDescriptor>,
    /// Indices of bridge sections created at discontinuities.
    pub gap_bridges: AHashSet<usize>,
}

/// Rows that end a section: points with no children or more than one child.
fn section_end_rows(table: &PointTable) -> AHashSet<usize> {
    let mut child_counts = vec![0u32; table.len()];
    for row in 0..table.len() {
        if let Some(parent) = table.parent_row(row) {
            child_counts[parent] += 1;
        }
    }
    (0..table.len())
        .filter(|&row| child_counts[row] != 1)
        .collect()
}

/// Partitions `table` into sections in one scan.
///
/// Every non-root section is seeded with its parent's boundary row, so the
/// boundary point is shared between the parent/child pair and each section is
/// independently walkable. An empty table yields an empty result.
///
/// # Errors
/// [`ReconstructionError::UnresolvedSectionParent`] when a section's seed row
/// terminates no section, which only happens for structurally corrupt input.
pub fn extract_sections(table: &PointTable) -> ReconstructionResult<ExtractedSections> {
    if table.is_empty() {
        return Ok(ExtractedSections::default());
    }

    let mut end_rows = section_end_rows(table);

    let mut sections: Vec<SectionDescriptor> = vec![SectionDescriptor::new()];
    // seed row of each section (None for table roots), kept for parent lookup
    let mut seed_rows: Vec<Option<usize>> = vec![None];
    // last row of each closed section -> section index
    let mut ends_at: AHashMap<usize, usize> = AHashMap::new();
    let mut gap_bridges: AHashSet<usize> = AHashSet::new();

    for row in 0..table.len() {
        let parent = table.parent_row(row);
        let current = sections.len() - 1;

        if sections[current].point_rows.is_empty() {
            // first point of a fresh section: push its parent first so the
            // section starts with the shared boundary row
            seed_rows[current] = parent;
            if let Some(p) = parent {
                sections[current].point_rows.push(p);
            }
            sections[current].type_tag = table.type_tag(row);
        }

        let gap = match (parent, sections[current].point_rows.last()) {
            (Some(p), Some(&last)) => p != last,
            (None, Some(_)) => true, // a parentless point interrupting a run
            (_, None) => false,      // section was just seeded for this point
        };

        if gap {
            // discontinuity target: force a boundary here
            end_rows.insert(row);
        } else {
            sections[current].point_rows.push(row);
        }

        if end_rows.contains(&row) {
            if let Some(&last) = sections[current].point_rows.last() {
                ends_at.insert(last, current);
            }
            if gap {
                // the discontinuity becomes its own two-point bridge section
                // [gap parent, point], closed immediately; the gap resolver
                // folds it into whichever section continues from `row`
                let bridge = sections.len();
                sections.push(SectionDescriptor::new());
                seed_rows.push(parent);
                if let Some(p) = parent {
                    sections[bridge].point_rows.push(p);
                }
                sections[bridge].point_rows.push(row);
                sections[bridge].type_tag = table.type_tag(row);
                ends_at.insert(row, bridge);
                gap_bridges.insert(bridge);
            }
            sections.push(SectionDescriptor::new());
            seed_rows.push(None);
        }
    }

    // the scan always leaves one freshly opened section behind
    if sections.last().is_some_and(|s| s.point_rows.is_empty()) {
        sections.pop();
        seed_rows.pop();
    }

    // resolve every section's parent from the section ending at its seed row
    for (index, section) in sections.iter_mut().enumerate() {
        section.parent = match seed_rows[index] {
            None => None,
            Some(seed) => match ends_at.get(&seed) {
                Some(&parent_index) => Some(parent_index),
                None => {
                    return Err(ReconstructionError::UnresolvedSectionParent { section: index })
                }
            },
        };
    }

    debug!(
        sections = sections.len(),
        gap_bridges = gap_bridges.len(),
        "extracted sections"
    );

    Ok(ExtractedSections {
        sections,
        gap_bridges,
    })
}
