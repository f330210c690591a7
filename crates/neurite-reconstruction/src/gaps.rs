// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Gap resolution - folds discontinuity bridges back into real sections.

The extractor stitches every discontinuity with an artificial two-point
bridge section. Here each bridge is merged into the section that continues
from its endpoint, so bridges never surface as tree nodes of their own, and
the surviving sections are compacted so no tombstone reaches the tree
builder.
*/

use crate::{ReconstructionError, ReconstructionResult};
use ahash::{AHashMap, AHashSet};
use neurite_structures::SectionDescriptor;
use tracing::debug;

/// Merges gap bridges into their continuing sections and compacts the list.
///
/// For every section whose parent is a bridge, the bridge's rows become the
/// section's prefix and the section inherits the bridge's type and parent;
/// the bridge is tombstoned and finally removed, with all parent indices
/// remapped to the compacted list.
///
/// # Errors
/// * [`ReconstructionError::AmbiguousGapBridge`] if two sections claim the
///   same bridge; legal input cannot produce this shape, so it is treated as
///   corrupt rather than silently picking one continuation.
pub fn resolve_gaps(
    mut sections: Vec<SectionDescriptor>,
    gap_bridges: &AHashSet<usize>,
) -> ReconstructionResult<Vec<SectionDescriptor>> {
    let mut merged_into: AHashMap<usize, usize> = AHashMap::new();

    for index in 0..sections.len() {
        if sections[index].is_disabled() {
            continue;
        }
        // a merge can expose another bridge as the new parent, so keep
        // folding until the ancestry is real
        while let Some(parent) = sections[index].parent {
            if !gap_bridges.contains(&parent) {
                break;
            }
            if let Some(&first) = merged_into.get(&parent) {
                return Err(ReconstructionError::AmbiguousGapBridge {
                    bridge: parent,
                    first,
                    second: index,
                });
            }
            let mut bridge = std::mem::take(&mut sections[parent]);
            sections[index].absorb_bridge(&mut bridge);
            sections[parent] = bridge;
            merged_into.insert(parent, index);
        }
    }

    if !merged_into.is_empty() {
        debug!(merged = merged_into.len(), "folded gap bridges");
    }

    compact(sections)
}

/// Drops tombstoned sections and remaps the surviving parent indices.
fn compact(sections: Vec<SectionDescriptor>) -> ReconstructionResult<Vec<SectionDescriptor>> {
    let mut remap: Vec<Option<usize>> = Vec::with_capacity(sections.len());
    let mut kept = 0;
    for section in &sections {
        if section.is_disabled() {
            remap.push(None);
        } else {
            remap.push(Some(kept));
            kept += 1;
        }
    }
    if kept == sections.len() {
        return Ok(sections);
    }

    let mut compacted = Vec::with_capacity(kept);
    for (index, mut section) in sections.into_iter().enumerate() {
        if remap[index].is_none() {
            continue;
        }
        section.parent = match section.parent {
            None => None,
            Some(parent) => match remap.get(parent).copied().flatten() {
                Some(new_parent) => Some(new_parent),
                None => {
                    // a surviving section still points at a tombstone
                    return Err(ReconstructionError::Internal(format!(
                        "section {} kept a parent link to disabled section {}",
                        index, parent
                    )));
                }
            },
        };
        compacted.push(section);
    }
    Ok(compacted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_sections;
    use neurite_structures::PointTable;
    use ndarray::Array2;

    fn table(rows: &[[f64; 7]]) -> PointTable {
        let mut data = Array2::zeros((rows.len(), 7));
        for (i, row) in rows.iter().enumerate() {
            let [id, ty, x, y, z, r, parent] = *row;
            data[[i, 0]] = x;
            data[[i, 1]] = y;
            data[[i, 2]] = z;
            data[[i, 3]] = r;
            data[[i, 4]] = ty;
            data[[i, 5]] = id;
            data[[i, 6]] = parent;
        }
        PointTable::new(data).unwrap()
    }

    fn section(rows: &[usize], type_tag: u32, parent: Option<usize>) -> SectionDescriptor {
        SectionDescriptor {
            point_rows: rows.to_vec(),
            type_tag,
            parent,
        }
    }

    #[test]
    fn test_no_bridges_is_identity() {
        let sections = vec![
            section(&[0, 1, 2], 2, None),
            section(&[2, 3], 2, Some(0)),
            section(&[2, 4], 2, Some(0)),
        ];
        let resolved = resolve_gaps(sections.clone(), &AHashSet::new()).unwrap();
        assert_eq!(resolved, sections);
    }

    #[test]
    fn test_bridge_is_folded_and_compacted() {
        let sections = vec![
            section(&[0, 1], 2, None),
            section(&[1, 2], 2, Some(0)),
            section(&[1, 3], 2, Some(0)), // bridge
            section(&[3, 4], 2, Some(2)),
            section(&[2, 5], 2, Some(1)),
        ];
        let bridges: AHashSet<usize> = [2].into_iter().collect();

        let resolved = resolve_gaps(sections, &bridges).unwrap();

        assert_eq!(resolved.len(), 4);
        assert_eq!(resolved[0], section(&[0, 1], 2, None));
        assert_eq!(resolved[1], section(&[1, 2], 2, Some(0)));
        // the continuation absorbed the bridge and begins at the gap parent
        assert_eq!(resolved[2], section(&[1, 3, 4], 2, Some(0)));
        // the later section's parent index was remapped after compaction
        assert_eq!(resolved[3], section(&[2, 5], 2, Some(1)));
    }

    #[test]
    fn test_unconsumed_leaf_bridge_survives() {
        // a bridge whose endpoint has no continuation is a real leaf section
        let sections = vec![
            section(&[0, 1, 2], 2, None),
            section(&[1, 3], 2, Some(0)),
        ];
        let bridges: AHashSet<usize> = [1].into_iter().collect();

        let resolved = resolve_gaps(sections.clone(), &bridges).unwrap();
        assert_eq!(resolved, sections);
    }

    #[test]
    fn test_ambiguous_bridge_is_an_error() {
        let sections = vec![
            section(&[0, 1], 2, None),
            section(&[1, 3], 2, Some(0)), // bridge
            section(&[3, 4], 2, Some(1)),
            section(&[3, 5], 2, Some(1)),
        ];
        let bridges: AHashSet<usize> = [1].into_iter().collect();

        let err = resolve_gaps(sections, &bridges).unwrap_err();
        assert!(matches!(
            err,
            ReconstructionError::AmbiguousGapBridge {
                bridge: 1,
                first: 2,
                second: 3
            }
        ));
    }

    #[test]
    fn test_scenario_with_discontinuity_end_to_end() {
        // A-B-C run interrupted at C by E (child of branch point B); E's run
        // continues immediately, C's continuation arrives last
        let extracted = extract_sections(&table(&[
            [1.0, 2.0, 0.0, 0.0, 0.0, 1.0, -1.0],
            [2.0, 2.0, 1.0, 0.0, 0.0, 1.0, 1.0],
            [3.0, 2.0, 2.0, 0.0, 0.0, 1.0, 2.0],
            [4.0, 2.0, 1.0, 1.0, 0.0, 1.0, 2.0],
            [5.0, 2.0, 1.0, 2.0, 0.0, 1.0, 4.0],
            [6.0, 2.0, 3.0, 0.0, 0.0, 1.0, 3.0],
        ]))
        .unwrap();

        let resolved = resolve_gaps(extracted.sections, &extracted.gap_bridges).unwrap();

        // no disabled section left behind, and no two-point bridge survives
        // as an independent section
        assert_eq!(resolved.len(), 4);
        for section in &resolved {
            assert!(!section.is_disabled());
        }
        // the bridged section's rows begin with the gap's parent directly
        assert_eq!(resolved[2].point_rows, vec![1, 3, 4]);
        assert_eq!(resolved[2].parent, Some(0));
        assert_eq!(resolved[3].point_rows, vec![2, 5]);
        assert_eq!(resolved[3].parent, Some(1));
    }

    #[test]
    fn test_chained_gaps_fold_transitively() {
        // a scrambled single path A-B-C-E-D-F: two discontinuities whose
        // bridges chain onto each other
        let extracted = extract_sections(&table(&[
            [1.0, 2.0, 0.0, 0.0, 0.0, 1.0, -1.0],
            [2.0, 2.0, 1.0, 0.0, 0.0, 1.0, 1.0],
            [3.0, 2.0, 2.0, 0.0, 0.0, 1.0, 2.0],
            [4.0, 2.0, 4.0, 0.0, 0.0, 1.0, 5.0],
            [5.0, 2.0, 3.0, 0.0, 0.0, 1.0, 3.0],
            [6.0, 2.0, 5.0, 0.0, 0.0, 1.0, 4.0],
        ]))
        .unwrap();
        assert_eq!(extracted.gap_bridges.len(), 2);

        let resolved = resolve_gaps(extracted.sections, &extracted.gap_bridges).unwrap();

        for section in &resolved {
            assert!(!section.is_disabled());
        }
        // every point is covered exactly once modulo shared boundary rows
        let mut covered: Vec<usize> = resolved
            .iter()
            .flat_map(|s| s.point_rows.iter().copied())
            .collect();
        covered.sort_unstable();
        covered.dedup();
        assert_eq!(covered, vec![0, 1, 2, 3, 4, 5]);
    }
}
