// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Tree building - turns a resolved section list into a forest of section trees.

One arena node is created per section, so node ids equal section indices and
a section list and its forest stay cross-referenceable for free. Only edges
inside neurites are wired: a section whose parent lies before the first trunk
(soma ancestry) stays parentless in the arena.
*/

use crate::{ReconstructionError, ReconstructionResult, SectionDataWrapper};
use neurite_structures::{Neurite, NeuriteKind, NodeId, PointTable, SectionTree};
use std::sync::Arc;
use tracing::debug;

/// Per-trunk fix-up applied after construction, e.g. stripping a duplicated
/// leading soma point for formats known to include one. Implementations may
/// only edit the trunk's own row list, never the topology.
pub type TrunkFixup = fn(&mut SectionTree, NodeId, &PointTable);

/// Walks every section's ancestry with a bounded number of steps.
///
/// The parent relation must form a forest; a chain longer than the section
/// count proves a cycle without recursing.
fn validate_ancestry(wrapper: &SectionDataWrapper) -> ReconstructionResult<()> {
    let sections = wrapper.sections();
    let limit = sections.len();
    for index in 0..sections.len() {
        let mut current = index;
        let mut steps = 0;
        while let Some(parent) = sections[current].parent {
            if parent >= sections.len() {
                return Err(ReconstructionError::Internal(format!(
                    "section {} references out-of-range parent {}",
                    current, parent
                )));
            }
            steps += 1;
            if steps > limit {
                return Err(ReconstructionError::CyclicStructure { section: index });
            }
            current = parent;
        }
    }
    Ok(())
}

/// Builds the section forest for the given trunk sections.
///
/// Returns the trunk node ids (in the given discovery order) and the arena
/// holding one node per section. An empty trunk list is a valid outcome for
/// morphologies without neurites and yields empty outputs.
///
/// # Errors
/// * [`ReconstructionError::CyclicStructure`] when ancestry does not terminate
/// * [`ReconstructionError::DisabledSection`] when a tombstone slipped through
/// * [`NeuriteDataError::UnknownTypeTag`](neurite_structures::NeuriteDataError)
///   when a section carries an unrecognized type tag
pub fn build_forest(
    wrapper: &SectionDataWrapper,
    trunk_sections: &[usize],
    fixup: Option<TrunkFixup>,
) -> ReconstructionResult<(Vec<NodeId>, SectionTree)> {
    if trunk_sections.is_empty() {
        return Ok((Vec::new(), SectionTree::new()));
    }

    validate_ancestry(wrapper)?;

    let sections = wrapper.sections();
    if let Some(&bad) = trunk_sections.iter().find(|&&t| t >= sections.len()) {
        return Err(neurite_structures::NeuriteDataError::BadParameters(format!(
            "trunk section {} is out of range for {} sections",
            bad,
            sections.len()
        ))
        .into());
    }
    let start = trunk_sections.iter().copied().min().unwrap_or(0);

    // one pass over sections to build nodes
    let mut tree = SectionTree::with_capacity(sections.len());
    for (index, section) in sections.iter().enumerate() {
        if section.is_disabled() {
            return Err(ReconstructionError::DisabledSection { index });
        }
        let kind = NeuriteKind::from_tag(section.type_tag)?;
        tree.push_node(index, kind, section.point_rows.clone());
    }

    // one pass over nodes to connect children to parents; edges reaching
    // below the first trunk would cross into soma ancestry and stay unwired
    for (index, section) in sections.iter().enumerate() {
        if let Some(parent) = section.parent {
            if parent >= start {
                tree.attach_child(parent, index);
            }
        }
    }

    if let Some(fixup) = fixup {
        for &trunk in trunk_sections {
            fixup(&mut tree, trunk, wrapper.table());
        }
    }

    debug!(
        nodes = tree.len(),
        trunks = trunk_sections.len(),
        "built section forest"
    );

    Ok((trunk_sections.to_vec(), tree))
}

/// Builds the forest and wraps each trunk into a [`Neurite`].
///
/// The arena is frozen behind an `Arc` shared by every neurite, so the
/// per-neurite point blocks can be assembled lazily later.
pub fn build_neurites(
    wrapper: &SectionDataWrapper,
    trunk_sections: &[usize],
    fixup: Option<TrunkFixup>,
) -> ReconstructionResult<(Vec<Neurite>, Arc<SectionTree>)> {
    let (trunks, tree) = build_forest(wrapper, trunk_sections, fixup)?;
    let tree = Arc::new(tree);
    let table = wrapper.shared_table();
    let neurites = trunks
        .iter()
        .map(|&trunk| Neurite::new(Arc::clone(&tree), Arc::clone(&table), trunk))
        .collect();
    Ok((neurites, tree))
}
