// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Section data wrapper - a point table together with its resolved sections.
*/

use crate::extractor::extract_sections;
use crate::gaps::resolve_gaps;
use crate::ReconstructionResult;
use ahash::AHashSet;
use ndarray::Array2;
use neurite_structures::{NeuriteKind, PointTable, SectionDescriptor};
use std::sync::Arc;

/// A raw point table plus the section partition over it.
///
/// Readers hand one of these to the tree builder. Formats without native
/// structure information use [`SectionDataWrapper::from_table`], which runs
/// the full extraction scan; formats that store their section layout on disk
/// use [`SectionDataWrapper::with_sections`] and bypass extraction.
#[derive(Clone, Debug)]
pub struct SectionDataWrapper {
    table: Arc<PointTable>,
    sections: Vec<SectionDescriptor>,
}

impl SectionDataWrapper {
    /// Partitions `table` from scratch: extraction scan plus gap resolution.
    pub fn from_table(table: Arc<PointTable>) -> ReconstructionResult<Self> {
        let extracted = extract_sections(&table)?;
        let sections = resolve_gaps(extracted.sections, &extracted.gap_bridges)?;
        Ok(SectionDataWrapper { table, sections })
    }

    /// Accepts pre-extracted sections. Disabled placeholders are compacted
    /// away so downstream indices stay dense.
    pub fn with_sections(
        table: Arc<PointTable>,
        sections: Vec<SectionDescriptor>,
    ) -> ReconstructionResult<Self> {
        let sections = resolve_gaps(sections, &AHashSet::new())?;
        Ok(SectionDataWrapper { table, sections })
    }

    /// The resolved section partition.
    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    /// The underlying point table.
    pub fn table(&self) -> &PointTable {
        &self.table
    }

    /// Shared handle to the underlying point table.
    pub fn shared_table(&self) -> Arc<PointTable> {
        Arc::clone(&self.table)
    }

    /// Section indices of the initial neurite sections: sections rooted in a
    /// soma-typed section while not being soma-typed themselves.
    pub fn neurite_trunks(&self) -> Vec<usize> {
        let soma = NeuriteKind::Soma.tag();
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, section)| {
                section.type_tag != soma
                    && section.parent.is_some_and(|parent| {
                        self.sections
                            .get(parent)
                            .is_some_and(|p| p.type_tag == soma)
                    })
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// The `[x, y, z, radius]` rows of all soma-tagged points.
    pub fn soma_points(&self) -> Array2<f64> {
        let rows = self.table.soma_rows();
        let mut block = Array2::zeros((rows.len(), 4));
        for (i, &row) in rows.iter().enumerate() {
            let xyzr = self.table.xyzr(row);
            for (j, value) in xyzr.iter().enumerate() {
                block[[i, j]] = *value;
            }
        }
        block
    }
}
