// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
The morphology aggregate and the file loader that produces it.
*/

use crate::{FileFormat, LoadError, LoadResult};
use ndarray::Array2;
use neurite_reconstruction::{build_neurites, SectionDataWrapper, TrunkFixup};
use neurite_structures::{Neurite, SectionTree, Soma};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// A fully reconstructed morphology.
///
/// Loading is all-or-nothing: either every section, node and neurite of the
/// source file is here, or the load failed and nothing is returned.
#[derive(Debug)]
pub struct Morphology {
    /// Name of the morphology, the stem of the file it was loaded from.
    pub name: String,
    /// The soma point set.
    pub soma: Soma,
    /// One entry per trunk, in section discovery order.
    pub neurites: Vec<Neurite>,
    /// The full section forest, one node per section.
    pub tree: Arc<SectionTree>,
    /// `[x, y, z, radius]` rows of every point in the file, in file order.
    pub points: Array2<f64>,
    /// The raw table and section partition the trees were built from.
    pub data: SectionDataWrapper,
}

impl Morphology {
    /// Builds a morphology from an already-partitioned wrapper.
    ///
    /// This is the shared entry point behind every format: readers that
    /// partition from scratch and readers that ship their own sections both
    /// end up here, optionally with a format-specific trunk fix-up.
    pub fn from_wrapper(
        name: impl Into<String>,
        wrapper: SectionDataWrapper,
        fixup: Option<TrunkFixup>,
    ) -> LoadResult<Self> {
        let trunks = wrapper.neurite_trunks();
        let (neurites, tree) = build_neurites(&wrapper, &trunks, fixup)?;
        let soma = Soma::new(wrapper.soma_points());
        let points = wrapper.table().points().to_owned();
        debug!(
            neurites = neurites.len(),
            nodes = tree.len(),
            soma_points = soma.len(),
            "assembled morphology"
        );
        Ok(Morphology {
            name: name.into(),
            soma,
            neurites,
            tree,
            points,
            data: wrapper,
        })
    }

    /// Computes every neurite's point block up front, in parallel.
    ///
    /// Each trunk owns a disjoint subtree, so the per-neurite blocks are
    /// independent and the recomputation is embarrassingly parallel. Calling
    /// this is never required; it only moves the lazy cost off the first
    /// reader.
    pub fn warm_point_caches(&self) {
        self.neurites.par_iter().for_each(|neurite| {
            neurite.points();
        });
    }
}

/// Loads a morphology file, dispatching on its extension.
///
/// # Errors
/// All failures come back as [`LoadError::File`] naming `path`, wrapping the
/// reader, validation or reconstruction error underneath.
pub fn load_morphology(path: impl AsRef<Path>) -> LoadResult<Morphology> {
    let path = path.as_ref();
    load_morphology_inner(path).map_err(|error| error.in_file(path))
}

fn load_morphology_inner(path: &Path) -> LoadResult<Morphology> {
    let format = FileFormat::from_path(path)?;
    info!(file = %path.display(), ?format, "loading morphology");

    let table = Arc::new(format.read(path)?);
    let wrapper = SectionDataWrapper::from_table(table)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let morphology = Morphology::from_wrapper(name, wrapper, format.trunk_fixup())?;
    info!(
        name = %morphology.name,
        neurites = morphology.neurites.len(),
        "morphology loaded"
    );
    Ok(morphology)
}
