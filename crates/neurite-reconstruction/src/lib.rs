// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Structural inference for neurite morphologies.

This crate rebuilds branching trees from the flat annotated point tables
defined in `neurite-structures`:

- `extractor` partitions the table into contiguous sections in one scan
- `gaps` repairs discontinuities introduced by non-contiguous point order
- `builder` assembles the resolved sections into a forest of section trees
  and wraps each trunk into a `Neurite`

The pipeline is purely transformational: one table in, one forest out, no
I/O and no shared mutable state.
*/

pub mod builder;
pub mod extractor;
pub mod gaps;
mod types;
mod wrapper;

pub use builder::{build_forest, build_neurites, TrunkFixup};
pub use extractor::{extract_sections, ExtractedSections};
pub use gaps::resolve_gaps;
pub use types::{ReconstructionError, ReconstructionResult};
pub use wrapper::SectionDataWrapper;
