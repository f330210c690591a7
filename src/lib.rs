//! # neurite - branching morphology reconstruction
//!
//! Rebuilds rooted branching trees (axons, dendrites) from the flat,
//! order-dependent point tables that morphology files are written as. The
//! pipeline partitions the table into sections, repairs discontinuities
//! introduced by non-contiguous point order, and assembles the sections into
//! a forest of neurite trees with deduplicated point sequences.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use neurite::prelude::*;
//!
//! let morphology = load_morphology("cell.swc")?;
//! for neurite in &morphology.neurites {
//!     // n x 4 [x, y, z, radius] block in subtree pre-order
//!     let points = neurite.points();
//!     println!("{}: {} points", neurite.kind(), points.nrows());
//! }
//! # Ok::<(), neurite::io::LoadError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! point table  ─▶  section extraction  ─▶  gap resolution
//!                                               │
//!              neurites  ◀─  tree building  ◀───┘
//! ```
//!
//! - **neurite-structures**: point table, section descriptors, the section
//!   tree arena and the `Neurite` wrapper
//! - **neurite-reconstruction**: the extraction / repair / assembly passes
//! - **neurite-io**: format dispatch and file readers
//!
//! ## License
//!
//! Apache-2.0

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export foundation
pub use neurite_structures as structures;

// Re-export algorithms
pub use neurite_reconstruction as reconstruction;

// Re-export I/O layer
pub use neurite_io as io;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::io::{load_morphology, FileFormat, Morphology};
    pub use crate::reconstruction::{build_neurites, SectionDataWrapper};
    pub use crate::structures::{
        Neurite, NeuriteKind, PointTable, SectionDescriptor, SectionTree, Soma,
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        // Just test that re-exports work
        use crate::prelude::*;
        assert_eq!(NeuriteKind::from_tag(2).unwrap(), NeuriteKind::Axon);
    }
}
