// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
File loading for neurite morphologies.

The reader for each supported format produces the same two things: a flat
point table and, for formats that store structure natively, a ready-made
section partition. Everything downstream of that is shared; `load_morphology`
is the one-call entry point.
*/

mod error;
mod format;
mod morphology;
pub mod swc;

pub use error::{LoadError, LoadResult};
pub use format::FileFormat;
pub use morphology::{load_morphology, Morphology};
