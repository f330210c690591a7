// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for reconstruction operations.
*/

use neurite_structures::NeuriteDataError;

/// Result type for reconstruction operations
pub type ReconstructionResult<T> = Result<T, ReconstructionError>;

/// Errors that can occur while inferring tree structure from a point table
#[derive(Debug, thiserror::Error)]
pub enum ReconstructionError {
    #[error(transparent)]
    Data(#[from] NeuriteDataError),

    #[error("section {section} has a cyclic ancestry chain")]
    CyclicStructure { section: usize },

    #[error("section {section} starts at a point that terminates no section")]
    UnresolvedSectionParent { section: usize },

    #[error("sections {first} and {second} both continue gap bridge {bridge}")]
    AmbiguousGapBridge {
        bridge: usize,
        first: usize,
        second: usize,
    },

    #[error("disabled section {index} reached the tree builder")]
    DisabledSection { index: usize },

    #[error("internal error: {0}")]
    Internal(String),
}
