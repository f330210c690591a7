use crate::{NeuriteDataError, NeuriteDataResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a reconstructed structure element.
///
/// Discriminant values follow the SWC type-tag convention, so a raw tag can
/// be mapped by position into the recognized type table ([`NeuriteKind::ALL`]).
/// Unrecognized tags are rejected rather than defaulted.
///
/// # Examples
/// ```
/// use neurite_structures::NeuriteKind;
///
/// assert_eq!(NeuriteKind::from_tag(2).unwrap(), NeuriteKind::Axon);
/// assert_eq!(NeuriteKind::Axon.tag(), 2);
/// assert!(NeuriteKind::from_tag(42).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum NeuriteKind {
    Undefined = 0,
    Soma = 1,
    Axon = 2,
    BasalDendrite = 3,
    ApicalDendrite = 4,
    Custom = 5,
}

impl NeuriteKind {
    /// The recognized type table, ordered by raw tag.
    pub const ALL: [NeuriteKind; 6] = [
        NeuriteKind::Undefined,
        NeuriteKind::Soma,
        NeuriteKind::Axon,
        NeuriteKind::BasalDendrite,
        NeuriteKind::ApicalDendrite,
        NeuriteKind::Custom,
    ];

    /// Maps a raw on-disk type tag to its semantic kind.
    ///
    /// # Errors
    /// Returns [`NeuriteDataError::UnknownTypeTag`] for tags outside the
    /// recognized table.
    pub fn from_tag(tag: u32) -> NeuriteDataResult<Self> {
        Self::ALL
            .get(tag as usize)
            .copied()
            .ok_or(NeuriteDataError::UnknownTypeTag { tag })
    }

    /// The raw tag value of this kind.
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// True for kinds that form neurite trees (everything except the soma
    /// and the undefined placeholder).
    pub fn is_neurite(self) -> bool {
        !matches!(self, NeuriteKind::Soma | NeuriteKind::Undefined)
    }
}

impl fmt::Display for NeuriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NeuriteKind::Undefined => "undefined",
            NeuriteKind::Soma => "soma",
            NeuriteKind::Axon => "axon",
            NeuriteKind::BasalDendrite => "basal_dendrite",
            NeuriteKind::ApicalDendrite => "apical_dendrite",
            NeuriteKind::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for kind in NeuriteKind::ALL {
            assert_eq!(NeuriteKind::from_tag(kind.tag()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = NeuriteKind::from_tag(NeuriteKind::ALL.len() as u32).unwrap_err();
        assert!(matches!(err, NeuriteDataError::UnknownTypeTag { .. }));
    }

    #[test]
    fn test_neurite_predicate() {
        assert!(NeuriteKind::Axon.is_neurite());
        assert!(NeuriteKind::BasalDendrite.is_neurite());
        assert!(!NeuriteKind::Soma.is_neurite());
        assert!(!NeuriteKind::Undefined.is_neurite());
    }
}
