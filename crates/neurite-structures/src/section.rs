use serde::{Deserialize, Serialize};

/// A maximal contiguous run of point-table rows between two structural
/// boundaries (branch point, leaf, or repaired discontinuity).
///
/// A non-root section's first row duplicates the last row of its parent
/// section, so every section is independently walkable. A descriptor with an
/// empty row list is a disabled placeholder left behind by gap resolution and
/// never reaches the tree builder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    /// Dense point-table row indices, in traversal order.
    pub point_rows: Vec<usize>,
    /// Raw structure type tag of the section's points.
    pub type_tag: u32,
    /// Index of the parent section, `None` for roots.
    pub parent: Option<usize>,
}

impl SectionDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// True for tombstoned placeholders (no rows left).
    pub fn is_disabled(&self) -> bool {
        self.point_rows.is_empty()
    }

    /// First row of the section, the boundary shared with its parent.
    pub fn first_row(&self) -> Option<usize> {
        self.point_rows.first().copied()
    }

    /// Last row of the section, the boundary shared with its children.
    pub fn last_row(&self) -> Option<usize> {
        self.point_rows.last().copied()
    }

    /// Folds a gap-bridge section into this one.
    ///
    /// The bridge's rows become this section's prefix (dropping this
    /// section's first row, which duplicates the bridge's endpoint), and this
    /// section inherits the bridge's type and parent. The bridge is left
    /// tombstoned.
    pub fn absorb_bridge(&mut self, bridge: &mut SectionDescriptor) {
        let mut rows = std::mem::take(&mut bridge.point_rows);
        rows.extend(self.point_rows.iter().skip(1).copied());
        self.point_rows = rows;
        self.type_tag = bridge.type_tag;
        self.parent = bridge.parent.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_bridge() {
        let mut bridge = SectionDescriptor {
            point_rows: vec![2, 7],
            type_tag: 3,
            parent: Some(0),
        };
        let mut continuation = SectionDescriptor {
            point_rows: vec![7, 8, 9],
            type_tag: 3,
            parent: Some(4),
        };

        continuation.absorb_bridge(&mut bridge);

        assert_eq!(continuation.point_rows, vec![2, 7, 8, 9]);
        assert_eq!(continuation.parent, Some(0));
        assert!(bridge.is_disabled());
        assert_eq!(bridge.parent, None);
    }

    #[test]
    fn test_boundary_rows() {
        let section = SectionDescriptor {
            point_rows: vec![4, 5, 6],
            type_tag: 2,
            parent: None,
        };
        assert_eq!(section.first_row(), Some(4));
        assert_eq!(section.last_row(), Some(6));
        assert!(!section.is_disabled());
    }
}
