use crate::{NeuriteKind, NodeId, PointTable, SectionTree, TreeNode};
use ndarray::Array2;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// A single rooted branching structure (one axon or one dendrite).
///
/// Wraps the trunk node of a frozen [`SectionTree`] and exposes the whole
/// subtree as one deduplicated `[x, y, z, radius]` block: every section
/// after the trunk starts with a copy of its parent's last point, and that
/// duplicate is skipped when the block is assembled.
///
/// The block is computed on first access and memoized; recomputation always
/// yields the same rows, so the compute-once guard is the only
/// synchronization needed.
pub struct Neurite {
    tree: Arc<SectionTree>,
    table: Arc<PointTable>,
    root: NodeId,
    kind: NeuriteKind,
    points: OnceCell<Array2<f64>>,
}

impl Neurite {
    /// Wraps the trunk node `root`. The neurite's kind is copied from the
    /// trunk.
    pub fn new(tree: Arc<SectionTree>, table: Arc<PointTable>, root: NodeId) -> Self {
        let kind = tree[root].kind;
        Neurite {
            tree,
            table,
            root,
            kind,
            points: OnceCell::new(),
        }
    }

    /// Semantic type of this neurite.
    pub fn kind(&self) -> NeuriteKind {
        self.kind
    }

    /// Arena id of the trunk node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The trunk node itself.
    pub fn root_node(&self) -> &TreeNode {
        &self.tree[self.root]
    }

    /// All points of this neurite as an n x 4 `[x, y, z, radius]` block.
    ///
    /// Rows follow a pre-order walk of the subtree; every node except the
    /// trunk contributes its points minus the first one (the boundary point
    /// duplicated from its parent). Computed lazily, cached forever.
    pub fn points(&self) -> &Array2<f64> {
        self.points.get_or_init(|| self.collect_points())
    }

    /// Pre-order iteration over the section nodes of this neurite.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.tree.preorder(self.root).map(move |id| &self.tree[id])
    }

    fn collect_points(&self) -> Array2<f64> {
        let mut flat: Vec<f64> = Vec::new();
        for id in self.tree.preorder(self.root) {
            let node = &self.tree[id];
            let skip = if id == self.root { 0 } else { 1 };
            for &row in node.point_rows.iter().skip(skip) {
                flat.extend_from_slice(&self.table.xyzr(row));
            }
        }
        let n = flat.len() / 4;
        Array2::from_shape_vec((n, 4), flat).expect("xyzr rows are always 4 wide")
    }
}

impl std::fmt::Debug for Neurite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neurite")
            .field("kind", &self.kind)
            .field("root", &self.root)
            .field("cached", &self.points.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_table::col;
    use ndarray::Array2;

    fn table_of(rows: &[[f64; 7]]) -> Arc<PointTable> {
        let mut data = Array2::zeros((rows.len(), col::COUNT));
        for (i, row) in rows.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                data[[i, j]] = *v;
            }
        }
        Arc::new(PointTable::new(data).unwrap())
    }

    /// Y-shaped neurite: trunk rows [0,1,2], children [2,3] and [2,4].
    fn y_neurite() -> Neurite {
        let table = table_of(&[
            // x    y    z    r    type id   parent
            [0.0, 0.0, 0.0, 1.0, 2.0, 1.0, -1.0],
            [1.0, 0.0, 0.0, 1.0, 2.0, 2.0, 1.0],
            [2.0, 0.0, 0.0, 1.0, 2.0, 3.0, 2.0],
            [3.0, 1.0, 0.0, 1.0, 2.0, 4.0, 3.0],
            [3.0, -1.0, 0.0, 1.0, 2.0, 5.0, 3.0],
        ]);
        let mut tree = SectionTree::new();
        let trunk = tree.push_node(0, NeuriteKind::Axon, vec![0, 1, 2]);
        let left = tree.push_node(1, NeuriteKind::Axon, vec![2, 3]);
        let right = tree.push_node(2, NeuriteKind::Axon, vec![2, 4]);
        tree.attach_child(trunk, left);
        tree.attach_child(trunk, right);
        Neurite::new(Arc::new(tree), table, trunk)
    }

    #[test]
    fn test_points_deduplicate_section_boundaries() {
        let neurite = y_neurite();
        let points = neurite.points();
        assert_eq!(points.nrows(), 5);
        // trunk keeps all three points, each child contributes one new point
        assert_eq!(points[[0, 0]], 0.0);
        assert_eq!(points[[2, 0]], 2.0);
        assert_eq!(points[[3, 1]], 1.0);
        assert_eq!(points[[4, 1]], -1.0);
    }

    #[test]
    fn test_points_are_memoized() {
        let neurite = y_neurite();
        let first = neurite.points().clone();
        let second = neurite.points();
        assert_eq!(&first, second);
        assert!(std::ptr::eq(neurite.points(), neurite.points()));
    }

    #[test]
    fn test_iter_nodes_is_preorder() {
        let neurite = y_neurite();
        let sections: Vec<usize> = neurite.iter_nodes().map(|n| n.section_id).collect();
        assert_eq!(sections, vec![0, 1, 2]);
    }

    #[test]
    fn test_kind_copied_from_trunk() {
        assert_eq!(y_neurite().kind(), NeuriteKind::Axon);
    }
}
