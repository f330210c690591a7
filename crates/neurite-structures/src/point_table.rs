use crate::{NeuriteDataError, NeuriteDataResult, NeuriteKind};
use ahash::AHashMap;
use ndarray::{s, Array2, ArrayView2};

/// Column layout of the raw point table.
///
/// Every reader produces the same fixed 7-column numeric block; the first
/// four columns line up so `[.., ..4]` slices directly into `[x, y, z, r]`
/// point rows.
pub mod col {
    pub const X: usize = 0;
    pub const Y: usize = 1;
    pub const Z: usize = 2;
    pub const R: usize = 3;
    pub const TYPE: usize = 4;
    pub const ID: usize = 5;
    pub const PARENT: usize = 6;

    pub const COUNT: usize = 7;
}

/// Sentinel parent id meaning "no parent".
pub const NO_PARENT: i64 = -1;

/// The immutable flat input of the reconstruction pipeline.
///
/// Wraps a 7-column numeric block (one row per annotated 3D point, in
/// file order) together with the lookup from on-disk point ids to dense row
/// indices. Parent references are resolved to row indices once, at
/// construction, so a malformed file fails fast instead of surfacing midway
/// through section extraction.
#[derive(Clone, Debug)]
pub struct PointTable {
    data: Array2<f64>,
    id_to_row: AHashMap<i64, usize>,
    parent_rows: Vec<Option<usize>>,
}

impl PointTable {
    /// Wraps a raw 7-column block, building the id lookup and resolving
    /// every parent reference.
    ///
    /// # Errors
    /// * [`NeuriteDataError::BadColumnCount`] if the block is not 7 columns wide
    /// * [`NeuriteDataError::DuplicatePointId`] if two rows share an id
    /// * [`NeuriteDataError::MalformedParentReference`] if a parent id is
    ///   neither [`NO_PARENT`] nor a known point id
    pub fn new(data: Array2<f64>) -> NeuriteDataResult<Self> {
        if data.nrows() > 0 && data.ncols() != col::COUNT {
            return Err(NeuriteDataError::BadColumnCount {
                expected: col::COUNT,
                actual: data.ncols(),
            });
        }

        let mut id_to_row = AHashMap::with_capacity(data.nrows());
        for row in 0..data.nrows() {
            let id = data[[row, col::ID]] as i64;
            if let Some(&first_row) = id_to_row.get(&id) {
                return Err(NeuriteDataError::DuplicatePointId {
                    id,
                    first_row,
                    second_row: row,
                });
            }
            id_to_row.insert(id, row);
        }

        let mut parent_rows = Vec::with_capacity(data.nrows());
        for row in 0..data.nrows() {
            let parent_id = data[[row, col::PARENT]] as i64;
            if parent_id == NO_PARENT {
                parent_rows.push(None);
            } else {
                match id_to_row.get(&parent_id) {
                    Some(&parent_row) => parent_rows.push(Some(parent_row)),
                    None => {
                        return Err(NeuriteDataError::MalformedParentReference {
                            id: data[[row, col::ID]] as i64,
                            parent_id,
                        })
                    }
                }
            }
        }

        Ok(PointTable {
            data,
            id_to_row,
            parent_rows,
        })
    }

    /// Number of points in the table.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// True when the table holds no points.
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// On-disk id of the point at `row`.
    pub fn id(&self, row: usize) -> i64 {
        self.data[[row, col::ID]] as i64
    }

    /// Raw structure type tag of the point at `row`.
    pub fn type_tag(&self, row: usize) -> u32 {
        self.data[[row, col::TYPE]] as u32
    }

    /// Dense row index of the parent of the point at `row`, or `None` for
    /// a root point.
    pub fn parent_row(&self, row: usize) -> Option<usize> {
        self.parent_rows[row]
    }

    /// Dense row index of the point with on-disk id `id`.
    pub fn row_of_id(&self, id: i64) -> Option<usize> {
        self.id_to_row.get(&id).copied()
    }

    /// `[x, y, z, radius]` of the point at `row`.
    pub fn xyzr(&self, row: usize) -> [f64; 4] {
        [
            self.data[[row, col::X]],
            self.data[[row, col::Y]],
            self.data[[row, col::Z]],
            self.data[[row, col::R]],
        ]
    }

    /// View of all `[x, y, z, radius]` rows, in table order.
    pub fn points(&self) -> ArrayView2<'_, f64> {
        self.data.slice(s![.., 0..4])
    }

    /// The full 7-column block.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Row indices of soma-tagged points, in table order.
    pub fn soma_rows(&self) -> Vec<usize> {
        let soma = NeuriteKind::Soma.tag();
        (0..self.len())
            .filter(|&row| self.type_tag(row) == soma)
            .collect()
    }
}
