//! Sparse boolean (square) matrices, the primitive shared by boolean
//! decomposition, transitive closure, tensor-product intersection, and
//! matrix-based CFPQ (spec §4.1, §4.2, §4.7), grounded on
//! `original_source/project/boolean_decomposition.py`'s use of `scipy`
//! sparse boolean matrices — rows here are [`FixedBitSet`]s instead, since
//! there is no sparse-matrix crate in the teacher's dependency stack.

use fixedbitset::FixedBitSet;

/// A square boolean matrix stored as one bit-row per matrix row.
#[derive(Debug, Clone)]
pub struct BooleanMatrix {
    size: usize,
    rows: Vec<FixedBitSet>,
}

impl BooleanMatrix {
    /// An all-`false` matrix of the given dimension.
    #[must_use]
    pub fn zero(size: usize) -> Self {
        Self {
            size,
            rows: (0..size).map(|_| FixedBitSet::with_capacity(size)).collect(),
        }
    }

    /// The identity matrix of the given dimension.
    #[must_use]
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zero(size);
        for i in 0..size {
            m.set(i, i, true);
        }
        m
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows[row].contains(col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.rows[row].set(col, value);
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &FixedBitSet {
        &self.rows[row]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut FixedBitSet {
        &mut self.rows[row]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.count_ones(..) == 0)
    }

    #[must_use]
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones(..)).sum()
    }

    /// In-place boolean OR, the fixed-point update step used by transitive
    /// closure, Hellings, and matrix CFPQ.
    ///
    /// Returns whether any bit actually flipped from 0 to 1, so callers can
    /// drive a fixed-point loop without re-scanning the whole matrix.
    pub fn or_assign(&mut self, other: &BooleanMatrix) -> bool {
        debug_assert_eq!(self.size, other.size);
        let mut changed = false;
        for (dst, src) in self.rows.iter_mut().zip(other.rows.iter()) {
            let before = dst.count_ones(..);
            dst.union_with(src);
            if dst.count_ones(..) != before {
                changed = true;
            }
        }
        changed
    }

    /// Boolean matrix product: `(A * B)[i][k] = OR_j (A[i][j] AND B[j][k])`.
    #[must_use]
    pub fn mul(&self, other: &BooleanMatrix) -> BooleanMatrix {
        debug_assert_eq!(self.size, other.size);
        let n = self.size;
        let mut out = BooleanMatrix::zero(n);
        for i in 0..n {
            for j in self.rows[i].ones() {
                out.rows[i].union_with(&other.rows[j]);
            }
        }
        out
    }

    /// The Kronecker (tensor) product, used for finite-automaton
    /// intersection (spec §4.2): a block of `other.size` columns/rows per
    /// entry of `self`, mirroring
    /// `rpq/all_pairs.py::finite_automata_intersection`'s composite index
    /// arithmetic `i1 * n2 + i2`.
    #[must_use]
    pub fn kron(&self, other: &BooleanMatrix) -> BooleanMatrix {
        let n1 = self.size;
        let n2 = other.size;
        let mut out = BooleanMatrix::zero(n1 * n2);
        for i1 in 0..n1 {
            for j1 in self.rows[i1].ones() {
                for i2 in 0..n2 {
                    for j2 in other.rows[i2].ones() {
                        out.set(i1 * n2 + i2, j1 * n2 + j2, true);
                    }
                }
            }
        }
        out
    }

    /// Projects a composite row or column index produced by [`kron`] back
    /// onto the index into the matrix of dimension `rhs_size` that supplied
    /// the second factor (spec §9's index-arithmetic projection).
    #[must_use]
    pub fn project_rhs(composite: usize, rhs_size: usize) -> usize {
        composite % rhs_size
    }

    /// Projects a composite index back onto the index into the matrix that
    /// supplied the first (left) factor.
    #[must_use]
    pub fn project_lhs(composite: usize, rhs_size: usize) -> usize {
        composite / rhs_size
    }

    /// Computes the transitive closure of `self` via repeated squaring:
    /// `M, M^2, M^4, ...` OR-ed together until a fixed point, `ceil(log2 n)`
    /// iterations (spec §4.1), grounded on
    /// `boolean_decomposition.py`'s `transitive_closure`.
    #[must_use]
    pub fn transitive_closure(&self) -> BooleanMatrix {
        let mut closure = self.clone();
        loop {
            let squared = closure.mul(&closure);
            let changed = closure.or_assign(&squared);
            if !changed {
                return closure;
            }
        }
    }

    /// Block-diagonal composition of two square matrices, `diag(a, b)`, used
    /// by multi-source matrix BFS to advance a query automaton and a graph
    /// automaton in lockstep (spec §4.4), grounded on
    /// `original_source/project/rpq/multiple_sources.py`'s use of
    /// `scipy.sparse.block_diag`.
    #[must_use]
    pub fn block_diag(a: &BooleanMatrix, b: &BooleanMatrix) -> BooleanMatrix {
        let n = a.size + b.size;
        let mut out = BooleanMatrix::zero(n);
        for i in 0..a.size {
            for j in a.rows[i].ones() {
                out.set(i, j, true);
            }
        }
        for i in 0..b.size {
            for j in b.rows[i].ones() {
                out.set(a.size + i, a.size + j, true);
            }
        }
        out
    }
}

/// A rectangular boolean matrix, used by multi-source matrix BFS for the
/// frontier matrix `F` (spec §4.4), which is not square.
#[derive(Debug, Clone)]
pub struct RectMatrix {
    rows: usize,
    cols: usize,
    data: Vec<FixedBitSet>,
}

impl RectMatrix {
    #[must_use]
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: (0..rows).map(|_| FixedBitSet::with_capacity(cols)).collect(),
        }
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row].contains(col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.data[row].set(col, value);
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &FixedBitSet {
        &self.data[row]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut FixedBitSet {
        &mut self.data[row]
    }

    pub fn zero_row(&mut self, row: usize) {
        self.data[row].clear();
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    /// In-place OR of `other` into `self`; returns whether anything flipped.
    pub fn or_assign(&mut self, other: &RectMatrix) -> bool {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        let mut changed = false;
        for (dst, src) in self.data.iter_mut().zip(other.data.iter()) {
            let before = dst.count_ones(..);
            dst.union_with(src);
            if dst.count_ones(..) != before {
                changed = true;
            }
        }
        changed
    }

    #[must_use]
    pub fn eq_matrix(&self, other: &RectMatrix) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }

    /// Rectangular-by-square boolean product: `self` is `rows x cols`,
    /// `rhs` is `cols x cols`, the result is `rows x cols`.
    #[must_use]
    pub fn mul_square(&self, rhs: &BooleanMatrix) -> RectMatrix {
        debug_assert_eq!(self.cols, rhs.size());
        let mut out = RectMatrix::zero(self.rows, self.cols);
        for i in 0..self.rows {
            for j in self.data[i].ones() {
                out.data[i].union_with(rhs.row(j));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_fixed_under_multiplication() {
        let id = BooleanMatrix::identity(3);
        let product = id.mul(&id);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(product.get(i, j), i == j);
            }
        }
    }

    #[test]
    fn transitive_closure_of_a_chain_reaches_every_successor() {
        // 0 -> 1 -> 2 -> 3
        let mut m = BooleanMatrix::zero(4);
        m.set(0, 1, true);
        m.set(1, 2, true);
        m.set(2, 3, true);
        let closure = m.transitive_closure();
        assert!(closure.get(0, 1));
        assert!(closure.get(0, 2));
        assert!(closure.get(0, 3));
        assert!(!closure.get(3, 0));
        assert!(!closure.get(1, 0));
    }

    #[test]
    fn kron_composite_index_projects_back_to_operands() {
        let mut a = BooleanMatrix::zero(2);
        a.set(0, 1, true);
        let mut b = BooleanMatrix::zero(3);
        b.set(1, 2, true);
        let product = a.kron(&b);
        assert_eq!(product.size(), 6);
        assert!(product.get(0 * 3 + 1, 1 * 3 + 2));
        assert_eq!(BooleanMatrix::project_lhs(0 * 3 + 1, 3), 0);
        assert_eq!(BooleanMatrix::project_rhs(0 * 3 + 1, 3), 1);
    }

    #[test]
    fn or_assign_reports_whether_anything_changed() {
        let mut a = BooleanMatrix::zero(2);
        let mut b = BooleanMatrix::zero(2);
        b.set(0, 1, true);
        assert!(a.or_assign(&b));
        assert!(!a.or_assign(&b));
    }
}
