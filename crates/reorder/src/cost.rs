//! Pairwise cost matrix and band masking.

use tracing::debug;

use crate::error::ReorderError;
use crate::window::Window;

/// A dense square cost matrix stored row-major.
///
/// Entry `(i, j)` is the cost of pairing reference position `i` with model
/// position `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    n: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Builds `cost[i][j] = (reference[i] - model[j])^2`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::LengthMismatch`] if the inputs differ in
    /// length. No truncation is attempted.
    pub fn squared_differences(reference: &[f64], model: &[f64]) -> Result<Self, ReorderError> {
        if reference.len() != model.len() {
            return Err(ReorderError::LengthMismatch {
                reference_len: reference.len(),
                model_len: model.len(),
            });
        }
        let n = reference.len();
        let mut data = Vec::with_capacity(n * n);
        for &a in reference {
            data.extend(model.iter().map(|&b| (a - b) * (a - b)));
        }
        Ok(Self { n, data })
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        assert!(
            rows.iter().all(|r| r.len() == n),
            "from_rows: matrix must be square"
        );
        Self {
            n,
            data: rows.concat(),
        }
    }

    /// Side length `N`.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Entry `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Replaces every out-of-band entry with a sentinel cost and returns it.
    ///
    /// The sentinel is `(N + 1) * max_in_band + 1`. It exceeds twice the
    /// largest in-band cost, and it exceeds the total cost of any assignment
    /// that stays inside the band (the identity always does), so an optimal
    /// solver never selects a masked entry. The matrix stays square.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::CostOverflow`] if an in-band entry is not
    /// finite.
    pub fn apply_band(&mut self, window: Window) -> Result<f64, ReorderError> {
        let n = self.n;
        let mut max_in_band = 0.0_f64;
        for i in 0..n {
            for j in 0..n {
                if window.permits(i, j) {
                    let c = self.data[i * n + j];
                    if !c.is_finite() {
                        return Err(ReorderError::CostOverflow);
                    }
                    max_in_band = max_in_band.max(c);
                }
            }
        }

        let sentinel = (n as f64 + 1.0) * max_in_band + 1.0;
        if !sentinel.is_finite() {
            return Err(ReorderError::CostOverflow);
        }

        let mut masked = 0_usize;
        for i in 0..n {
            for j in 0..n {
                if !window.permits(i, j) {
                    self.data[i * n + j] = sentinel;
                    masked += 1;
                }
            }
        }
        debug!(n, window = window.width(), sentinel, masked, "band applied");
        Ok(sentinel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_differences_layout() {
        let m = CostMatrix::squared_differences(&[10.0, 20.0, 30.0], &[30.0, 10.0, 20.0]).unwrap();
        assert_eq!(m.n(), 3);
        assert_eq!(m.row(0), &[400.0, 0.0, 100.0]);
        assert_eq!(m.row(1), &[100.0, 100.0, 0.0]);
        assert_eq!(m.row(2), &[0.0, 400.0, 100.0]);
        assert_eq!(m.get(2, 0), 0.0);
    }

    #[test]
    fn length_mismatch_is_error() {
        assert_eq!(
            CostMatrix::squared_differences(&[1.0, 2.0], &[1.0]),
            Err(ReorderError::LengthMismatch {
                reference_len: 2,
                model_len: 1,
            })
        );
    }

    #[test]
    fn band_masks_outside_entries() {
        let mut m =
            CostMatrix::squared_differences(&[10.0, 20.0, 30.0], &[30.0, 10.0, 20.0]).unwrap();
        let sentinel = m.apply_band(Window::new(3).unwrap()).unwrap();
        // max in-band is 400 at (0, 0) and (2, 1)
        assert_eq!(sentinel, 4.0 * 400.0 + 1.0);
        assert_eq!(m.get(0, 2), sentinel);
        assert_eq!(m.get(2, 0), sentinel);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 2), 0.0);
    }

    #[test]
    fn sentinel_exceeds_twice_in_band_max() {
        let mut m = CostMatrix::from_rows(&[
            vec![5.0, 1.0, 9.0, 2.0],
            vec![3.0, 7.0, 1.0, 8.0],
            vec![2.0, 2.0, 6.0, 4.0],
            vec![9.0, 1.0, 3.0, 5.0],
        ]);
        let sentinel = m.apply_band(Window::new(1).unwrap()).unwrap();
        assert!(sentinel > 2.0 * 7.0);
    }

    #[test]
    fn zero_in_band_cost_still_gets_positive_sentinel() {
        let mut m = CostMatrix::squared_differences(&[1.0, 5.0], &[1.0, 5.0]).unwrap();
        let sentinel = m.apply_band(Window::new(1).unwrap()).unwrap();
        assert_eq!(sentinel, 1.0);
        assert_eq!(m.get(0, 1), 1.0);
    }

    #[test]
    fn wide_band_masks_nothing() {
        let original =
            CostMatrix::squared_differences(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        let mut m = original.clone();
        m.apply_band(Window::new(5).unwrap()).unwrap();
        assert_eq!(m, original);
    }

    #[test]
    fn overflow_detected() {
        let mut m = CostMatrix::squared_differences(&[1e200], &[-1e200]).unwrap();
        assert_eq!(
            m.apply_band(Window::new(1).unwrap()),
            Err(ReorderError::CostOverflow)
        );
    }

    #[test]
    #[should_panic(expected = "from_rows: matrix must be square")]
    fn from_rows_non_square_panics() {
        CostMatrix::from_rows(&[vec![1.0, 2.0]]);
    }
}
