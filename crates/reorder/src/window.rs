//! Validated band width.

use crate::error::ReorderError;

/// An odd, positive band width `w`.
///
/// Position `i` of the reference may be paired with position `j` of the
/// model only when `|i - j| <= (w - 1) / 2`. A width of 1 admits only the
/// diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window(usize);

impl Window {
    /// Creates a window of width `width`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::InvalidWindow`] if `width` is zero or even.
    /// Even widths are never rounded up.
    pub fn new(width: usize) -> Result<Self, ReorderError> {
        if width % 2 == 0 {
            return Err(ReorderError::InvalidWindow { window: width });
        }
        Ok(Self(width))
    }

    /// The full width `w`.
    pub fn width(self) -> usize {
        self.0
    }

    /// Maximum offset from the diagonal, `(w - 1) / 2`.
    pub fn half_width(self) -> usize {
        (self.0 - 1) / 2
    }

    /// Returns `true` if the pair `(i, j)` lies inside the band.
    #[inline]
    pub fn permits(self, i: usize, j: usize) -> bool {
        i.abs_diff(j) <= self.half_width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_widths_accepted() {
        for w in [1, 3, 5, 31] {
            assert_eq!(Window::new(w).unwrap().width(), w);
        }
    }

    #[test]
    fn zero_rejected() {
        assert_eq!(
            Window::new(0),
            Err(ReorderError::InvalidWindow { window: 0 })
        );
    }

    #[test]
    fn even_rejected_not_incremented() {
        assert_eq!(
            Window::new(4),
            Err(ReorderError::InvalidWindow { window: 4 })
        );
    }

    #[test]
    fn half_width() {
        assert_eq!(Window::new(1).unwrap().half_width(), 0);
        assert_eq!(Window::new(3).unwrap().half_width(), 1);
        assert_eq!(Window::new(7).unwrap().half_width(), 3);
    }

    #[test]
    fn width_one_is_diagonal_only() {
        let w = Window::new(1).unwrap();
        assert!(w.permits(4, 4));
        assert!(!w.permits(4, 5));
        assert!(!w.permits(5, 4));
    }

    #[test]
    fn permits_is_symmetric() {
        let w = Window::new(5).unwrap();
        for i in 0..10 {
            for j in 0..10 {
                assert_eq!(w.permits(i, j), w.permits(j, i));
                assert_eq!(w.permits(i, j), i.abs_diff(j) <= 2);
            }
        }
    }
}
