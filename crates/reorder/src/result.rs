//! Result types for reordering.

/// A model sequence reordered to align with a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Reordering {
    values: Vec<f64>,
    permutation: Vec<usize>,
    matched_cost: f64,
}

impl Reordering {
    pub(crate) fn new(values: Vec<f64>, permutation: Vec<usize>, matched_cost: f64) -> Self {
        Self {
            values,
            permutation,
            matched_cost,
        }
    }

    /// Reordered model values; `values()[i]` is paired with reference `i`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes `self`, returning the reordered values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// `permutation()[i]` is the model index placed at position `i`.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Sum of squared differences between the reference and the reordered
    /// values.
    pub fn matched_cost(&self) -> f64 {
        self.matched_cost
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no positions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A reordering together with its threshold-conditioned cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderingCost {
    cost: f64,
    n_selected: usize,
    reordering: Reordering,
}

impl ReorderingCost {
    pub(crate) fn new(cost: f64, n_selected: usize, reordering: Reordering) -> Self {
        Self {
            cost,
            n_selected,
            reordering,
        }
    }

    /// Absolute difference of means.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of positions kept by the threshold.
    pub fn n_selected(&self) -> usize {
        self.n_selected
    }

    /// The reordered model values.
    pub fn reordered(&self) -> &[f64] {
        self.reordering.values()
    }

    /// The full reordering.
    pub fn reordering(&self) -> &Reordering {
        &self.reordering
    }

    /// Consumes `self`, returning the reordering.
    pub fn into_reordering(self) -> Reordering {
        self.reordering
    }
}
