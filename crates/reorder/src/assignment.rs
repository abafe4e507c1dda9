//! Exact minimum-cost assignment (Hungarian method with potentials).

use crate::cost::CostMatrix;

/// An optimal one-to-one pairing of rows to columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    permutation: Vec<usize>,
    total_cost: f64,
}

impl Assignment {
    /// `permutation[i]` is the column paired with row `i`.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Consumes the assignment, returning the permutation.
    pub fn into_permutation(self) -> Vec<usize> {
        self.permutation
    }

    /// Sum of the matrix entries along the assignment.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

/// Solves the linear assignment problem on a square matrix.
///
/// Runs in `O(N^3)` and is deterministic: identical input always yields the
/// identical permutation, including among tied optima. All entries must be
/// finite.
pub fn solve_assignment(cost: &CostMatrix) -> Assignment {
    let n = cost.n();
    if n == 0 {
        return Assignment {
            permutation: Vec::new(),
            total_cost: 0.0,
        };
    }

    // Index 0 is a virtual row/column; real rows and columns are 1..=n.
    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; n + 1];
    // p[j]: row matched to column j (0 = free). way[j]: previous column on the path.
    let mut p = vec![0_usize; n + 1];
    let mut way = vec![0_usize; n + 1];
    let mut minv = vec![0.0_f64; n + 1];
    let mut used = vec![false; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0_usize;
        minv.fill(f64::INFINITY);
        used.fill(false);

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let row = cost.row(i0 - 1);
            let mut delta = f64::INFINITY;
            let mut j1 = 0_usize;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let reduced = row[j - 1] - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Flip the augmenting path back to the virtual column.
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut permutation = vec![0_usize; n];
    for j in 1..=n {
        permutation[p[j] - 1] = j - 1;
    }
    let total_cost = permutation
        .iter()
        .enumerate()
        .map(|(i, &j)| cost.get(i, j))
        .sum();

    Assignment {
        permutation,
        total_cost,
    }
}
