//! NaN-aware statistical helpers shared by the kairos crates.
//!
//! Missing observations are encoded as `NaN`. Every helper here excludes
//! non-finite values instead of propagating them, and reports "no valid data"
//! through `Option` so callers can raise their own error kind.

/// Arithmetic mean over the finite values of `data`.
///
/// Returns `None` if `data` holds no finite value.
pub fn nan_mean(data: &[f64]) -> Option<f64> {
    let (sum, n) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0_usize), |(s, n), &v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// R's default quantile algorithm (type=7).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Type-7 quantile over the finite values of unsorted `data`.
///
/// Returns `None` if `data` holds no finite value.
pub fn nan_quantile(data: &[f64], p: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    Some(quantile_type7(&sorted, p))
}
