use crate::mass::Tolerance;
use crate::shift::HypothesisMatrix;
use crate::spectrum::Spectrum;

/// Natural log of n!, evaluated as a running sum of logs so that large
/// counts neither overflow nor lose the low-count exactness
pub fn lnfact(n: usize) -> f64 {
    let mut acc = 0.0;
    for i in 1..=n {
        acc += (i as f64).ln();
    }
    acc
}

/// Scores shift-placement hypotheses against an observed spectrum
pub struct Scorer {
    pub fragment_tol: Tolerance,
}

impl Scorer {
    pub fn new(fragment_tol: Tolerance) -> Self {
        Scorer { fragment_tol }
    }

    /// Hyperscore every row of the paired b/y hypothesis matrices.
    ///
    /// Matching is peak-driven: each observed peak defines an acceptance
    /// window, and a predicted ion matches if it falls strictly inside. A
    /// match contributes the square root of the peak intensity; when several
    /// peaks match one ion, the largest contribution wins. Per row, the
    /// score is `ln(dot_sum) + lnfact(matched_b) + lnfact(matched_y)`, with
    /// the log term dropped when nothing matched.
    ///
    /// Rows come out in the matrices' boundary order; see
    /// [`crate::localize`] for the residue-order convention.
    pub fn score(&self, b: &HypothesisMatrix, y: &HypothesisMatrix, spectrum: &Spectrum) -> Vec<f64> {
        assert_eq!(b.n_rows, y.n_rows);

        // Acceptance windows and sqrt intensities are per-peak, not
        // per-hypothesis, so hoist them out of the row loop
        let mut lo = Vec::with_capacity(spectrum.len());
        let mut hi = Vec::with_capacity(spectrum.len());
        let mut contrib = Vec::with_capacity(spectrum.len());
        for (&mz, &intensity) in spectrum.mz.iter().zip(&spectrum.intensity) {
            let (window_lo, window_hi) = self.fragment_tol.bounds(mz);
            lo.push(window_lo);
            hi.push(window_hi);
            contrib.push(intensity.sqrt());
        }

        let mut scores = Vec::with_capacity(b.n_rows);
        for k in 0..b.n_rows {
            let (matched_b, summed_b) = matched(b.row(k), &lo, &hi, &contrib);
            let (matched_y, summed_y) = matched(y.row(k), &lo, &hi, &contrib);
            let dot_sum = summed_b + summed_y;
            let log_dot = if dot_sum > 0.0 { dot_sum.ln() } else { 0.0 };
            scores.push(log_dot + lnfact(matched_b) + lnfact(matched_y));
        }
        scores
    }
}

/// Count matched ions in one hypothesis row and sum their retained
/// contributions, in fixed (ion, then peak) order
fn matched(row: &[f64], lo: &[f64], hi: &[f64], contrib: &[f64]) -> (usize, f64) {
    let mut count = 0;
    let mut summed = 0.0;
    for &ion in row {
        let mut best = 0.0f64;
        for peak in 0..lo.len() {
            if ion > lo[peak] && ion < hi[peak] && contrib[peak] > best {
                best = contrib[peak];
            }
        }
        if best > 0.0 {
            count += 1;
            summed += best;
        }
    }
    (count, summed)
}
