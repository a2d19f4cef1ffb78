use crate::ion_series::{IonLadder, Kind};

/// One candidate ion ladder per possible placement of a mass shift.
///
/// Row `k` is the full ladder (flattened charge-major, matching
/// [`IonLadder`]'s layout) predicted when the shift sits at boundary `k` of
/// the series: for a b-series ladder, fragments with index `< k` carry the
/// shift; for a y-series ladder, fragments with index `>= k` do. Either way
/// there is one more row than there are fragments, so rows = residue count.
#[derive(Clone, Debug, PartialEq)]
pub struct HypothesisMatrix {
    pub n_rows: usize,
    pub n_cols: usize,
    data: Vec<f64>,
}

impl HypothesisMatrix {
    pub fn row(&self, k: usize) -> &[f64] {
        &self.data[k * self.n_cols..(k + 1) * self.n_cols]
    }
}

/// Enumerate every placement of `shift_mass` against one ion series. The
/// shift is divided by the fragment charge state before being applied.
pub fn enumerate_shifts(ladder: &IonLadder, shift_mass: f64) -> HypothesisMatrix {
    let n_fragments = ladder.n_fragments;
    let n_rows = n_fragments + 1;
    let n_cols = n_fragments * ladder.n_charges;
    let mut data = vec![0.0; n_rows * n_cols];

    for k in 0..n_rows {
        let row = &mut data[k * n_cols..(k + 1) * n_cols];
        row.copy_from_slice(ladder.as_slice());
        for z_idx in 0..ladder.n_charges {
            let delta = shift_mass / (z_idx + 1) as f64;
            for idx in 0..n_fragments {
                let shifted = match ladder.kind {
                    Kind::B => idx < k,
                    Kind::Y => idx >= k,
                };
                if shifted {
                    row[z_idx * n_fragments + idx] += delta;
                }
            }
        }
    }

    HypothesisMatrix {
        n_rows,
        n_cols,
        data,
    }
}
