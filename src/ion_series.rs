use serde::{Deserialize, Serialize};

use crate::mass::{mass_to_mz, H2O};
use crate::peptide::Peptide;
use crate::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    B,
    Y,
}

/// Dense fragment m/z table for one ion series, laid out charge-major:
/// `mz[charge_idx * n_fragments + fragment_idx]`. A ladder therefore
/// flattens into a single hypothesis row with no reshuffling.
#[derive(Clone, Debug, PartialEq)]
pub struct IonLadder {
    pub kind: Kind,
    pub n_fragments: usize,
    pub n_charges: usize,
    mz: Vec<f64>,
}

impl IonLadder {
    pub fn new(kind: Kind, n_charges: usize, mz: Vec<f64>) -> Self {
        assert!(n_charges > 0 && mz.len() % n_charges == 0);
        IonLadder {
            kind,
            n_fragments: mz.len() / n_charges,
            n_charges,
            mz,
        }
    }

    /// m/z of the fragment at `idx` (0-based from the series' terminus) and
    /// `charge_idx` (0-based, so charge state `charge_idx + 1`)
    pub fn get(&self, idx: usize, charge_idx: usize) -> f64 {
        self.mz[charge_idx * self.n_fragments + idx]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.mz
    }
}

/// Generate the b- and y-ion ladders for a peptide at a given precursor
/// charge. Fragment ions are computed at charge 1, plus charge 2 when the
/// precursor charge is at least 2.
pub fn fragment(peptide: &Peptide, precursor_charge: u8) -> Result<(IonLadder, IonLadder), Error> {
    let masses = peptide.residue_masses();
    if masses.len() < 2 {
        return Err(Error::DegenerateLadder {
            peptide: peptide.to_string(),
        });
    }
    let n_ions = masses.len() - 1;
    let n_charges = precursor_charge.clamp(1, 2) as usize;

    let mut b = vec![0.0; n_ions * n_charges];
    let mut y = vec![0.0; n_ions * n_charges];

    // Memoize cumulative mass from each terminus for fast ion generation.
    // Summation order is fixed (ascending fragment index) so that repeated
    // runs produce bit-identical ladders.
    let mut b_mass = 0.0;
    let mut y_mass = H2O;
    for idx in 0..n_ions {
        b_mass += masses[idx];
        y_mass += masses[masses.len() - 1 - idx];
        for charge in 1..=n_charges {
            let z_idx = charge - 1;
            b[z_idx * n_ions + idx] = mass_to_mz(b_mass, charge as u32);
            y[z_idx * n_ions + idx] = mass_to_mz(y_mass, charge as u32);
        }
    }

    Ok((
        IonLadder::new(Kind::B, n_charges, b),
        IonLadder::new(Kind::Y, n_charges, y),
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    // Reference m/z values calculated with Pyteomics
    const LESLIEK_B1: [f64; 6] = [
        114.09134044390001,
        243.13393353187,
        330.16596193614004,
        443.25002591327006,
        556.3340898904,
        685.37668297837,
    ];
    const LESLIEK_Y1: [f64; 6] = [
        147.11280416447,
        276.15539725243997,
        389.23946122957,
        502.3235252067,
        589.3555536109699,
        718.39814669894,
    ];
    const LESLIEK_B2: [f64; 6] = [
        57.54930845533501,
        122.07060499932,
        165.58661920145502,
        222.12865119002004,
        278.670683178585,
        343.19197972257,
    ];
    const LESLIEK_Y2: [f64; 6] = [
        74.06004031561999,
        138.581336859605,
        195.12336884817,
        251.66540083673502,
        295.18141503886994,
        359.702711582855,
    ];

    fn check_within(observed: &[f64], expected: &[f64]) {
        assert_eq!(observed.len(), expected.len());
        assert!(
            observed
                .iter()
                .zip(expected.iter())
                .all(|(a, b)| (a - b).abs() < 1e-6),
            "{:?}",
            observed
                .iter()
                .zip(expected.iter())
                .map(|(a, b)| a - b)
                .collect::<Vec<_>>()
        );
    }

    fn ladders(s: &str, charge: u8) -> (IonLadder, IonLadder) {
        fragment(&Peptide::parse(s).unwrap(), charge).unwrap()
    }

    #[test]
    fn plus_one_fragments() {
        let (b, y) = ladders("LESLIEK", 1);
        assert_eq!(b.n_fragments, 6);
        assert_eq!(b.n_charges, 1);
        check_within(b.as_slice(), &LESLIEK_B1);
        check_within(y.as_slice(), &LESLIEK_Y1);
    }

    #[test]
    fn plus_two_fragments() {
        let (b, y) = ladders("LESLIEK", 2);
        assert_eq!(b.n_charges, 2);
        check_within(&b.as_slice()[..6], &LESLIEK_B1);
        check_within(&b.as_slice()[6..], &LESLIEK_B2);
        check_within(&y.as_slice()[..6], &LESLIEK_Y1);
        check_within(&y.as_slice()[6..], &LESLIEK_Y2);
    }

    #[test]
    fn charge_capped_at_two() {
        let (b3, y3) = ladders("LESLIEK", 3);
        let (b2, y2) = ladders("LESLIEK", 2);
        assert_eq!(b3, b2);
        assert_eq!(y3, y2);
    }

    #[test]
    fn modified_fragments_offset() {
        let (b, y) = ladders("LES[+79]LIEK", 1);
        // b-ions from the modified residue onward carry the shift, earlier
        // ones are untouched; the y-series mirrors this from the C-terminus
        for idx in 0..6 {
            let b_expected = LESLIEK_B1[idx] + if idx >= 2 { 79.0 } else { 0.0 };
            let y_expected = LESLIEK_Y1[idx] + if idx >= 4 { 79.0 } else { 0.0 };
            assert!((b.get(idx, 0) - b_expected).abs() < 1e-6);
            assert!((y.get(idx, 0) - y_expected).abs() < 1e-6);
        }
    }

    #[test]
    fn single_residue_is_degenerate() {
        match fragment(&Peptide::parse("K").unwrap(), 2) {
            Err(Error::DegenerateLadder { peptide }) => assert_eq!(peptide, "K"),
            other => panic!("expected degenerate ladder, got {:?}", other),
        }
    }
}
