use std::fmt::Write;

use serde::{Deserialize, Serialize};

pub const H: f64 = 1.007825035;
pub const O: f64 = 15.99491463;
pub const H2O: f64 = 2.0 * H + O;
pub const PROTON: f64 = 1.00727646688;

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, PartialOrd)]
#[serde(rename_all = "lowercase")]
pub enum Tolerance {
    Ppm(f64, f64),
    Da(f64, f64),
}

impl Tolerance {
    /// Compute the (`lower`, `upper`) window (in Da) for for a monoisotopic
    /// mass and a given tolerance
    pub fn bounds(&self, center: f64) -> (f64, f64) {
        match self {
            Tolerance::Ppm(lo, hi) => {
                let delta_lo = center * lo / 1_000_000.0;
                let delta_hi = center * hi / 1_000_000.0;
                (center + delta_lo, center + delta_hi)
            }
            Tolerance::Da(lo, hi) => (center + lo, center + hi),
        }
    }

    /// Does `rhs` fall strictly inside the window around `center`?
    pub fn contains(&self, center: f64, rhs: f64) -> bool {
        let (lo, hi) = self.bounds(center);
        rhs > lo && rhs < hi
    }
}

/// Convert a neutral fragment mass to m/z at a given charge state
pub fn mass_to_mz(mass: f64, charge: u32) -> f64 {
    mass / charge as f64 + PROTON
}

pub trait Mass {
    fn monoisotopic(&self) -> f64;
}

#[derive(Clone, Debug, PartialEq, PartialOrd, Serialize)]
pub enum Residue {
    // Standard amino acid residue
    Just(u8),
    // Amino acid residue with a mass modification
    Mod(u8, f64),
}

impl Mass for Residue {
    fn monoisotopic(&self) -> f64 {
        match self {
            Residue::Just(c) => c.monoisotopic(),
            Residue::Mod(c, m) => c.monoisotopic() + m,
        }
    }
}

pub const VALID_AA: [u8; 22] = [
    b'A', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'K', b'L', b'M', b'N', b'P', b'Q', b'R', b'S',
    b'T', b'V', b'W', b'Y', b'U', b'O',
];

impl Mass for u8 {
    fn monoisotopic(&self) -> f64 {
        match self {
            b'G' => 57.021463735,
            b'A' => 71.037113805,
            b'S' => 87.032028435,
            b'P' => 97.052763875,
            b'V' => 99.068413945,
            b'T' => 101.047678505,
            // Note this is without +57.02146
            b'C' => 103.009184505,
            b'L' => 113.084064015,
            b'I' => 113.084064015,
            b'N' => 114.042927470,
            b'D' => 115.026943065,
            b'Q' => 128.058577540,
            b'K' => 128.094963050,
            b'E' => 129.042593135,
            b'M' => 131.040484645,
            b'H' => 137.058911875,
            b'F' => 147.068413945,
            b'U' => 150.953633405,
            b'R' => 156.101111050,
            b'Y' => 163.063328575,
            b'W' => 186.079312980,
            b'O' => 237.147726925,
            _ => unreachable!("BUG: invalid amino acid {}", *self as char),
        }
    }
}

impl std::fmt::Display for Residue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Residue::Just(c) => f.write_char(*c as char),
            Residue::Mod(c, m) => {
                if m.is_sign_positive() {
                    write!(f, "{}[+{}]", *c as char, m)
                } else {
                    write!(f, "{}[{}]", *c as char, m)
                }
            }
        }
    }
}
