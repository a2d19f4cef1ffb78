use crate::mass::{Mass, Residue, H2O, VALID_AA};
use crate::Error;

/// A peptide parsed from a search engine's annotated string, with inline
/// modification deltas folded into the residues they decorate
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Peptide {
    pub sequence: Vec<Residue>,
    /// Neutral monoisotopic mass, modifications included
    pub monoisotopic: f64,
}

impl Peptide {
    /// Parse a Sage-style peptide string, e.g. `LESLIEK`, `LES[+79.97]LIEK`,
    /// or `LES+79.97LIEK`. A modification delta is a signed number, bracketed
    /// or not, and applies to the most recently parsed residue.
    pub fn parse(s: &str) -> Result<Peptide, Error> {
        let bytes = s.as_bytes();
        let mut sequence = Vec::with_capacity(bytes.len());
        let mut monoisotopic = H2O;

        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];
            if VALID_AA.contains(&c) {
                monoisotopic += c.monoisotopic();
                sequence.push(Residue::Just(c));
                i += 1;
            } else if c == b'[' {
                let start = i + 1;
                let end = match bytes[start..].iter().position(|&b| b == b']') {
                    Some(n) => start + n,
                    None => return Err(malformed(s, i, "unclosed modification bracket")),
                };
                apply_mod(s, i, &mut sequence, &mut monoisotopic, &s[start..end])?;
                i = end + 1;
            } else if c == b'+' || c == b'-' {
                let mut end = i + 1;
                while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
                    end += 1;
                }
                apply_mod(s, i, &mut sequence, &mut monoisotopic, &s[i..end])?;
                i = end;
            } else {
                return Err(malformed(s, i, "unrecognized character"));
            }
        }

        Ok(Peptide {
            sequence,
            monoisotopic,
        })
    }

    /// Monoisotopic mass of each residue, N- to C-terminus
    pub fn residue_masses(&self) -> Vec<f64> {
        self.sequence.iter().map(Mass::monoisotopic).collect()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

fn apply_mod(
    s: &str,
    position: usize,
    sequence: &mut [Residue],
    monoisotopic: &mut f64,
    delta: &str,
) -> Result<(), Error> {
    let delta = delta
        .parse::<f64>()
        .map_err(|_| malformed(s, position, "invalid modification mass"))?;
    let residue = sequence
        .last_mut()
        .ok_or_else(|| malformed(s, position, "modification with no preceding residue"))?;
    *residue = match residue {
        Residue::Just(c) => Residue::Mod(*c, delta),
        Residue::Mod(c, m) => Residue::Mod(*c, *m + delta),
    };
    *monoisotopic += delta;
    Ok(())
}

fn malformed(peptide: &str, position: usize, reason: &'static str) -> Error {
    Error::MalformedPeptide {
        peptide: peptide.into(),
        position,
        reason,
    }
}

impl std::fmt::Display for Peptide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for residue in &self.sequence {
            residue.fmt(f)?;
        }
        Ok(())
    }
}
