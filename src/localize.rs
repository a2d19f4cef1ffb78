use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ion_series::fragment;
use crate::mass::Tolerance;
use crate::peptide::Peptide;
use crate::scoring::Scorer;
use crate::shift::enumerate_shifts;
use crate::spectrum::SpectrumLookup;
use crate::Error;

/// A peptide-spectrum match from an open modification search
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Psm {
    /// Scan identifier, the key into the spectrum lookup
    pub spec_id: String,
    /// Annotated peptide string, e.g. `LES[+79.97]LIEK`
    pub peptide: String,
    /// Reported precursor charge
    pub charge: u8,
    /// Experimental mass
    pub expmass: f64,
    /// Calculated mass
    pub calcmass: f64,
}

impl Psm {
    /// The unlocalized mass shift left over by the open search
    pub fn delta_mass(&self) -> f64 {
        self.expmass - self.calcmass
    }
}

/// Where a mass shift sits on a peptide, and how confidently
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Localization {
    /// 0-based residue index bearing the shift, from the N-terminus
    pub position: usize,
    /// Hyperscore of the winning position
    pub hyperscore: f64,
    /// Margin over the runner-up position, always >= 0
    pub delta_hyperscore: f64,
}

/// Localizes open-search mass shifts, one PSM at a time
pub struct Localizer<'s> {
    spectra: &'s SpectrumLookup,
    scorer: Scorer,
}

impl<'s> Localizer<'s> {
    pub fn new(spectra: &'s SpectrumLookup, fragment_tol: Tolerance) -> Self {
        Localizer {
            spectra,
            scorer: Scorer::new(fragment_tol),
        }
    }

    /// Score every residue position for the PSM's mass shift and report the
    /// best-supported one
    pub fn localize(&self, psm: &Psm) -> Result<Localization, Error> {
        self.localize_inner(psm)
            .map_err(|e| e.with_spec_id(&psm.spec_id))
    }

    fn localize_inner(&self, psm: &Psm) -> Result<Localization, Error> {
        let spectrum = self
            .spectra
            .get(&psm.spec_id)
            .ok_or_else(|| Error::SpectrumNotFound {
                spec_id: psm.spec_id.clone(),
            })?;
        let peptide = Peptide::parse(&psm.peptide)?;
        let (b, y) = fragment(&peptide, psm.charge)?;

        let shift = psm.delta_mass();
        let b = enumerate_shifts(&b, shift);
        let y = enumerate_shifts(&y, shift);

        let mut scores = self.scorer.score(&b, &y, spectrum);
        // The scorer indexes hypotheses by suffix-series boundary: a shift on
        // residue r corresponds to boundary len - 1 - r. Reversing puts the
        // vector in ascending residue order, which is the convention for
        // every position this crate reports.
        scores.reverse();

        let (best, second) = top_two(&scores);
        Ok(Localization {
            position: best,
            hyperscore: scores[best],
            delta_hyperscore: scores[best] - scores[second],
        })
    }

    /// Localize a batch of PSMs in parallel. Results are returned in input
    /// order; failed records are reported individually and never abort the
    /// rest of the batch.
    pub fn localize_batch(&self, psms: &[Psm]) -> Vec<Result<Localization, Error>> {
        let results = psms
            .par_iter()
            .map(|psm| self.localize(psm))
            .collect::<Vec<_>>();

        let failed = results.iter().filter(|r| r.is_err()).count();
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            log::warn!("localization failed: {}", err);
        }
        log::info!("localized {} of {} PSMs", results.len() - failed, psms.len());
        results
    }
}

/// Indices of the two highest scores, ties broken by first-seen index.
/// Callers guarantee `scores.len() >= 2` (a peptide always has at least two
/// residues by the time it is scored).
fn top_two(scores: &[f64]) -> (usize, usize) {
    let (mut best, mut second) = match scores[1] > scores[0] {
        true => (1, 0),
        false => (0, 1),
    };
    for idx in 2..scores.len() {
        if scores[idx] > scores[best] {
            second = best;
            best = idx;
        } else if scores[idx] > scores[second] {
            second = idx;
        }
    }
    (best, second)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::spectrum::{Spectrum, SpectrumLookup};

    /// Synthetic spectrum holding every fragment ion of the peptide, at
    /// unit intensity
    fn spectrum_of(peptide: &str, charge: u8) -> Spectrum {
        let (b, y) = fragment(&Peptide::parse(peptide).unwrap(), charge).unwrap();
        let mz = b
            .as_slice()
            .iter()
            .chain(y.as_slice())
            .copied()
            .collect::<Vec<_>>();
        let intensity = vec![1.0; mz.len()];
        Spectrum::new(mz, intensity)
    }

    fn lookup(spec_id: &str, spectrum: Spectrum) -> SpectrumLookup {
        let mut spectra = SpectrumLookup::default();
        spectra.insert(spec_id.into(), spectrum);
        spectra
    }

    fn lesliek_psm(charge: u8) -> Psm {
        Psm {
            spec_id: "scan=1".into(),
            peptide: "LESLIEK".into(),
            charge,
            expmass: 909.5,
            calcmass: 830.5,
        }
    }

    #[test]
    fn localizes_to_modified_serine() {
        // Spectrum generated from LES[+79]LIEK must pin the 79 Da shift on
        // the serine at residue index 2 of the unmodified sequence
        for charge in [1, 2] {
            let spectra = lookup("scan=1", spectrum_of("LES[+79]LIEK", charge));
            let localizer = Localizer::new(&spectra, Tolerance::Ppm(-10.0, 10.0));
            let result = localizer.localize(&lesliek_psm(charge)).unwrap();
            assert_eq!(result.position, 2, "charge {}", charge);
            assert!(result.hyperscore > 0.0);
            assert!(result.delta_hyperscore > 0.0);
        }
    }

    #[test]
    fn missing_spectrum() {
        let spectra = SpectrumLookup::default();
        let localizer = Localizer::new(&spectra, Tolerance::Ppm(-10.0, 10.0));
        match localizer.localize(&lesliek_psm(2)) {
            Err(Error::Record { spec_id, source }) => {
                assert_eq!(spec_id, "scan=1");
                assert!(matches!(*source, Error::SpectrumNotFound { .. }));
            }
            other => panic!("expected spectrum lookup failure, got {:?}", other),
        }
    }

    #[test]
    fn malformed_peptide_carries_scan_id() {
        let spectra = lookup("scan=1", spectrum_of("LESLIEK", 2));
        let localizer = Localizer::new(&spectra, Tolerance::Ppm(-10.0, 10.0));
        let psm = Psm {
            peptide: "LEZLIEK".into(),
            ..lesliek_psm(2)
        };
        match localizer.localize(&psm) {
            Err(Error::Record { spec_id, source }) => {
                assert_eq!(spec_id, "scan=1");
                assert!(matches!(*source, Error::MalformedPeptide { .. }));
            }
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[test]
    fn batch_reports_failures_in_input_order() {
        let spectra = lookup("scan=1", spectrum_of("LES[+79]LIEK", 2));
        let localizer = Localizer::new(&spectra, Tolerance::Ppm(-10.0, 10.0));
        let psms = vec![
            lesliek_psm(2),
            Psm {
                spec_id: "scan=2".into(),
                ..lesliek_psm(2)
            },
            Psm {
                peptide: "K".into(),
                ..lesliek_psm(2)
            },
        ];
        let results = localizer.localize_batch(&psms);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().position, 2);
        assert!(results[1].is_err());
        assert!(matches!(
            results[2].as_ref().unwrap_err(),
            Error::Record { .. }
        ));
    }

    #[test]
    fn top_two_selection() {
        assert_eq!(top_two(&[1.0, 2.0, 3.0]), (2, 1));
        assert_eq!(top_two(&[3.0, 1.0, 2.0]), (0, 2));
        // ties broken by first-seen index
        assert_eq!(top_two(&[2.0, 2.0, 2.0]), (0, 1));
        assert_eq!(top_two(&[1.0, 5.0]), (1, 0));
    }
}
