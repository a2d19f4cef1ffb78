use fnv::FnvHashMap;

/// Observed peak list for one scan. The m/z and intensity arrays are
/// parallel; no ordering of peaks is assumed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spectrum {
    pub mz: Vec<f64>,
    pub intensity: Vec<f64>,
}

impl Spectrum {
    pub fn new(mz: Vec<f64>, intensity: Vec<f64>) -> Self {
        assert_eq!(
            mz.len(),
            intensity.len(),
            "m/z and intensity arrays must be the same length"
        );
        Spectrum { mz, intensity }
    }

    pub fn len(&self) -> usize {
        self.mz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }
}

/// Scan identifier -> spectrum lookup, supplied by the caller (e.g. built
/// from a parsed mzML file)
pub type SpectrumLookup = FnvHashMap<String, Spectrum>;
