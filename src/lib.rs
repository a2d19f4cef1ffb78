pub mod ion_series;
pub mod localize;
pub mod mass;
pub mod peptide;
pub mod scoring;
pub mod settings;
pub mod shift;
pub mod spectrum;

#[derive(Debug)]
pub enum Error {
    /// The peptide string could not be parsed into residue masses
    MalformedPeptide {
        peptide: String,
        position: usize,
        reason: &'static str,
    },
    /// No spectrum is available for a PSM's scan identifier
    SpectrumNotFound { spec_id: String },
    /// Peptide is too short to produce any fragment ions
    DegenerateLadder { peptide: String },
    /// A per-record failure, tagged with the scan identifier of the record
    /// that produced it
    Record {
        spec_id: String,
        source: Box<Error>,
    },
    Json(serde_json::Error),
}

impl Error {
    pub(crate) fn with_spec_id(self, spec_id: &str) -> Error {
        match self {
            err @ Error::Record { .. } => err,
            source => Error::Record {
                spec_id: spec_id.into(),
                source: Box::new(source),
            },
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedPeptide {
                peptide,
                position,
                reason,
            } => write!(
                f,
                "malformed peptide '{}' at position {}: {}",
                peptide, position, reason
            ),
            Error::SpectrumNotFound { spec_id } => {
                write!(f, "no spectrum found for scan '{}'", spec_id)
            }
            Error::DegenerateLadder { peptide } => write!(
                f,
                "peptide '{}' has fewer than 2 residues, no fragment ions can be generated",
                peptide
            ),
            Error::Record { spec_id, source } => write!(f, "{}: {}", spec_id, source),
            Error::Json(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Record { source, .. } => Some(source),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}
