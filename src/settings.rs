use serde::{Deserialize, Serialize};

use crate::mass::Tolerance;
use crate::Error;

/// The slice of a Sage search configuration that localization needs. The
/// fragment tolerance used for localization should be the one the search
/// was run with.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub fragment_tol: Tolerance,
}

impl Settings {
    /// Deserialize settings from the contents of a Sage JSON configuration
    /// file; unrelated search parameters are ignored
    pub fn from_json(contents: &str) -> Result<Self, Error> {
        serde_json::from_str(contents).map_err(Error::Json)
    }
}
