//! Candidate routes served from a JSON catalogue on disk.

use camino::{Utf8Path, Utf8PathBuf};
use stride_core::{CandidateError, CandidateQuery, CandidateSource, Route};

/// A fixed list of routes loaded from a JSON array of [`Route`] values.
///
/// Every query receives the whole catalogue; the recommendation engine
/// applies the geographic cap and preference filters.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use stride_data::JsonCatalogSource;
///
/// let source = JsonCatalogSource::load(Utf8Path::new("routes.json"))?;
/// println!("{} routes loaded", source.routes().len());
/// # Ok::<(), stride_core::CandidateError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonCatalogSource {
    path: Utf8PathBuf,
    routes: Vec<Route>,
}

impl JsonCatalogSource {
    /// Read and decode the catalogue at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError::Io`] when the file cannot be read and
    /// [`CandidateError::Parse`] when it is not a JSON array of routes.
    pub fn load(path: &Utf8Path) -> Result<Self, CandidateError> {
        let contents = stride_fs::read_utf8_to_string(path).map_err(|err| CandidateError::Io {
            path: path.to_string(),
            message: err.to_string(),
        })?;
        let routes = Self::parse(&contents).map_err(|err| CandidateError::Parse {
            message: format!("{path}: {err}"),
        })?;
        log::debug!("loaded {} routes from {path}", routes.len());
        Ok(Self {
            path: path.to_owned(),
            routes,
        })
    }

    /// Wrap an in-memory catalogue.
    #[must_use]
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self {
            path: Utf8PathBuf::new(),
            routes,
        }
    }

    fn parse(contents: &str) -> Result<Vec<Route>, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Path the catalogue was loaded from; empty for in-memory catalogues.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The catalogue's routes.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl CandidateSource for JsonCatalogSource {
    fn candidates(&self, _query: &CandidateQuery) -> Result<Vec<Route>, CandidateError> {
        Ok(self.routes.clone())
    }
}
