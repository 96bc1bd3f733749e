//! Media catalogs.
//!
//! A catalog enumerates raw video files from a source and splits them into
//! shows and movies. Nothing is cached: every query re-reads the source.

use crate::core::scanner;
use crate::models::media::{Media, Movie, Show};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Catalog source kinds known to the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// A directory on the local filesystem.
    Local,
}

impl CatalogKind {
    /// Construct a catalog of this kind for `source`.
    pub fn build(self, source: &Path) -> Result<Box<dyn Catalog>> {
        match self {
            CatalogKind::Local => Ok(Box::new(LocalCatalog::new(source)?)),
        }
    }
}

impl FromStr for CatalogKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(CatalogKind::Local),
            other => Err(Error::UnknownCatalogType(other.to_string())),
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Local => write!(f, "local"),
        }
    }
}

/// A file left out of a scan because it could not be classified.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of classifying a catalog.
#[derive(Debug, Default)]
pub struct CatalogScan {
    /// Files carrying an identity token.
    pub shows: Vec<Show>,
    /// Everything else.
    pub movies: Vec<Movie>,
    /// Files that failed classification.
    pub skipped: Vec<SkippedFile>,
}

impl CatalogScan {
    /// Classify each file into exactly one of shows, movies or skipped.
    pub fn from_files(files: Vec<PathBuf>) -> Self {
        let mut scan = CatalogScan::default();
        for path in files {
            match Media::classify(path.clone()) {
                Ok(Media::Show(show)) => scan.shows.push(show),
                Ok(Media::Movie(movie)) => scan.movies.push(movie),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    scan.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }
        scan
    }

    /// Append another scan's results after this one's.
    pub fn extend(&mut self, other: CatalogScan) {
        self.shows.extend(other.shows);
        self.movies.extend(other.movies);
        self.skipped.extend(other.skipped);
    }

    pub fn total(&self) -> usize {
        self.shows.len() + self.movies.len() + self.skipped.len()
    }
}

/// A source of media files.
pub trait Catalog: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> CatalogKind;

    /// Where the files come from.
    fn source(&self) -> &Path;

    /// Enumerate the raw files of this source.
    fn files(&self) -> Result<Vec<PathBuf>>;

    /// Re-scan the source and partition it.
    fn classify(&self) -> Result<CatalogScan> {
        Ok(CatalogScan::from_files(self.files()?))
    }

    fn shows(&self) -> Result<Vec<Show>> {
        Ok(self.classify()?.shows)
    }

    fn movies(&self) -> Result<Vec<Movie>> {
        Ok(self.classify()?.movies)
    }
}

/// Catalog backed by a local directory.
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    path: PathBuf,
}

impl LocalCatalog {
    /// Fails when `path` is missing or not a directory.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        scanner::validate_directory(&path)?;
        Ok(Self { path })
    }
}

impl Catalog for LocalCatalog {
    fn kind(&self) -> CatalogKind {
        CatalogKind::Local
    }

    fn source(&self) -> &Path {
        &self.path
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        scanner::list_video_files(&self.path)
    }
}

/// Ordered set of catalogs queried as one.
#[derive(Debug, Default)]
pub struct CatalogRegistry {
    catalogs: Vec<Box<dyn Catalog>>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog of type `kind` for `source` and append it.
    pub fn add(&mut self, kind: &str, source: impl AsRef<Path>) -> Result<()> {
        let kind: CatalogKind = kind.parse()?;
        let catalog = kind.build(source.as_ref())?;
        tracing::debug!("Registered {} catalog: {}", kind, source.as_ref().display());
        self.catalogs.push(catalog);
        Ok(())
    }

    /// Append an already constructed catalog.
    pub fn push(&mut self, catalog: Box<dyn Catalog>) {
        self.catalogs.push(catalog);
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Catalog> {
        self.catalogs.iter().map(|c| c.as_ref())
    }

    /// Scan every catalog, concatenated in registration order.
    pub fn scan(&self) -> Result<CatalogScan> {
        let mut combined = CatalogScan::default();
        for catalog in &self.catalogs {
            combined.extend(catalog.classify()?);
        }
        Ok(combined)
    }

    /// All shows across all catalogs.
    pub fn shows(&self) -> Result<Vec<Show>> {
        Ok(self.scan()?.shows)
    }

    /// All movies across all catalogs.
    pub fn movies(&self) -> Result<Vec<Movie>> {
        Ok(self.scan()?.movies)
    }
}
