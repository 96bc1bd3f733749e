//! Media-related data models.

use crate::core::catalog::CatalogRegistry;
use crate::core::identifier::{has_identity_token, MediaIdentifier};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Media type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Movies,
    Shows,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movies => write!(f, "movies"),
            MediaType::Shows => write!(f, "shows"),
        }
    }
}

/// Resolution guessed from the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    FullHd,
    Hd,
    Unknown,
}

impl Resolution {
    /// Infer from filename substrings. 1080p is checked before 720p.
    pub fn from_file_name(name: &str) -> Self {
        if name.contains("1080p") || name.contains("1080P") {
            Resolution::FullHd
        } else if name.contains("720p") || name.contains("720P") {
            Resolution::Hd
        } else {
            Resolution::Unknown
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::FullHd => write!(f, "1080p"),
            Resolution::Hd => write!(f, "720p"),
            Resolution::Unknown => write!(f, "unknown"),
        }
    }
}

/// Capabilities shared by every media file.
pub trait MediaFile {
    /// Full path to the file.
    fn path(&self) -> &Path;

    /// File name without path.
    fn file_name(&self) -> String {
        file_name_of(self.path())
    }

    /// Resolution guessed from the file name.
    fn resolution(&self) -> Resolution {
        Resolution::from_file_name(&self.file_name())
    }
}

/// A movie file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    path: PathBuf,
}

impl Movie {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name without extension, dots replaced by spaces.
    pub fn title(&self) -> String {
        let name = self.file_name();
        let stem = name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(&name);
        stem.split('.').collect::<Vec<_>>().join(" ")
    }

    /// Whether the file name mentions a DTS audio track.
    pub fn is_dts(&self) -> bool {
        self.file_name().to_lowercase().contains("dts")
    }

    /// Whether the file name marks a BluRay source.
    pub fn is_bluray(&self) -> bool {
        self.file_name().to_lowercase().contains("bluray")
    }

    /// Listing line for this movie.
    pub fn info(&self) -> String {
        self.title()
    }
}

impl MediaFile for Movie {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// A TV episode file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    path: PathBuf,
    identifier: MediaIdentifier,
}

impl Show {
    /// Build a show from a path whose file name carries an identity token.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let identifier = MediaIdentifier::parse(utf8_file_name(&path)?)?;
        Ok(Self { path, identifier })
    }

    pub fn season(&self) -> u32 {
        self.identifier.season
    }

    pub fn episode(&self) -> u32 {
        self.identifier.episode
    }

    pub fn title(&self) -> &str {
        &self.identifier.title
    }

    pub fn identifier(&self) -> &MediaIdentifier {
        &self.identifier
    }

    /// Number of shows in `all_shows` with exactly this title.
    pub fn episode_count(&self, all_shows: &[Show]) -> usize {
        all_shows
            .iter()
            .filter(|show| show.title() == self.title())
            .count()
    }

    /// Listing line: `"<title> (<episode count>)"`.
    ///
    /// The count comes from a fresh scan of every registered catalog, so the
    /// line always reflects what is on disk right now.
    pub fn info(&self, catalogs: &CatalogRegistry) -> Result<String> {
        let all_shows = catalogs.shows()?;
        Ok(format!("{} ({})", self.title(), self.episode_count(&all_shows)))
    }
}

impl MediaFile for Show {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// A classified media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Movie(Movie),
    Show(Show),
}

impl Media {
    /// Classify a file: an identity token in the file name makes it a show,
    /// anything else is a movie.
    ///
    /// Fails with [`Error::ParseError`] when the file name is not valid UTF-8.
    pub fn classify(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if has_identity_token(utf8_file_name(&path)?) {
            Ok(Media::Show(Show::new(path)?))
        } else {
            Ok(Media::Movie(Movie::new(path)))
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            Media::Movie(_) => MediaType::Movies,
            Media::Show(_) => MediaType::Shows,
        }
    }

    /// Listing line for this media.
    pub fn info(&self, catalogs: &CatalogRegistry) -> Result<String> {
        match self {
            Media::Movie(movie) => Ok(movie.info()),
            Media::Show(show) => show.info(catalogs),
        }
    }
}

impl MediaFile for Media {
    fn path(&self) -> &Path {
        match self {
            Media::Movie(movie) => movie.path(),
            Media::Show(show) => show.path(),
        }
    }
}

fn utf8_file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .unwrap_or_default()
        .to_str()
        .ok_or_else(|| Error::ParseError(format!("file name is not UTF-8: {}", path.display())))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            Media::classify("Show.Name.S01E02.mp4").unwrap().media_type(),
            MediaType::Shows
        );
        assert_eq!(
            Media::classify("Movie.Name.2020.mp4").unwrap().media_type(),
            MediaType::Movies
        );
    }

    #[test]
    fn test_classify_ignores_directory_tokens() {
        let media = Media::classify("/media/Show.S01E01/Movie.2020.mp4").unwrap();
        assert_eq!(media.media_type(), MediaType::Movies);
    }

    #[test]
    fn test_resolution() {
        assert_eq!(Movie::new("X.1080p.mp4").resolution(), Resolution::FullHd);
        assert_eq!(Movie::new("X.720P.mp4").resolution(), Resolution::Hd);
        assert_eq!(Movie::new("X.mp4").resolution(), Resolution::Unknown);
        assert_eq!(Resolution::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_movie_title() {
        let movie = Movie::new("/Volumes/External/Movie.2020.mp4");
        assert_eq!(movie.title(), "Movie 2020");
        assert_eq!(movie.file_name(), "Movie.2020.mp4");
        assert_eq!(movie.info(), "Movie 2020");
    }

    #[test]
    fn test_movie_title_without_extension() {
        assert_eq!(Movie::new("Heat").title(), "Heat");
    }

    #[test]
    fn test_movie_flags() {
        let movie = Movie::new("Heat.1995.BluRay.DTS.1080p.mp4");
        assert!(movie.is_dts());
        assert!(movie.is_bluray());

        let movie = Movie::new("Heat.1995.WEB.mp4");
        assert!(!movie.is_dts());
        assert!(!movie.is_bluray());
    }

    #[test]
    fn test_show_accessors() {
        let show = Show::new("/tv/Show.Name.S03E07.720p.mp4").unwrap();
        assert_eq!(show.season(), 3);
        assert_eq!(show.episode(), 7);
        assert_eq!(show.title(), "Show Name");
        assert_eq!(show.resolution(), Resolution::Hd);
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_rejects_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"Show.\xff.S01E01.mp4");
        let err = Media::classify(Path::new("/tv").join(name)).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn test_show_without_token_fails() {
        assert!(Show::new("Movie.2020.mp4").is_err());
    }

    #[test]
    fn test_episode_count_is_case_sensitive() {
        let shows = vec![
            Show::new("Show.Name.S01E01.mp4").unwrap(),
            Show::new("Show.Name.S01E02.mp4").unwrap(),
            Show::new("show.name.S01E03.mp4").unwrap(),
            Show::new("Other.S01E01.mp4").unwrap(),
        ];
        assert_eq!(shows[0].episode_count(&shows), 2);
        assert_eq!(shows[2].episode_count(&shows), 1);
    }
}
