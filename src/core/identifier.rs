//! Show identity parsing.
//!
//! Episode files carry an identity token of the form `S##E##`
//! (e.g. `Show.Name.S03E07.720p.mp4`). The token decides whether a file
//! is a show at all, and carries the season and episode numbers. The
//! text in front of it is the show title.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// `S` + two digits, `E` + two digits. Case-sensitive on the letters.
static IDENTITY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"S([0-9]{2})E([0-9]{2})").unwrap());

/// Season, episode and title derived from an episode filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaIdentifier {
    /// Season number.
    pub season: u32,
    /// Episode number.
    pub episode: u32,
    /// Show title (text before the identity token).
    pub title: String,
}

impl MediaIdentifier {
    /// Parse a filename containing an identity token.
    ///
    /// Only the first token is used. Fails with [`Error::ParseError`] when the
    /// name has no token.
    pub fn parse(file_name: &str) -> Result<Self> {
        let caps = IDENTITY_TOKEN
            .captures(file_name)
            .ok_or_else(|| Error::ParseError(format!("no S##E## token in '{}'", file_name)))?;

        let token = caps.get(0).map(|m| m.start()).unwrap_or(0);
        let season = number(caps.get(1).map(|m| m.as_str()), file_name)?;
        let episode = number(caps.get(2).map(|m| m.as_str()), file_name)?;

        Ok(Self {
            season,
            episode,
            title: title_before(file_name, token),
        })
    }

    /// Format as `S03E07`.
    pub fn token(&self) -> String {
        format!("S{:02}E{:02}", self.season, self.episode)
    }
}

impl std::fmt::Display for MediaIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.title, self.token())
    }
}

/// Whether the name contains an identity token.
pub fn has_identity_token(file_name: &str) -> bool {
    IDENTITY_TOKEN.is_match(file_name)
}

fn number(group: Option<&str>, file_name: &str) -> Result<u32> {
    group
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::ParseError(format!("bad S##E## token in '{}'", file_name)))
}

/// Everything before `end`, last path segment only, dots to spaces, trimmed.
fn title_before(file_name: &str, end: usize) -> String {
    let prefix = &file_name[..end];
    let segment = prefix.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(prefix);
    segment.replace('.', " ").trim().to_string()
}
