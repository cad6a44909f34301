//! Data structures for the show catalog
//!
//! Records are created only by parsing a successful TVMaze response and are
//! never mutated afterwards:
//! - **Show**: a series in the remote catalog
//! - **Episode**: one episode, owned by a show through `show_id`
//! - **JumpTarget**: the "go to episode" selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable TVMaze show identifier
pub type ShowId = u64;

/// Stable TVMaze episode identifier
pub type EpisodeId = u64;

/// Placeholder shown for episodes without a summary
pub const NO_SUMMARY: &str = "No summary for this episode.";

// =============================================================================
// Show
// =============================================================================

/// A television series from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub name: String,
    /// Summary as delivered by the API (HTML)
    pub summary: Option<String>,
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub rating: Option<f32>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    /// Medium-sized poster URL
    pub image: Option<String>,
}

impl Show {
    /// Minimal show with only the required fields set
    pub fn new(id: ShowId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            summary: None,
            genres: Vec::new(),
            status: None,
            rating: None,
            runtime: None,
            image: None,
        }
    }

    /// Summary flattened to plain text
    pub fn summary_text(&self) -> Option<String> {
        self.summary.as_deref().and_then(html_to_text)
    }

    /// Genres joined for display and matching
    pub fn genre_line(&self) -> String {
        self.genres.join(", ")
    }

    /// Case-insensitive substring match over name, summary and genres.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self
                .summary_text()
                .is_some_and(|s| s.to_lowercase().contains(needle))
            || self.genre_line().to_lowercase().contains(needle)
    }
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.genres.is_empty() {
            write!(f, " [{}]", self.genre_line())?;
        }
        if let Some(rating) = self.rating {
            write!(f, " ★ {:.1}", rating)?;
        }
        Ok(())
    }
}

// =============================================================================
// Episode
// =============================================================================

/// A single episode of a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    /// Owning show
    pub show_id: ShowId,
    pub name: String,
    /// Season number, starting at 1
    pub season: u32,
    /// Episode number within the season, starting at 1
    pub number: u32,
    /// Summary as delivered by the API (HTML)
    pub summary: Option<String>,
    /// Medium-sized still URL
    pub image: Option<String>,
}

impl Episode {
    /// Episode code such as `S01E02`
    pub fn code(&self) -> String {
        episode_code(self.season, self.number)
    }

    /// Summary flattened to plain text
    pub fn summary_text(&self) -> Option<String> {
        self.summary.as_deref().and_then(html_to_text)
    }

    /// Summary text, or the placeholder when the API has none
    pub fn summary_or_placeholder(&self) -> String {
        self.summary_text().unwrap_or_else(|| NO_SUMMARY.to_string())
    }

    /// Card title: `Name - S01E02`
    pub fn title(&self) -> String {
        format!("{} - {}", self.name, self.code())
    }

    /// Card info line: `Season 1 Episode 2`
    pub fn info_line(&self) -> String {
        format!("Season {} Episode {}", self.season, self.number)
    }

    /// Case-insensitive substring match over name and summary.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self
                .summary_text()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.name)
    }
}

/// Format a season/episode pair, padding each number to at least two digits
pub fn episode_code(season: u32, number: u32) -> String {
    format!("S{:02}E{:02}", season, number)
}

// =============================================================================
// Jump Target
// =============================================================================

/// "Go to episode" selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpTarget {
    /// Every episode of the current show
    #[default]
    All,
    /// A single episode
    Episode(EpisodeId),
}

impl JumpTarget {
    /// Parse a picker value: `all` or a numeric episode id
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Some(JumpTarget::All);
        }
        value.parse().ok().map(JumpTarget::Episode)
    }
}

impl fmt::Display for JumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JumpTarget::All => write!(f, "Show all episodes"),
            JumpTarget::Episode(id) => write!(f, "episode {}", id),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Flatten an HTML fragment to trimmed text; empty results become `None`
pub fn html_to_text(html: &str) -> Option<String> {
    let text = nanohtml2text::html2text(html);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pilot() -> Episode {
        Episode {
            id: 1,
            show_id: 82,
            name: "Pilot".to_string(),
            season: 1,
            number: 1,
            summary: Some("<p>The <b>first</b> episode.</p>".to_string()),
            image: None,
        }
    }

    #[test]
    fn test_episode_code_padding() {
        assert_eq!(episode_code(1, 2), "S01E02");
        assert_eq!(episode_code(12, 3), "S12E03");
        assert_eq!(episode_code(1, 23), "S01E23");
        assert_eq!(episode_code(100, 1), "S100E01");
    }

    #[test]
    fn test_episode_display_strings() {
        let ep = pilot();
        assert_eq!(ep.title(), "Pilot - S01E01");
        assert_eq!(ep.info_line(), "Season 1 Episode 1");
        assert_eq!(ep.to_string(), "S01E01 - Pilot");
    }

    #[test]
    fn test_summary_is_flattened() {
        let ep = pilot();
        let text = ep.summary_text().unwrap();
        assert!(text.contains("first"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_missing_summary_placeholder() {
        let mut ep = pilot();
        ep.summary = None;
        assert_eq!(ep.summary_or_placeholder(), NO_SUMMARY);

        ep.summary = Some("<p></p>".to_string());
        assert_eq!(ep.summary_or_placeholder(), NO_SUMMARY);
    }

    #[test]
    fn test_episode_matches_ignores_markup() {
        let ep = pilot();
        assert!(ep.matches("pilot"));
        assert!(ep.matches("first episode"));
        assert!(ep.matches(""));
        // Tag names are not part of the text
        assert!(!ep.matches("<b>"));
        assert!(!ep.matches("xyz"));
    }

    #[test]
    fn test_show_matches_genres() {
        let mut show = Show::new(82, "Game of Thrones");
        show.genres = vec!["Drama".to_string(), "Fantasy".to_string()];
        assert!(show.matches("fantasy"));
        assert!(show.matches("thrones"));
        assert!(!show.matches("comedy"));
    }

    #[test]
    fn test_jump_target_parse() {
        assert_eq!(JumpTarget::parse("all"), Some(JumpTarget::All));
        assert_eq!(JumpTarget::parse(" ALL "), Some(JumpTarget::All));
        assert_eq!(JumpTarget::parse("4952"), Some(JumpTarget::Episode(4952)));
        assert_eq!(JumpTarget::parse("pilot"), None);
    }
}
