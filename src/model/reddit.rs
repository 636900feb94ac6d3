//! Reddit listing payloads and selection options.
//!
//! Only the fields used for picking an image are deserialized. Every field is optional in
//! practice (removed posts, odd listings), so missing fields fall back to defaults rather
//! than failing the whole listing.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingChild {
    #[serde(default)]
    pub data: Post,
}

/// A single Reddit submission.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub over_18: bool,
    pub url_overridden_by_dest: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub permalink: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub score: i64,
    pub subreddit: Option<String>,
}

/// An image picked from a subreddit, with the metadata shown in the embed footer.
#[derive(Debug, Clone, PartialEq)]
pub struct RedditImage {
    pub image_url: String,
    pub title: String,
    /// Absolute link to the submission.
    pub permalink: String,
    pub author: String,
    pub score: i64,
    pub subreddit: String,
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedditSort {
    #[default]
    Hot,
    New,
    Top,
}

impl RedditSort {
    pub const ALL: [RedditSort; 3] = [RedditSort::Hot, RedditSort::New, RedditSort::Top];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == value)
    }
}

/// Time window for the `top` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::Hour,
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Year,
        TimeWindow::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|window| window.as_str() == value)
    }
}

/// Subreddits offered by `/meme`.
pub const MEME_SUBREDDITS: [&str; 5] = [
    "memes",
    "dankmemes",
    "meirl",
    "wholesomememes",
    "ProgrammerHumor",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_sparse_listings() {
        let listing: Listing = serde_json::from_str(
            r#"{"data":{"children":[{"data":{"url":"https://i.redd.it/a.png"}},{"kind":"t3"}]}}"#,
        )
        .unwrap();

        assert_eq!(listing.data.children.len(), 2);
        assert_eq!(
            listing.data.children[0].data.url.as_deref(),
            Some("https://i.redd.it/a.png")
        );
        assert!(!listing.data.children[1].data.over_18);
    }

    #[test]
    fn parses_choice_values() {
        assert_eq!(RedditSort::parse("top"), Some(RedditSort::Top));
        assert_eq!(RedditSort::parse("best"), None);
        assert_eq!(TimeWindow::parse("all"), Some(TimeWindow::All));
    }
}
