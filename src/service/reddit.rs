//! Picking random images from subreddit listings.
//!
//! A listing of up to 50 posts is fetched, shuffled, and the first post that links directly
//! to an image wins. Galleries, videos and link posts are skipped.

use rand::{seq::SliceRandom, Rng};
use url::Url;

use crate::{
    model::reddit::{Listing, Post, RedditImage, RedditSort, TimeWindow},
    service::http::JsonFetcher,
};

pub const REDDIT_BASE: &str = "https://www.reddit.com";

const LISTING_LIMIT: &str = "50";

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".gifv", ".webp"];

const IMAGE_HOSTS: [&str; 3] = ["i.redd.it", "preview.redd.it", "i.imgur.com"];

/// Whether `name` is a plausible subreddit name (2-21 letters, digits or underscores).
pub fn is_valid_subreddit(name: &str) -> bool {
    (2..=21).contains(&name.len()) && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builds the JSON listing URL, adding the time window only for `top`.
pub fn listing_url(
    subreddit: &str,
    sort: RedditSort,
    window: TimeWindow,
) -> Result<Url, url::ParseError> {
    let mut url =
        Url::parse(REDDIT_BASE)?.join(&format!("r/{}/{}.json", subreddit, sort.as_str()))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("limit", LISTING_LIMIT);
        if sort == RedditSort::Top {
            query.append_pair("t", window.as_str());
        }
    }

    Ok(url)
}

/// Direct image URL of a post, if it has one the embed can display.
///
/// `.gifv` links are rewritten to `.gif`. NSFW posts are rejected unless allowed.
pub fn image_url(post: &Post, allow_nsfw: bool) -> Option<String> {
    if post.over_18 && !allow_nsfw {
        return None;
    }

    let url = [&post.url_overridden_by_dest, &post.url]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())?;
    let lower = url.to_lowercase();

    if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        if lower.ends_with(".gifv") {
            return Some(url[..url.len() - 1].to_string());
        }
        return Some(url.clone());
    }

    if IMAGE_HOSTS.iter().any(|host| lower.contains(host)) {
        return Some(url.clone());
    }

    None
}

/// Shuffles the posts and returns the first one with a usable image.
///
/// # Arguments
/// - `posts` - Posts from the listing
/// - `subreddit` - Requested subreddit, used when a post doesn't name its own
/// - `allow_nsfw` - Whether NSFW posts may be picked
/// - `rng` - Source of randomness for the shuffle
pub fn pick_image<R: Rng + ?Sized>(
    mut posts: Vec<Post>,
    subreddit: &str,
    allow_nsfw: bool,
    rng: &mut R,
) -> Option<RedditImage> {
    posts.shuffle(rng);

    posts.into_iter().find_map(|post| {
        let image_url = image_url(&post, allow_nsfw)?;

        Some(RedditImage {
            image_url,
            title: post.title.unwrap_or_else(|| "Untitled".to_string()),
            permalink: format!("{}{}", REDDIT_BASE, post.permalink.unwrap_or_default()),
            author: post.author.unwrap_or_else(|| "[deleted]".to_string()),
            score: post.score,
            subreddit: post.subreddit.unwrap_or_else(|| subreddit.to_string()),
        })
    })
}

pub struct RedditService<'a> {
    fetcher: JsonFetcher<'a>,
}

impl<'a> RedditService<'a> {
    pub fn new(client: &'a reqwest::Client) -> Self {
        Self {
            fetcher: JsonFetcher::new(client),
        }
    }

    /// Fetches a listing and picks a random image from it.
    ///
    /// # Returns
    /// - `Some(RedditImage)` - An image post was found
    /// - `None` - Listing unavailable or it held no usable image
    pub async fn random_image(
        &self,
        subreddit: &str,
        sort: RedditSort,
        window: TimeWindow,
        allow_nsfw: bool,
    ) -> Option<RedditImage> {
        let url = match listing_url(subreddit, sort, window) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid listing URL for r/{}: {}", subreddit, e);
                return None;
            }
        };

        let listing: Listing = self.fetcher.get_json(url.as_str()).await?;
        let posts = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .collect();

        let image = pick_image(posts, subreddit, allow_nsfw, &mut rand::rng());
        if image.is_none() {
            tracing::debug!("No usable image in r/{}", subreddit);
        }

        image
    }
}
