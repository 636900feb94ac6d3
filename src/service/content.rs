//! Random animal and meme images.
//!
//! Each command has a primary source and at least one fallback so a flaky API degrades
//! to a different picture instead of an error.

use crate::{
    model::{
        content::{CatApiImage, DogResponse, MemeApiResponse},
        reddit::{RedditImage, RedditSort, TimeWindow},
    },
    service::{http::JsonFetcher, reddit::RedditService},
};

const DOG_API: &str = "https://random.dog/woof.json";

const CAT_FALLBACK_API: &str = "https://api.thecatapi.com/v1/images/search";

/// Last-resort cat image that never needs an API call.
pub const CAT_STATIC_IMAGE: &str = "https://cataas.com/cat";

const MEME_FALLBACK_API: &str = "https://meme-api.com/gimme";

const VIDEO_EXTENSIONS: [&str; 3] = [".mp4", ".webm", ".mov"];

/// An image and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePick {
    /// Picked from the requested subreddit.
    Reddit(RedditImage),
    /// Picked from a fallback source after the subreddit failed.
    Fallback {
        image_url: String,
        title: Option<String>,
        link: Option<String>,
    },
}

/// Whether the URL points at a video embeds can't display.
pub fn is_video_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub struct ContentService<'a> {
    client: &'a reqwest::Client,
    fetcher: JsonFetcher<'a>,
}

impl<'a> ContentService<'a> {
    pub fn new(client: &'a reqwest::Client) -> Self {
        Self {
            client,
            fetcher: JsonFetcher::new(client),
        }
    }

    /// Random dog picture, re-rolled once if the first pick is a video.
    ///
    /// # Returns
    /// - `Some(String)` - Image URL
    /// - `None` - API unavailable, or it returned a video twice
    pub async fn dog(&self) -> Option<String> {
        let url = self.dog_url().await?;
        if !is_video_url(&url) {
            return Some(url);
        }

        tracing::debug!("Dog API returned a video, re-rolling");
        self.dog_url().await.filter(|url| !is_video_url(url))
    }

    /// Random cat picture: subreddit first, then TheCatAPI, then a static image.
    ///
    /// Always yields an image.
    pub async fn cat(
        &self,
        subreddit: &str,
        sort: RedditSort,
        window: TimeWindow,
        allow_nsfw: bool,
    ) -> ImagePick {
        if let Some(image) = RedditService::new(self.client)
            .random_image(subreddit, sort, window, allow_nsfw)
            .await
        {
            return ImagePick::Reddit(image);
        }

        let fallback = self
            .fetcher
            .get_json::<Vec<CatApiImage>>(CAT_FALLBACK_API)
            .await
            .and_then(|images| images.into_iter().find_map(|image| image.url));

        if fallback.is_none() {
            tracing::warn!("Cat APIs unavailable, using static image");
        }

        ImagePick::Fallback {
            image_url: fallback.unwrap_or_else(|| CAT_STATIC_IMAGE.to_string()),
            title: None,
            link: None,
        }
    }

    /// Random meme: subreddit first, then meme-api.
    ///
    /// # Returns
    /// - `Some(ImagePick)` - A meme was found
    /// - `None` - Both sources failed
    pub async fn meme(
        &self,
        subreddit: &str,
        sort: RedditSort,
        window: TimeWindow,
        allow_nsfw: bool,
    ) -> Option<ImagePick> {
        if let Some(image) = RedditService::new(self.client)
            .random_image(subreddit, sort, window, allow_nsfw)
            .await
        {
            return Some(ImagePick::Reddit(image));
        }

        let meme = self
            .fetcher
            .get_json::<MemeApiResponse>(MEME_FALLBACK_API)
            .await?;
        if meme.nsfw && !allow_nsfw {
            return None;
        }

        Some(ImagePick::Fallback {
            image_url: meme.url.filter(|url| !url.is_empty())?,
            title: meme.title,
            link: meme.post_link,
        })
    }

    async fn dog_url(&self) -> Option<String> {
        self.fetcher
            .get_json::<DogResponse>(DOG_API)
            .await?
            .url
            .filter(|url| !url.is_empty())
    }
}
