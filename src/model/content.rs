//! Payloads returned by the third-party content APIs.

use serde::Deserialize;

/// `https://random.dog/woof.json`
#[derive(Debug, Deserialize)]
pub struct DogResponse {
    pub url: Option<String>,
}

/// One element of `https://api.thecatapi.com/v1/images/search`.
#[derive(Debug, Deserialize)]
pub struct CatApiImage {
    pub url: Option<String>,
}

/// `https://meme-api.com/gimme`
#[derive(Debug, Deserialize)]
pub struct MemeApiResponse {
    pub url: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "postLink")]
    pub post_link: Option<String>,
    pub subreddit: Option<String>,
    #[serde(default)]
    pub nsfw: bool,
}

/// `https://api.quotable.io/random`
#[derive(Debug, Deserialize)]
pub struct QuotableQuote {
    pub content: Option<String>,
    pub author: Option<String>,
}

/// One entry of `https://api.dictionaryapi.dev/api/v2/entries/en/{word}`.
#[derive(Debug, Deserialize)]
pub struct DictionaryEntry {
    pub phonetic: Option<String>,
    #[serde(default)]
    pub meanings: Vec<DictionaryMeaning>,
}

#[derive(Debug, Deserialize)]
pub struct DictionaryMeaning {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definitions: Vec<DictionaryDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct DictionaryDefinition {
    pub definition: Option<String>,
}
