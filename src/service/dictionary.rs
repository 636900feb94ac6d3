//! English definitions from dictionaryapi.dev.

use url::Url;

use crate::{model::content::DictionaryEntry, service::http::JsonFetcher};

const DICTIONARY_API: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";

/// Most definitions shown for one word.
const MAX_DEFINITIONS: usize = 3;

/// Outcome of looking a word up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Definition),
    /// The word exists but has no meanings listed.
    NoDefinitions,
    /// The API failed or doesn't know the word.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Lines formatted as `*part of speech*: text`.
    pub lines: Vec<String>,
    pub phonetic: Option<String>,
}

/// Builds the lookup URL, percent-encoding the word as a single path segment.
pub fn lookup_url(word: &str) -> Option<Url> {
    let mut url = Url::parse(DICTIONARY_API).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(word);
    Some(url)
}

/// Reduces the API response to the first definition of each meaning of the first entry.
pub fn summarize(entries: Vec<DictionaryEntry>) -> Lookup {
    let Some(entry) = entries.into_iter().next() else {
        return Lookup::Unavailable;
    };
    if entry.meanings.is_empty() {
        return Lookup::NoDefinitions;
    }

    let lines = entry
        .meanings
        .into_iter()
        .filter_map(|meaning| {
            let text = meaning
                .definitions
                .into_iter()
                .next()?
                .definition
                .filter(|text| !text.is_empty())?;
            Some(format!(
                "*{}*: {}",
                meaning.part_of_speech.unwrap_or_default(),
                text
            ))
        })
        .take(MAX_DEFINITIONS)
        .collect();

    Lookup::Found(Definition {
        lines,
        phonetic: entry.phonetic.filter(|p| !p.is_empty()),
    })
}

pub struct DictionaryService<'a> {
    fetcher: JsonFetcher<'a>,
}

impl<'a> DictionaryService<'a> {
    pub fn new(client: &'a reqwest::Client) -> Self {
        Self {
            fetcher: JsonFetcher::new(client),
        }
    }

    pub async fn define(&self, word: &str) -> Lookup {
        let Some(url) = lookup_url(word) else {
            return Lookup::Unavailable;
        };

        match self.fetcher.get_json::<Vec<DictionaryEntry>>(url.as_str()).await {
            Some(entries) => summarize(entries),
            None => Lookup::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(json: &str) -> Vec<DictionaryEntry> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn encodes_word_as_one_segment() {
        assert_eq!(
            lookup_url("ice cream").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream"
        );
        assert_eq!(
            lookup_url("a/b").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/a%2Fb"
        );
    }

    #[test]
    fn takes_first_definition_of_each_meaning_up_to_three() {
        let lookup = summarize(entries(
            r#"[{"word":"run","phonetic":"/ɹʌn/","meanings":[
                {"partOfSpeech":"verb","definitions":[{"definition":"To move quickly."},{"definition":"ignored"}]},
                {"partOfSpeech":"noun","definitions":[{"definition":"An act of running."}]},
                {"partOfSpeech":"adjective","definitions":[]},
                {"partOfSpeech":"noun","definitions":[{"definition":"A score in cricket."}]},
                {"partOfSpeech":"verb","definitions":[{"definition":"Too many."}]}
            ]}]"#,
        ));

        assert_eq!(
            lookup,
            Lookup::Found(Definition {
                lines: vec![
                    "*verb*: To move quickly.".to_string(),
                    "*noun*: An act of running.".to_string(),
                    "*noun*: A score in cricket.".to_string(),
                ],
                phonetic: Some("/ɹʌn/".to_string()),
            })
        );
    }

    #[test]
    fn reports_missing_meanings() {
        assert_eq!(
            summarize(entries(r#"[{"word":"x","meanings":[]}]"#)),
            Lookup::NoDefinitions
        );
        assert_eq!(summarize(Vec::new()), Lookup::Unavailable);
    }
}
