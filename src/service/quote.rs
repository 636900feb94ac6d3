//! Random quotes from quotable.io with a built-in fallback table.

use rand::Rng;
use url::Url;

use crate::{model::content::QuotableQuote, service::http::JsonFetcher};

const QUOTABLE_API: &str = "https://api.quotable.io/random";

/// Quote category offered by `/quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteKind {
    #[default]
    Inspirational,
    Wisdom,
    Famous,
    Technology,
    Humor,
}

impl QuoteKind {
    pub const ALL: [QuoteKind; 5] = [
        QuoteKind::Inspirational,
        QuoteKind::Wisdom,
        QuoteKind::Famous,
        QuoteKind::Technology,
        QuoteKind::Humor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inspirational => "inspirational",
            Self::Wisdom => "wisdom",
            Self::Famous => "famous",
            Self::Technology => "technology",
            Self::Humor => "humor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// quotable.io tag for the category.
    fn tag(self) -> &'static str {
        match self {
            Self::Famous => "famous-quotes",
            other => other.as_str(),
        }
    }

    /// Offline quotes as `(content, author)`.
    fn fallback_quotes(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Inspirational => &[
                ("The only way out is through.", "Robert Frost"),
                ("What we do now echoes in eternity.", "Marcus Aurelius"),
                ("Do or do not. There is no try.", "Yoda"),
            ],
            Self::Wisdom => &[
                ("Knowing yourself is the beginning of all wisdom.", "Aristotle"),
                ("The unexamined life is not worth living.", "Socrates"),
                (
                    "Measure what is measurable, and make measurable what is not.",
                    "Galileo",
                ),
            ],
            Self::Famous => &[
                ("I think, therefore I am.", "René Descartes"),
                ("Float like a butterfly, sting like a bee.", "Muhammad Ali"),
                ("Stay hungry, stay foolish.", "Steve Jobs"),
            ],
            Self::Technology => &[
                (
                    "Any sufficiently advanced technology is indistinguishable from magic.",
                    "Arthur C. Clarke",
                ),
                ("Programs must be written for people to read.", "Harold Abelson"),
                ("Talk is cheap. Show me the code.", "Linus Torvalds"),
            ],
            Self::Humor => &[
                ("I can resist everything except temptation.", "Oscar Wilde"),
                (
                    "I refuse to join any club that would have me as a member.",
                    "Groucho Marx",
                ),
                ("I'm not lazy, I'm on energy-saving mode.", "Unknown"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub content: String,
    pub author: String,
    /// Whether the quote came from the offline table.
    pub fallback: bool,
}

/// Picks a random quote of the given kind from the offline table.
pub fn fallback_quote<R: Rng + ?Sized>(kind: QuoteKind, rng: &mut R) -> Quote {
    let quotes = kind.fallback_quotes();
    let (content, author) = quotes[rng.random_range(0..quotes.len())];

    Quote {
        content: content.to_string(),
        author: author.to_string(),
        fallback: true,
    }
}

pub struct QuoteService<'a> {
    fetcher: JsonFetcher<'a>,
}

impl<'a> QuoteService<'a> {
    pub fn new(client: &'a reqwest::Client) -> Self {
        Self {
            fetcher: JsonFetcher::new(client),
        }
    }

    /// Random quote of the given kind; falls back to the offline table when the API fails.
    pub async fn random(&self, kind: QuoteKind) -> Quote {
        if let Some(quote) = self.fetch(kind).await {
            return quote;
        }

        tracing::debug!("Quote API unavailable, using fallback table");
        fallback_quote(kind, &mut rand::rng())
    }

    async fn fetch(&self, kind: QuoteKind) -> Option<Quote> {
        let url = Url::parse_with_params(QUOTABLE_API, &[("tags", kind.tag())]).ok()?;
        let quote: QuotableQuote = self.fetcher.get_json(url.as_str()).await?;

        Some(Quote {
            content: quote.content.filter(|c| !c.is_empty())?,
            author: quote.author.unwrap_or_else(|| "Unknown".to_string()),
            fallback: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn famous_uses_its_own_tag() {
        assert_eq!(QuoteKind::Famous.tag(), "famous-quotes");
        assert_eq!(QuoteKind::Humor.tag(), "humor");
    }

    #[test]
    fn fallback_comes_from_the_kind_table() {
        let mut rng = StdRng::seed_from_u64(3);

        for kind in QuoteKind::ALL {
            let quote = fallback_quote(kind, &mut rng);

            assert!(quote.fallback);
            assert!(kind
                .fallback_quotes()
                .iter()
                .any(|(content, author)| quote.content == *content && quote.author == *author));
        }
    }

    #[test]
    fn parses_kinds() {
        assert_eq!(QuoteKind::parse("wisdom"), Some(QuoteKind::Wisdom));
        assert_eq!(QuoteKind::parse("sad"), None);
    }
}
