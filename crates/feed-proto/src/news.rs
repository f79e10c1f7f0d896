//! News feed items (the article side of the app).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ColorScheme;
use crate::episode::CatalogError;

const BUNDLED_NEWS: &str = include_str!("../data/news.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    #[serde(rename = "logo_transparent_light")]
    pub logo_light: String,
    #[serde(rename = "logo_transparent_dark")]
    pub logo_dark: String,
}

impl Source {
    pub fn logo_for(&self, scheme: ColorScheme) -> &str {
        match scheme {
            ColorScheme::Light => &self.logo_light,
            ColorScheme::Dark => &self.logo_dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

/// Layout class of a news card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Full,
    Medium,
}

impl CardType {
    /// Rows a card of this class occupies in the list.
    pub fn height(self) -> u16 {
        match self {
            CardType::Full => 3,
            CardType::Medium => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub source: Source,
    pub created_at: DateTime<Utc>,
    pub topic: Topic,
    #[serde(default)]
    pub show_topic: bool,
    pub author: Author,
    pub featured_image: String,
    pub card_type: CardType,
}

impl FeedItem {
    /// "5m", "3h", "2d" relative to `now`.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let secs = (now - self.created_at).num_seconds().max(0);
        match secs {
            s if s < 3600 => format!("{}m", s / 60),
            s if s < 86_400 => format!("{}h", s / 3600),
            s => format!("{}d", s / 86_400),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsPayload {
    #[serde(default)]
    news: Vec<FeedItem>,
}

#[derive(Debug, Clone, Default)]
pub struct NewsFeed {
    items: Vec<FeedItem>,
}

impl NewsFeed {
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_NEWS)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let payload: NewsPayload = serde_json::from_str(content)?;
        let mut seen = HashSet::new();
        for item in &payload.news {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self {
            items: payload.news,
        })
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ITEM: &str = r#"{"news": [{
        "id": "n1",
        "title": "Markets rally",
        "source": {
            "id": "s1",
            "name": "Daily Ledger",
            "logo_transparent_light": "https://img.example.com/ledger-light.png",
            "logo_transparent_dark": "https://img.example.com/ledger-dark.png"
        },
        "created_at": "2024-10-19T06:00:00Z",
        "topic": { "id": "t1", "name": "Business" },
        "show_topic": true,
        "author": { "name": "A. Writer" },
        "featured_image": "https://img.example.com/rally.jpg",
        "card_type": "full"
    }]}"#;

    #[test]
    fn test_parse_item() {
        let feed = NewsFeed::from_json_str(ONE_ITEM).unwrap();
        let item = &feed.items()[0];
        assert_eq!(item.card_type, CardType::Full);
        assert!(item.show_topic);
        assert_eq!(item.topic.name, "Business");
        assert_eq!(
            item.source.logo_for(ColorScheme::Dark),
            "https://img.example.com/ledger-dark.png"
        );
        assert_eq!(
            item.source.logo_for(ColorScheme::Light),
            "https://img.example.com/ledger-light.png"
        );
    }

    #[test]
    fn test_age_label() {
        let feed = NewsFeed::from_json_str(ONE_ITEM).unwrap();
        let item = &feed.items()[0];
        let at = |s: &str| s.parse::<DateTime<Utc>>().unwrap();
        assert_eq!(item.age_label(at("2024-10-19T06:45:00Z")), "45m");
        assert_eq!(item.age_label(at("2024-10-19T09:00:00Z")), "3h");
        assert_eq!(item.age_label(at("2024-10-21T06:00:00Z")), "2d");
        // Clock skew never goes negative
        assert_eq!(item.age_label(at("2024-10-19T05:00:00Z")), "0m");
    }

    #[test]
    fn test_duplicate_news_ids_rejected() {
        let body = ONE_ITEM.trim_start_matches("{\"news\": [").trim_end_matches("]}");
        let doubled = format!("{{\"news\": [{}, {}]}}", body, body);
        assert!(matches!(
            NewsFeed::from_json_str(&doubled),
            Err(CatalogError::DuplicateId(id)) if id == "n1"
        ));
    }
}
