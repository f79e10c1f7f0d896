//! Podcast episode records and the bundled episode catalog.
//!
//! The catalog payload mirrors the podcast API the mobile app shipped with:
//! `results["podcast-episodes"][0].data[]`.  We keep the wire structs private
//! and flatten each entry into an immutable [`Episode`].

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown when an episode has no artwork template.
pub const PLACEHOLDER_ARTWORK: &str = "https://via.placeholder.com/300";

const BUNDLED_PODCASTS: &str = include_str!("../data/podcasts.json");

/// One podcast episode's playable metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub stream_url: String,
    /// URL template with `{w}`, `{h}` and `{f}` placeholders.
    pub artwork_template: Option<String>,
    pub show_title: String,
    pub duration_ms: u64,
    pub released_at: DateTime<Utc>,
    pub summary: String,
}

impl Episode {
    /// Artwork URL at the requested size and image format.
    pub fn artwork_url(&self, width: u32, height: u32, format: &str) -> String {
        match self.artwork_template.as_deref() {
            Some(t) if !t.is_empty() => t
                .replace("{w}", &width.to_string())
                .replace("{h}", &height.to_string())
                .replace("{f}", format),
            _ => PLACEHOLDER_ARTWORK.to_string(),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// "42 min", "1 hr 5 min", "45 sec".
    pub fn duration_label(&self) -> String {
        format_duration_ms(self.duration_ms)
    }

    /// Short release date, e.g. "Oct 19".
    pub fn release_label(&self) -> String {
        self.released_at.format("%b %-d").to_string()
    }
}

pub fn format_duration_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    if total_secs < 60 {
        return format!("{} sec", total_secs);
    }
    let total_mins = (total_secs + 30) / 60;
    let (hours, mins) = (total_mins / 60, total_mins % 60);
    match (hours, mins) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} hr", h),
        (h, m) => format!("{} hr {} min", h, m),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("malformed catalog payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate episode id {0:?}")]
    DuplicateId(String),
}

/// The full episode collection, in payload order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    episodes: Vec<Episode>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_PODCASTS)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let payload: CatalogPayload = serde_json::from_str(content)?;
        let data = payload
            .results
            .podcast_episodes
            .into_iter()
            .next()
            .map(|page| page.data)
            .unwrap_or_default();

        let episodes: Vec<Episode> = data.into_iter().map(Episode::from).collect();
        Self::from_episodes(episodes)
    }

    /// Wrap an already-built list, enforcing id uniqueness.
    pub fn from_episodes(episodes: Vec<Episode>) -> Result<Self, CatalogError> {
        if let Some(dup) = first_duplicate_id(&episodes) {
            return Err(CatalogError::DuplicateId(dup.to_string()));
        }
        Ok(Self { episodes })
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn into_episodes(self) -> Vec<Episode> {
        self.episodes
    }

    pub fn first(&self) -> Option<&Episode> {
        self.episodes.first()
    }

    pub fn get(&self, id: &str) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

/// Returns the first id that appears more than once.
pub fn first_duplicate_id(episodes: &[Episode]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(episodes.len());
    episodes
        .iter()
        .map(|e| e.id.as_str())
        .find(|id| !seen.insert(*id))
}

// ── Wire format ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CatalogPayload {
    results: CatalogResults,
}

#[derive(Debug, Deserialize)]
struct CatalogResults {
    #[serde(rename = "podcast-episodes", default)]
    podcast_episodes: Vec<EpisodePage>,
}

#[derive(Debug, Deserialize)]
struct EpisodePage {
    #[serde(default)]
    data: Vec<EpisodeData>,
}

#[derive(Debug, Deserialize)]
struct EpisodeData {
    id: String,
    attributes: EpisodeAttributes,
    #[serde(default)]
    relationships: Option<EpisodeRelationships>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EpisodeAttributes {
    name: String,
    asset_url: String,
    #[serde(default)]
    artwork: Option<Artwork>,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    duration_in_milliseconds: u64,
    release_date_time: DateTime<Utc>,
    #[serde(default)]
    description: Description,
}

#[derive(Debug, Deserialize)]
struct Artwork {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct Description {
    #[serde(default)]
    standard: String,
}

#[derive(Debug, Deserialize)]
struct EpisodeRelationships {
    #[serde(default)]
    podcast: Option<PodcastRelation>,
}

#[derive(Debug, Deserialize)]
struct PodcastRelation {
    #[serde(default)]
    data: Vec<PodcastData>,
}

#[derive(Debug, Deserialize)]
struct PodcastData {
    attributes: PodcastAttributes,
}

#[derive(Debug, Deserialize)]
struct PodcastAttributes {
    #[serde(default)]
    name: Option<String>,
}

impl From<EpisodeData> for Episode {
    fn from(d: EpisodeData) -> Self {
        let podcast_name = d
            .relationships
            .and_then(|r| r.podcast)
            .and_then(|p| p.data.into_iter().next())
            .and_then(|p| p.attributes.name)
            .filter(|n| !n.is_empty());
        let a = d.attributes;
        Episode {
            id: d.id,
            title: a.name,
            stream_url: a.asset_url,
            artwork_template: a.artwork.and_then(|art| art.url),
            show_title: podcast_name.unwrap_or(a.artist_name),
            duration_ms: a.duration_in_milliseconds,
            released_at: a.release_date_time,
            summary: a.description.standard,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn episode(id: &str) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {}", id),
            stream_url: format!("https://cdn.example.com/{}.mp3", id),
            artwork_template: Some("https://img.example.com/{w}x{h}.{f}".to_string()),
            show_title: "The Daily Brief".to_string(),
            duration_ms: 1_500_000,
            released_at: "2024-10-19T08:00:00Z".parse().unwrap(),
            summary: String::new(),
        }
    }

    const TWO_EPISODES: &str = r#"{
        "results": {
            "podcast-episodes": [{
                "data": [
                    {
                        "id": "E1",
                        "attributes": {
                            "name": "First",
                            "assetUrl": "https://cdn.example.com/e1.mp3",
                            "artwork": { "url": "https://img.example.com/{w}x{h}bb.{f}" },
                            "artistName": "Newsroom",
                            "durationInMilliseconds": 754000,
                            "releaseDateTime": "2024-10-18T10:00:00Z",
                            "description": { "standard": "Summary one" }
                        },
                        "relationships": {
                            "podcast": { "data": [{ "attributes": { "name": "Morning Show" } }] }
                        }
                    },
                    {
                        "id": "E2",
                        "attributes": {
                            "name": "Second",
                            "assetUrl": "https://cdn.example.com/e2.mp3",
                            "artistName": "Newsroom",
                            "durationInMilliseconds": 3900000,
                            "releaseDateTime": "2024-10-17T10:00:00Z"
                        }
                    }
                ]
            }]
        }
    }"#;

    #[test]
    fn test_parse_flattens_wire_format() {
        let catalog = Catalog::from_json_str(TWO_EPISODES).unwrap();
        assert_eq!(catalog.len(), 2);

        let e1 = &catalog.episodes()[0];
        assert_eq!(e1.id, "E1");
        assert_eq!(e1.title, "First");
        assert_eq!(e1.show_title, "Morning Show");
        assert_eq!(e1.summary, "Summary one");
        assert_eq!(e1.duration_ms, 754_000);

        // No podcast relationship: falls back to the artist name
        let e2 = &catalog.episodes()[1];
        assert_eq!(e2.show_title, "Newsroom");
        assert_eq!(e2.summary, "");
    }

    #[test]
    fn test_artwork_url_substitutes_placeholders() {
        let catalog = Catalog::from_json_str(TWO_EPISODES).unwrap();
        assert_eq!(
            catalog.episodes()[0].artwork_url(300, 300, "jpg"),
            "https://img.example.com/300x300bb.jpg"
        );
        assert_eq!(
            catalog.episodes()[1].artwork_url(300, 300, "jpg"),
            PLACEHOLDER_ARTWORK
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dup = TWO_EPISODES.replace("\"id\": \"E2\"", "\"id\": \"E1\"");
        match Catalog::from_json_str(&dup) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "E1"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_pages_yield_empty_catalog() {
        let catalog = Catalog::from_json_str(r#"{"results": {"podcast-episodes": []}}"#).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.first().is_none());
    }

    #[test]
    fn test_duration_labels() {
        assert_eq!(format_duration_ms(45_000), "45 sec");
        assert_eq!(format_duration_ms(754_000), "13 min");
        assert_eq!(format_duration_ms(3_600_000), "1 hr");
        assert_eq!(format_duration_ms(3_900_000), "1 hr 5 min");
    }

    #[test]
    fn test_release_label() {
        assert_eq!(episode("x").release_label(), "Oct 19");
    }
}
