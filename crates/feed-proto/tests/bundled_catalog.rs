//! Sanity checks on the data compiled into the binary.

use std::collections::HashSet;

use feed_proto::episode::{first_duplicate_id, Catalog};
use feed_proto::news::{CardType, NewsFeed};
use feed_proto::shuffle::shuffled;

#[test]
fn bundled_catalog_has_room_for_editors_pick_and_body() {
    let catalog = Catalog::bundled().expect("bundled catalog should parse");
    assert!(
        catalog.len() > 5,
        "need more than the 5 editor's pick episodes, got {}",
        catalog.len()
    );
    for ep in catalog.episodes() {
        assert!(!ep.title.is_empty(), "{} has no title", ep.id);
        assert!(ep.stream_url.starts_with("https://"), "{} stream url", ep.id);
        assert!(!ep.show_title.is_empty(), "{} has no show title", ep.id);
        let art = ep.artwork_url(300, 300, "jpg");
        assert!(!art.contains('{'), "unsubstituted artwork template: {}", art);
    }
}

#[test]
fn bundled_catalog_ids_stay_unique_across_shuffles() {
    let catalog = Catalog::bundled().unwrap();
    assert!(first_duplicate_id(catalog.episodes()).is_none());

    let mut current = catalog.episodes().to_vec();
    for _ in 0..20 {
        current = shuffled(&current);
        let ids: HashSet<&str> = current.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }
}

#[test]
fn bundled_news_has_both_card_types() {
    let feed = NewsFeed::bundled().expect("bundled news should parse");
    assert!(!feed.is_empty());
    assert!(feed.items().iter().any(|i| i.card_type == CardType::Full));
    assert!(feed.items().iter().any(|i| i.card_type == CardType::Medium));
}
