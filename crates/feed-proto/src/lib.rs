pub mod config;
pub mod episode;
pub mod news;
pub mod platform;
pub mod player;
pub mod shuffle;
