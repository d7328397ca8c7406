//! Lyrics lookup
//!
//! Plain-text lyrics from a lyrics.ovh compatible service.

pub mod ovh;

pub use ovh::LyricsOvhClient;
