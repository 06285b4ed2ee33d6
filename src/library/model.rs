use std::path::PathBuf;
use std::time::Duration;

/// A single playable entry in the playlist.
#[derive(Clone, Debug)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    /// Pre-rendered list label, usually "Artist - Title".
    pub display: String,
}
