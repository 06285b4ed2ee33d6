//! Playlist building: the `Track` model plus file/folder loading.
//!
//! `load_path` is the single entry point: it accepts either one audio file
//! or a directory that gets scanned according to `LibrarySettings`.

mod model;
mod scan;

pub use model::Track;
pub use scan::{load_path, scan};
