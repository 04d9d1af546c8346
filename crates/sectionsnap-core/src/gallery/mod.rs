//! Photo gallery data
//!
//! Photos come from a remote repository listing, go through a local cache
//! keyed by the listing's latest revision, and are shown one at a time in a
//! lightbox.

pub mod cache;
pub mod fetcher;
pub mod lightbox;
pub mod photo;

pub use cache::{CachedGallery, GalleryCache};
pub use fetcher::{GalleryFetcher, GallerySource, GithubSource, RemoteFile};
pub use lightbox::Lightbox;
pub use photo::{fallback_photos, Photo};
