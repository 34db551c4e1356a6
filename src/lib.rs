//! Wikkid - a wiki served straight out of a version-controlled tree
//!
//! Every request path is resolved against a [`FileStore`] into a
//! [`ResourceInfo`] and then into one of the [`Page`] variants, which the
//! views render through a [`Skin`].

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod page;
pub mod render;
pub mod resolver;
pub mod resource;
pub mod server;
pub mod store;
pub mod types;
pub mod utils;
pub mod views;

// Re-export commonly used items
pub use components::Skin;
pub use config::Config;
pub use errors::WikiError;
pub use page::{build_page, DirectoryListing, FilePage, ListingEntry, MissingPage, Page};
pub use resolver::{resolve_page_path, FRONT_PAGE, WIKI_SUFFIX};
pub use resource::{classify, FileType, ResourceInfo};
pub use server::Server;
pub use store::{ChildEntry, DiskFileStore, FileHandle, FileStore, MemoryFileStore};
pub use types::{AppState, SharedStore};
