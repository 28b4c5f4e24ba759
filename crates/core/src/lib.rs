//! Core library for the Beatstore storefront.
//!
//! The crate holds the in-memory state behind the storefront UI: a read-only
//! beat catalog, the filter that turns search text, tag and tempo range into
//! the visible list, the cart ledger and the single-slot playback state. All
//! operations are synchronous. The presentation layer calls into
//! [`Storefront`] for each UI event and re-renders from the returned view.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod playback;
pub mod session;
pub mod tags;

pub use cart::{CartLedger, CartLine};
pub use catalog::{BeatRecord, CatalogStore};
pub use config::StoreConfig;
pub use error::{BeatStoreError, Result};
pub use filter::{filter, BpmRange, FilterCriteria, TagFilter};
pub use playback::{AudioDriver, PlaybackController, PlaybackState, PlaybackTransition};
pub use session::{CartSummary, Storefront};
pub use tags::TagIndex;
