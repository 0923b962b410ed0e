//! # entryattrs
//!
//! The attribute store behind a credential entry: a sorted key/value map with
//! five fixed default fields, arbitrary custom fields, per-field protection
//! flags and an ordered stream of lifecycle notifications.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Consumers (entry model, serializer, UI bindings)           │
//! │  - read via keys() / value() / is_protected()               │
//! │  - react via subscribe()                                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  AttributeStore (attributes/store.rs)                       │
//! │  - enforces the default-key invariant                       │
//! │  - publishes AttributeEvents synchronously                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence and encryption are not handled here. The store only tracks
//! which attributes are protected.
//!
//! ## Diagnostics
//!
//! The store logs through [`tracing`]; it never installs a subscriber itself.
//! See [`config`] for the settings that control what gets logged.

pub mod attributes;
pub mod config;
pub mod error;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use attributes::{AttributeEvent, AttributeStore, EventKind, SubscriptionId};
pub use config::StoreConfig;
pub use error::{AttributesError, InvalidReason, Result};
