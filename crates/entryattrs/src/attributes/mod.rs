//! # Entry Attributes
//!
//! A credential entry stores its fields as string attributes:
//!
//! - **Default attributes**: `Title`, `URL`, `UserName`, `Password`, `Notes`.
//!   Always present, updatable, never removable.
//! - **Custom attributes**: anything else the user adds. Freely added and removed.
//! - **Protected attributes**: any attribute, default or custom, flagged for
//!   confidential handling. The store only tracks the flag; encrypting or
//!   hiding the value is up to its consumers.
//!
//! ## Notifications
//!
//! Every mutation publishes [`AttributeEvent`]s synchronously to subscribers.
//!
//! | Operation | Events |
//! |-----------|--------|
//! | `set` (new custom key) | `AboutToBeAdded`, `Modified`, `Added` |
//! | `set` (changed custom key) | `Modified`, `CustomKeyModified` |
//! | `set` (unchanged custom key) | none |
//! | `set` (default key) | `Modified` if changed, then always `DefaultKeyModified` |
//! | `remove` | `AboutToBeRemoved`, `Removed`, `Modified` |
//! | `copy_custom_keys_from` | `AboutToBeReset`, `Reset`, `Modified`, or none if equal |
//! | `clear` | `AboutToBeReset`, `Reset`, `Modified` |
//!
//! ## Usage
//!
//! ```
//! use entryattrs::attributes::{AttributeEvent, AttributeStore};
//!
//! let mut store = AttributeStore::new();
//! store.subscribe(|event: &AttributeEvent| println!("{:?}", event));
//!
//! store.set("Title", "GitHub", false);
//! store.set("RecoveryCode", "1234-5678", true);
//! assert!(store.is_protected("RecoveryCode"));
//! store.remove("RecoveryCode").unwrap();
//! ```

mod event;
pub mod keys;
mod store;

pub use event::{AttributeEvent, EventKind, SubscriptionId};
pub use keys::{is_default_attribute, DEFAULT_KEYS};
pub use store::AttributeStore;
