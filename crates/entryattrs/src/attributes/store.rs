//! The attribute store.
//!
//! [`AttributeStore`] holds an entry's attributes as a sorted key/value map
//! plus the subset of keys flagged as protected. The five default attributes
//! are always present. Every mutation publishes [`AttributeEvent`]s to the
//! store's subscribers in a fixed order, documented per method.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace, warn};

use super::event::{AttributeEvent, SubscriptionId, Subscribers};
use super::keys::{default_keys, is_default_attribute};
use crate::config::StoreConfig;
use crate::error::{AttributesError, InvalidReason, Result};

const MASK: &str = "******";

pub struct AttributeStore {
    attributes: BTreeMap<String, String>,
    protected: BTreeSet<String>,
    subscribers: Subscribers,
    config: StoreConfig,
}

impl Default for AttributeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeStore {
    /// Create a store holding the default attributes, all empty and unprotected.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let mut store = Self {
            attributes: BTreeMap::new(),
            protected: BTreeSet::new(),
            subscribers: Subscribers::default(),
            config,
        };
        store.populate_defaults();
        store
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // --- Subscriptions ---

    /// Register a callback for every notification this store publishes.
    ///
    /// Callbacks run synchronously, in registration order, while the mutating
    /// call is still in progress. They see only the event, so they cannot
    /// reach back into the store.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&AttributeEvent) + 'static,
    {
        self.subscribers.add(callback)
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    // --- Reads ---

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }

    /// Keys that are not default attributes, in ascending order.
    pub fn custom_keys(&self) -> Vec<String> {
        self.attributes
            .keys()
            .filter(|key| !is_default_attribute(key))
            .cloned()
            .collect()
    }

    /// The stored value, or `""` if `key` is absent.
    pub fn value(&self, key: &str) -> &str {
        self.attributes.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Whether `key` is flagged protected. Absent keys are not protected.
    pub fn is_protected(&self, key: &str) -> bool {
        self.protected.contains(key)
    }

    /// See [`keys::is_default_attribute`](super::keys::is_default_attribute).
    pub fn is_default_attribute(key: &str) -> bool {
        is_default_attribute(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// `(key, value, protected)` for every attribute, in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, bool)> + '_ {
        self.attributes
            .iter()
            .map(move |(key, value)| {
                (key.as_str(), value.as_str(), self.protected.contains(key))
            })
    }

    fn custom_entries(&self) -> impl Iterator<Item = (&str, &str, bool)> + '_ {
        self.iter().filter(|(key, _, _)| !is_default_attribute(key))
    }

    /// A copy of this store's data and configuration, without subscribers.
    pub fn snapshot(&self) -> AttributeStore {
        Self {
            attributes: self.attributes.clone(),
            protected: self.protected.clone(),
            subscribers: Subscribers::default(),
            config: self.config.clone(),
        }
    }

    // --- Mutations ---

    /// Insert or update `key`, setting its protection flag to `protect`.
    ///
    /// Notifications, in order:
    /// 1. `AboutToBeAdded(key)` if `key` is a new custom key.
    /// 2. `Modified` if the value, key set or protection changed.
    /// 3. Exactly one of, by priority:
    ///    - `DefaultKeyModified` if `key` is a default key, even if nothing changed;
    ///    - `Added(key)` if `key` is a new custom key;
    ///    - `CustomKeyModified(key)` if an existing custom key changed.
    ///
    /// Setting an existing custom key to its current value and protection
    /// publishes nothing.
    pub fn set(&mut self, key: &str, value: &str, protect: bool) {
        let existed = self.attributes.contains_key(key);
        let is_default = is_default_attribute(key);

        if !existed && !is_default {
            self.emit(AttributeEvent::AboutToBeAdded(key.to_string()));
        }

        let mut modified = false;

        if self.attributes.get(key).map(String::as_str) != Some(value) {
            self.attributes.insert(key.to_string(), value.to_string());
            modified = true;
        }

        let protection_changed = if protect {
            self.protected.insert(key.to_string())
        } else {
            self.protected.remove(key)
        };
        modified |= protection_changed;

        if modified {
            debug!(
                key,
                protected = protect,
                is_default,
                added = !existed,
                value = ?self.loggable(key, value),
                "attribute set"
            );
            self.emit(AttributeEvent::Modified);
        }

        if is_default {
            self.emit(AttributeEvent::DefaultKeyModified);
        } else if !existed {
            self.emit(AttributeEvent::Added(key.to_string()));
        } else if modified {
            self.emit(AttributeEvent::CustomKeyModified(key.to_string()));
        }
    }

    /// Remove a custom attribute and its protection flag.
    ///
    /// Publishes `AboutToBeRemoved(key)`, `Removed(key)`, `Modified`.
    ///
    /// # Errors
    ///
    /// [`AttributesError::InvalidOperation`] if `key` is a default attribute
    /// or is absent. Nothing is changed or published in that case.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        let reason = if is_default_attribute(key) {
            Some(InvalidReason::DefaultKey)
        } else if !self.attributes.contains_key(key) {
            Some(InvalidReason::MissingKey)
        } else {
            None
        };

        if let Some(reason) = reason {
            warn!(key, %reason, "rejected attribute removal");
            return Err(AttributesError::InvalidOperation {
                key: key.to_string(),
                reason,
            });
        }

        self.emit(AttributeEvent::AboutToBeRemoved(key.to_string()));

        self.attributes.remove(key);
        let was_protected = self.protected.remove(key);
        debug!(key, protected = was_protected, "attribute removed");

        self.emit(AttributeEvent::Removed(key.to_string()));
        self.emit(AttributeEvent::Modified);
        Ok(())
    }

    /// Replace this store's custom attributes with `other`'s.
    ///
    /// Default attributes, including their protection flags, are left as they
    /// are. If the custom attributes already match this is a no-op; otherwise
    /// it publishes `AboutToBeReset`, `Reset`, `Modified`.
    pub fn copy_custom_keys_from(&mut self, other: &AttributeStore) {
        if !self.are_custom_keys_different(other) {
            return;
        }

        self.emit(AttributeEvent::AboutToBeReset);

        self.attributes.retain(|key, _| is_default_attribute(key));
        self.protected.retain(|key| is_default_attribute(key));

        for (key, value, protected) in other.custom_entries() {
            self.attributes.insert(key.to_string(), value.to_string());
            if protected {
                self.protected.insert(key.to_string());
            }
        }
        debug!(
            custom_keys = self.attributes.len() - default_keys().count(),
            protected = self.protected.len(),
            "custom attributes replaced"
        );

        self.emit(AttributeEvent::Reset);
        self.emit(AttributeEvent::Modified);
    }

    /// Whether the custom attributes differ in key set, value or protection.
    pub fn are_custom_keys_different(&self, other: &AttributeStore) -> bool {
        !self.custom_entries().eq(other.custom_entries())
    }

    /// Reset to the default attributes, all empty and unprotected.
    ///
    /// Always publishes `AboutToBeReset`, `Reset`, `Modified`.
    pub fn clear(&mut self) {
        self.emit(AttributeEvent::AboutToBeReset);

        self.attributes.clear();
        self.protected.clear();
        self.populate_defaults();
        debug!("attributes cleared");

        self.emit(AttributeEvent::Reset);
        self.emit(AttributeEvent::Modified);
    }

    // --- Internals ---

    fn populate_defaults(&mut self) {
        for key in default_keys() {
            self.attributes.insert(key.to_string(), String::new());
        }
    }

    fn emit(&mut self, event: AttributeEvent) {
        if self.config.log_notifications {
            trace!(
                event = %event.kind(),
                key = ?event.key(),
                subscribers = self.subscribers.len(),
                "dispatching attribute notification"
            );
        }
        self.subscribers.dispatch(&event);
    }

    fn loggable<'a>(&self, key: &str, value: &'a str) -> Option<&'a str> {
        if self.config.trace_values && !self.protected.contains(key) {
            Some(value)
        } else {
            None
        }
    }
}

impl PartialEq for AttributeStore {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes && self.protected == other.protected
    }
}

impl Eq for AttributeStore {}

impl std::fmt::Debug for AttributeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked: BTreeMap<&str, &str> = self
            .iter()
            .map(|(key, value, protected)| (key, if protected { MASK } else { value }))
            .collect();
        f.debug_struct("AttributeStore")
            .field("attributes", &masked)
            .field("protected", &self.protected)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}
