//! In-memory configuration tree
//!
//! [`ConfigRoot`] holds the current document behind an [`ArcSwap`] and
//! notifies subscribers when the subtree they watch changes. A
//! [`ConfigSection`] is a path into the root and implements the
//! [`ConfigNode`] port.
//!
//! Paths are `:`-separated. Object keys match exactly first, then
//! ignoring ASCII case; numeric segments index into arrays.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;
use cfgdi_domain::{ChangeCallback, ConfigNode, Subscription};
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use crate::constants::CONFIG_PATH_SEPARATOR;

struct Subscriber {
    segments: Vec<String>,
    callback: ChangeCallback,
}

/// Root of a live configuration document
pub struct ConfigRoot {
    document: ArcSwap<Value>,
    subscribers: DashMap<u64, Subscriber>,
    next_id: AtomicU64,
}

impl ConfigRoot {
    /// Create a root holding `document`
    pub fn new(document: Value) -> Arc<Self> {
        Arc::new(Self {
            document: ArcSwap::from_pointee(document),
            subscribers: DashMap::new(),
            next_id: AtomicU64::new(0),
        })
    }

    /// Snapshot of the whole document
    pub fn document(&self) -> Arc<Value> {
        self.document.load_full()
    }

    /// Value at `path`, if present
    pub fn get(&self, path: &str) -> Option<Value> {
        lookup(&self.document.load(), &split_path(path)).cloned()
    }

    /// Section at `path`
    pub fn section(self: &Arc<Self>, path: &str) -> ConfigSection {
        ConfigSection::new(Arc::clone(self), split_path(path))
    }

    /// Replace the document, notifying every subscriber whose subtree changed
    ///
    /// Returns the number of subscribers notified.
    pub fn replace(&self, document: Value) -> usize {
        let next = Arc::new(document);
        let previous = self.document.swap(Arc::clone(&next));

        let affected: Vec<ChangeCallback> = self
            .subscribers
            .iter()
            .filter(|entry| {
                lookup(&previous, &entry.segments) != lookup(&next, &entry.segments)
            })
            .map(|entry| Arc::clone(&entry.callback))
            .collect();

        debug!(
            subscribers = self.subscribers.len(),
            notified = affected.len(),
            "Configuration replaced"
        );
        // Callbacks run after the map guards are released so they may subscribe
        for callback in &affected {
            callback();
        }
        affected.len()
    }

    /// Number of live change subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn subscribe(self: &Arc<Self>, segments: Vec<String>, callback: ChangeCallback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.insert(id, Subscriber { segments, callback });

        let root: Weak<Self> = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(root) = root.upgrade() {
                root.subscribers.remove(&id);
            }
        })
    }
}

impl fmt::Debug for ConfigRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRoot")
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

/// A path into a [`ConfigRoot`]
#[derive(Clone)]
pub struct ConfigSection {
    root: Arc<ConfigRoot>,
    path: String,
    segments: Vec<String>,
}

impl ConfigSection {
    fn new(root: Arc<ConfigRoot>, segments: Vec<String>) -> Self {
        let path = segments.join(&CONFIG_PATH_SEPARATOR.to_string());
        Self {
            root,
            path,
            segments,
        }
    }

    /// Child section at the relative `path`
    pub fn section(&self, path: &str) -> ConfigSection {
        let mut segments = self.segments.clone();
        segments.extend(split_path(path));
        ConfigSection::new(Arc::clone(&self.root), segments)
    }

    /// Last path segment, empty for the root
    pub fn key(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Sections for each element of an array, or each entry of an object
    pub fn children(&self) -> Vec<ConfigSection> {
        match self.value() {
            Some(Value::Array(items)) => (0..items.len())
                .map(|index| self.section(&index.to_string()))
                .collect(),
            Some(Value::Object(map)) => map.keys().map(|key| self.section(key)).collect(),
            _ => Vec::new(),
        }
    }

    /// The root this section reads from
    pub fn root(&self) -> &Arc<ConfigRoot> {
        &self.root
    }
}

impl ConfigNode for ConfigSection {
    fn path(&self) -> &str {
        &self.path
    }

    fn exists(&self) -> bool {
        lookup(&self.root.document.load(), &self.segments).is_some_and(|value| !value.is_null())
    }

    fn value(&self) -> Option<Value> {
        lookup(&self.root.document.load(), &self.segments).cloned()
    }

    fn on_change(&self, callback: ChangeCallback) -> Subscription {
        self.root.subscribe(self.segments.clone(), callback)
    }
}

impl fmt::Debug for ConfigSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigSection").field(&self.path).finish()
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split(CONFIG_PATH_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn lookup<'a>(document: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(document, |value, segment| match value {
            Value::Object(map) => map.get(segment).or_else(|| {
                map.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(segment))
                    .map(|(_, value)| value)
            }),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}
