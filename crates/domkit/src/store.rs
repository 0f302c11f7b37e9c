//! Persistent key-value store
//!
//! One named [`Store`] owns one slot in the window's localStorage or
//! cookie jar. The slot holds the whole record as a JSON object and is
//! rewritten synchronously after every mutation.

use domkit_dom::{PersistentSlots, Window};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result, StoreConfig, StoreType};

/// Named JSON record bound to one persistent slot
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    name: String,
    store_type: StoreType,
    record: Map<String, Value>,
}

fn slots(win: &mut Window, store_type: StoreType) -> &mut dyn PersistentSlots {
    match store_type {
        StoreType::PersistentString => win.local_storage_mut(),
        StoreType::Cookie => win.cookies_mut(),
    }
}

impl Store {
    /// Open the store named `name`
    ///
    /// With `adopt` the persisted record is loaded (a missing slot gives
    /// an empty record). Without it any persisted record is erased first.
    pub fn open(win: &mut Window, name: &str, config: StoreConfig) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid("store name must not be empty"));
        }
        let backend = slots(win, config.store_type);

        let record = if config.adopt {
            match backend.read_slot(name) {
                Some(text) => parse_record(name, &text)?,
                None => Map::new(),
            }
        } else {
            if backend.erase_slot(name)? {
                tracing::debug!("flushed existing store {:?}", name);
            }
            Map::new()
        };

        tracing::debug!(
            "opened store {:?} ({:?}, {} keys)",
            name,
            config.store_type,
            record.len()
        );
        Ok(Self {
            name: name.to_string(),
            store_type: config.store_type,
            record,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store_type(&self) -> StoreType {
        self.store_type
    }

    /// Current in-memory record
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    /// Merge `partial` into the record key by key, then persist
    ///
    /// `partial` must serialize to a JSON object.
    pub fn store<T: Serialize>(&mut self, win: &mut Window, partial: T) -> Result<()> {
        let partial = match serde_json::to_value(partial) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(Error::invalid(format!(
                    "store {:?} only accepts objects, got {other}",
                    self.name
                )));
            }
            Err(e) => return Err(Error::invalid(format!("store {:?}: {e}", self.name))),
        };
        let mut next = self.record.clone();
        next.extend(partial);
        self.commit(win, next)
    }

    /// Drop one key and persist
    pub fn remove(&mut self, win: &mut Window, key: &str) -> Result<Option<Value>> {
        if !self.record.contains_key(key) {
            return Ok(None);
        }
        let mut next = self.record.clone();
        let removed = next.remove(key);
        self.commit(win, next)?;
        Ok(removed)
    }

    /// Erase the slot and clear the record
    pub fn flush(&mut self, win: &mut Window) -> Result<()> {
        self.record.clear();
        slots(win, self.store_type).erase_slot(&self.name)?;
        tracing::debug!("flushed store {:?}", self.name);
        Ok(())
    }

    /// Write `next` to the slot, then make it the in-memory record
    fn commit(&mut self, win: &mut Window, next: Map<String, Value>) -> Result<()> {
        let text = serde_json::to_string(&next)
            .map_err(|e| Error::corrupt(&self.name, e.to_string(), Some(e)))?;
        slots(win, self.store_type).write_slot(&self.name, &text)?;
        tracing::trace!("persisted store {:?} ({} bytes)", self.name, text.len());
        self.record = next;
        Ok(())
    }
}

fn parse_record(name: &str, text: &str) -> Result<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| Error::corrupt(name, e.to_string(), Some(e)))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::corrupt(
            name,
            format!("expected a JSON object, found {}", kind(&other)),
            None,
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
