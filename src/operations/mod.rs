//! Contact operations: one function per contact type and action.
//!
//! Each operation walks the account set in order and issues one remote call
//! per account (and per alternate contact type). The first remote failure is
//! returned immediately; accounts already changed stay changed.

pub mod alternate;
pub mod primary;
pub mod root_email;

use serde_json::{Map, Value};

use crate::error::Result;

/// Result of a list operation that can be printed or exported as JSON.
pub trait Listing {
    /// Top-level key of the exported document.
    fn root_key(&self) -> &'static str;

    /// Prefix of the exported object key.
    fn export_prefix(&self) -> &'static str;

    /// Account ID → value mapping.
    fn entries(&self) -> Result<Map<String, Value>>;

    /// Document uploaded on export: the entries wrapped in the root key.
    fn document(&self) -> Result<Value> {
        let mut document = Map::new();
        document.insert(self.root_key().to_string(), Value::Object(self.entries()?));
        Ok(Value::Object(document))
    }
}
