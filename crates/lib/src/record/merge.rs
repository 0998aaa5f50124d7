//! Merging records with `|` and `|=`.
//!
//! Merges follow last-writer-wins: entries of the right-hand side replace
//! entries of the left-hand side with the same key. Entries coming from a
//! record are already resolved and are copied as-is; entries coming from a
//! plain map pass through the resolution rule first.

use std::ops::{BitOr, BitOrAssign};

use tracing::debug;

use super::Record;
use crate::{
    resolve::{ResolveOptions, resolve},
    value::Map,
};

impl Record {
    /// Returns a new record holding the entries of `self` overlaid with the
    /// entries of `other`.
    pub fn merge(&self, other: &Record) -> Record {
        let mut fields = self.fields.clone();
        fields.extend(
            other
                .fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        debug!(left = self.len(), right = other.len(), "merged records");
        Record { fields }
    }

    /// Returns a new record holding the entries of `self` overlaid with the
    /// resolved entries of a plain map.
    pub fn merge_map(&self, other: &Map) -> Record {
        let mut fields = self.fields.clone();
        fields.extend(other.iter().map(|(key, value)| {
            (key.clone(), resolve(value.clone(), ResolveOptions::default()))
        }));
        debug!(left = self.len(), right = other.len(), "merged map into record");
        Record { fields }
    }
}

impl BitOr<&Record> for &Record {
    type Output = Record;

    fn bitor(self, rhs: &Record) -> Record {
        self.merge(rhs)
    }
}

impl BitOr<Record> for Record {
    type Output = Record;

    fn bitor(mut self, rhs: Record) -> Record {
        self |= rhs;
        self
    }
}

impl BitOr<&Map> for &Record {
    type Output = Record;

    fn bitor(self, rhs: &Map) -> Record {
        self.merge_map(rhs)
    }
}

impl BitOrAssign<Record> for Record {
    fn bitor_assign(&mut self, rhs: Record) {
        self.fields.extend(rhs.fields);
    }
}

impl BitOrAssign<Map> for Record {
    fn bitor_assign(&mut self, rhs: Map) {
        self.update(rhs);
    }
}
