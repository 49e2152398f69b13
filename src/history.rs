//! Append-only archive of completed sessions.
//!
//! Two parallel sequences are persisted under separate keys:
//!
//! - `summaries`: JSON array of session moyennes, rounded to two decimals.
//! - `detail`: JSON array of `{ "turns": [{ "reason"?, "score" }] }` objects.
//!
//! Index `i` in both refers to the same session, in chronological order.
//! Both are written in one store transaction, so a failed write leaves
//! neither half applied.

use serde_json::Value;

use crate::db::KeyValueStore;
use crate::error::{CaromError, Result};
use crate::models::ArchivedDetail;

pub const SUMMARIES_KEY: &str = "summaries";
pub const DETAIL_KEY: &str = "detail";

pub struct HistoryStore<S> {
    store: S,
    summaries: Vec<f64>,
    details: Vec<ArchivedDetail>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Load the archive. Unreadable records degrade to "no history" rather
    /// than failing; only storage errors propagate.
    pub fn open(store: S) -> Result<Self> {
        let summaries = load_entries(&store, SUMMARIES_KEY)?;
        let details = load_entries(&store, DETAIL_KEY)?;

        if summaries.len() != details.len() {
            tracing::warn!(
                "Archive sequences disagree ({} summaries, {} details); truncating to the shorter",
                summaries.len(),
                details.len()
            );
        }

        let mut kept_summaries = Vec::new();
        let mut kept_details = Vec::new();
        for (i, (summary, detail)) in summaries.into_iter().zip(details).enumerate() {
            match (decode_summary(summary), decode_detail(detail)) {
                (Ok(summary), Ok(detail)) => {
                    kept_summaries.push(summary);
                    kept_details.push(detail);
                }
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!("Dropping archived session {}: {}", i, e);
                }
            }
        }

        tracing::debug!("Loaded {} archived sessions", kept_summaries.len());

        Ok(Self {
            store,
            summaries: kept_summaries,
            details: kept_details,
        })
    }

    /// Append one completed session to both sequences at the same new index.
    pub fn archive(&mut self, summary: f64, detail: ArchivedDetail) -> Result<usize> {
        self.summaries.push(summary);
        self.details.push(detail);

        if let Err(e) = self.persist() {
            self.summaries.pop();
            self.details.pop();
            return Err(e);
        }

        let index = self.summaries.len() - 1;
        tracing::info!("Archived session {} with moyenne {:.2}", index, summary);
        Ok(index)
    }

    fn persist(&self) -> Result<()> {
        let entries = [
            (SUMMARIES_KEY, serde_json::to_string(&self.summaries)?),
            (DETAIL_KEY, serde_json::to_string(&self.details)?),
        ];
        self.store.put_all(&entries)?;
        Ok(())
    }

    pub fn summaries(&self) -> &[f64] {
        &self.summaries
    }

    /// The `window` most recent summaries, oldest first.
    pub fn recent(&self, window: usize) -> &[f64] {
        let start = self.summaries.len().saturating_sub(window);
        &self.summaries[start..]
    }

    pub fn details(&self) -> &[ArchivedDetail] {
        &self.details
    }

    pub fn detail_at(&self, index: usize) -> Result<&ArchivedDetail> {
        self.details.get(index).ok_or(CaromError::NotFound {
            index,
            len: self.details.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// Raw entries of a JSON array record. A missing key is an empty sequence;
/// a record that is not an array is logged and treated as empty.
fn load_entries<S: KeyValueStore>(store: &S, key: &str) -> Result<Vec<Value>> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };

    match decode_entries(key, &raw) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            tracing::warn!("Ignoring archive record: {}", e);
            Ok(Vec::new())
        }
    }
}

/// Parse a stored record as a JSON array.
pub fn decode_entries(key: &str, raw: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(other) => Err(CaromError::malformed(
            key,
            format!("expected an array, found {}", json_kind(&other)),
        )),
        Err(e) => Err(CaromError::malformed(key, e)),
    }
}

fn decode_summary(value: Value) -> Result<f64> {
    value
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| CaromError::malformed(SUMMARIES_KEY, format!("invalid moyenne {}", value)))
}

fn decode_detail(value: Value) -> Result<ArchivedDetail> {
    serde_json::from_value(value).map_err(|e| CaromError::malformed(DETAIL_KEY, e))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
