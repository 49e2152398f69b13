//! User-defined failure reasons offered after each committed turn.

use crate::db::KeyValueStore;
use crate::error::Result;
use crate::models::ReasonChoice;

pub const REASONS_KEY: &str = "reasons";

/// Labels seeded when no catalog has been persisted yet.
pub const DEFAULT_REASONS: [&str; 5] = ["Too thin", "Too thick", "Too soft", "Too hard", "Kiss"];

/// Ordered list of reason labels, persisted under [`REASONS_KEY`].
///
/// Labels are not unique; entries are addressed by position.
pub struct ReasonCatalog<S> {
    store: S,
    labels: Vec<String>,
}

impl<S: KeyValueStore> ReasonCatalog<S> {
    /// Load the catalog, seeding and persisting the defaults when none is
    /// stored or the stored one cannot be read.
    pub fn open(store: S) -> Result<Self> {
        let stored = store.get(REASONS_KEY)?;

        let labels = match stored.map(|raw| serde_json::from_str::<Vec<String>>(&raw)) {
            Some(Ok(labels)) => labels,
            Some(Err(e)) => {
                tracing::warn!("Reason catalog is unreadable, reseeding defaults: {}", e);
                Self::seed(&store)?
            }
            None => Self::seed(&store)?,
        };

        Ok(Self { store, labels })
    }

    fn seed(store: &S) -> Result<Vec<String>> {
        let labels: Vec<String> = DEFAULT_REASONS.iter().map(|s| s.to_string()).collect();
        store.put(REASONS_KEY, serde_json::to_string(&labels)?)?;
        tracing::debug!("Seeded {} default reasons", labels.len());
        Ok(labels)
    }

    pub fn list(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Append a label. Blank labels are ignored and yield `false`.
    pub fn add(&mut self, label: &str) -> Result<bool> {
        let label = label.trim();
        if label.is_empty() {
            return Ok(false);
        }

        let mut labels = self.labels.clone();
        labels.push(label.to_string());
        self.save(labels)?;
        Ok(true)
    }

    /// Remove the label at `position`, shifting later labels down.
    /// Out-of-range positions are ignored and yield `false`.
    pub fn delete_at(&mut self, position: usize) -> Result<bool> {
        if position >= self.labels.len() {
            return Ok(false);
        }

        let mut labels = self.labels.clone();
        labels.remove(position);
        self.save(labels)?;
        Ok(true)
    }

    /// The label text for a picker choice, copied by value.
    pub fn resolve(&self, choice: ReasonChoice) -> Option<String> {
        match choice {
            ReasonChoice::Skip => None,
            ReasonChoice::Catalog(position) => self.labels.get(position).cloned(),
        }
    }

    fn save(&mut self, labels: Vec<String>) -> Result<()> {
        self.store.put(REASONS_KEY, serde_json::to_string(&labels)?)?;
        self.labels = labels;
        Ok(())
    }
}
