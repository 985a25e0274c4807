use chrono::{DateTime, Utc};

/// Node kinds that receive generated identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Course,
    Section,
    Lesson,
}

impl IdKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdKind::Course => "course",
            IdKind::Section => "section",
            IdKind::Lesson => "lesson",
        }
    }
}

/// How identifiers are produced for nodes that arrive without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Hash of the node kind, parent id, position and title. Reproducible.
    #[default]
    ContentHash,
    /// Millisecond timestamp plus position. Differs between runs.
    Timestamp,
}

/// Values used when normalizing a draft: the instant that stands in for absent
/// timestamps and the identifier strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub now: DateTime<Utc>,
    pub ids: IdStrategy,
}

impl Defaults {
    /// Defaults anchored at the current instant.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Defaults anchored at a fixed instant, for reproducible output.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            ids: IdStrategy::ContentHash,
        }
    }

    pub fn with_ids(self, ids: IdStrategy) -> Self {
        Self { ids, ..self }
    }

    /// Generate an identifier for the node at `position` below `parent`.
    pub fn generate_id(&self, kind: IdKind, parent: &str, position: usize, title: &str) -> String {
        match self.ids {
            IdStrategy::ContentHash => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(kind.as_str().as_bytes());
                hasher.update(&[0]);
                hasher.update(parent.as_bytes());
                hasher.update(&[0]);
                hasher.update(&(position as u64).to_le_bytes());
                hasher.update(title.as_bytes());

                let hash = hasher.finalize().to_hex();
                format!("{}-{}", kind.as_str(), &hash.as_str()[..12])
            }
            IdStrategy::Timestamp => {
                format!(
                    "{}-{}-{}",
                    kind.as_str(),
                    self.now.timestamp_millis(),
                    position
                )
            }
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::now()
    }
}
