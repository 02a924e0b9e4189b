//! Trace data structures
//!
//! Defines the serialization format for recorded sample streams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::analysis::frame::InputSample;

/// Current trace format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Trace metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceMetadata {
    /// Unique trace ID
    pub id: Uuid,
    /// Trace name
    pub name: String,
    /// Optional description of what the trace captures
    pub description: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Total sample count
    pub sample_count: usize,
    /// Span from first to last sample timestamp, in milliseconds
    pub duration_ms: f64,
    /// Version of the trace format
    pub format_version: String,
}

impl TraceMetadata {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: Utc::now(),
            sample_count: 0,
            duration_ms: 0.0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

impl Default for TraceMetadata {
    fn default() -> Self {
        Self::new(String::new(), None)
    }
}

/// A complete trace of wheel input samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelTrace {
    pub metadata: TraceMetadata,
    pub samples: Vec<InputSample>,
}

impl WheelTrace {
    /// Create a new empty trace
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            metadata: TraceMetadata::new(name, description),
            samples: Vec::new(),
        }
    }

    /// Append one sample and keep the metadata counters current.
    pub fn push(&mut self, sample: InputSample) {
        self.samples.push(sample);
        self.metadata.sample_count = self.samples.len();
        self.metadata.duration_ms = match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0.0,
        };
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Save the trace as pretty JSON
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a trace from a file.
    ///
    /// Logs a warning if the trace was saved with an unknown format version,
    /// but still attempts to deserialize it (forward-compatible via
    /// `#[serde(default)]`).
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let trace: WheelTrace = serde_json::from_str(&content)?;
        if trace.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %trace.metadata.name,
                found = %trace.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Trace has different format version; some fields may use default values"
            );
        }
        Ok(trace)
    }

    /// Validate the caller contract the analyzer relies on: strictly
    /// increasing timestamps.
    pub fn validate(&self) -> crate::Result<()> {
        for pair in self.samples.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(crate::Error::Trace(format!(
                    "timestamps must be strictly increasing, got {} after {}",
                    pair[1].timestamp, pair[0].timestamp
                )));
            }
        }
        Ok(())
    }
}
