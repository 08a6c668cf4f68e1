//! Parse stored-sequence JSON into the canonical data model.
//!
//! Pre-produced sequences are stored alongside lesson content as JSON.
//! Durations are given in milliseconds and validated on the way in; a
//! malformed document can never half-build a [`Sequence`].
//!
//! Schema:
//! ```json
//! {
//!   "name": "bst-inorder-walk",
//!   "steps": [
//!     { "duration": 400.0,
//!       "effect": "bst/node:4/visit",
//!       "highlight": { "snippet": "bst/traverse/inorder", "line": 4 } }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::data::{HighlightTarget, Sequence, Step};
use crate::error::{ChoreoError, Result};
use crate::time::AnimTime;

/// A named, pre-produced sequence as stored with lesson content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredSequence {
    pub name: String,
    pub sequence: Sequence,
}

/// Parse stored-sequence JSON into a validated [`StoredSequence`].
pub fn parse_stored_sequence_json(s: &str) -> Result<StoredSequence> {
    let doc: SsDocument = serde_json::from_str(s).map_err(|e| ChoreoError::Parse {
        reason: e.to_string(),
    })?;

    let mut steps: Vec<Step> = Vec::with_capacity(doc.steps.len());
    for raw in doc.steps {
        let duration = AnimTime::from_millis(raw.duration)?;
        let mut step = Step::new(duration, raw.effect);
        if let Some(h) = raw.highlight {
            step = step.with_highlight(HighlightTarget::new(h.snippet, h.line));
        }
        steps.push(step);
    }

    Ok(StoredSequence {
        name: doc.name,
        sequence: Sequence::from_steps(steps)?,
    })
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct SsDocument {
    name: String,
    steps: Vec<SsStep>,
}

#[derive(Debug, Deserialize)]
struct SsStep {
    /// Milliseconds.
    duration: f64,
    effect: String,
    #[serde(default)]
    highlight: Option<SsHighlight>,
}

#[derive(Debug, Deserialize)]
struct SsHighlight {
    snippet: String,
    line: u32,
}
