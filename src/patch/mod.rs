//! Pattern-anchored text patches.
//!
//! Build scripts and source files are never parsed. A [`Patch`] names an
//! anchor pattern, the text to insert and where to insert it relative to the
//! anchor. Applying a patch requires the anchor to match exactly once; zero
//! or several matches leave the content untouched and are reported as
//! [`AnchorError`]s so the caller can fall back to manual instructions.
//!
//! Patches are idempotent: content that already contains the insertion text
//! is left alone. Reverting removes the first occurrence of the insertion
//! text and is a no-op when it is absent.
//!
//! Nothing records which patch produced an insertion. If a linked file was
//! edited by hand so that the inserted text no longer appears verbatim,
//! reverting cannot find it and silently leaves the file as is.
//!
//! [`PatchPlan`] stages a set of patches across files in memory and writes
//! them only when every patch found its anchor, so a platform is either
//! fully patched or not touched at all.

mod plan;

use std::fmt;

use regex::Regex;
use thiserror::Error;

pub use plan::{PatchError, PatchFailure, PatchOutcome, PatchPlan};

/// Where the insertion text goes relative to the anchor match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Immediately before the match
    Before,
    /// Immediately after the match
    After,
    /// At the end of the content; no anchor is consulted
    Append,
}

/// Why an anchor could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    #[error("anchor `{anchor}` not found")]
    Missing { anchor: String },

    #[error("anchor `{anchor}` is ambiguous ({count} matches)")]
    Ambiguous { anchor: String, count: usize },
}

/// A named text mutation.
#[derive(Debug, Clone)]
pub struct Patch {
    anchor: Option<Regex>,
    text: String,
    relation: Relation,
}

impl Patch {
    /// Insert `text` immediately before the unique match of `anchor`.
    pub fn before(anchor: Regex, text: impl Into<String>) -> Self {
        Patch {
            anchor: Some(anchor),
            text: text.into(),
            relation: Relation::Before,
        }
    }

    /// Insert `text` immediately after the unique match of `anchor`.
    pub fn after(anchor: Regex, text: impl Into<String>) -> Self {
        Patch {
            anchor: Some(anchor),
            text: text.into(),
            relation: Relation::After,
        }
    }

    /// Insert `text` immediately after the unique occurrence of `literal`.
    pub fn after_literal(literal: &str, text: impl Into<String>) -> Self {
        Self::after(literal_regex(literal), text)
    }

    /// Insert `text` immediately before the unique occurrence of `literal`.
    pub fn before_literal(literal: &str, text: impl Into<String>) -> Self {
        Self::before(literal_regex(literal), text)
    }

    /// Append `text` to the end of the content.
    pub fn append(text: impl Into<String>) -> Self {
        Patch {
            anchor: None,
            text: text.into(),
            relation: Relation::Append,
        }
    }

    /// The text this patch inserts.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The anchor pattern, if the patch uses one.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_ref().map(Regex::as_str)
    }

    /// Whether `content` already carries this patch's insertion.
    pub fn is_applied(&self, content: &str) -> bool {
        content.contains(&self.text) || (self.is_append() && content.ends_with(&self.detached()))
    }

    fn is_append(&self) -> bool {
        self.relation == Relation::Append || self.anchor.is_none()
    }

    /// Form of an appended text after content missing its final newline:
    /// the newline moves in front, so the file still lacks one at the end.
    fn detached(&self) -> String {
        format!("\n{}", self.text.strip_suffix('\n').unwrap_or(&self.text))
    }

    /// Apply the patch to `content`.
    ///
    /// Returns `Ok(None)` when the insertion is already present.
    pub fn apply_to(&self, content: &str) -> Result<Option<String>, AnchorError> {
        if self.is_applied(content) {
            return Ok(None);
        }

        if self.is_append() && !content.is_empty() && !content.ends_with('\n') {
            return Ok(Some(format!("{}{}", content, self.detached())));
        }

        let offset = match (&self.anchor, self.relation) {
            (_, Relation::Append) | (None, _) => content.len(),
            (Some(anchor), relation) => {
                let m = unique_match(anchor, content)?;
                if relation == Relation::Before {
                    m.start()
                } else {
                    m.end()
                }
            }
        };

        let mut patched = String::with_capacity(content.len() + self.text.len());
        patched.push_str(&content[..offset]);
        patched.push_str(&self.text);
        patched.push_str(&content[offset..]);
        Ok(Some(patched))
    }

    /// Remove this patch's insertion from `content`.
    ///
    /// Returns `None` when the insertion is absent.
    pub fn revert_from(&self, content: &str) -> Option<String> {
        if self.text.is_empty() {
            return None;
        }
        let Some(start) = content.find(&self.text) else {
            let detached = self.detached();
            return content
                .strip_suffix(detached.as_str())
                .filter(|_| self.is_append())
                .map(str::to_string);
        };
        let mut reverted = String::with_capacity(content.len() - self.text.len());
        reverted.push_str(&content[..start]);
        reverted.push_str(&content[start + self.text.len()..]);
        Some(reverted)
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.relation, self.anchor()) {
            (Relation::Append, _) | (_, None) => write!(f, "append {:?}", self.text),
            (Relation::Before, Some(a)) => write!(f, "insert {:?} before `{}`", self.text, a),
            (Relation::After, Some(a)) => write!(f, "insert {:?} after `{}`", self.text, a),
        }
    }
}

/// Remove every line containing `token`, including its line terminator.
///
/// Returns `None` when no line contains the token.
pub fn remove_lines_containing(content: &str, token: &str) -> Option<String> {
    if !content.contains(token) {
        return None;
    }
    let kept: String = content
        .split_inclusive('\n')
        .filter(|line| !line.contains(token))
        .collect();
    Some(kept)
}

fn literal_regex(literal: &str) -> Regex {
    Regex::new(&regex::escape(literal)).expect("escaped literal is a valid pattern")
}

fn unique_match<'c>(anchor: &Regex, content: &'c str) -> Result<regex::Match<'c>, AnchorError> {
    let mut matches = anchor.find_iter(content);
    let first = matches.next().ok_or_else(|| AnchorError::Missing {
        anchor: anchor.as_str().to_string(),
    })?;
    let extra = matches.count();
    if extra > 0 {
        return Err(AnchorError::Ambiguous {
            anchor: anchor.as_str().to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}
