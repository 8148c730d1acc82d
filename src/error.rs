//! Error types for tree construction.
//!
//! This module provides [BuildError] and [BuildErrorKind] for representing
//! and reporting failures raised while assembling trees, plus [DebugContext],
//! a structured bag of diagnostic tags and trace entries attached to every
//! error.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Boxed error type accepted from caller-supplied factories and extractors.
pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

// =#========================================================================#=
// BUILD ERROR KIND
// =#========================================================================#=
/// Error kinds that can occur while building or wrapping trees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildErrorKind {
    /// The input collection cannot form a tree: no root vector was
    /// established, or two items claimed the same vector.
    #[error("invalid input data: {0}")]
    InvalidInputData(String),
    /// A vector extractor produced an unusable value.
    #[error("invalid extractor return value: {0}")]
    ExtractorReturnValueIssue(String),
    /// A child was added under a key that is already taken.
    #[error("child key collision: {0}")]
    ChildKeyCollision(String),
    /// A caller-supplied factory or extractor failed.
    #[error("callable raised an error: {0}")]
    CallableIssue(String),
}

// =#========================================================================#=
// DEBUG CONTEXT
// =#========================================================================#=
/// Diagnostic context carried by a [BuildError].
///
/// Holds named tags (e.g. the offending vector or input index) and an ordered
/// trace accumulated while an error propagates upward, such as the chain of
/// nodes a recursive wrapper was descending through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugContext {
    tags: BTreeMap<&'static str, String>,
    trace: Vec<String>,
}

impl DebugContext {
    /// Sets a named diagnostic tag, replacing any previous value.
    pub fn tag(&mut self, key: &'static str, value: impl Into<String>) {
        self.tags.insert(key, value.into());
    }

    /// Appends an entry to the ordered trace.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.trace.push(entry.into());
    }

    /// Returns the named diagnostic tags.
    pub fn tags(&self) -> &BTreeMap<&'static str, String> {
        &self.tags
    }

    /// Returns the value of a single tag, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(|v| v.as_str())
    }

    /// Returns the push-accumulated trace entries, oldest first.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// Returns `true` if no tags and no trace entries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.trace.is_empty()
    }
}

impl fmt::Display for DebugContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.tags.is_empty() {
            write!(f, "\n  tags:")?;
            for (key, value) in &self.tags {
                write!(f, " {key}={value}")?;
            }
        }
        if !self.trace.is_empty() {
            write!(f, "\n  trace:")?;
            for entry in &self.trace {
                write!(f, " <- {entry}")?;
            }
        }
        Ok(())
    }
}

// =#========================================================================#=
// BUILD ERROR
// =#========================================================================#=
/// Tree construction error with structured diagnostic context.
///
/// Every failure carries a [BuildErrorKind] plus a [DebugContext]; builder
/// code decorates errors with tags (vector, input index) on the way out.
/// Errors produced by caller-supplied callables keep the underlying error
/// reachable through [`source`](std::error::Error::source).
#[derive(Debug, Error)]
#[error("{kind}{context}")]
pub struct BuildError {
    kind: BuildErrorKind,
    context: DebugContext,
    #[source]
    source: Option<DynError>,
}

impl BuildError {
    /// Creates an error of the given kind with empty context.
    pub fn new(kind: BuildErrorKind) -> Self {
        Self { kind, context: DebugContext::default(), source: None }
    }

    /// Convenience constructor for [BuildErrorKind::InvalidInputData].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(BuildErrorKind::InvalidInputData(message.into()))
    }

    /// Convenience constructor for [BuildErrorKind::ExtractorReturnValueIssue].
    pub fn extractor(message: impl Into<String>) -> Self {
        Self::new(BuildErrorKind::ExtractorReturnValueIssue(message.into()))
    }

    /// Convenience constructor for [BuildErrorKind::ChildKeyCollision].
    pub fn child_key_collision(message: impl Into<String>) -> Self {
        Self::new(BuildErrorKind::ChildKeyCollision(message.into()))
    }

    /// Wraps a failure from a caller-supplied callable, keeping it as source.
    pub fn callable(error: DynError) -> Self {
        Self {
            kind: BuildErrorKind::CallableIssue(error.to_string()),
            context: DebugContext::default(),
            source: Some(error),
        }
    }

    /// Sets a named diagnostic tag. Builder-style, consumes and returns self.
    pub fn tag(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.tag(key, value);
        self
    }

    /// Appends a trace entry. Builder-style, consumes and returns self.
    pub fn push_trace(mut self, entry: impl Into<String>) -> Self {
        self.context.push(entry);
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &BuildErrorKind {
        &self.kind
    }

    /// Returns the diagnostic context.
    pub fn context(&self) -> &DebugContext {
        &self.context
    }
}
