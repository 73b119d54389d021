//! Error types for ranking, unranking and converting trees.
//!
//! This module provides [RankError] and [RankErrorType] for representing
//! and reporting errors that occur when decoding ranks or moving trees
//! across the table boundary.

use std::error::Error;
use std::fmt;

// =#========================================================================#=
// RANK ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while ranking, unranking or converting trees.
#[derive(PartialEq, Debug, Clone)]
pub enum RankErrorType {
    /// A shape rank, label rank or combination rank lies outside its range.
    RankOutOfBounds,
    /// Imported tree has more than one root.
    MultipleRoots(usize),
    /// Imported tree has no root at all.
    NoRoot,
    /// Tree violates a structural invariant (e.g. unary vertex).
    InvalidStructure(String),
    /// Operation needs leaf labels but tree is only a shape.
    Unlabelled,
    IoError(String),
}

// =#========================================================================#=
// RANK ERROR
// =#========================================================================#=
/// Error with a kind and a short description of what was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct RankError {
    kind: RankErrorType,
    context: String,
}

impl RankError {
    /// Create a RankError from an error type and context description
    pub fn new(kind: RankErrorType, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
        }
    }

    /// Convenience constructor for RankOutOfBounds
    pub fn out_of_bounds(context: impl Into<String>) -> Self {
        Self::new(RankErrorType::RankOutOfBounds, context)
    }

    /// Convenience constructor for MultipleRoots
    pub fn multiple_roots(num_roots: usize) -> Self {
        Self::new(RankErrorType::MultipleRoots(num_roots), String::new())
    }

    /// Convenience constructor for NoRoot
    pub fn no_root() -> Self {
        Self::new(RankErrorType::NoRoot, String::new())
    }

    /// Convenience constructor for InvalidStructure
    pub fn invalid_structure(msg: impl Into<String>) -> Self {
        Self::new(RankErrorType::InvalidStructure(msg.into()), String::new())
    }

    /// Convenience constructor for Unlabelled
    pub fn unlabelled(context: impl Into<String>) -> Self {
        Self::new(RankErrorType::Unlabelled, context)
    }

    /// Get the error kind
    pub fn kind(&self) -> &RankErrorType {
        &self.kind
    }

    /// Get the context description (may be empty)
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            RankErrorType::RankOutOfBounds => write!(f, "Rank is out of bounds")?,
            RankErrorType::MultipleRoots(n) => {
                write!(f, "Can't rank trees with multiple roots (found {n})")?
            }
            RankErrorType::NoRoot => write!(f, "Tree has no root")?,
            RankErrorType::InvalidStructure(msg) => write!(f, "Invalid tree structure - {msg}")?,
            RankErrorType::Unlabelled => write!(f, "Tree is not labelled")?,
            RankErrorType::IoError(msg) => write!(f, "IO error - {msg}")?,
        }

        if !self.context.is_empty() {
            write!(f, " ({})", self.context)?;
        }

        Ok(())
    }
}

impl Error for RankError {}

impl From<std::io::Error> for RankError {
    fn from(err: std::io::Error) -> Self {
        RankError::new(RankErrorType::IoError(err.to_string()), String::new())
    }
}
