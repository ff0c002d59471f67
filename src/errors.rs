//! Error Types
//!
//! This module defines the error type used throughout the scene graph.
//!
//! # Overview
//!
//! The scene graph is a data-structure library, so almost every failure is a
//! caller-contract violation detected at the API boundary:
//! - Handles that no longer refer to a live object
//! - Objects of the wrong kind passed to a typed operation
//! - Structural edits that would introduce a cycle
//! - Out-of-range child indices
//!
//! Rejected operations leave the graph untouched.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, GraphError>`.
//!
//! ```rust,ignore
//! use arbor::errors::Result;
//!
//! fn build(graph: &mut SceneGraph) -> Result<()> {
//!     let root = graph.create_group("root");
//!     let shape = graph.create_shape("shape");
//!     graph.add_child(root, shape, true)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::scene::{ObjectId, ObjectType};

/// The main error type for scene graph operations.
#[derive(Error, Debug)]
pub enum GraphError {
    // ========================================================================
    // Handle Errors
    // ========================================================================
    /// The handle refers to an object that was destroyed (or never existed).
    #[error("Stale object handle: {0:?}")]
    StaleHandle(ObjectId),

    /// The object exists but is not of the kind the operation requires.
    #[error("Object {id:?} has kind {found}, expected {expected}")]
    KindMismatch {
        /// The offending object
        id: ObjectId,
        /// What the operation accepts
        expected: &'static str,
        /// What the object actually is
        found: ObjectType,
    },

    // ========================================================================
    // Structural Errors
    // ========================================================================
    /// Attaching `child` under `group` would make a node its own ancestor.
    #[error("Adding {child:?} under {group:?} would create a cycle")]
    CycleDetected {
        /// The group receiving the child
        group: ObjectId,
        /// The child being attached
        child: ObjectId,
    },

    /// Child index out of bounds.
    #[error("Child index out of bounds: {index} (len: {len})")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Number of children at the time of the call
        len: usize,
    },

    /// The object is still referenced by other objects and cannot be destroyed.
    #[error("Object {id:?} still has {owners} owner(s)")]
    StillOwned {
        /// The object that was asked to be destroyed
        id: ObjectId,
        /// Remaining owner registrations
        owners: usize,
    },

    // ========================================================================
    // Construction Errors
    // ========================================================================
    /// Primitive generation received invalid parameters.
    #[error("Invalid primitive: {0}")]
    InvalidPrimitive(String),

    /// Settings could not be parsed.
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

/// Alias for `Result<T, GraphError>`.
pub type Result<T> = std::result::Result<T, GraphError>;
