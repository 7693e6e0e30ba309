//! Errors reported by the object model.
//!
//! Almost every failure in the model is plain absence (`None`). The one
//! operation that can be refused is a prototype assignment.

use thiserror::Error;

use crate::id::ObjectId;

/// Why a prototype assignment was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum PrototypeError {
    /// The object was asked to inherit from itself.
    #[error("{object} cannot be its own prototype")]
    SelfReference { object: ObjectId },
    /// The candidate already inherits from the object.
    #[error("setting the prototype of {object} to {candidate} would create a cycle")]
    Cycle {
        object: ObjectId,
        candidate: ObjectId,
    },
}
