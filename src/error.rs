//! Error type for fallible toolkit operations.
//!
//! Attribute reads and writes never fail: a missing attribute is `None` and a
//! rejected value is reported through [`SetOutcome`](crate::class::SetOutcome).
//! Everything that changes the object tree, the class registry or the mapped
//! state returns [`Result`].

/// Errors from class registration, object creation, tree edits and mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("class not found: {0}")]
    ClassNotFound(String),
    #[error("class already registered: {0}")]
    ClassExists(String),
    #[error("parent class {parent} of {class} is not registered")]
    ParentClassNotFound { class: String, parent: String },
    #[error("handle does not refer to a live object")]
    InvalidHandle,
    #[error("class {class} does not accept {reason}")]
    ChildPolicy { class: String, reason: &'static str },
    #[error("a dialog cannot be inserted as a child")]
    DialogAsChild,
    #[error("object already has a parent; detach it first")]
    AlreadyHasParent,
    #[error("inserting the object would make it its own ancestor")]
    WouldCycle,
    #[error("reference object is not a child of the given parent")]
    NotAChild,
    #[error("object of class {0} must be inside a dialog before it can be mapped")]
    NotRooted(String),
    #[error("parent must be mapped before its child")]
    ParentNotMapped,
    #[error("failed to map object of class {class}: {reason}")]
    MapFailed { class: String, reason: String },
    #[error("failed to create object of class {class}: {reason}")]
    CreateFailed { class: String, reason: String },
    #[error("attribute string parse error at byte {position}: {message}")]
    AttributeParse { position: usize, message: String },
}

/// Shorthand result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
