//!
//! dotwiz: an ordered mapping whose keys are also reachable as attributes.
//!
//! A [`Record`] stores its entries in a single insertion-ordered map and exposes
//! that storage through two facades:
//!
//! * **Attribute view** (`attr`, `set_attr`, `del_attr`, `dot`): named-field
//!   access, including deep dotted paths such as `"user.roles.0.name"`.
//! * **Item view** (`get_item`, `set_item`, `del_item`, `record["key"]`):
//!   keyed access in the style of a standard map.
//!
//! Both views read and write the same entries. Every value entering a record
//! goes through the resolution rule ([`resolve::resolve`]): nested maps become
//! records and lists have their map elements converted, so dot-access works at
//! every nesting level.
//!
//! ```
//! use dotwiz::{Record, record};
//!
//! let mut rec = record! {
//!     "user" => record! { "name" => "Alice" },
//!     "tags" => vec!["a", "b"],
//! };
//! rec.set_item("age", 30);
//!
//! assert_eq!(rec.dot("user.name")?, "Alice");
//! assert_eq!(*rec.attr("age")?, 30);
//! assert_eq!(rec.dot("tags.1")?, "b");
//! # Ok::<(), dotwiz::Error>(())
//! ```
//!
//! Records are plain owned data. They are `Send` and `Sync`, but carry no
//! internal locking: callers sharing one across threads wrap it in a
//! `Mutex` or `RwLock`.

pub mod errors;
pub mod json;
pub mod path;
pub mod record;
pub mod resolve;
pub mod value;

pub use errors::RecordError;
pub use path::PathBuf;
pub use record::{Record, RecordBuilder};
pub use resolve::ResolveOptions;
pub use value::{Map, Value};

/// Result type used throughout the dotwiz library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the dotwiz library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structured errors from record lookups and conversions
    #[error(transparent)]
    Record(RecordError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Record(_) => "record",
        }
    }

    /// Check if this error indicates a key, attribute or element was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Record(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Record(err) => err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this error came from JSON parsing or encoding.
    pub fn is_json_error(&self) -> bool {
        matches!(self, Error::Json(_))
    }
}
