//! # Packed Messages
//!
//! A schema-driven binary message codec. A message schema is a declarative,
//! ordered list of field descriptions that compiles into typed elements;
//! each element knows how to pack its slice of a record into bytes and how
//! to consume exactly its own bytes back out of a buffer.
//!
//! Fixed-width fields, explicit padding/alignment, enumerated fields and
//! variable-length repeated sub-structures (whose count is resolved at run
//! time from another already-decoded field) are all supported; byte order
//! is a per-schema [`Mode`] that can be rebound without rebuilding.
//!
//! ## Quick Start
//!
//! ```rust
//! use packed_messages::{FieldDesc, Message, Mode, Record, Ref, Value};
//!
//! let point = Message::new(
//!     "Point",
//!     vec![FieldDesc::scalar("x", "B"), FieldDesc::scalar("y", "B")],
//!     Mode::Little,
//! )?;
//!
//! let schema = Message::new(
//!     "Trace",
//!     vec![
//!         FieldDesc::scalar("count", "H"),
//!         FieldDesc::variable("points", point, Ref::objects("count")),
//!     ],
//!     Mode::Little,
//! )?;
//!
//! let record = Record::new().with("count", 2u16).with(
//!     "points",
//!     vec![
//!         Record::new().with("x", 1u8).with("y", 2u8),
//!         Record::new().with("x", 3u8).with("y", 4u8),
//!     ],
//! );
//!
//! let bytes = schema.pack(&record)?;
//! assert_eq!(bytes, [2, 0, 1, 2, 3, 4]);
//!
//! let decoded = schema.unpack(&bytes)?;
//! assert_eq!(decoded.get("count"), Some(&Value::Unsigned(2)));
//! # Ok::<(), packed_messages::MessageError>(())
//! ```
//!
//! Schemas are plain values: share a built schema freely across threads
//! for packing and unpacking, and rebind its mode (`set_mode`) only while
//! you hold it exclusively.

pub mod basic;
pub mod element;
pub mod error;
pub mod labels;
pub mod message;
pub mod pad;
pub mod value;
pub mod variable;

pub use basic::ElementBasic;
pub use element::{Element, FieldDesc, Ref};
pub use error::{MessageError, Result};
pub use labels::ElementLabels;
pub use message::Message;
pub use pad::ElementPad;
pub use value::{Record, Value};
pub use variable::ElementVariable;

// Re-export the format layer for callers that need raw codes.
pub use wire_formats::{self, Mode};
