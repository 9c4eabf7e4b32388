//! Wire formats: byte-order modes and struct-style format codes.
//!
//! This crate is the pure leaf layer of the packed_messages workspace. It
//! knows how to parse a format code string such as `"H"`, `"10s"` or `"4x"`,
//! how many bytes it occupies, and how to move integers of width 1/2/4/8
//! in and out of byte slices under a given byte-order [`Mode`].
//!
//! No schema logic lives here; everything is a pure function over slices.

pub mod error;
pub mod format;
pub mod mode;

pub use error::FormatError;
pub use format::{Code, FormatSpec, is_pad_format};
pub use mode::Mode;
