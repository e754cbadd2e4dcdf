//! # OxiBWT Core
//!
//! Core components for the OxiBWT block-transform library.
//!
//! This crate provides the pieces shared by every transform:
//!
//! - [`channel`]: Byte-level I/O with big-endian integers and whole blocks
//! - [`traits`]: The reversible [`StreamTransform`] trait and [`Direction`]
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     oxibwt CLI (mode selector, logging)                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Transforms                                          │
//! │     Suffix ranking, BWT, MTF, BWT+MTF pipeline          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Channel (this crate)                                │
//! │     ChannelReader/ChannelWriter, errors, traits         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxibwt_core::channel::ChannelReader;
//! use oxibwt_core::Direction;
//! use std::io::Cursor;
//!
//! let mut reader = ChannelReader::new(Cursor::new(vec![0, 0, 0, 1, b'x']));
//! assert_eq!(reader.read_int().unwrap(), 1);
//! assert_eq!(reader.read_byte().unwrap(), Some(b'x'));
//!
//! assert_eq!("+".parse::<Direction>().unwrap(), Direction::Inverse);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod channel;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use channel::{ChannelReader, ChannelWriter};
pub use error::{OxiBwtError, Result};
pub use traits::{Direction, StreamTransform};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::channel::{ChannelReader, ChannelWriter};
    pub use crate::error::{OxiBwtError, Result};
    pub use crate::traits::{Direction, StreamTransform};
}
