//! Core traits for stream transforms.
//!
//! Every transform in OxiBWT is reversible. [`StreamTransform`] exposes both
//! directions over a byte channel so the command-line front end can drive any
//! of them the same way.

use crate::channel::{ChannelReader, ChannelWriter};
use crate::error::{OxiBwtError, Result};
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Which way a transform runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Raw input to transformed output. Selected by `-` on the command line.
    Forward,
    /// Transformed input back to raw output. Selected by `+`.
    Inverse,
}

impl Direction {
    /// The command-line symbol for this direction.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Forward => "-",
            Self::Inverse => "+",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Inverse => f.write_str("inverse"),
        }
    }
}

impl FromStr for Direction {
    type Err = OxiBwtError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" => Ok(Self::Forward),
            "+" => Ok(Self::Inverse),
            other => Err(OxiBwtError::invalid_input(format!(
                "unknown mode '{other}', expected '-' (forward) or '+' (inverse)"
            ))),
        }
    }
}

/// A reversible transform that consumes one channel and fills another.
///
/// Implementations must read their whole input before writing anything when
/// the input can be rejected, so a failed call leaves no partial output.
pub trait StreamTransform {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Apply the forward transform.
    fn forward<R: Read, W: Write>(
        &self,
        input: &mut ChannelReader<R>,
        output: &mut ChannelWriter<W>,
    ) -> Result<()>;

    /// Apply the inverse transform.
    fn inverse<R: Read, W: Write>(
        &self,
        input: &mut ChannelReader<R>,
        output: &mut ChannelWriter<W>,
    ) -> Result<()>;

    /// Run the transform in the given direction.
    fn apply<R: Read, W: Write>(
        &self,
        direction: Direction,
        input: &mut ChannelReader<R>,
        output: &mut ChannelWriter<W>,
    ) -> Result<()> {
        match direction {
            Direction::Forward => self.forward(input, output),
            Direction::Inverse => self.inverse(input, output),
        }
    }

    /// Run the transform over in-memory data (convenience method).
    fn apply_to_vec(&self, direction: Direction, input: &[u8]) -> Result<Vec<u8>> {
        let mut reader = ChannelReader::new(input);
        let mut writer = ChannelWriter::new(Vec::new());
        self.apply(direction, &mut reader, &mut writer)?;
        writer.into_inner()
    }
}
