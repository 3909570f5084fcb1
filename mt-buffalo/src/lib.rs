//! Read and write command parameters of the Z-Stack Monitor-and-Test (MT)
//! serial protocol.
//!
//! The MT protocol carries the parameters of every command as a flat, little
//! endian byte sequence. Which bytes belong to which parameter is decided by
//! the command table: an ordered list of `(name, type)` pairs. This crate
//! converts between that byte sequence and typed values, one parameter at a
//! time, using a [`Buffalo`] cursor:
//! - [`write_parameter`]: append a [`Value`] encoded as a [`ParameterType`].
//! - [`read_parameter`]: decode a [`ParameterType`] at the cursor and advance.
//!
//! Framing, checksums and command dispatch are not handled here. The cursor
//! only sees the parameter bytes of one command.
//!
//! ## Reading parameters
//! ```
//! # use mt_buffalo::{
//! #   AddressMode,
//! #   Buffalo,
//! #   BuffaloOptions,
//! #   NetworkAddress,
//! #   ParameterType,
//! #   Value,
//! # };
//! let payload = [0x02, 0x34, 0x12, 0x02, 0xaa, 0xbb];
//! let mut buffalo = Buffalo::new(&payload[..]);
//! let none = BuffaloOptions::default();
//!
//! let mode = buffalo.read_parameter("dstaddrmode", ParameterType::Uint8, &none).unwrap();
//! assert_eq!(mode, Value::AddressMode(AddressMode::Short));
//!
//! let addr = buffalo.read_parameter("nwkaddr", ParameterType::Uint16, &none).unwrap();
//! assert_eq!(addr, Value::NetworkAddress(NetworkAddress(0x1234)));
//!
//! let len = buffalo.read_parameter("len", ParameterType::Uint8, &none).unwrap();
//! assert_eq!(len, Value::Uint8(2));
//!
//! let data = buffalo
//!     .read_parameter("data", ParameterType::Buffer, &BuffaloOptions::default().with_length(2))
//!     .unwrap();
//! assert_eq!(data, Value::Buffer(vec![0xaa, 0xbb]));
//! assert_eq!(buffalo.remaining(), 0);
//! ```
//!
//! ## Writing parameters
//! ```
//! # use mt_buffalo::{Buffalo, BuffaloOptions, ParameterType, Value};
//! let mut buffalo = Buffalo::new(Vec::new());
//! let none = BuffaloOptions::default();
//!
//! buffalo.write_parameter(ParameterType::Uint8, &Value::Uint8(0x05), &none).unwrap();
//! buffalo.write_parameter(ParameterType::Uint16, &Value::Uint16(0x0102), &none).unwrap();
//! buffalo
//!     .write_parameter(ParameterType::Buffer, &Value::Buffer(vec![0xaa, 0xbb]), &none)
//!     .unwrap();
//!
//! assert_eq!(buffalo.into_inner(), [0x05, 0x02, 0x01, 0xaa, 0xbb]);
//! ```
//!
//! ## Parameter types
//!
//! - [x] `UINT8`, `UINT16`, `UINT32`: unsigned little endian integers.
//! - [x] `INT8`: signed byte (read only).
//! - [x] `IEEEADDR`: 8-byte EUI-64 address, bytes kept as stored.
//! - [x] `BUFFER`: raw bytes, length from [`BuffaloOptions::length`].
//! - [x] `BUFFERn`: raw bytes with a fixed length `n` (read only).
//! - [x] `LIST_UINT8`, `LIST_UINT16`: element count from
//!   [`BuffaloOptions::length`].
//! - [x] `LIST_NEIGHBOR_LQI`: [`NeighborLqi`] records, count from
//!   [`BuffaloOptions::length`].
//! - [ ] `LIST_ROUTING_TABLE`
//! - [ ] `LIST_BIND_TABLE`
//! - [ ] `LIST_NETWORK`
//! - [ ] `LIST_ASSOC_DEV`
//!
//! ## Field names
//!
//! Two parameter types are reinterpreted based on the parameter name:
//! a `UINT8` whose name ends in `addrmode` decodes to an [`AddressMode`], and
//! a `UINT16` whose name ends in `addr`, `address` or `addrofinterest`
//! decodes to a [`NetworkAddress`]. Command tables rely on this, so the rule
//! is fixed.
//!
//! [`write_parameter`]: Buffalo::write_parameter
//! [`read_parameter`]: Buffalo::read_parameter
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(test)]
mod tests;

#[macro_use]
mod log;

mod address;
pub use address::*;

mod buffalo;
pub use buffalo::Buffalo;

mod neighbor;
pub use neighbor::NeighborLqi;

mod parameter;
pub use parameter::*;

mod value;
pub use value::*;

/// An error that can occur when reading or writing MT command parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The codec has no encoding for this parameter type. Every type can be
    /// read, so this only comes up on writes.
    UnsupportedParameterType {
        /// The offending parameter type.
        parameter_type: ParameterType,
    },
    /// The parameter type takes its length from [`BuffaloOptions::length`],
    /// which was not set.
    MissingLength {
        /// The parameter type that needed a length.
        parameter_type: ParameterType,
    },
    /// Reading would run past the end of the buffer.
    BufferUnderrun {
        /// The cursor position at the time of the read.
        position: usize,
        /// Number of bytes the read needs.
        needed: usize,
        /// Number of bytes left in the buffer.
        remaining: usize,
    },
    /// A numeric value does not fit the width it is written with.
    ValueOutOfRange {
        /// The parameter type being written.
        parameter_type: ParameterType,
        /// The value that did not fit.
        value: i64,
    },
    /// A list has more elements than the parameter type can hold.
    TooManyElements {
        /// The parameter type being written.
        parameter_type: ParameterType,
        /// The largest number of elements the type takes.
        max: usize,
    },
    /// The value has a shape that cannot be written as this parameter type.
    UnexpectedValue {
        /// The parameter type being written.
        parameter_type: ParameterType,
    },
    /// A command table named a parameter type this crate does not know.
    UnknownParameterType,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UnsupportedParameterType { parameter_type } => {
                write!(f, "writing {parameter_type} is not supported")
            }
            Error::MissingLength { parameter_type } => {
                write!(f, "{parameter_type} requires a length option")
            }
            Error::BufferUnderrun {
                position,
                needed,
                remaining,
            } => write!(
                f,
                "buffer underrun at position {position}: need {needed} bytes, {remaining} left"
            ),
            Error::ValueOutOfRange {
                parameter_type,
                value,
            } => write!(f, "value {value} does not fit {parameter_type}"),
            Error::TooManyElements {
                parameter_type,
                max,
            } => write!(f, "{parameter_type} takes at most {max} elements"),
            Error::UnexpectedValue { parameter_type } => {
                write!(f, "value cannot be written as {parameter_type}")
            }
            Error::UnknownParameterType => write!(f, "unknown parameter type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A type alias for `Result<T, mt_buffalo::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
