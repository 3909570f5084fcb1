//! Parameter type tags and per-call options.

use crate::{Error, NeighborLqi, Result};

/// The wire representation of a single MT command parameter.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum ParameterType {
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit little endian integer.
    Uint16,
    /// Unsigned 32-bit little endian integer.
    Uint32,
    /// Signed 8-bit integer.
    Int8,
    /// 8-byte IEEE address.
    IeeeAddr,
    /// Raw bytes. The length comes from [`BuffaloOptions::length`] when
    /// reading; writing appends the whole buffer.
    Buffer,
    /// Raw bytes with a length fixed by the command table (`BUFFER8`,
    /// `BUFFER16`, ...).
    FixedBuffer(usize),
    /// List of unsigned 8-bit integers.
    ListUint8,
    /// List of unsigned 16-bit little endian integers.
    ListUint16,
    /// List of [`NeighborLqi`] records.
    ListNeighborLqi,
}

impl ParameterType {
    const BUFFER_PREFIX: &'static str = "BUFFER";

    /// Map a command table type name onto a [`ParameterType`].
    ///
    /// A `BUFFER` name followed by decimal digits is a [`FixedBuffer`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameterType`] for names this crate has no
    /// representation for.
    ///
    /// [`FixedBuffer`]: ParameterType::FixedBuffer
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(match name {
            "UINT8" => Self::Uint8,
            "UINT16" => Self::Uint16,
            "UINT32" => Self::Uint32,
            "INT8" => Self::Int8,
            "IEEEADDR" => Self::IeeeAddr,
            "BUFFER" => Self::Buffer,
            "LIST_UINT8" => Self::ListUint8,
            "LIST_UINT16" => Self::ListUint16,
            "LIST_NEIGHBOR_LQI" => Self::ListNeighborLqi,
            name => {
                let Some(len) = name.strip_prefix(Self::BUFFER_PREFIX) else {
                    return Err(Error::UnknownParameterType);
                };

                if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::UnknownParameterType);
                }

                Self::FixedBuffer(len.parse().map_err(|_| Error::UnknownParameterType)?)
            }
        })
    }

    /// Return the size in octets of one element of this type, or `None` for
    /// raw buffers whose size is not known up front.
    pub fn element_size(&self) -> Option<usize> {
        match self {
            Self::Uint8 | Self::Int8 | Self::ListUint8 => Some(1),
            Self::Uint16 | Self::ListUint16 => Some(2),
            Self::Uint32 => Some(4),
            Self::IeeeAddr => Some(8),
            Self::ListNeighborLqi => Some(NeighborLqi::SIZE),
            Self::FixedBuffer(len) => Some(*len),
            Self::Buffer => None,
        }
    }

    /// Returns `true` when the element count comes from
    /// [`BuffaloOptions::length`].
    pub fn needs_length(&self) -> bool {
        matches!(
            self,
            Self::Buffer | Self::ListUint8 | Self::ListUint16 | Self::ListNeighborLqi
        )
    }

    /// Return the number of octets reading this type consumes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLength`] when the type needs a length and
    /// `options` has none. A byte count that does not fit a `usize` is
    /// reported as a [`Error::BufferUnderrun`].
    pub fn wire_len(&self, options: &BuffaloOptions) -> Result<usize> {
        if !self.needs_length() {
            return Ok(self.element_size().unwrap_or(0));
        }

        let count = options.length.ok_or(Error::MissingLength {
            parameter_type: *self,
        })?;

        count
            .checked_mul(self.element_size().unwrap_or(1))
            .ok_or(Error::BufferUnderrun {
                position: 0,
                needed: usize::MAX,
                remaining: 0,
            })
    }
}

impl core::str::FromStr for ParameterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl core::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Uint8 => write!(f, "UINT8"),
            Self::Uint16 => write!(f, "UINT16"),
            Self::Uint32 => write!(f, "UINT32"),
            Self::Int8 => write!(f, "INT8"),
            Self::IeeeAddr => write!(f, "IEEEADDR"),
            Self::Buffer => write!(f, "BUFFER"),
            Self::FixedBuffer(len) => write!(f, "{}{len}", Self::BUFFER_PREFIX),
            Self::ListUint8 => write!(f, "LIST_UINT8"),
            Self::ListUint16 => write!(f, "LIST_UINT16"),
            Self::ListNeighborLqi => write!(f, "LIST_NEIGHBOR_LQI"),
        }
    }
}

/// Options that accompany a single parameter read or write.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct BuffaloOptions {
    /// Element count for lists, byte count for [`ParameterType::Buffer`].
    pub length: Option<usize>,
    /// Start index of a paged table response. Accepted but not used by any
    /// parameter type.
    pub start_index: Option<usize>,
}

impl BuffaloOptions {
    /// Set the element count.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the start index.
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = Some(start_index);
        self
    }
}
