//! Decoded parameter values.

use alloc::vec::Vec;

use crate::{AddressMode, Error, IeeeAddress, NeighborLqi, NetworkAddress, ParameterType, Result};

/// Field name suffixes that turn a `UINT8` into an [`AddressMode`].
const ADDRESS_MODE_SUFFIXES: &[&str] = &["addrmode"];

/// Field name suffixes that turn a `UINT16` into a [`NetworkAddress`].
const NETWORK_ADDRESS_SUFFIXES: &[&str] = &["addr", "address", "addrofinterest"];

/// A single MT command parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum Value {
    /// `UINT8`.
    Uint8(u8),
    /// `UINT16`.
    Uint16(u16),
    /// `UINT32`.
    Uint32(u32),
    /// `INT8`.
    Int8(i8),
    /// `UINT8` read into an `*addrmode` field.
    AddressMode(AddressMode),
    /// `UINT16` read into an `*addr`, `*address` or `*addrofinterest` field.
    NetworkAddress(NetworkAddress),
    /// `IEEEADDR`.
    IeeeAddr(IeeeAddress),
    /// `BUFFER` and `BUFFERn`.
    Buffer(Vec<u8>),
    /// `LIST_UINT8`.
    ListUint8(Vec<u8>),
    /// `LIST_UINT16`.
    ListUint16(Vec<u16>),
    /// `LIST_NEIGHBOR_LQI`.
    ListNeighborLqi(Vec<NeighborLqi>),
}

fn has_suffix(field_name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| field_name.ends_with(suffix))
}

/// Interpret a raw `UINT8` read into the field named `field_name`.
pub fn interpret_u8(field_name: &str, raw: u8) -> Value {
    if has_suffix(field_name, ADDRESS_MODE_SUFFIXES) {
        Value::AddressMode(raw.into())
    } else {
        Value::Uint8(raw)
    }
}

/// Interpret a raw `UINT16` read into the field named `field_name`.
pub fn interpret_u16(field_name: &str, raw: u16) -> Value {
    if has_suffix(field_name, NETWORK_ADDRESS_SUFFIXES) {
        Value::NetworkAddress(raw.into())
    } else {
        Value::Uint16(raw)
    }
}

impl Value {
    /// Return the value as an integer, if it is a scalar.
    pub fn as_integer(&self) -> Option<i64> {
        Some(match self {
            Value::Uint8(v) => *v as i64,
            Value::Uint16(v) => *v as i64,
            Value::Uint32(v) => *v as i64,
            Value::Int8(v) => *v as i64,
            Value::AddressMode(mode) => u8::from(*mode) as i64,
            Value::NetworkAddress(addr) => addr.0 as i64,
            _ => return None,
        })
    }

    /// Return the value as an integer that fits `N` in `parameter_type`.
    pub(crate) fn narrow<N: TryFrom<i64>>(&self, parameter_type: ParameterType) -> Result<N> {
        let value = self
            .as_integer()
            .ok_or(Error::UnexpectedValue { parameter_type })?;
        narrow(value, parameter_type)
    }
}

pub(crate) fn narrow<N: TryFrom<i64>>(value: i64, parameter_type: ParameterType) -> Result<N> {
    N::try_from(value).map_err(|_| Error::ValueOutOfRange {
        parameter_type,
        value,
    })
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    i8 => Int8,
    AddressMode => AddressMode,
    NetworkAddress => NetworkAddress,
    IeeeAddress => IeeeAddr,
    Vec<u16> => ListUint16,
    Vec<NeighborLqi> => ListNeighborLqi,
}

fn fmt_list<T>(
    f: &mut core::fmt::Formatter<'_>,
    items: &[T],
    mut item: impl FnMut(&mut core::fmt::Formatter<'_>, &T) -> core::fmt::Result,
) -> core::fmt::Result {
    write!(f, "[")?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        item(f, v)?;
    }
    write!(f, "]")
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Uint8(v) => write!(f, "{v}"),
            Value::Uint16(v) => write!(f, "{v}"),
            Value::Uint32(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::AddressMode(mode) => write!(f, "{mode} ({})", u8::from(*mode)),
            Value::NetworkAddress(addr) => write!(f, "{addr}"),
            Value::IeeeAddr(addr) => write!(f, "{addr}"),
            Value::Buffer(b) | Value::ListUint8(b) => fmt_list(f, b, |f, v| write!(f, "{v:02x}")),
            Value::ListUint16(l) => fmt_list(f, l, |f, v| write!(f, "0x{v:04x}")),
            Value::ListNeighborLqi(l) => fmt_list(f, l, |f, v| write!(f, "{{{v}}}")),
        }
    }
}
