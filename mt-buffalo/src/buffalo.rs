//! The parameter cursor.

use alloc::vec::Vec;

use crate::value::{interpret_u16, interpret_u8, narrow};
use crate::{
    BuffaloOptions, Error, IeeeAddress, NeighborLqi, NetworkAddress, ParameterType, Result,
    Value,
};

/// A reader/writer for MT command parameters.
///
/// Reads consume bytes at the cursor position and advance it. Writes append to
/// the end of the buffer and never touch the position. A read that fails
/// leaves the position where it was, and a write that fails appends nothing.
#[derive(Debug, Clone)]
pub struct Buffalo<T> {
    buffer: T,
    position: usize,
}

impl<T> Buffalo<T> {
    /// Create a new [`Buffalo`] with the cursor at the start of `buffer`.
    pub fn new(buffer: T) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Return the cursor position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Return a reference to the underlying buffer.
    pub fn buffer(&self) -> &T {
        &self.buffer
    }

    /// Consume the [`Buffalo`] and return the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

impl<T: AsRef<[u8]>> Buffalo<T> {
    /// Create a new [`Buffalo`] with the cursor at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferUnderrun`] when `position` lies past the end of
    /// the buffer.
    pub fn new_at(buffer: T, position: usize) -> Result<Self> {
        let len = buffer.as_ref().len();
        if position > len {
            return Err(Error::BufferUnderrun {
                position,
                needed: 0,
                remaining: 0,
            });
        }

        Ok(Self { buffer, position })
    }

    /// Return the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buffer.as_ref().len() - self.position
    }

    /// Returns `true` when there are unread bytes left.
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Check that `len` bytes are left to read.
    fn check_len(&self, len: usize) -> Result<()> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(Error::BufferUnderrun {
                position: self.position,
                needed: len,
                remaining,
            });
        }

        Ok(())
    }

    /// Check that `count` elements of `size` bytes each are left to read.
    fn check_elements(&self, count: usize, size: usize) -> Result<()> {
        match count.checked_mul(size) {
            Some(len) => self.check_len(len),
            None => Err(Error::BufferUnderrun {
                position: self.position,
                needed: usize::MAX,
                remaining: self.remaining(),
            }),
        }
    }

    fn take(&mut self, len: usize) -> Result<&[u8]> {
        self.check_len(len)?;

        let start = self.position;
        self.position += len;
        Ok(&self.buffer.as_ref()[start..][..len])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut b = [0u8; N];
        b.copy_from_slice(self.take(N)?);
        Ok(b)
    }

    /// Read an unsigned 8-bit integer.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read an unsigned 16-bit little endian integer.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    /// Read an unsigned 32-bit little endian integer.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    /// Read a signed 8-bit integer.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.take_array()?))
    }

    /// Read an IEEE address, keeping the bytes in wire order.
    pub fn read_ieee_addr(&mut self) -> Result<IeeeAddress> {
        Ok(IeeeAddress(self.take_array()?))
    }

    /// Read `len` raw bytes.
    pub fn read_buffer(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.take(len)?.to_vec())
    }

    /// Read `count` unsigned 8-bit integers.
    pub fn read_list_u8(&mut self, count: usize) -> Result<Vec<u8>> {
        self.read_buffer(count)
    }

    /// Read `count` unsigned 16-bit little endian integers.
    pub fn read_list_u16(&mut self, count: usize) -> Result<Vec<u16>> {
        self.check_elements(count, 2)?;

        let mut list = Vec::with_capacity(count);
        for _ in 0..count {
            list.push(self.read_u16()?);
        }
        Ok(list)
    }

    /// Read a single [`NeighborLqi`] record.
    pub fn read_neighbor_lqi(&mut self) -> Result<NeighborLqi> {
        self.check_len(NeighborLqi::SIZE)?;

        let mut neighbor = NeighborLqi {
            ext_pan_id: self.read_ieee_addr()?,
            ext_addr: self.read_ieee_addr()?,
            nwk_addr: NetworkAddress(self.read_u16()?),
            ..Default::default()
        };
        neighbor.set_status(self.read_u8()?);
        neighbor.set_permit_join(self.read_u8()?);
        neighbor.depth = self.read_u8()?;
        neighbor.lqi = self.read_u8()?;

        Ok(neighbor)
    }

    /// Read `count` [`NeighborLqi`] records.
    pub fn read_list_neighbor_lqi(&mut self, count: usize) -> Result<Vec<NeighborLqi>> {
        self.check_elements(count, NeighborLqi::SIZE)?;

        let mut list = Vec::with_capacity(count);
        for _ in 0..count {
            list.push(self.read_neighbor_lqi()?);
        }
        Ok(list)
    }

    /// Read the parameter `field_name` encoded as `parameter_type`.
    ///
    /// `UINT8` fields whose name ends in `addrmode` decode to
    /// [`Value::AddressMode`]. `UINT16` fields whose name ends in `addr`,
    /// `address` or `addrofinterest` decode to [`Value::NetworkAddress`].
    ///
    /// # Errors
    ///
    /// - [`Error::MissingLength`] when `parameter_type` takes its length from
    ///   `options` and none was given.
    /// - [`Error::BufferUnderrun`] when the buffer is too short. The cursor is
    ///   not moved.
    pub fn read_parameter(
        &mut self,
        field_name: &str,
        parameter_type: ParameterType,
        options: &BuffaloOptions,
    ) -> Result<Value> {
        trace!(
            "read {} as {} at {}",
            field_name,
            parameter_type,
            self.position
        );

        let length = || {
            options.length.ok_or(Error::MissingLength { parameter_type })
        };

        let value = match parameter_type {
            ParameterType::Uint8 => self.read_u8().map(|v| interpret_u8(field_name, v)),
            ParameterType::Uint16 => self.read_u16().map(|v| interpret_u16(field_name, v)),
            ParameterType::Uint32 => self.read_u32().map(Value::Uint32),
            ParameterType::Int8 => self.read_i8().map(Value::Int8),
            ParameterType::IeeeAddr => self.read_ieee_addr().map(Value::IeeeAddr),
            ParameterType::Buffer => length().and_then(|len| self.read_buffer(len).map(Value::Buffer)),
            ParameterType::FixedBuffer(len) => self.read_buffer(len).map(Value::Buffer),
            ParameterType::ListUint8 => {
                length().and_then(|count| self.read_list_u8(count).map(Value::ListUint8))
            }
            ParameterType::ListUint16 => {
                length().and_then(|count| self.read_list_u16(count).map(Value::ListUint16))
            }
            ParameterType::ListNeighborLqi => length().and_then(|count| {
                self.read_list_neighbor_lqi(count)
                    .map(Value::ListNeighborLqi)
            }),
        };

        if let Err(e) = &value {
            debug!("reading {} failed: {}", field_name, e);
        }

        value
    }
}

impl<T: Extend<u8>> Buffalo<T> {
    fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes.iter().copied());
    }

    /// Write an unsigned 8-bit integer.
    pub fn write_u8(&mut self, value: u8) {
        self.append(&[value]);
    }

    /// Write an unsigned 16-bit little endian integer.
    pub fn write_u16(&mut self, value: u16) {
        self.append(&value.to_le_bytes());
    }

    /// Write an unsigned 32-bit little endian integer.
    pub fn write_u32(&mut self, value: u32) {
        self.append(&value.to_le_bytes());
    }

    /// Write an IEEE address in wire order.
    pub fn write_ieee_addr(&mut self, addr: &IeeeAddress) {
        self.append(addr.as_bytes());
    }

    /// Write an IEEE address given as a list of up to 8 integers, one byte
    /// each, in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueOutOfRange`] when an element does not fit a byte
    /// and [`Error::TooManyElements`] when there are more than 8 elements.
    pub fn write_bytes_as_addr<I>(&mut self, bytes: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        let mut addr = [0u8; IeeeAddress::SIZE];
        let mut len = 0;

        for byte in bytes {
            if len == IeeeAddress::SIZE {
                return Err(Error::TooManyElements {
                    parameter_type: ParameterType::IeeeAddr,
                    max: IeeeAddress::SIZE,
                });
            }

            addr[len] = narrow(byte.into(), ParameterType::IeeeAddr)?;
            len += 1;
        }

        self.append(&addr[..len]);
        Ok(())
    }

    /// Write raw bytes.
    pub fn write_buffer(&mut self, bytes: &[u8]) {
        self.append(bytes);
    }

    /// Write a list of unsigned 8-bit integers.
    pub fn write_list_u8(&mut self, list: &[u8]) {
        self.append(list);
    }

    /// Write a list of unsigned 16-bit little endian integers.
    pub fn write_list_u16(&mut self, list: &[u16]) {
        for v in list {
            self.write_u16(*v);
        }
    }

    /// Write a single [`NeighborLqi`] record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueOutOfRange`] when a bit-field of the record does
    /// not fit, see [`NeighborLqi::validate`].
    pub fn write_neighbor_lqi(&mut self, neighbor: &NeighborLqi) -> Result<()> {
        neighbor.validate()?;
        let status = neighbor.status()?;

        let mut b = [0u8; NeighborLqi::SIZE];
        b[..8].copy_from_slice(neighbor.ext_pan_id.as_bytes());
        b[8..16].copy_from_slice(neighbor.ext_addr.as_bytes());
        b[16..18].copy_from_slice(&neighbor.nwk_addr.0.to_le_bytes());
        b[18] = status;
        b[19] = neighbor.permit_join;
        b[20] = neighbor.depth;
        b[21] = neighbor.lqi;

        self.append(&b);
        Ok(())
    }

    /// Write a list of [`NeighborLqi`] records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueOutOfRange`] when any record has a bit-field out
    /// of range. Nothing is written in that case.
    pub fn write_list_neighbor_lqi(&mut self, list: &[NeighborLqi]) -> Result<()> {
        for neighbor in list {
            neighbor.validate()?;
        }

        for neighbor in list {
            self.write_neighbor_lqi(neighbor)?;
        }
        Ok(())
    }

    /// Write `value` encoded as `parameter_type`.
    ///
    /// Integer values are narrowed to the width of `parameter_type`.
    /// `IEEEADDR` accepts either an [`IeeeAddress`] or a list of bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedParameterType`] for `INT8` and `BUFFERn`, which
    ///   are never sent to the coprocessor.
    /// - [`Error::ValueOutOfRange`] when an integer does not fit.
    /// - [`Error::UnexpectedValue`] when `value` has the wrong shape.
    ///
    /// # Panics
    ///
    /// With the `panic` feature enabled, an unsupported parameter type panics
    /// instead of returning an error.
    pub fn write_parameter(
        &mut self,
        parameter_type: ParameterType,
        value: &Value,
        _options: &BuffaloOptions,
    ) -> Result<()> {
        trace!("write {:?} as {}", value, parameter_type);

        let unexpected = Error::UnexpectedValue { parameter_type };

        let result = match (parameter_type, value) {
            (ParameterType::Uint8, v) => v.narrow(parameter_type).map(|v| self.write_u8(v)),
            (ParameterType::Uint16, v) => v.narrow(parameter_type).map(|v| self.write_u16(v)),
            (ParameterType::Uint32, v) => v.narrow(parameter_type).map(|v| self.write_u32(v)),
            (ParameterType::IeeeAddr, Value::IeeeAddr(addr)) => {
                self.write_ieee_addr(addr);
                Ok(())
            }
            (ParameterType::IeeeAddr, Value::ListUint8(b) | Value::Buffer(b)) => {
                self.write_bytes_as_addr(b.iter().copied())
            }
            (ParameterType::IeeeAddr, Value::ListUint16(l)) => {
                self.write_bytes_as_addr(l.iter().copied())
            }
            (ParameterType::Buffer, Value::Buffer(b) | Value::ListUint8(b)) => {
                self.write_buffer(b);
                Ok(())
            }
            (ParameterType::ListUint8, Value::ListUint8(b) | Value::Buffer(b)) => {
                self.write_list_u8(b);
                Ok(())
            }
            (ParameterType::ListUint8, Value::ListUint16(l)) => l
                .iter()
                .map(|v| narrow(*v as i64, parameter_type))
                .collect::<Result<Vec<u8>>>()
                .map(|b| self.write_list_u8(&b)),
            (ParameterType::ListUint16, Value::ListUint16(l)) => {
                self.write_list_u16(l);
                Ok(())
            }
            (ParameterType::ListUint16, Value::ListUint8(b)) => {
                for v in b {
                    self.write_u16(*v as u16);
                }
                Ok(())
            }
            (ParameterType::ListNeighborLqi, Value::ListNeighborLqi(l)) => {
                self.write_list_neighbor_lqi(l)
            }
            #[allow(unreachable_code)]
            (ParameterType::Int8 | ParameterType::FixedBuffer(_), _) => {
                #[cfg(feature = "panic")]
                {
                    panic!("unsupported parameter type: {parameter_type}");
                }

                Err(Error::UnsupportedParameterType { parameter_type })
            }
            _ => Err(unexpected),
        };

        if let Err(e) = &result {
            debug!("writing {} failed: {}", parameter_type, e);
        }

        result
    }
}
