//! Neighbor table entries, as returned by `ZDO_MGMT_LQI_RSP`.

use crate::{Error, IeeeAddress, NetworkAddress, ParameterType, Result};

/// One entry of a neighbor table.
///
/// On the wire an entry takes [`NeighborLqi::SIZE`] octets:
///
/// | octets | field                                                   |
/// |--------|---------------------------------------------------------|
/// | 8      | extended PAN ID                                         |
/// | 8      | extended address                                        |
/// | 2      | network address                                         |
/// | 1      | device type (b0-1), rx on when idle (b2-3), relationship (b4-6) |
/// | 1      | permit join (b0-1)                                      |
/// | 1      | depth                                                   |
/// | 1      | LQI                                                     |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct NeighborLqi {
    /// Extended PAN ID of the neighbor's network.
    pub ext_pan_id: IeeeAddress,
    /// IEEE address of the neighbor.
    pub ext_addr: IeeeAddress,
    /// Network address of the neighbor.
    pub nwk_addr: NetworkAddress,
    /// Coordinator, router or end device.
    pub device_type: u8,
    /// Whether the neighbor keeps its receiver on when idle.
    pub rx_on_when_idle: u8,
    /// Parent, child, sibling, ...
    pub relationship: u8,
    /// Whether the neighbor accepts join requests.
    pub permit_join: u8,
    /// Tree depth of the neighbor.
    pub depth: u8,
    /// Link quality of the last received frame.
    pub lqi: u8,
}

impl NeighborLqi {
    /// The length of an encoded entry in octets.
    pub const SIZE: usize = 22;

    const DEVICE_TYPE_MASK: u8 = 0b0000_0011;
    const RX_ON_WHEN_IDLE_MASK: u8 = 0b0000_1100;
    const RELATIONSHIP_MASK: u8 = 0b0111_0000;
    const PERMIT_JOIN_MASK: u8 = 0b0000_0011;

    /// Return the packed status octet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueOutOfRange`] when a sub-field does not fit its
    /// bits.
    pub fn status(&self) -> Result<u8> {
        Ok(fit(self.device_type, 0b11)?
            | (fit(self.rx_on_when_idle, 0b11)? << 2)
            | (fit(self.relationship, 0b111)? << 4))
    }

    /// Check that every bit-field of the entry can be encoded, so that
    /// reading the written entry back gives the same value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueOutOfRange`] when a status sub-field or the
    /// permit join field does not fit its bits.
    pub fn validate(&self) -> Result<()> {
        self.status()?;
        fit(self.permit_join, Self::PERMIT_JOIN_MASK)?;
        Ok(())
    }

    /// Set the sub-fields packed in the status octet.
    pub fn set_status(&mut self, status: u8) {
        self.device_type = status & Self::DEVICE_TYPE_MASK;
        self.rx_on_when_idle = (status & Self::RX_ON_WHEN_IDLE_MASK) >> 2;
        self.relationship = (status & Self::RELATIONSHIP_MASK) >> 4;
    }

    /// Set the permit join field from its raw octet.
    pub fn set_permit_join(&mut self, raw: u8) {
        self.permit_join = raw & Self::PERMIT_JOIN_MASK;
    }
}

fn fit(value: u8, max: u8) -> Result<u8> {
    if value > max {
        Err(Error::ValueOutOfRange {
            parameter_type: ParameterType::ListNeighborLqi,
            value: value as i64,
        })
    } else {
        Ok(value)
    }
}

impl core::fmt::Display for NeighborLqi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "nwk addr: {}, ext addr: {}, ext pan id: {}, device type: {}, rx on when idle: {}, relationship: {}, permit join: {}, depth: {}, lqi: {}",
            self.nwk_addr,
            self.ext_addr,
            self.ext_pan_id,
            self.device_type,
            self.rx_on_when_idle,
            self.relationship,
            self.permit_join,
            self.depth,
            self.lqi
        )
    }
}
