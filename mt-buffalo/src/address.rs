//! Zigbee address types carried in MT parameters.

/// An IEEE EUI-64 address.
///
/// The bytes are kept in the order they appear on the wire.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct IeeeAddress(pub [u8; 8]);

impl IeeeAddress {
    /// The length of an IEEE address in octets.
    pub const SIZE: usize = 8;

    /// Return the address as it is laid out on the wire.
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<[u8; 8]> for IeeeAddress {
    fn from(value: [u8; 8]) -> Self {
        Self(value)
    }
}

impl From<IeeeAddress> for [u8; 8] {
    fn from(value: IeeeAddress) -> Self {
        value.0
    }
}

impl core::fmt::Display for IeeeAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]
        )
    }
}

/// A 16-bit Zigbee network (short) address.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct NetworkAddress(pub u16);

impl NetworkAddress {
    /// Broadcast to all devices in the network.
    pub const BROADCAST: NetworkAddress = NetworkAddress(0xffff);
    /// Broadcast to all devices with the receiver on when idle.
    pub const BROADCAST_RX_ON_WHEN_IDLE: NetworkAddress = NetworkAddress(0xfffd);
    /// Broadcast to all routers and the coordinator.
    pub const BROADCAST_ROUTERS: NetworkAddress = NetworkAddress(0xfffc);
    /// The address of the network coordinator.
    pub const COORDINATOR: NetworkAddress = NetworkAddress(0x0000);

    /// Query whether this is one of the broadcast addresses.
    pub fn is_broadcast(&self) -> bool {
        matches!(
            *self,
            Self::BROADCAST | Self::BROADCAST_RX_ON_WHEN_IDLE | Self::BROADCAST_ROUTERS
        )
    }

    /// Query whether the address is a unicast address.
    pub fn is_unicast(&self) -> bool {
        !self.is_broadcast()
    }
}

impl From<u16> for NetworkAddress {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<NetworkAddress> for u16 {
    fn from(value: NetworkAddress) -> Self {
        value.0
    }
}

impl core::fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Z-Stack addressing mode, as found in `*addrmode` parameters.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum AddressMode {
    /// No address present.
    NotPresent,
    /// 16-bit group address.
    Group,
    /// 16-bit network address.
    Short,
    /// 64-bit IEEE address.
    Extended,
    /// Broadcast address.
    Broadcast,
    /// A mode byte without a known meaning, kept verbatim.
    Unknown(u8),
}

impl From<u8> for AddressMode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::NotPresent,
            1 => Self::Group,
            2 => Self::Short,
            3 => Self::Extended,
            15 => Self::Broadcast,
            v => Self::Unknown(v),
        }
    }
}

impl From<AddressMode> for u8 {
    fn from(value: AddressMode) -> Self {
        match value {
            AddressMode::NotPresent => 0,
            AddressMode::Group => 1,
            AddressMode::Short => 2,
            AddressMode::Extended => 3,
            AddressMode::Broadcast => 15,
            AddressMode::Unknown(v) => v,
        }
    }
}

impl core::fmt::Display for AddressMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AddressMode::NotPresent => write!(f, "not present"),
            AddressMode::Group => write!(f, "group"),
            AddressMode::Short => write!(f, "16-bit"),
            AddressMode::Extended => write!(f, "64-bit"),
            AddressMode::Broadcast => write!(f, "broadcast"),
            AddressMode::Unknown(v) => write!(f, "unknown ({v})"),
        }
    }
}
