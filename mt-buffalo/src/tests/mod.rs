use super::*;

use alloc::vec::Vec;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_all(params: &[(ParameterType, Value)]) -> Vec<u8> {
    let mut buffalo = Buffalo::new(Vec::new());
    for (ty, value) in params {
        buffalo
            .write_parameter(*ty, value, &BuffaloOptions::default())
            .unwrap();
    }
    buffalo.into_inner()
}

#[test]
fn write_then_read_scenario() {
    init_logger();

    let buffer = write_all(&[
        (ParameterType::Uint8, Value::Uint8(0x05)),
        (ParameterType::Uint16, Value::Uint16(0x0102)),
        (ParameterType::Buffer, Value::Buffer(vec![0xaa, 0xbb])),
    ]);
    assert_eq!(buffer, hex::decode("050201aabb").unwrap());

    let mut buffalo = Buffalo::new(&buffer[..]);
    let none = BuffaloOptions::default();
    assert_eq!(
        buffalo.read_parameter("status", ParameterType::Uint8, &none),
        Ok(Value::Uint8(5))
    );
    assert_eq!(
        buffalo.read_parameter("clusterid", ParameterType::Uint16, &none),
        Ok(Value::Uint16(0x0102))
    );
    assert_eq!(
        buffalo.read_parameter("data", ParameterType::Buffer, &none.with_length(2)),
        Ok(Value::Buffer(vec![0xaa, 0xbb]))
    );
    assert_eq!(buffalo.position(), 5);
    assert_eq!(buffalo.remaining(), 0);
}

#[test]
fn round_trip_every_writable_type() {
    init_logger();

    let neighbor = NeighborLqi {
        ext_pan_id: IeeeAddress([0xdd; 8]),
        ext_addr: IeeeAddress([0x00, 0x12, 0x4b, 0x00, 0x14, 0xb5, 0xd9, 0xc7]),
        nwk_addr: NetworkAddress(0x7a31),
        device_type: 1,
        rx_on_when_idle: 1,
        relationship: 2,
        permit_join: 2,
        depth: 1,
        lqi: 207,
    };

    let cases = [
        ("status", ParameterType::Uint8, Value::Uint8(0xfe), None, 1),
        ("dstaddrmode", ParameterType::Uint8, Value::AddressMode(AddressMode::Group), None, 1),
        ("profileid", ParameterType::Uint16, Value::Uint16(0x0104), None, 2),
        ("nwkaddr", ParameterType::Uint16, Value::NetworkAddress(NetworkAddress(0x1234)), None, 2),
        ("channels", ParameterType::Uint32, Value::Uint32(0x07fff800), None, 4),
        (
            "ieeeaddr",
            ParameterType::IeeeAddr,
            Value::IeeeAddr(IeeeAddress([1, 2, 3, 4, 5, 6, 7, 8])),
            None,
            8,
        ),
        ("data", ParameterType::Buffer, Value::Buffer(vec![9, 8, 7]), Some(3), 3),
        ("clusters", ParameterType::ListUint8, Value::ListUint8(vec![]), Some(0), 0),
        ("inclusters", ParameterType::ListUint16, Value::ListUint16(vec![0x0006, 0x0008]), Some(2), 4),
        (
            "neighborlqilist",
            ParameterType::ListNeighborLqi,
            Value::ListNeighborLqi(vec![neighbor, NeighborLqi::default()]),
            Some(2),
            44,
        ),
    ];

    for (name, ty, value, length, size) in cases {
        let options = BuffaloOptions {
            length,
            start_index: None,
        };

        let mut buffalo = Buffalo::new(Vec::new());
        buffalo.write_parameter(ty, &value, &options).unwrap();
        assert_eq!(buffalo.buffer().len(), size, "{name}");

        assert_eq!(buffalo.read_parameter(name, ty, &options), Ok(value), "{name}");
        assert_eq!(buffalo.position(), size, "{name}");
    }
}

#[test]
fn neighbor_lqi_layout() {
    let neighbor = NeighborLqi {
        ext_pan_id: IeeeAddress([0x11; 8]),
        ext_addr: IeeeAddress([0x22; 8]),
        nwk_addr: NetworkAddress(0x3344),
        device_type: 2,
        rx_on_when_idle: 1,
        relationship: 3,
        permit_join: 1,
        depth: 4,
        lqi: 0xc8,
    };

    let buffer = write_all(&[(
        ParameterType::ListNeighborLqi,
        Value::ListNeighborLqi(vec![neighbor]),
    )]);
    assert_eq!(
        buffer,
        hex::decode("111111111111111122222222222222224433360104c8").unwrap()
    );
    assert_eq!(buffer.len(), NeighborLqi::SIZE);
    assert_eq!(buffer[18], 0x36);

    let mut buffalo = Buffalo::new(&buffer[..]);
    assert_eq!(buffalo.read_neighbor_lqi(), Ok(neighbor));
}

#[test]
fn neighbor_lqi_masks_reserved_bits() {
    let mut raw = [0u8; NeighborLqi::SIZE];
    raw[18] = 0xff;
    raw[19] = 0xff;

    let mut buffalo = Buffalo::new(&raw[..]);
    let neighbor = buffalo.read_neighbor_lqi().unwrap();
    assert_eq!(neighbor.device_type, 3);
    assert_eq!(neighbor.rx_on_when_idle, 3);
    assert_eq!(neighbor.relationship, 7);
    assert_eq!(neighbor.permit_join, 3);
}

#[test]
fn neighbor_lqi_out_of_range_writes_nothing() {
    let good = NeighborLqi::default();
    let bad = NeighborLqi {
        rx_on_when_idle: 4,
        ..Default::default()
    };

    let mut buffalo = Buffalo::new(Vec::new());
    assert_eq!(
        buffalo.write_parameter(
            ParameterType::ListNeighborLqi,
            &Value::ListNeighborLqi(vec![good, bad]),
            &BuffaloOptions::default(),
        ),
        Err(Error::ValueOutOfRange {
            parameter_type: ParameterType::ListNeighborLqi,
            value: 4,
        })
    );
    assert!(buffalo.buffer().is_empty());
}

#[test]
fn neighbor_lqi_permit_join_is_checked_on_write() {
    let neighbor = NeighborLqi {
        permit_join: 4,
        ..Default::default()
    };

    let mut buffalo = Buffalo::new(Vec::new());
    assert_eq!(
        buffalo.write_neighbor_lqi(&neighbor),
        Err(Error::ValueOutOfRange {
            parameter_type: ParameterType::ListNeighborLqi,
            value: 4,
        })
    );
    assert_eq!(
        buffalo.write_parameter(
            ParameterType::ListNeighborLqi,
            &Value::ListNeighborLqi(vec![NeighborLqi::default(), neighbor]),
            &BuffaloOptions::default(),
        ),
        Err(Error::ValueOutOfRange {
            parameter_type: ParameterType::ListNeighborLqi,
            value: 4,
        })
    );
    assert!(buffalo.buffer().is_empty());

    // Every accepted entry reads back unchanged.
    for permit_join in 0..=3 {
        let neighbor = NeighborLqi {
            permit_join,
            ..Default::default()
        };
        let mut buffalo = Buffalo::new(Vec::new());
        buffalo.write_neighbor_lqi(&neighbor).unwrap();
        assert_eq!(buffalo.read_neighbor_lqi(), Ok(neighbor));
    }
}

#[test]
fn mgmt_lqi_response() {
    init_logger();

    // status, neighbortableentries, startindex, neighborlqilistcount, one entry
    let payload = hex::decode(concat!(
        "00",
        "05",
        "00",
        "01",
        "62ec1c2a49f8d9dd",
        "c7d9b514004b1200",
        "317a",
        "25",
        "02",
        "01",
        "cf",
    ))
    .unwrap();

    let mut buffalo = Buffalo::new(&payload[..]);
    let none = BuffaloOptions::default();

    assert_eq!(
        buffalo.read_parameter("status", ParameterType::Uint8, &none),
        Ok(Value::Uint8(0))
    );
    assert_eq!(
        buffalo.read_parameter("neighbortableentries", ParameterType::Uint8, &none),
        Ok(Value::Uint8(5))
    );
    let Ok(Value::Uint8(start_index)) =
        buffalo.read_parameter("startindex", ParameterType::Uint8, &none)
    else {
        panic!("startindex");
    };
    let Ok(Value::Uint8(count)) =
        buffalo.read_parameter("neighborlqilistcount", ParameterType::Uint8, &none)
    else {
        panic!("neighborlqilistcount");
    };

    let options = BuffaloOptions::default()
        .with_length(count as usize)
        .with_start_index(start_index as usize);
    let Ok(Value::ListNeighborLqi(list)) =
        buffalo.read_parameter("neighborlqilist", ParameterType::ListNeighborLqi, &options)
    else {
        panic!("neighborlqilist");
    };

    assert_eq!(list.len(), 1);
    assert_eq!(
        list[0].ext_pan_id,
        IeeeAddress([0x62, 0xec, 0x1c, 0x2a, 0x49, 0xf8, 0xd9, 0xdd])
    );
    assert_eq!(list[0].nwk_addr, NetworkAddress(0x7a31));
    assert_eq!(list[0].device_type, 1);
    assert_eq!(list[0].rx_on_when_idle, 1);
    assert_eq!(list[0].relationship, 2);
    assert_eq!(list[0].permit_join, 2);
    assert_eq!(list[0].depth, 1);
    assert_eq!(list[0].lqi, 0xcf);
    assert!(!buffalo.has_remaining());
}

#[test]
fn truncated_response_can_be_resumed() {
    let full = hex::decode("0201aabbccdd").unwrap();

    let mut partial = Buffalo::new(full[..3].to_vec());
    let none = BuffaloOptions::default();
    assert_eq!(
        partial.read_parameter("srcaddr", ParameterType::Uint16, &none),
        Ok(Value::NetworkAddress(NetworkAddress(0x0102)))
    );
    assert!(matches!(
        partial.read_parameter("data", ParameterType::FixedBuffer(4), &none),
        Err(Error::BufferUnderrun { position: 2, .. })
    ));

    let position = partial.position();
    let mut resumed = Buffalo::new_at(&full[..], position).unwrap();
    assert_eq!(
        resumed.read_parameter("data", ParameterType::FixedBuffer(4), &none),
        Ok(Value::Buffer(vec![0xaa, 0xbb, 0xcc, 0xdd]))
    );
}

#[test]
fn error_messages() {
    assert_eq!(
        format!(
            "{}",
            Error::UnsupportedParameterType {
                parameter_type: ParameterType::FixedBuffer(8),
            }
        ),
        "writing BUFFER8 is not supported"
    );
    assert_eq!(
        format!(
            "{}",
            Error::BufferUnderrun {
                position: 3,
                needed: 4,
                remaining: 2
            }
        ),
        "buffer underrun at position 3: need 4 bytes, 2 left"
    );
    assert_eq!(
        format!(
            "{}",
            Error::MissingLength {
                parameter_type: ParameterType::ListUint16
            }
        ),
        "LIST_UINT16 requires a length option"
    );
}
