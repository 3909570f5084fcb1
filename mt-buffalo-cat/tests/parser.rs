use mt_buffalo_cat::{Error, Length, ParameterSpec, PayloadParser};

use strip_ansi_escapes::strip;

fn specs(specs: &[&str]) -> Vec<ParameterSpec> {
    specs.iter().map(|s| s.parse().unwrap()).collect()
}

fn parse(input: &str, layout: &[&str]) -> String {
    String::from_utf8(strip(PayloadParser::parse_hex(input, &specs(layout)).unwrap())).unwrap()
}

#[test]
fn parameter_spec() {
    let spec: ParameterSpec = "neighborlqilist:LIST_NEIGHBOR_LQI:@count".parse().unwrap();
    assert_eq!(spec.name, "neighborlqilist");
    assert_eq!(spec.length, Some(Length::Field("count".to_string())));

    let spec: ParameterSpec = "key:BUFFER16".parse().unwrap();
    assert_eq!(spec.length, None);

    let spec: ParameterSpec = "data:BUFFER:4".parse().unwrap();
    assert_eq!(spec.length, Some(Length::Fixed(4)));

    for invalid in [
        "",
        "status",
        ":UINT8",
        "status:UINT9",
        "data:BUFFER:x",
        "data:BUFFER:@",
        "data:BUFFER:4:5",
    ] {
        assert!(
            matches!(invalid.parse::<ParameterSpec>(), Err(Error::InvalidSpec(_))),
            "{invalid}"
        );
    }
}

#[test]
fn af_data_request_fields() {
    let output = parse(
        "0234120201aabbccdd",
        &[
            "dstaddrmode:UINT8",
            "dstaddr:UINT16",
            "len:UINT8",
            "data:BUFFER:@len",
        ],
    );
    assert_eq!(
        output,
        "Parameters
  dstaddrmode (UINT8): 16-bit (2)
  dstaddr (UINT16): 0x1234
  len (UINT8): 2
  data (BUFFER): [01, aa]
Trailing
  [bb, cc, dd]
"
    );
}

#[test]
fn mgmt_lqi_response() {
    let output = parse(
        "00050001\
         62ec1c2a49f8d9ddc7d9b514004b1200317a250201cf",
        &[
            "status:UINT8",
            "neighbortableentries:UINT8",
            "startindex:UINT8",
            "neighborlqilistcount:UINT8",
            "neighborlqilist:LIST_NEIGHBOR_LQI:@neighborlqilistcount",
        ],
    );
    assert_eq!(
        output,
        "Parameters
  status (UINT8): 0
  neighbortableentries (UINT8): 5
  startindex (UINT8): 0
  neighborlqilistcount (UINT8): 1
  neighborlqilist (LIST_NEIGHBOR_LQI): 1 entries
    [0]
      nwk addr: 0x7a31
      ext addr: c7:d9:b5:14:00:4b:12:00
      ext pan id: 62:ec:1c:2a:49:f8:d9:dd
      device type: 1
      rx on when idle: 1
      relationship: 2
      permit join: 2
      depth: 1
      lqi: 207
"
    );
}

#[test]
fn lists_and_signed() {
    let output = parse(
        "ff060008000102030405060708",
        &[
            "rssi:INT8",
            "inclusters:LIST_UINT16:2",
            "outclusters:LIST_UINT8:0",
            "ieeeaddr:IEEEADDR",
        ],
    );
    assert_eq!(
        output,
        "Parameters
  rssi (INT8): -1
  inclusters (LIST_UINT16): [0x0006, 0x0008]
  outclusters (LIST_UINT8): []
  ieeeaddr (IEEEADDR): 01:02:03:04:05:06:07:08
"
    );
}

#[test]
fn underrun_is_reported() {
    let result =
        PayloadParser::parse_hex("ff0104000600", &specs(&["rssi:INT8", "ieeeaddr:IEEEADDR"]));
    match result {
        Err(Error::Parameter { name, source }) => {
            assert_eq!(name, "ieeeaddr");
            assert_eq!(
                source,
                mt_buffalo::Error::BufferUnderrun {
                    position: 1,
                    needed: 8,
                    remaining: 5,
                }
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn invalid_hex() {
    assert!(matches!(
        PayloadParser::parse_hex("0g", &specs(&["status:UINT8"])),
        Err(Error::Hex(_))
    ));
}
