#![no_main]

use mt_buffalo::{Buffalo, BuffaloOptions, ParameterType};

use libfuzzer_sys::{fuzz_target, Corpus};

fuzz_target!(|input: (Vec<(ParameterType, BuffaloOptions)>, &[u8])| -> Corpus {
    let (params, data) = input;
    if data.len() > 250 {
        return Corpus::Reject;
    }

    let mut buffalo = Buffalo::new(data);
    for (ty, options) in params {
        let position = buffalo.position();
        if buffalo.read_parameter("field", ty, &options).is_err() {
            assert_eq!(buffalo.position(), position);
            break;
        }
    }

    Corpus::Keep
});
