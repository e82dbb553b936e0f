#![no_main]

use cover_upload::Multipart;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let multipart = Multipart::new(data.to_vec(), "X-BOUNDARY");

    let mut parts = 0;
    for part in multipart {
        match part {
            Ok(part) => {
                assert!(part.body().len() <= data.len());
                parts += 1;
            }
            Err(_) => break,
        }
    }
    assert!(parts <= data.len());
});
