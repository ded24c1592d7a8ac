#![no_main]
mod fuzz_shared;
use fuzz_shared::{sign, FuzzPoint};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [FuzzPoint; 3]| {
    let (Some(a), Some(b), Some(c)) = (data[0].validated(), data[1].validated(), data[2].validated())
    else {
        return;
    };

    let adaptive = geompreds::orient2d(a, b, c);
    assert_eq!(sign(adaptive), sign(geompreds::orient2d_exact(a, b, c)));
    assert_eq!(sign(geompreds::orient2d(b, a, c)), -sign(adaptive));
    assert_eq!(sign(geompreds::orient2d(b, c, a)), sign(adaptive));
});
