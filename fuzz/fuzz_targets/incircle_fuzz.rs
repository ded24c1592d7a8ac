#![no_main]
mod fuzz_shared;
use fuzz_shared::{sign, FuzzPoint};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [FuzzPoint; 4]| {
    let Some(points) = data
        .iter()
        .map(FuzzPoint::validated)
        .collect::<Option<Vec<_>>>()
    else {
        return;
    };
    let [a, b, c, d] = [points[0], points[1], points[2], points[3]];

    let adaptive = geompreds::incircle(a, b, c, d);
    assert_eq!(sign(adaptive), sign(geompreds::incircle_exact(a, b, c, d)));
    assert_eq!(sign(geompreds::incircle(b, a, c, d)), -sign(adaptive));
    assert_eq!(sign(geompreds::incircle(b, c, a, d)), sign(adaptive));
});
