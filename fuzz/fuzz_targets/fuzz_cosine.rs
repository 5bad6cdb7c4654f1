#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rank_select::{try_cosine, SelectError};

#[derive(Arbitrary, Debug)]
struct CosineInput {
    a: Vec<f32>,
    b: Vec<f32>,
}

fuzz_target!(|input: CosineInput| {
    // Must never panic, and must error exactly on unequal lengths.
    let result = try_cosine(&input.a, &input.b);
    match result {
        Ok(_) => assert_eq!(input.a.len(), input.b.len()),
        Err(SelectError::DimensionMismatch { expected, got }) => {
            assert_eq!(expected, input.a.len());
            assert_eq!(got, input.b.len());
            assert_ne!(expected, got);
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
});
