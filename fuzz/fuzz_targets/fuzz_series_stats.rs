//! Fuzz target for the series statistics.
//!
//! moving_average and empirical_p must never panic or change the series
//! length, whatever the window sizes and values.

#![no_main]

use arbitrary::Arbitrary;
use ili_math::{empirical_p, moving_average};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    series: Vec<f64>,
    window_size: u8,
    min_window_size: u8,
}

fuzz_target!(|input: Input| {
    let smoothed = moving_average(input.window_size as usize, &input.series);
    assert_eq!(smoothed.len(), input.series.len());

    let p = empirical_p(
        input.window_size as usize,
        input.min_window_size as usize,
        &input.series,
    );
    assert_eq!(p.len(), input.series.len());
});
