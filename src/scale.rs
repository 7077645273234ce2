/// Linear percentage to perceptual (logarithmic) percentage.
pub const LOG10_SCALE: [u8; 101] = [
    0, 15, 23, 30, 34, 38, 42, 45, 47, 50, 52, 53, 55, 57, 58, 60, 61, 62,
    63, 65, 66, 67, 68, 69, 69, 70, 71, 72, 73, 73, 74, 75, 75, 76, 77, 77,
    78, 78, 79, 80, 80, 81, 81, 82, 82, 83, 83, 84, 84, 84, 85, 85, 86, 86,
    87, 87, 87, 88, 88, 88, 89, 89, 89, 90, 90, 90, 91, 91, 91, 92, 92, 92,
    93, 93, 93, 94, 94, 94, 94, 95, 95, 95, 95, 96, 96, 96, 96, 97, 97, 97,
    97, 98, 98, 98, 98, 99, 99, 99, 99, 99, 100,
];

/// Unfilled length of a bar of `bar_length` pixels showing `pct` percent.
///
/// Bars fill from the far end, so 0% is the whole bar and 100% is nothing.
pub fn to_extent(pct: u32, bar_length: u32, log_scale: bool) -> u32 {
    let mut pct = pct.min(100);
    if log_scale {
        pct = LOG10_SCALE[pct as usize] as u32;
    }
    bar_length - bar_length * pct / 100
}

/// Filled length of a left-to-right gauge.
pub fn fill_extent(pct: u32, bar_length: u32) -> u32 {
    bar_length - to_extent(pct, bar_length, false)
}
