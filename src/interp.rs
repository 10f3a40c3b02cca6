use crate::types::{Rgb, Value};

// linearly map a number from one range to another
pub fn remap(s: Value, range_in: [Value; 2], range_out: [Value; 2]) -> Value {
    range_out[0] + (s - range_in[0]) * (range_out[1] - range_out[0]) / (range_in[1] - range_in[0])
}

// Linear interpolation
pub fn lerp(a: Value, b: Value, t: Value) -> Value {
    a + (b - a) * t
}

// Channel-wise linear interpolation between two colors
pub fn lerp_rgb(a: Rgb, b: Rgb, t: Value) -> Rgb {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

/// `n` evenly spaced samples over `[start, end]`, both ends included.
///
/// A single sample sits at `start`.
pub fn linspace(start: Value, end: Value, n: usize) -> Vec<Value> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (n - 1) as Value;
            (0..n)
                .map(|i| {
                    // pin the final sample so rounding never lands short of `end`
                    if i == n - 1 {
                        end
                    } else {
                        remap(i as Value, [0.0, last], [start, end])
                    }
                })
                .collect()
        }
    }
}

/// Maps a normalized coordinate onto an index in `[0, len - 1]`.
///
/// The coordinate is scaled by `len - 1`, rounded half away from zero and clamped.
/// NaN maps to 0. `len` must be at least 1.
#[inline]
pub fn lut_index(t: Value, len: usize) -> usize {
    let max = (len - 1) as Value;
    let i = (t * max).round();
    if i.is_nan() || i <= 0.0 {
        0
    } else if i >= max {
        len - 1
    } else {
        i as usize
    }
}
