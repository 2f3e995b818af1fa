/// Samples on the normalized gait-cycle axis (0, 1, ..., 100 %).
pub const CYCLE_POINTS: usize = 101;

/// Linearly interpolate a series onto [`CYCLE_POINTS`] evenly spaced points.
///
/// The input samples are spread evenly over 0..100 % by their own index,
/// whatever their count. A single sample gives a flat curve; an empty
/// series gives an empty one.
pub fn resample_cycle(values: &[f64]) -> Vec<f64> {
    match values {
        [] => Vec::new(),
        [only] => vec![*only; CYCLE_POINTS],
        _ => {
            let last = values.len() - 1;
            (0..CYCLE_POINTS)
                .map(|i| {
                    let pos = i as f64 * last as f64 / (CYCLE_POINTS - 1) as f64;
                    let lo = pos.floor() as usize;
                    if lo >= last {
                        return values[last];
                    }
                    let frac = pos - lo as f64;
                    values[lo] + (values[lo + 1] - values[lo]) * frac
                })
                .collect()
        }
    }
}
