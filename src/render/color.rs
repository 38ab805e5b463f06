/// Inferno-like color stops for concentration heatmaps.
/// Black -> indigo -> crimson -> orange -> pale yellow
pub(crate) const INFERNO_STOPS: [(f64, f64, f64); 5] = [
    (0.0, 0.0, 4.0),       // #000004 black         (0.00)
    (87.0, 16.0, 110.0),   // #57106e indigo        (0.25)
    (188.0, 55.0, 84.0),   // #bc3754 crimson       (0.50)
    (249.0, 142.0, 9.0),   // #f98e09 orange        (0.75)
    (252.0, 255.0, 164.0), // #fcffa4 pale yellow   (1.00)
];

/// Convert a [0.0, 1.0] value to RGBA. Out-of-range values clamp to the ends.
pub fn map_to_rgba(t: f64) -> [u8; 4] {
    let stops = &INFERNO_STOPS;

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let seg = t * 4.0;
    let i = (seg as usize).min(3);
    let s = seg - i as f64;

    let (r0, g0, b0) = stops[i];
    let (r1, g1, b1) = stops[i + 1];

    [
        (r0 + s * (r1 - r0)) as u8,
        (g0 + s * (g1 - g0)) as u8,
        (b0 + s * (b1 - b0)) as u8,
        255,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_zero_is_black() {
        let rgba = map_to_rgba(0.0);
        assert_eq!(rgba[0], 0, "R should be 0");
        assert_eq!(rgba[1], 0, "G should be 0");
        assert_eq!(rgba[2], 4, "B should be 4");
        assert_eq!(rgba[3], 255, "A should be 255");
    }

    #[test]
    fn test_color_peak_is_pale_yellow() {
        let rgba = map_to_rgba(1.0);
        assert_eq!(rgba[0], 252, "R should be 252");
        assert_eq!(rgba[1], 255, "G should be 255");
        assert_eq!(rgba[2], 164, "B should be 164");
    }

    #[test]
    fn test_color_mid_is_crimson() {
        let rgba = map_to_rgba(0.5);
        assert_eq!(rgba[0], 188);
        assert_eq!(rgba[1], 55);
        assert_eq!(rgba[2], 84);
    }

    #[test]
    fn test_color_clamp_and_nan() {
        assert_eq!(map_to_rgba(-1.0), map_to_rgba(0.0));
        assert_eq!(map_to_rgba(2.0), map_to_rgba(1.0));
        assert_eq!(map_to_rgba(f64::NAN), map_to_rgba(0.0));
    }

    #[test]
    fn test_gradient_continuity() {
        let steps = 256;
        for i in 1..steps {
            let t0 = (i - 1) as f64 / (steps - 1) as f64;
            let t1 = i as f64 / (steps - 1) as f64;
            let c0 = map_to_rgba(t0);
            let c1 = map_to_rgba(t1);
            for ch in 0..3 {
                let diff = (c1[ch] as i32 - c0[ch] as i32).abs();
                assert!(
                    diff <= 5,
                    "Color channel {} jumped by {} between t={} and t={}",
                    ch, diff, t0, t1
                );
            }
        }
    }
}
