use std::fmt;

use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

/// Named continuous colour scales offered in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// The plotting library's default scale (plasma).
    Default,
    #[default]
    Blues,
    Greens,
    Viridis,
    Plasma,
    Inferno,
    Magma,
}

const BLUES: &[[u8; 3]] = &[
    [247, 251, 255],
    [198, 219, 239],
    [107, 174, 214],
    [33, 113, 181],
    [8, 48, 107],
];
const GREENS: &[[u8; 3]] = &[
    [247, 252, 245],
    [199, 233, 192],
    [116, 196, 118],
    [35, 139, 69],
    [0, 68, 27],
];
const VIRIDIS: &[[u8; 3]] = &[
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];
const PLASMA: &[[u8; 3]] = &[
    [13, 8, 135],
    [126, 3, 168],
    [204, 71, 120],
    [248, 149, 64],
    [240, 249, 33],
];
const INFERNO: &[[u8; 3]] = &[
    [0, 0, 4],
    [87, 16, 110],
    [188, 55, 84],
    [249, 142, 9],
    [252, 255, 164],
];
const MAGMA: &[[u8; 3]] = &[
    [0, 0, 4],
    [81, 18, 124],
    [183, 55, 121],
    [252, 137, 97],
    [252, 253, 191],
];

impl ColorScheme {
    /// All schemes in sidebar order.
    pub const ALL: [ColorScheme; 7] = [
        ColorScheme::Default,
        ColorScheme::Blues,
        ColorScheme::Greens,
        ColorScheme::Viridis,
        ColorScheme::Plasma,
        ColorScheme::Inferno,
        ColorScheme::Magma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::Blues => "blues",
            ColorScheme::Greens => "greens",
            ColorScheme::Viridis => "viridis",
            ColorScheme::Plasma => "plasma",
            ColorScheme::Inferno => "inferno",
            ColorScheme::Magma => "magma",
        }
    }

    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            ColorScheme::Default | ColorScheme::Plasma => PLASMA,
            ColorScheme::Blues => BLUES,
            ColorScheme::Greens => GREENS,
            ColorScheme::Viridis => VIRIDIS,
            ColorScheme::Inferno => INFERNO,
            ColorScheme::Magma => MAGMA,
        }
    }

    /// Sample the scale at `t` (clamped to `[0, 1]`), blending adjacent
    /// stops in linear RGB.
    pub fn sample(self, t: f64) -> Color32 {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = (scaled - idx as f64) as f32;

        let a = to_linear(stops[idx]);
        let b = to_linear(stops[idx + 1]);
        let mixed: Srgb<f32> = Srgb::from_linear(a.mix(b, frac));
        let rgb: Srgb<u8> = mixed.into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Colour for `value` relative to the `[min, max]` of the plotted data.
    /// A degenerate range lands in the middle of the scale.
    pub fn color_for(self, value: f64, min: f64, max: f64) -> Color32 {
        let range = max - min;
        let t = if range > 0.0 { (value - min) / range } else { 0.5 };
        self.sample(t)
    }
}

fn to_linear([r, g, b]: [u8; 3]) -> LinSrgb<f32> {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Min and max over defined values, for scaling chart colours.
pub fn value_extent<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    (lo <= hi).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_first_and_last_stops() {
        for scheme in ColorScheme::ALL {
            let stops = scheme.stops();
            let [r, g, b] = stops[0];
            assert_eq!(scheme.sample(0.0), Color32::from_rgb(r, g, b), "{scheme}");
            let [r, g, b] = stops[stops.len() - 1];
            assert_eq!(scheme.sample(1.0), Color32::from_rgb(r, g, b), "{scheme}");
        }
    }

    #[test]
    fn out_of_range_positions_are_clamped() {
        let s = ColorScheme::Viridis;
        assert_eq!(s.sample(-3.0), s.sample(0.0));
        assert_eq!(s.sample(7.0), s.sample(1.0));
        assert_eq!(s.sample(f64::NAN), s.sample(0.0));
    }

    #[test]
    fn blues_darken_with_value() {
        let light = ColorScheme::Blues.color_for(0.0, 0.0, 10.0);
        let dark = ColorScheme::Blues.color_for(10.0, 0.0, 10.0);
        assert!(dark.r() < light.r());
    }

    #[test]
    fn degenerate_extent_uses_midpoint() {
        let s = ColorScheme::Magma;
        assert_eq!(s.color_for(4.0, 4.0, 4.0), s.sample(0.5));
    }

    #[test]
    fn names_are_unique_and_default_is_blues() {
        let names: std::collections::BTreeSet<_> = ColorScheme::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), ColorScheme::ALL.len());
        assert_eq!(ColorScheme::default(), ColorScheme::Blues);
    }

    #[test]
    fn extent_of_values() {
        assert_eq!(value_extent(&[3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(value_extent(&[] as &[f64]), None);
    }
}
