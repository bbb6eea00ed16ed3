use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Rgb – renderer-agnostic color token
// ---------------------------------------------------------------------------

/// Plain RGB triple used inside chart specs so they stay independent of the
/// rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Theme token and palette lookup
// ---------------------------------------------------------------------------

/// The two fixed themes. Passed explicitly into every spec build; nothing
/// mutates global style state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Theme {
    Dark,
    Light,
}

/// Resolved colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: Rgb,
    pub panel: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
    pub positive: Rgb,
    pub negative: Rgb,
}

const DARK: Palette = Palette {
    background: Rgb::new(0x2e, 0x3b, 0x4e),
    panel: Rgb::new(0x34, 0x49, 0x5e),
    text: Rgb::new(0xec, 0xf0, 0xf1),
    accent: Rgb::new(0x1a, 0xbc, 0x9c),
    positive: Rgb::new(0x2e, 0xcc, 0x71),
    negative: Rgb::new(0xe7, 0x4c, 0x3c),
};

const LIGHT: Palette = Palette {
    background: Rgb::new(0xf0, 0xf0, 0xf0),
    panel: Rgb::new(0xec, 0xf0, 0xf1),
    text: Rgb::new(0x33, 0x33, 0x33),
    accent: Rgb::new(0x16, 0xa0, 0x85),
    positive: Rgb::new(0x2e, 0xcc, 0x71),
    negative: Rgb::new(0xe7, 0x4c, 0x3c),
};

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

// ---------------------------------------------------------------------------
// Continuous score scale
// ---------------------------------------------------------------------------

/// Identifies the continuous scale a renderer should use for a color
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorScale {
    Plasma,
    Viridis,
}

const PLASMA_STOPS: [Rgb; 5] = [
    Rgb::new(0x0d, 0x08, 0x87),
    Rgb::new(0x7e, 0x03, 0xa8),
    Rgb::new(0xcc, 0x47, 0x78),
    Rgb::new(0xf8, 0x94, 0x41),
    Rgb::new(0xf0, 0xf9, 0x21),
];

const VIRIDIS_STOPS: [Rgb; 5] = [
    Rgb::new(0x44, 0x01, 0x54),
    Rgb::new(0x3b, 0x52, 0x8b),
    Rgb::new(0x21, 0x91, 0x8c),
    Rgb::new(0x5e, 0xc9, 0x62),
    Rgb::new(0xfd, 0xe7, 0x25),
];

impl ColorScale {
    /// Sample the scale at `t` in [0, 1] (clamped) by interpolating between
    /// fixed stops.
    pub fn sample(self, t: f64) -> Rgb {
        let stops = match self {
            ColorScale::Plasma => &PLASMA_STOPS,
            ColorScale::Viridis => &VIRIDIS_STOPS,
        };
        let t = t.clamp(0.0, 1.0);
        let scaled = t * (stops.len() - 1) as f64;
        let lo = scaled.floor() as usize;
        let hi = (lo + 1).min(stops.len() - 1);
        let frac = scaled - lo as f64;
        lerp(stops[lo], stops[hi], frac)
    }
}

fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

// ---------------------------------------------------------------------------
// Categorical region palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb::new(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Maps region names to distinct colours. Regions are assigned hues in
/// sorted order so the mapping is deterministic for a given snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct RegionColors {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl RegionColors {
    pub fn new<'a>(regions: impl IntoIterator<Item = &'a str>) -> Self {
        let unique: BTreeSet<&str> = regions.into_iter().collect();
        let colors = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(colors)
            .map(|(r, c)| (r.to_string(), c))
            .collect();
        Self {
            mapping,
            default_color: Rgb::new(0x7f, 0x8c, 0x8d),
        }
    }

    pub fn color_for(&self, region: &str) -> Rgb {
        self.mapping
            .get(region)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (region label → colour) in sorted order.
    pub fn legend_entries(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.mapping.iter().map(|(r, c)| (r.as_str(), *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_lookup_is_a_fixed_table() {
        assert_eq!(Theme::Dark.palette().background, Rgb::new(0x2e, 0x3b, 0x4e));
        assert_eq!(Theme::Light.palette().background, Rgb::new(0xf0, 0xf0, 0xf0));
        assert_eq!(Theme::Dark.palette(), Theme::Dark.palette());
    }

    #[test]
    fn score_scale_clamps_and_hits_endpoints() {
        assert_eq!(ColorScale::Plasma.sample(-1.0), PLASMA_STOPS[0]);
        assert_eq!(ColorScale::Plasma.sample(0.0), PLASMA_STOPS[0]);
        assert_eq!(ColorScale::Plasma.sample(1.0), PLASMA_STOPS[4]);
        assert_eq!(ColorScale::Plasma.sample(2.0), PLASMA_STOPS[4]);
    }

    #[test]
    fn region_colors_are_deterministic_and_distinct() {
        let a = RegionColors::new(["Western Europe", "Sub-Saharan Africa", "East Asia"]);
        let b = RegionColors::new(["East Asia", "Western Europe", "Sub-Saharan Africa"]);
        assert_eq!(a.color_for("East Asia"), b.color_for("East Asia"));
        assert_ne!(a.color_for("East Asia"), a.color_for("Western Europe"));
        assert_eq!(a.legend_entries().count(), 3);
    }

    #[test]
    fn generate_palette_handles_empty() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }
}
