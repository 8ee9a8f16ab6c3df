use eframe::egui::{self, Color32};
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Accent palettes
// ---------------------------------------------------------------------------

/// Chart accents for the light theme.
pub const LIGHT_ACCENTS: [Color32; 8] = [
    Color32::from_rgb(99, 102, 241),
    Color32::from_rgb(34, 197, 94),
    Color32::from_rgb(249, 115, 22),
    Color32::from_rgb(239, 68, 68),
    Color32::from_rgb(20, 184, 166),
    Color32::from_rgb(139, 92, 246),
    Color32::from_rgb(245, 158, 11),
    Color32::from_rgb(236, 72, 153),
];

/// Chart accents for the dark theme, lightened for contrast on dark panels.
pub const DARK_ACCENTS: [Color32; 8] = [
    Color32::from_rgb(129, 140, 248),
    Color32::from_rgb(52, 211, 153),
    Color32::from_rgb(251, 146, 60),
    Color32::from_rgb(248, 113, 113),
    Color32::from_rgb(45, 212, 191),
    Color32::from_rgb(167, 139, 250),
    Color32::from_rgb(251, 191, 36),
    Color32::from_rgb(244, 114, 182),
];

pub fn accents(dark: bool) -> &'static [Color32; 8] {
    if dark { &DARK_ACCENTS } else { &LIGHT_ACCENTS }
}

/// Accent for a series index, wrapping past the end of the palette.
pub fn accent(dark: bool, idx: usize) -> Color32 {
    let palette = accents(dark);
    palette[idx % palette.len()]
}

/// A palette of `n` series colours: the fixed accents first, then evenly
/// spaced hues once a chart needs more than eight.
pub fn series_palette(dark: bool, n: usize) -> Vec<Color32> {
    let base = accents(dark);
    if n <= base.len() {
        return base[..n].to_vec();
    }
    let mut out = base.to_vec();
    out.extend(spaced_hues(n - base.len(), dark));
    out
}

/// Evenly spaced hues, lighter in dark mode to keep contrast.
fn spaced_hues(n: usize, dark: bool) -> Vec<Color32> {
    let lightness = if dark { 0.65 } else { 0.5 };
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.7, lightness);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Theme preference
// ---------------------------------------------------------------------------

/// Persisted UI preferences. Dark is the default on first launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardPrefs {
    pub dark_mode: bool,
}

impl Default for DashboardPrefs {
    fn default() -> Self {
        DashboardPrefs { dark_mode: true }
    }
}

/// Push the chosen theme onto the egui context.
pub fn apply(ctx: &egui::Context, dark: bool) {
    ctx.set_theme(if dark {
        egui::ThemePreference::Dark
    } else {
        egui::ThemePreference::Light
    });
}
