//! Fixed chart colors.
//!
//! Chart colors are part of the data mapping, not of the UI theme: the same
//! label gets the same color whichever theme is active.

use ratatui::style::Color;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same color with an alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Rgba {
        Rgba { rgb: self, alpha }
    }

    /// `#rrggbb`
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Self::Rgb(c.r, c.g, c.b)
    }
}

/// An RGB color with alpha, used for semi-transparent fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: u8,
}

impl Rgba {
    /// `#rrggbbaa`
    #[must_use]
    pub fn hex(&self) -> String {
        format!("{}{:02x}", self.rgb.hex(), self.alpha)
    }

    /// Composite over a background. Terminals have no alpha channel.
    #[must_use]
    pub fn over(&self, background: Rgb) -> Rgb {
        let a = u16::from(self.alpha);
        let blend = |fg: u8, bg: u8| -> u8 {
            ((u16::from(fg) * a + u16::from(bg) * (255 - a)) / 255) as u8
        };
        Rgb::new(
            blend(self.rgb.r, background.r),
            blend(self.rgb.g, background.g),
            blend(self.rgb.b, background.b),
        )
    }
}

/// Shared chart palette, cycled by series/bar index.
pub const CHART_PALETTE: [Rgb; 6] = [
    Rgb::new(0x1e, 0x3a, 0x5f),
    Rgb::new(0xd4, 0xa8, 0x53),
    Rgb::new(0x0f, 0x17, 0x2a),
    Rgb::new(0x64, 0x74, 0x8b),
    Rgb::new(0x16, 0xa3, 0x4a),
    Rgb::new(0xb9, 0x1c, 0x1c),
];

/// Fill alpha of scatter points (`0x99` ≈ 60%).
pub const SCATTER_FILL_ALPHA: u8 = 0x99;

pub const SEVERITY_LOW: Rgb = Rgb::new(0x16, 0xa3, 0x4a);
pub const SEVERITY_MEDIUM: Rgb = Rgb::new(0xd9, 0x77, 0x06);
pub const SEVERITY_HIGH: Rgb = Rgb::new(0xea, 0x58, 0x0c);
pub const SEVERITY_CRITICAL: Rgb = Rgb::new(0xb9, 0x1c, 0x1c);
/// Gray for severities the mapping does not know.
pub const SEVERITY_UNKNOWN: Rgb = Rgb::new(0x64, 0x74, 0x8b);

/// Palette color for an index, cycling past the end.
#[must_use]
pub const fn palette_color(index: usize) -> Rgb {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// Color of a severity label. Matching is exact, as sent by the service.
#[must_use]
pub fn severity_color(label: &str) -> Rgb {
    match label {
        "low" => SEVERITY_LOW,
        "medium" => SEVERITY_MEDIUM,
        "high" => SEVERITY_HIGH,
        "critical" => SEVERITY_CRITICAL,
        _ => SEVERITY_UNKNOWN,
    }
}
