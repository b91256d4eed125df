//! Sequential color ramps for node and edge coloring.

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Three-stop ramp from light (0.0) to dark (1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRamp {
    stops: [Rgb; 3],
}

impl ColorRamp {
    pub const REDS: ColorRamp = ColorRamp {
        stops: [Rgb(0xff, 0xf5, 0xf0), Rgb(0xfb, 0x6a, 0x4a), Rgb(0x67, 0x00, 0x0d)],
    };
    pub const BLUES: ColorRamp = ColorRamp {
        stops: [Rgb(0xf7, 0xfb, 0xff), Rgb(0x6b, 0xae, 0xd6), Rgb(0x08, 0x30, 0x6b)],
    };
    pub const GREENS: ColorRamp = ColorRamp {
        stops: [Rgb(0xf7, 0xfc, 0xf5), Rgb(0x74, 0xc4, 0x76), Rgb(0x00, 0x44, 0x1b)],
    };
    pub const GREYS: ColorRamp = ColorRamp {
        stops: [Rgb(0xff, 0xff, 0xff), Rgb(0x96, 0x96, 0x96), Rgb(0x00, 0x00, 0x00)],
    };
    pub const ORANGES: ColorRamp = ColorRamp {
        stops: [Rgb(0xff, 0xf5, 0xeb), Rgb(0xfd, 0x8d, 0x3c), Rgb(0x7f, 0x27, 0x04)],
    };
    pub const PURPLES: ColorRamp = ColorRamp {
        stops: [Rgb(0xfc, 0xfb, 0xfd), Rgb(0x9e, 0x9a, 0xc8), Rgb(0x3f, 0x00, 0x7d)],
    };

    /// Ramp by its colormap name ("Reds", "Blues", ...).
    pub fn named(name: &str) -> Option<ColorRamp> {
        match name {
            "Reds" => Some(Self::REDS),
            "Blues" => Some(Self::BLUES),
            "Greens" => Some(Self::GREENS),
            "Greys" => Some(Self::GREYS),
            "Oranges" => Some(Self::ORANGES),
            "Purples" => Some(Self::PURPLES),
            _ => None,
        }
    }

    /// Color at `t`, clamped to [0, 1].
    pub fn at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t <= 0.5 {
            self.stops[0].lerp(self.stops[1], t * 2.0)
        } else {
            self.stops[1].lerp(self.stops[2], (t - 0.5) * 2.0)
        }
    }

    /// Color of `value` normalized on `(0, max)`.
    pub fn normalized(&self, value: f64, max: f64) -> Rgb {
        if max <= 0.0 {
            self.at(0.0)
        } else {
            self.at(value / max)
        }
    }
}
