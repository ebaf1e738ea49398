//! colormaps turning a normalized position into a color

use serde::Deserialize;

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(1.0, 1.0, 1.0);
    pub const GRAY: Rgba = Rgba::opaque(0.5, 0.5, 0.5);

    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

pub trait Colormap {
    /// color at `position`, clamped to `[0, 1]`
    fn color(&self, position: f64) -> Rgba;
}

/// Moreland's diverging blue to red map
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoolWarm;

const COOLWARM: [(f64, [u8; 3]); 9] = [
    (0.0, [59, 76, 192]),
    (0.125, [98, 130, 234]),
    (0.25, [141, 176, 254]),
    (0.375, [184, 208, 249]),
    (0.5, [221, 221, 221]),
    (0.625, [245, 196, 173]),
    (0.75, [244, 154, 123]),
    (0.875, [222, 96, 77]),
    (1.0, [180, 4, 38]),
];

impl Colormap for CoolWarm {
    fn color(&self, position: f64) -> Rgba {
        let t = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };

        let upper = COOLWARM
            .iter()
            .position(|(stop, _)| t <= *stop)
            .unwrap_or(COOLWARM.len() - 1)
            .max(1);
        let (t0, c0) = COOLWARM[upper - 1];
        let (t1, c1) = COOLWARM[upper];

        let w = (t - t0) / (t1 - t0);
        let lerp = |i: usize| (c0[i] as f64 + w * (c1[i] as f64 - c0[i] as f64)) / 255.0;

        Rgba::opaque(lerp(0), lerp(1), lerp(2))
    }
}
