//! Material and color types
//!
//! Colors authored as `0xRRGGBB` hex are sRGB. Materials store linear RGB so the
//! renderer can light them directly and let the sRGB surface encode the output.

use serde::{Serialize, Deserialize};

/// Convert one sRGB-encoded channel to linear light
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Decode a `0xRRGGBB` value into linear RGB
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

/// Surface properties of a mesh
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as linear RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
    /// Emitted light as linear RGB, already multiplied by intensity
    pub emissive: [f32; 3],
    /// 0.0 = mirror-like highlight, 1.0 = fully diffuse
    pub roughness: f32,
    /// Share of the highlight tinted by the base color
    pub metalness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// White, fully rough material
    pub const WHITE: Self = Self {
        base_color: [1.0, 1.0, 1.0, 1.0],
        emissive: [0.0, 0.0, 0.0],
        roughness: 1.0,
        metalness: 0.0,
    };

    /// Opaque material from an sRGB `0xRRGGBB` color
    pub fn hex(color: u32) -> Self {
        let [r, g, b] = hex_to_linear(color);
        Self {
            base_color: [r, g, b, 1.0],
            ..Self::WHITE
        }
    }

    /// Builder: set roughness
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder: set metalness
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Builder: set an sRGB emissive color scaled by `intensity`
    pub fn with_emissive(mut self, color: u32, intensity: f32) -> Self {
        let [r, g, b] = hex_to_linear(color);
        self.emissive = [r * intensity, g * intensity, b * intensity];
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_srgb_midpoint_darkens() {
        // sRGB 0.5 is roughly 0.214 linear
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 0.001);
    }

    #[test]
    fn test_hex_channels() {
        let [r, g, b] = hex_to_linear(0xff0000);
        assert!((r - 1.0).abs() < 1e-6);
        assert_eq!(g, 0.0);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_material_builders() {
        let m = Material::hex(0x222222).with_roughness(0.3).with_metalness(0.7);
        assert_eq!(m.roughness, 0.3);
        assert_eq!(m.metalness, 0.7);
        assert_eq!(m.base_color[3], 1.0);
        assert_eq!(m.emissive, [0.0; 3]);
    }

    #[test]
    fn test_emissive_scaled_by_intensity() {
        let m = Material::hex(0x000000).with_emissive(0xffffff, 0.5);
        for c in m.emissive {
            assert!((c - 0.5).abs() < 1e-6);
        }
    }
}
