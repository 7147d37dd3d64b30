//! Brand colors in linear premultiplied RGBA.

use palette::{FromColor, LinSrgba, Srgba};

/// Linear premultiplied RGBA, the layout `AnimatableValue::Color` carries.
pub type LinPremul = [f32; 4];

/// Convert an sRGB color with straight alpha to linear premultiplied.
pub fn from_srgba(r: u8, g: u8, b: u8, a: f32) -> LinPremul {
    let s = Srgba::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a);
    let lin: LinSrgba = LinSrgba::from_color(s);
    [
        lin.red * lin.alpha,
        lin.green * lin.alpha,
        lin.blue * lin.alpha,
        lin.alpha,
    ]
}

/// Convert back to sRGB u8 RGBA (unpremultiplied).
pub fn to_srgba_u8(c: LinPremul) -> [u8; 4] {
    let a = c[3];
    let (r, g, b) = if a > 0.0001 {
        (c[0] / a, c[1] / a, c[2] / a)
    } else {
        (0.0, 0.0, 0.0)
    };
    let srgb: Srgba = Srgba::from_color(LinSrgba::new(r, g, b, a));
    [
        (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
        (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
        (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
        (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// `#d4af37`, the salon gold.
pub fn gold(alpha: f32) -> LinPremul {
    from_srgba(0xd4, 0xaf, 0x37, alpha)
}

pub fn white(alpha: f32) -> LinPremul {
    from_srgba(0xff, 0xff, 0xff, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_roundtrip() {
        assert_eq!(to_srgba_u8(gold(1.0)), [0xd4, 0xaf, 0x37, 0xff]);
    }

    #[test]
    fn test_premultiplied_alpha() {
        let half = gold(0.5);
        let full = gold(1.0);
        assert!((half[0] - full[0] * 0.5).abs() < 1e-6);
        assert_eq!(half[3], 0.5);
    }

    #[test]
    fn test_transparent_is_black() {
        assert_eq!(to_srgba_u8([0.0; 4]), [0, 0, 0, 0]);
    }
}
