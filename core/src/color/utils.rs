use palette::{IntoColor, LinSrgb, Srgb, Xyz};

/// Builds a color from a packed `0xRRGGBB` value.
pub fn from_hex_u32(rgb: u32) -> LinSrgb {
  let r = ((rgb >> 16) & 0xff) as u8;
  let g = ((rgb >> 8) & 0xff) as u8;
  let b = (rgb & 0xff) as u8;
  LinSrgb::<u8>::new(r, g, b).into_format()
}

/// Returns the color as a CSS-compatible hex string, with `#` prefix.
pub fn color_hex(col: LinSrgb) -> String {
  let col: LinSrgb<u8> = col.into_format();
  format!("#{col:x}")
}

/// Returns a legible text color for the given background color.
///
/// Returns white for "dark" colors (luminance < 0.5) and black for "bright" colors.
pub fn text_color_for_bgcolor(bg: LinSrgb) -> LinSrgb {
  let xyz: Xyz = Srgb::from_linear(bg).into_color();
  if xyz.y < 0.5 {
    LinSrgb::new(1.0, 1.0, 1.0)
  } else {
    LinSrgb::new(0.0, 0.0, 0.0)
  }
}

/// Per-channel `a·(1−t) + b·t`.
pub fn lerp_color(a: LinSrgb, b: LinSrgb, t: f32) -> LinSrgb {
  let mix = |x: f32, y: f32| x * (1.0 - t) + y * t;
  LinSrgb::new(mix(a.red, b.red), mix(a.green, b.green), mix(a.blue, b.blue))
}

pub trait ToHexColorStr {
  fn to_hex_color(&self) -> String;
}

impl ToHexColorStr for LinSrgb {
  fn to_hex_color(&self) -> String {
    color_hex(*self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hex_round_trips_through_u32() {
    assert_eq!(color_hex(from_hex_u32(0xffcc00)), "#ffcc00");
    assert_eq!(color_hex(from_hex_u32(0x000000)), "#000000");
  }

  #[test]
  fn lerp_color_hits_endpoints() {
    let a = from_hex_u32(0x4488ff);
    let b = from_hex_u32(0x22ccdd);
    assert_eq!(lerp_color(a, b, 0.0), a);
    assert_eq!(lerp_color(a, b, 1.0), b);
  }
}
