//! Fixed colors used by nodes and line overlays.
mod utils;

pub use utils::{color_hex, from_hex_u32, lerp_color, text_color_for_bgcolor, ToHexColorStr};

use lazy_static::lazy_static;
use palette::LinSrgb;

pub type Color = LinSrgb;

lazy_static! {
  /// One color per chromatic index, C through B.
  static ref PITCH_CLASS_COLORS: [Color; 12] = [
    0x4488ff, 0x6644ee, 0xaa44dd, 0xdd44aa, 0xff4466, 0xff8833, 0xffcc22, 0x88dd22, 0x22cc66,
    0x22ddaa, 0x22ccdd, 0x2288ee,
  ]
  .map(from_hex_u32);
}

/// Color for the given chromatic index (wraps modulo 12).
pub fn pitch_class_color(index: u8) -> Color {
  PITCH_CLASS_COLORS[(index % 12) as usize]
}

/// Label text color that stays legible on top of the pitch class color.
pub fn pitch_class_text_color(index: u8) -> Color {
  text_color_for_bgcolor(pitch_class_color(index))
}

pub const BLACK: u32 = 0x000000;
pub const WHITE: u32 = 0xffffff;
pub const SOUNDING: u32 = 0xffcc00;
pub const HOVERED: u32 = 0x444444;
pub const HIGHLIGHTED: u32 = 0x888888;
pub const LIVE_CHORD_LINE: u32 = 0xffcc00;
