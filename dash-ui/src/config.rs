use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::Rgb565;

pub const DISPLAY_SIZE: Size = Size::new(800, 480);

/// `0xRRGGBB` to the panel's colour format.
pub const fn hex(rgb: u32) -> Rgb565 {
    Rgb565::new(
        ((rgb >> 16) & 0xff) as u8 >> 3,
        ((rgb >> 8) & 0xff) as u8 >> 2,
        (rgb & 0xff) as u8 >> 3,
    )
}

pub const COLOR_BACKGROUND: Rgb565 = hex(0x000000);
pub const COLOR_TEXT: Rgb565 = hex(0xf2f2f2);
pub const COLOR_INDICATOR: Rgb565 = hex(0x4789d0);
pub const COLOR_TRACK: Rgb565 = hex(0x222629);
pub const COLOR_KNOB: Rgb565 = hex(0xf2f2f2);
pub const COLOR_ERROR: Rgb565 = hex(0xe72e2e);
pub const COLOR_SURFACE: Rgb565 = hex(0x16181a);

// Default theme: blue primary, red secondary.
pub const THEME_PRIMARY: Rgb565 = hex(0x2196f3);
pub const THEME_SECONDARY: Rgb565 = hex(0xf44336);

/// Theme the renderer falls back to for properties no style sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub primary: Rgb565,
    pub secondary: Rgb565,
    pub dark: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: THEME_PRIMARY,
            secondary: THEME_SECONDARY,
            dark: false,
        }
    }
}

pub const THEME_NAMES: [&str; 1] = ["Default"];
