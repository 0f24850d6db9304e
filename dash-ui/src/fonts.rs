use u8g2_fonts::fonts::{
    u8g2_font_helvB18_tf, u8g2_font_helvR14_tf, u8g2_font_logisoso22_tr,
    u8g2_font_logisoso32_tr, u8g2_font_logisoso42_tr, u8g2_font_logisoso46_tr,
};
use u8g2_fonts::FontRenderer;

pub const ROBOTO_REG_14: FontRenderer = FontRenderer::new::<u8g2_font_helvR14_tf>();
pub const ROBOTO_REG_32: FontRenderer = FontRenderer::new::<u8g2_font_logisoso32_tr>();
pub const ROBOTO_REG_48: FontRenderer = FontRenderer::new::<u8g2_font_logisoso46_tr>();
pub const ROBOTO_MED_18: FontRenderer = FontRenderer::new::<u8g2_font_helvB18_tf>();
pub const ROBOTO_MED_22: FontRenderer = FontRenderer::new::<u8g2_font_logisoso22_tr>();
pub const ROBOTO_MED_48: FontRenderer = FontRenderer::new::<u8g2_font_logisoso42_tr>();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontId {
    RobotoReg14,
    RobotoReg32,
    RobotoReg48,
    RobotoMed18,
    RobotoMed22,
    RobotoMed48,
}

/// Theme font for labels without one.
pub const DEFAULT_FONT: FontId = FontId::RobotoReg14;

pub const FONT_NAMES: [&str; 6] = [
    "roboto_reg_14",
    "roboto_reg_32",
    "roboto_reg_48",
    "roboto_med_18",
    "roboto_med_22",
    "roboto_med_48",
];

impl FontId {
    pub fn renderer(self) -> &'static FontRenderer {
        match self {
            Self::RobotoReg14 => &ROBOTO_REG_14,
            Self::RobotoReg32 => &ROBOTO_REG_32,
            Self::RobotoReg48 => &ROBOTO_REG_48,
            Self::RobotoMed18 => &ROBOTO_MED_18,
            Self::RobotoMed22 => &ROBOTO_MED_22,
            Self::RobotoMed48 => &ROBOTO_MED_48,
        }
    }

    pub fn name(self) -> &'static str {
        FONT_NAMES[self as usize]
    }
}
