//! Shared styles. Each one is built on first use and lives for the rest of
//! the program; widgets hold `&'static` references to them.

use embedded_graphics::pixelcolor::Rgb565;
use spin::Once;

use crate::config::{hex, COLOR_ERROR, COLOR_INDICATOR, COLOR_TEXT, COLOR_TRACK};
use crate::fonts::FontId;
use crate::widgets::{WidgetId, Widgets};
use crate::UiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Main,
    Indicator,
    Knob,
}

impl Part {
    pub const COUNT: usize = 3;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    TopLeft,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    None,
    FlexRow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlexAlign {
    Start,
    End,
}

/// A bundle of optional visual properties. Unset properties fall through to
/// the next style of the widget and finally to the theme.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    pub text_color: Option<Rgb565>,
    pub text_font: Option<FontId>,
    pub bg_color: Option<Rgb565>,
    pub bg_opa: Option<u8>,
    pub border_width: Option<u8>,
    pub radius: Option<u8>,
    pub opa: Option<u8>,
    pub arc_width: Option<u8>,
    pub arc_color: Option<Rgb565>,
    pub img_recolor: Option<Rgb565>,
    pub img_recolor_opa: Option<u8>,
    pub pad_left: Option<i16>,
    pub pad_top: Option<i16>,
    pub pad_right: Option<i16>,
    pub pad_bottom: Option<i16>,
    pub pad_column: Option<i16>,
    pub align: Option<Align>,
    pub layout: Option<Layout>,
    pub flex_main_place: Option<FlexAlign>,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            text_color: None,
            text_font: None,
            bg_color: None,
            bg_opa: None,
            border_width: None,
            radius: None,
            opa: None,
            arc_width: None,
            arc_color: None,
            img_recolor: None,
            img_recolor_opa: None,
            pad_left: None,
            pad_top: None,
            pad_right: None,
            pad_bottom: None,
            pad_column: None,
            align: None,
            layout: None,
            flex_main_place: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum StyleIndex {
    Labels,
    Arcs,
    Images,
    LabelsError,
}

pub const STYLE_NAMES: [&str; 4] = ["Labels", "Arcs", "Images", "Labels_Error"];

impl StyleIndex {
    pub const ALL: [StyleIndex; 4] = [
        Self::Labels,
        Self::Arcs,
        Self::Images,
        Self::LabelsError,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        STYLE_NAMES[self as usize]
    }

    /// Every (part, style) pair the shared style contributes.
    pub fn parts(self) -> &'static [PartStyle] {
        match self {
            Self::Labels => &LABELS_PARTS,
            Self::Arcs => &ARCS_PARTS,
            Self::Images => &IMAGES_PARTS,
            Self::LabelsError => &LABELS_ERROR_PARTS,
        }
    }
}

pub type PartStyle = (Part, fn() -> &'static Style);

static LABELS_PARTS: [PartStyle; 1] = [(Part::Main, labels_main)];
static ARCS_PARTS: [PartStyle; 3] = [
    (Part::Main, arcs_main),
    (Part::Knob, arcs_knob),
    (Part::Indicator, arcs_indicator),
];
static IMAGES_PARTS: [PartStyle; 1] = [(Part::Main, images_main)];
static LABELS_ERROR_PARTS: [PartStyle; 1] = [(Part::Main, labels_error_main)];

//
// Style: Labels
//
static LABELS_MAIN: Once<Style> = Once::new();

pub fn labels_main() -> &'static Style {
    LABELS_MAIN.call_once(|| Style {
        text_color: Some(COLOR_TEXT),
        ..Style::new()
    })
}

//
// Style: Arcs
//
static ARCS_MAIN: Once<Style> = Once::new();
static ARCS_KNOB: Once<Style> = Once::new();
static ARCS_INDICATOR: Once<Style> = Once::new();

pub fn arcs_main() -> &'static Style {
    ARCS_MAIN.call_once(|| Style {
        arc_width: Some(12),
        arc_color: Some(COLOR_TRACK),
        ..Style::new()
    })
}

pub fn arcs_knob() -> &'static Style {
    ARCS_KNOB.call_once(|| Style {
        opa: Some(0),
        ..Style::new()
    })
}

pub fn arcs_indicator() -> &'static Style {
    ARCS_INDICATOR.call_once(|| Style {
        arc_width: Some(12),
        arc_color: Some(COLOR_INDICATOR),
        ..Style::new()
    })
}

//
// Style: Images
//
static IMAGES_MAIN: Once<Style> = Once::new();

pub fn images_main() -> &'static Style {
    IMAGES_MAIN.call_once(|| Style {
        img_recolor: Some(hex(0xf2f2f2)),
        img_recolor_opa: Some(255),
        ..Style::new()
    })
}

//
// Style: Labels_Error
//
static LABELS_ERROR_MAIN: Once<Style> = Once::new();

pub fn labels_error_main() -> &'static Style {
    LABELS_ERROR_MAIN.call_once(|| Style {
        text_font: Some(FontId::RobotoReg32),
        text_color: Some(COLOR_ERROR),
        ..Style::new()
    })
}

pub fn add_style(widgets: &mut Widgets, id: WidgetId, index: StyleIndex) -> Result<(), UiError> {
    for (part, style) in index.parts() {
        widgets.add_style(id, style(), *part)?;
    }
    Ok(())
}

pub fn remove_style(
    widgets: &mut Widgets,
    id: WidgetId,
    index: StyleIndex,
) -> Result<(), UiError> {
    for (part, style) in index.parts() {
        widgets.remove_style(id, style(), *part)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_are_built_once() {
        assert!(core::ptr::eq(labels_main(), labels_main()));
        assert!(core::ptr::eq(arcs_indicator(), arcs_indicator()));
        assert_eq!(arcs_knob().opa, Some(0));
        assert_eq!(labels_error_main().text_font, Some(FontId::RobotoReg32));
    }

    #[test]
    fn index_dispatch() {
        assert_eq!(StyleIndex::from_index(3), Some(StyleIndex::LabelsError));
        assert_eq!(StyleIndex::from_index(4), None);
        assert_eq!(StyleIndex::Arcs.parts().len(), 3);
        assert_eq!(StyleIndex::Images.name(), "Images");
    }
}
