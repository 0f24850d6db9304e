use embedded_graphics::geometry::{Dimensions, Point, Size};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Drawable;
use embedded_text::alignment::HorizontalAlignment as TextAlignment;
use embedded_text::style::{HeightMode, TextBoxStyleBuilder};
use embedded_text::TextBox;
use u8g2_fonts::fonts::u8g2_font_helvR14_tf;
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};
use u8g2_fonts::U8g2TextStyle;

use crate::config::COLOR_ERROR;
use crate::fonts::{ROBOTO_MED_22, ROBOTO_REG_14};
use crate::AppDrawTarget;

/// Last resort screen when the dashboard cannot be built or has crashed.
/// Drawing errors are ignored, there is nothing left to report them to.
pub fn draw_fault_screen<D: AppDrawTarget<E>, E>(display: &mut D, message: &str) {
    let bounds = display.bounding_box();
    let width = bounds.size.width;
    let height = bounds.size.height;

    let _ = display.fill_solid(&bounds, COLOR_ERROR);

    let _ = ROBOTO_MED_22.render_aligned(
        "FATAL ERROR",
        Point::new(width as i32 / 2, 100),
        VerticalPosition::Top,
        HorizontalAlignment::Center,
        FontColor::Transparent(Rgb565::BLACK),
        display,
    );

    let _ = ROBOTO_REG_14.render_aligned(
        env!("CARGO_PKG_VERSION"),
        Point::new(width as i32 / 2, 140),
        VerticalPosition::Top,
        HorizontalAlignment::Center,
        FontColor::Transparent(Rgb565::BLACK),
        display,
    );

    let character_style = U8g2TextStyle::new(u8g2_font_helvR14_tf, Rgb565::BLACK);
    let textbox_style = TextBoxStyleBuilder::new()
        .height_mode(HeightMode::FitToText)
        .alignment(TextAlignment::Center)
        .build();

    let origin = Point::new(20, 180);
    let _ = TextBox::with_textbox_style(
        message,
        Rectangle::new(origin, Size::new(
            width.saturating_sub(40),
            height.saturating_sub(origin.y as u32),
        )),
        character_style,
        textbox_style,
    )
    .draw(display);

    display.hint_refresh();
}
