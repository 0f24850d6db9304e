//! Icon masks. Every image is a 1 bit alpha mask drawn in the `images`
//! recolour, see [`Recolor`].

mod data;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, OriginDimensions, Point, Size};
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::{Drawable, Pixel};

const IMAGE_WIDTH: u32 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ImageId {
    Batt60,
    Batt80,
    Batt90,
    BattFull,
    BattUnknown,
    Temp,
    Power,
    Solar,
    Sun,
    Settings,
}

pub struct ImageDesc {
    pub name: &'static str,
    pub data: &'static [u8],
    pub width: u32,
}

pub const IMAGES: [ImageDesc; 10] = [
    image("batt_60", &data::BATT_60),
    image("batt_80", &data::BATT_80),
    image("batt_90", &data::BATT_90),
    image("batt_full", &data::BATT_FULL),
    image("batt_unknown", &data::BATT_UNKNOWN),
    image("temp", &data::TEMP),
    image("power", &data::POWER),
    image("solar", &data::SOLAR),
    image("sun", &data::SUN),
    image("settings", &data::SETTINGS),
];

const fn image(name: &'static str, data: &'static [u8]) -> ImageDesc {
    ImageDesc {
        name,
        data,
        width: IMAGE_WIDTH,
    }
}

impl ImageId {
    pub const ALL: [ImageId; 10] = [
        Self::Batt60,
        Self::Batt80,
        Self::Batt90,
        Self::BattFull,
        Self::BattUnknown,
        Self::Temp,
        Self::Power,
        Self::Solar,
        Self::Sun,
        Self::Settings,
    ];

    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn desc(self) -> &'static ImageDesc {
        &IMAGES[self as usize]
    }

    pub fn raw(self) -> ImageRaw<'static, BinaryColor> {
        let desc = self.desc();
        ImageRaw::new(desc.data, desc.width)
    }

    pub fn size(self) -> Size {
        self.raw().size()
    }

    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.desc().name == name)
    }
}

/// Battery indicator for a state of charge in percent.
pub fn battery_image(soc: Option<f32>) -> ImageId {
    match soc {
        None => ImageId::BattUnknown,
        Some(soc) if soc >= 95.0 => ImageId::BattFull,
        Some(soc) if soc >= 85.0 => ImageId::Batt90,
        Some(soc) if soc >= 70.0 => ImageId::Batt80,
        Some(_) => ImageId::Batt60,
    }
}

/// Draws the set bits of a mask in one colour and leaves the rest untouched.
pub struct Recolor<'a, DT> {
    target: &'a mut DT,
    color: Rgb565,
}

impl<'a, DT: DrawTarget<Color = Rgb565>> Recolor<'a, DT> {
    pub fn new(target: &'a mut DT, color: Rgb565) -> Self {
        Self { target, color }
    }

    pub fn draw_image(&mut self, id: ImageId, top_left: Point) -> Result<(), DT::Error> {
        let raw = id.raw();
        Image::new(&raw, top_left).draw(self)
    }
}

impl<'a, DT: DrawTarget<Color = Rgb565>> DrawTarget for Recolor<'a, DT> {
    type Color = BinaryColor;
    type Error = DT::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let color = self.color;
        self.target.draw_iter(
            pixels
                .into_iter()
                .filter(|Pixel(_, c)| c.is_on())
                .map(|Pixel(p, _)| Pixel(p, color)),
        )
    }
}

impl<'a, DT: DrawTarget<Color = Rgb565>> Dimensions for Recolor<'a, DT> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}
