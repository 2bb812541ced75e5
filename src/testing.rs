use core::convert::Infallible;

use embedded_graphics::image::ImageRawLE;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565 as Rgb;
use embedded_graphics::prelude::*;

use crate::clock::DisplayMode;
use crate::lifecycle::{Host, ResourceId};

pub const WIDTH: usize = 144;
pub const HEIGHT: usize = 168;

pub static BACKGROUND_DATA: [u8; WIDTH * HEIGHT * 2] = [0xAA; WIDTH * HEIGHT * 2];
pub static LOGO_DATA: [u8; 22 * 35 * 2] = [0x55; 22 * 35 * 2];

pub fn background_color() -> Rgb {
    RawU16::new(0xAAAA).into()
}

pub fn logo_color() -> Rgb {
    RawU16::new(0x5555).into()
}

/// In-memory display, every pixel starts out as `fill`.
pub struct Framebuffer<const W: usize, const H: usize> {
    pub pixels: [[Rgb; W]; H],
    pub writes: usize,
}

impl<const W: usize, const H: usize> Framebuffer<W, H> {
    pub const fn new(fill: Rgb) -> Self {
        Self {
            pixels: [[fill; W]; H],
            writes: 0,
        }
    }

    pub fn at(&self, x: i32, y: i32) -> Rgb {
        self.pixels[y as usize][x as usize]
    }

    pub fn count_in(&self, area: &embedded_graphics::primitives::Rectangle, color: Rgb) -> usize {
        area.points()
            .filter(|p| p.x >= 0 && p.y >= 0 && (p.x as usize) < W && (p.y as usize) < H)
            .filter(|p| self.at(p.x, p.y) == color)
            .count()
    }
}

impl<const W: usize, const H: usize> OriginDimensions for Framebuffer<W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const W: usize, const H: usize> DrawTarget for Framebuffer<W, H> {
    type Color = Rgb;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as usize) < W && (p.y as usize) < H {
                self.pixels[p.y as usize][p.x as usize] = color;
                self.writes += 1;
            }
        }
        Ok(())
    }
}

pub type Screen = Framebuffer<WIDTH, HEIGHT>;

#[derive(Debug, PartialEq)]
pub struct BrokenBus;

/// Display whose bus fails on the first write.
pub struct BrokenDisplay;

impl OriginDimensions for BrokenDisplay {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for BrokenDisplay {
    type Color = Rgb;
    type Error = BrokenBus;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Err(BrokenBus)
    }
}

#[derive(Debug, PartialEq)]
pub struct MissingResource(pub ResourceId);

/// Host that hands out the static test bitmaps and keeps count of them.
pub struct TestHost {
    pub mode: DisplayMode,
    pub fail_on: Option<ResourceId>,
    pub loaded: heapless::Vec<ResourceId, 8>,
    pub released: usize,
}

impl TestHost {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            fail_on: None,
            loaded: heapless::Vec::new(),
            released: 0,
        }
    }

    pub fn outstanding(&self) -> usize {
        self.loaded.len() - self.released
    }
}

impl Host for TestHost {
    type Bitmap = ImageRawLE<'static, Rgb>;
    type Error = MissingResource;

    fn load_bitmap(&mut self, id: ResourceId) -> Result<Self::Bitmap, Self::Error> {
        if self.fail_on == Some(id) {
            return Err(MissingResource(id));
        }
        self.loaded.push(id).unwrap();
        Ok(match id {
            ResourceId::Background => ImageRawLE::new(&BACKGROUND_DATA, WIDTH as u32),
            ResourceId::Logo => ImageRawLE::new(&LOGO_DATA, 22),
        })
    }

    fn release_bitmap(&mut self, _bitmap: Self::Bitmap) {
        self.released += 1;
    }

    fn clock_style(&self) -> DisplayMode {
        self.mode
    }
}
