use core::fmt::Write as _;

use bitflags::bitflags;
use embedded_graphics::image::{Image, ImageDrawable};
use embedded_graphics::pixelcolor::Rgb565 as Rgb;
use embedded_graphics::prelude::{DrawTarget, *};
use embedded_graphics::primitives::Rectangle;
use embedded_text::alignment::{HorizontalAlignment, VerticalAlignment};
use embedded_text::style::{HeightMode, TextBoxStyleBuilder, VerticalOverdraw};
use embedded_text::TextBox;
use u8g2_fonts::{fonts, U8g2TextStyle};

use crate::clock::{ClockTime, DisplayMode};
use crate::hand::HandRenderer;
use crate::wedge::PointerKind;

fn time_text_style(color: Rgb) -> U8g2TextStyle<Rgb> {
    U8g2TextStyle::new(fonts::u8g2_font_logisoso20_tn, color)
}

/// Where things go on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceLayout {
    pub frame: Rectangle,
    pub logo: Rectangle,
    pub time: Rectangle,
}

impl FaceLayout {
    /// Pivot of both pointers.
    pub const fn center(&self) -> Point {
        Point::new(
            self.frame.top_left.x + self.frame.size.width as i32 / 2,
            self.frame.top_left.y + self.frame.size.height as i32 / 2,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacePalette {
    /// Shown wherever no layer draws.
    pub window: Rgb,
    /// Lit part of the pointer rings.
    pub ring: Rgb,
    /// Wedge sweep and inner mask.
    pub sweep: Rgb,
    pub text: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceVariant {
    /// Background, both pointers, logo and digital time.
    #[default]
    Full,
    /// Background image only.
    BackgroundOnly,
}

impl FaceVariant {
    /// Layers drawn by this variant, back to front.
    pub const fn layers(self) -> &'static [Layer] {
        match self {
            Self::Full => &Layer::Z_ORDER,
            Self::BackgroundOnly => &[Layer::Background],
        }
    }

    pub fn shows(self, layer: Layer) -> bool {
        self.layers().contains(&layer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceConfig {
    pub layout: FaceLayout,
    pub palette: FacePalette,
    pub variant: FaceVariant,
}

impl FaceConfig {
    /// 144x168 screen with the pointers pivoting on its centre.
    pub const DEFAULT: Self = Self {
        layout: FaceLayout {
            frame: Rectangle::new(Point::new(0, 0), Size::new(144, 168)),
            logo: Rectangle::new(Point::new(61, 43), Size::new(22, 35)),
            time: Rectangle::new(Point::new(0, 90), Size::new(144, 30)),
        },
        palette: FacePalette {
            window: Rgb::BLACK,
            ring: Rgb::WHITE,
            sweep: Rgb::BLACK,
            text: Rgb::WHITE,
        },
        variant: FaceVariant::Full,
    };

    pub const fn with_variant(self, variant: FaceVariant) -> Self {
        Self { variant, ..self }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    Background,
    HourHand,
    MinuteHand,
    Logo,
    DigitalTime,
}

impl Layer {
    pub const Z_ORDER: [Layer; 5] = [
        Layer::Background,
        Layer::HourHand,
        Layer::MinuteHand,
        Layer::Logo,
        Layer::DigitalTime,
    ];

    pub const fn flag(self) -> Layers {
        match self {
            Self::Background => Layers::BACKGROUND,
            Self::HourHand => Layers::HOUR_HAND,
            Self::MinuteHand => Layers::MINUTE_HAND,
            Self::Logo => Layers::LOGO,
            Self::DigitalTime => Layers::DIGITAL_TIME,
        }
    }
}

bitflags! {
    /// Layers waiting to be redrawn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Layers: u8 {
        const BACKGROUND = 1 << 0;
        const HOUR_HAND = 1 << 1;
        const MINUTE_HAND = 1 << 2;
        const LOGO = 1 << 3;
        const DIGITAL_TIME = 1 << 4;
        /// Everything a minute tick changes.
        const TICK = Self::HOUR_HAND.bits() | Self::MINUTE_HAND.bits() | Self::DIGITAL_TIME.bits();
    }
}

/// `HH:MM` text shown under the logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitalReadout {
    text: heapless::String<8>,
}

impl DigitalReadout {
    pub fn new(time: ClockTime, mode: DisplayMode) -> Self {
        let mut readout = Self {
            text: heapless::String::new(),
        };
        readout.update(time, mode);
        readout
    }

    /// 00-23 hours in 24-hour mode, 01-12 in 12-hour mode, never an AM/PM marker.
    pub fn update(&mut self, time: ClockTime, mode: DisplayMode) {
        let hour = match mode {
            DisplayMode::TwentyFourHour => time.hour(),
            DisplayMode::TwelveHour => time.hour12(),
        };
        self.text.clear();
        // Two two-digit fields and a colon always fit.
        let written = write!(self.text, "{:02}:{:02}", hour, time.minute());
        debug_assert!(written.is_ok());
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Bitmaps owned by the face state, borrowed for one frame.
pub struct FaceBitmaps<'a, B> {
    pub background: &'a B,
    pub logo: Option<&'a B>,
}

/// Stacks all layers of one frame.
#[derive(Debug, Clone, Copy)]
pub struct FaceCompositor {
    config: FaceConfig,
    hands: HandRenderer,
}

impl FaceCompositor {
    pub const fn new(config: FaceConfig) -> Self {
        Self {
            config,
            hands: HandRenderer::new(config.layout.center(), config.palette.ring, config.palette.sweep),
        }
    }

    pub const fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// Draw every layer of the variant, back to front. Later layers cover earlier ones.
    pub fn compose<D, B>(
        &self,
        display: &mut D,
        time: ClockTime,
        mode: DisplayMode,
        bitmaps: &FaceBitmaps<'_, B>,
        readout: &DigitalReadout,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb>,
        B: ImageDrawable<Color = Rgb>,
    {
        display.clear(self.config.palette.window)?;
        for layer in self.config.variant.layers() {
            match layer {
                Layer::Background => self.draw_bitmap(bitmaps.background, &self.config.layout.frame, display)?,
                Layer::HourHand => self.hands.draw(PointerKind::Hour, time, mode, display)?,
                Layer::MinuteHand => self.hands.draw(PointerKind::Minute, time, mode, display)?,
                Layer::Logo => {
                    if let Some(logo) = bitmaps.logo {
                        self.draw_bitmap(logo, &self.config.layout.logo, display)?;
                    }
                }
                Layer::DigitalTime => self.draw_time(readout, display)?,
            }
        }
        Ok(())
    }

    // Centred in `area` and clipped to it.
    fn draw_bitmap<D, B>(&self, bitmap: &B, area: &Rectangle, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb>,
        B: ImageDrawable<Color = Rgb>,
    {
        let size = bitmap.size();
        let offset = Point::new(
            (area.size.width as i32 - size.width as i32) / 2,
            (area.size.height as i32 - size.height as i32) / 2,
        );
        Image::new(bitmap, area.top_left + offset).draw(&mut display.clipped(area))
    }

    fn draw_time<D: DrawTarget<Color = Rgb>>(&self, readout: &DigitalReadout, display: &mut D) -> Result<(), D::Error> {
        let textbox_style = TextBoxStyleBuilder::new()
            .height_mode(HeightMode::Exact(VerticalOverdraw::Visible))
            .alignment(HorizontalAlignment::Center)
            .vertical_alignment(VerticalAlignment::Middle)
            .build();

        TextBox::with_textbox_style(
            readout.as_str(),
            self.config.layout.time,
            time_text_style(self.config.palette.text),
            textbox_style,
        )
        .draw(display)?;
        Ok(())
    }
}
