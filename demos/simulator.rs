use std::convert::Infallible;
use std::thread;
use std::time::Duration;

use clap::Parser;
use embedded_graphics::image::ImageDrawable;
use embedded_graphics::pixelcolor::Rgb565 as Rgb;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use portal_face::{ClockTime, DisplayMode, FaceConfig, FaceVariant, Host, MinuteTicker, ResourceId, Watchface, WindowHandlers};

const POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(about = "Show the portal watchface in a desktop window", version)]
struct Args {
    /// Use a 12-hour clock for the hour ring and readout
    #[arg(long = "12h")]
    twelve_hour: bool,

    /// Only draw the background image
    #[arg(long)]
    background_only: bool,
}

impl Args {
    fn mode(&self) -> DisplayMode {
        if self.twelve_hour {
            DisplayMode::TwelveHour
        } else {
            DisplayMode::TwentyFourHour
        }
    }

    fn variant(&self) -> FaceVariant {
        if self.background_only {
            FaceVariant::BackgroundOnly
        } else {
            FaceVariant::Full
        }
    }
}

/// Heap backed bitmap, row major.
struct Bitmap {
    size: Size,
    pixels: Vec<Rgb>,
}

impl Bitmap {
    fn from_fn(size: Size, f: impl Fn(u32, u32) -> Rgb) -> Self {
        let pixels = (0..size.height)
            .flat_map(|y| (0..size.width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self { size, pixels }
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        self.size
    }
}

impl ImageDrawable for Bitmap {
    type Color = Rgb;

    fn draw<D: DrawTarget<Color = Rgb>>(&self, target: &mut D) -> Result<(), D::Error> {
        target.fill_contiguous(&self.bounding_box(), self.pixels.iter().copied())
    }

    fn draw_sub_image<D: DrawTarget<Color = Rgb>>(&self, target: &mut D, area: &Rectangle) -> Result<(), D::Error> {
        self.draw(&mut target.translated(-area.top_left).clipped(area))
    }
}

struct SimulatorHost {
    mode: DisplayMode,
    frame: Size,
    outstanding: usize,
}

impl Host for SimulatorHost {
    type Bitmap = Bitmap;
    type Error = Infallible;

    fn load_bitmap(&mut self, id: ResourceId) -> Result<Bitmap, Infallible> {
        self.outstanding += 1;
        log::debug!("loading {:?}, {} bitmaps held", id, self.outstanding);
        let frame = self.frame;
        Ok(match id {
            ResourceId::Background => Bitmap::from_fn(frame, |x, y| {
                Rgb::new(
                    (x * 31 / frame.width) as u8,
                    (y * 63 / frame.height) as u8,
                    12,
                )
            }),
            ResourceId::Logo => Bitmap::from_fn(Size::new(22, 35), |x, y| {
                if (3..19).contains(&x) && (3..32).contains(&y) {
                    Rgb::BLACK
                } else {
                    Rgb::CSS_ORANGE
                }
            }),
        })
    }

    fn release_bitmap(&mut self, _bitmap: Bitmap) {
        self.outstanding -= 1;
        log::debug!("released bitmap, {} held", self.outstanding);
    }

    fn clock_style(&self) -> DisplayMode {
        self.mode
    }
}

fn now() -> ClockTime {
    let t = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    t.time().into()
}

fn main() -> Result<(), Infallible> {
    let args = Args::parse();
    env_logger::init();

    let mode = args.mode();
    let face = Watchface::new(FaceConfig::DEFAULT.with_variant(args.variant()));
    let frame = face.config().layout.frame.size;
    let mut host = SimulatorHost {
        mode,
        frame,
        outstanding: 0,
    };
    let mut display = SimulatorDisplay::<Rgb>::new(frame);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("portal-face", &output_settings);

    let mut ticker = MinuteTicker::new();
    let mut state = face.on_create(&mut host, now())?;

    'running: loop {
        let now = now();
        if ticker.poll(now).is_some() {
            face.on_tick(&host, &mut state, now);
        }
        face.on_draw(&mut state, now, &mut display)?;
        window.update(&display);

        if window.events().any(|e| matches!(e, SimulatorEvent::Quit)) {
            break 'running;
        }
        thread::sleep(POLL);
    }

    face.on_destroy(&mut host, state);
    log::info!("closed with {} bitmaps held", host.outstanding);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_full_24h_face() {
        let args = Args::try_parse_from(["simulator"]).unwrap();
        assert_eq!(args.mode(), DisplayMode::TwentyFourHour);
        assert_eq!(args.variant(), FaceVariant::Full);
    }

    #[test]
    fn flags_select_mode_and_variant() {
        let args = Args::try_parse_from(["simulator", "--12h", "--background-only"]).unwrap();
        assert_eq!(args.mode(), DisplayMode::TwelveHour);
        assert_eq!(args.variant(), FaceVariant::BackgroundOnly);
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        assert!(Args::try_parse_from(["simulator", "--12H"]).is_err());
        assert!(Args::try_parse_from(["simulator", "extra"]).is_err());
    }
}
