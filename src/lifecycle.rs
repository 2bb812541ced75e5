use embedded_graphics::image::ImageDrawable;
use embedded_graphics::pixelcolor::Rgb565 as Rgb;
use embedded_graphics::prelude::DrawTarget;

use crate::clock::{ClockTime, DisplayMode};
use crate::face::{DigitalReadout, FaceBitmaps, FaceCompositor, FaceConfig, Layer, Layers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceId {
    Background,
    Logo,
}

/// Services the watchface borrows from the system it runs on.
pub trait Host {
    type Bitmap: ImageDrawable<Color = Rgb>;
    type Error;

    fn load_bitmap(&mut self, id: ResourceId) -> Result<Self::Bitmap, Self::Error>;

    /// Give back a bitmap obtained from [`Host::load_bitmap`].
    fn release_bitmap(&mut self, bitmap: Self::Bitmap);

    fn clock_style(&self) -> DisplayMode;
}

/// Callbacks a window driver invokes over the life of the face.
pub trait WindowHandlers<H: Host> {
    type State;

    fn on_create(&self, host: &mut H, now: ClockTime) -> Result<Self::State, H::Error>;

    fn on_destroy(&self, host: &mut H, state: Self::State);

    fn on_tick(&self, host: &H, state: &mut Self::State, now: ClockTime);
}

/// Everything the face keeps between callbacks.
pub struct FaceState<B> {
    background: B,
    logo: Option<B>,
    readout: DigitalReadout,
    mode: DisplayMode,
    dirty: Layers,
}

impl<B> FaceState<B> {
    pub fn readout(&self) -> &DigitalReadout {
        &self.readout
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn dirty(&self) -> Layers {
        self.dirty
    }
}

pub struct Watchface {
    compositor: FaceCompositor,
}

impl Watchface {
    pub const fn new(config: FaceConfig) -> Self {
        Self {
            compositor: FaceCompositor::new(config),
        }
    }

    pub const fn config(&self) -> &FaceConfig {
        self.compositor.config()
    }

    /// Redraw if anything changed since the last call. Returns whether a frame was drawn.
    pub fn on_draw<B, D>(&self, state: &mut FaceState<B>, now: ClockTime, display: &mut D) -> Result<bool, D::Error>
    where
        B: ImageDrawable<Color = Rgb>,
        D: DrawTarget<Color = Rgb>,
    {
        if state.dirty.is_empty() {
            return Ok(false);
        }
        trace!("drawing frame");
        let bitmaps = FaceBitmaps {
            background: &state.background,
            logo: state.logo.as_ref(),
        };
        self.compositor
            .compose(display, now, state.mode, &bitmaps, &state.readout)?;
        state.dirty = Layers::empty();
        Ok(true)
    }

    fn all_layers(&self) -> Layers {
        self.config()
            .variant
            .layers()
            .iter()
            .fold(Layers::empty(), |acc, layer| acc | layer.flag())
    }
}

impl<H: Host> WindowHandlers<H> for Watchface {
    type State = FaceState<H::Bitmap>;

    fn on_create(&self, host: &mut H, now: ClockTime) -> Result<Self::State, H::Error> {
        let variant = self.config().variant;
        let mode = host.clock_style();
        debug!("creating face at {}:{}", now.hour(), now.minute());

        let background = host.load_bitmap(ResourceId::Background)?;
        let logo = if variant.shows(Layer::Logo) {
            match host.load_bitmap(ResourceId::Logo) {
                Ok(logo) => Some(logo),
                Err(e) => {
                    warn!("logo bitmap unavailable, releasing background");
                    host.release_bitmap(background);
                    return Err(e);
                }
            }
        } else {
            None
        };

        Ok(FaceState {
            background,
            logo,
            readout: DigitalReadout::new(now, mode),
            mode,
            dirty: self.all_layers(),
        })
    }

    fn on_destroy(&self, host: &mut H, state: Self::State) {
        debug!("destroying face");
        host.release_bitmap(state.background);
        if let Some(logo) = state.logo {
            host.release_bitmap(logo);
        }
    }

    fn on_tick(&self, host: &H, state: &mut Self::State, now: ClockTime) {
        state.mode = host.clock_style();
        state.readout.update(now, state.mode);
        state.dirty |= Layers::TICK & self.all_layers();
        info!("tick {}", state.readout.as_str());
    }
}
