use embedded_graphics::pixelcolor::Rgb565 as Rgb;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};

use crate::angle::{pointer_angle, snap, sweep};
use crate::clock::{ClockTime, DisplayMode};
use crate::wedge::PointerKind;

/// Draws a pointer as a ring that is lit from 12 o'clock up to the current
/// angle and masked for the rest of the turn.
///
/// There is no filled sector primitive, so the masked part is built by
/// stamping the pointer's wedge every 6 degrees from the current angle to
/// the end of the turn. Neighbouring wedges overlap, giving a solid slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandRenderer {
    center: Point,
    ring: Rgb,
    sweep: Rgb,
}

impl HandRenderer {
    pub const fn new(center: Point, ring: Rgb, sweep: Rgb) -> Self {
        Self { center, ring, sweep }
    }

    pub fn draw<D: DrawTarget<Color = Rgb>>(
        &self,
        kind: PointerKind,
        time: ClockTime,
        mode: DisplayMode,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.draw_at(kind, pointer_angle(kind, time, mode), display)
    }

    /// Draw with an already computed angle in degrees. Off-grid angles are
    /// snapped down to the 6 degree grid first.
    pub fn draw_at<D: DrawTarget<Color = Rgb>>(
        &self,
        kind: PointerKind,
        angle: u32,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let angle = snap(angle);
        let geometry = kind.geometry();
        trace!("draw pointer at {} degrees", angle);

        self.fill_circle(geometry.ring_outer, self.ring, display)?;

        let wedge_style = PrimitiveStyle::with_fill(self.sweep);
        let template = kind.template();
        for a in sweep(angle) {
            template
                .rotated(a, self.center)
                .into_styled(wedge_style)
                .draw(display)?;
        }

        self.fill_circle(geometry.ring_inner, self.sweep, display)
    }

    fn fill_circle<D: DrawTarget<Color = Rgb>>(&self, radius: u32, color: Rgb, display: &mut D) -> Result<(), D::Error> {
        Circle::with_center(self.center, 2 * radius + 1)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)
    }
}
