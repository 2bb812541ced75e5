use core::f32::consts::TAU;

use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Triangle;
use micromath::F32Ext;

/// One full turn in the host's angle unit.
pub const TRIG_MAX_ANGLE: i32 = 0x10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerKind {
    Hour,
    Minute,
}

impl PointerKind {
    pub const fn geometry(self) -> &'static PointerGeometry {
        match self {
            Self::Hour => &HOUR_GEOMETRY,
            Self::Minute => &MINUTE_GEOMETRY,
        }
    }

    pub fn template(self) -> &'static WedgeTemplate {
        match self {
            Self::Hour => &HOUR_WEDGE,
            Self::Minute => &MINUTE_WEDGE,
        }
    }
}

/// Radii of a pointer ring, measured from the face centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerGeometry {
    /// Distance from the pivot to the wide end of the wedge.
    pub tip: i32,
    pub ring_outer: u32,
    pub ring_inner: u32,
    /// Half the width of the wedge at `tip`, about `tip * tan(6deg)`.
    pub half_width: i32,
}

pub const MINUTE_GEOMETRY: PointerGeometry = PointerGeometry {
    tip: 58,
    ring_outer: 55,
    ring_inner: 50,
    half_width: 6,
};

pub const HOUR_GEOMETRY: PointerGeometry = PointerGeometry {
    tip: 68,
    ring_outer: 65,
    ring_inner: 60,
    half_width: 7,
};

static MINUTE_WEDGE: WedgeTemplate = WedgeTemplate::new(&MINUTE_GEOMETRY);
static HOUR_WEDGE: WedgeTemplate = WedgeTemplate::new(&HOUR_GEOMETRY);

/// Triangle pointing at 12 o'clock with its apex on the pivot.
///
/// Templates are never modified; [`WedgeTemplate::rotated`] returns a new
/// triangle placed on the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WedgeTemplate {
    points: [Point; 3],
}

impl WedgeTemplate {
    pub const fn new(geometry: &PointerGeometry) -> Self {
        Self {
            points: [
                Point::new(0, 0),
                Point::new(-geometry.half_width, -geometry.tip),
                Point::new(geometry.half_width, -geometry.tip),
            ],
        }
    }

    pub const fn points(&self) -> &[Point; 3] {
        &self.points
    }

    /// Rotate clockwise by `degrees` and move the apex onto `pivot`.
    pub fn rotated(&self, degrees: u32, pivot: Point) -> Triangle {
        let (sin, cos) = sin_cos(degrees_to_trig(degrees));
        let [a, b, c] = self.points.map(|p| rotate(p, sin, cos) + pivot);
        Triangle::new(a, b, c)
    }
}

pub const fn degrees_to_trig(degrees: u32) -> i32 {
    (degrees as i64 * TRIG_MAX_ANGLE as i64 / 360) as i32
}

fn sin_cos(angle: i32) -> (f32, f32) {
    let radians = angle.rem_euclid(TRIG_MAX_ANGLE) as f32 * (TAU / TRIG_MAX_ANGLE as f32);
    (F32Ext::sin(radians), F32Ext::cos(radians))
}

// y grows downwards, so this turns clockwise on screen. The math goes through
// micromath even when std is linked, so every build rounds the same way.
fn rotate(p: Point, sin: f32, cos: f32) -> Point {
    let x = p.x as f32;
    let y = p.y as f32;
    Point::new(
        F32Ext::round(x * cos - y * sin) as i32,
        F32Ext::round(y * cos + x * sin) as i32,
    )
}
