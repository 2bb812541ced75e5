use core::iter::StepBy;
use core::ops::Range;

use crate::clock::{ClockTime, DisplayMode};
use crate::wedge::PointerKind;

/// Angular step between two wedge stamps, in degrees.
pub const SWEEP_STEP: u32 = 6;
/// The sweep stops before reaching this angle.
pub const SWEEP_END: u32 = 355;

pub const fn minute_angle(time: ClockTime) -> u32 {
    time.minute() as u32 * 6
}

pub const fn hour_angle(time: ClockTime, mode: DisplayMode) -> u32 {
    let hour = time.hour() as u32;
    let minute = time.minute() as u32;
    let angle = match mode {
        DisplayMode::TwentyFourHour => hour * 15 + minute / 4,
        DisplayMode::TwelveHour => (hour % 12) * 30 + minute / 2,
    };
    snap(angle)
}

pub const fn pointer_angle(kind: PointerKind, time: ClockTime, mode: DisplayMode) -> u32 {
    match kind {
        PointerKind::Hour => hour_angle(time, mode),
        PointerKind::Minute => minute_angle(time),
    }
}

/// Round down onto the sweep grid.
pub const fn snap(angle: u32) -> u32 {
    angle - angle % SWEEP_STEP
}

/// Angles at which a wedge is stamped, from `start` up to the 12 o'clock boundary.
pub fn sweep(start: u32) -> StepBy<Range<u32>> {
    (start..SWEEP_END).step_by(SWEEP_STEP as usize)
}
