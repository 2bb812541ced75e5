/// Wall-clock reading at minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Hour as shown on a 12-hour dial, 1 through 12.
    pub const fn hour12(&self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

impl From<time::Time> for ClockTime {
    fn from(t: time::Time) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
        }
    }
}

impl From<time::PrimitiveDateTime> for ClockTime {
    fn from(t: time::PrimitiveDateTime) -> Self {
        t.time().into()
    }
}

/// How the host wants hours presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    TwelveHour,
    #[default]
    TwentyFourHour,
}

/// Turns a stream of clock samples into minute ticks.
///
/// The driver may sample as often as it likes; a tick is reported for the
/// first sample and whenever the hour or minute moves.
#[derive(Debug, Default)]
pub struct MinuteTicker {
    last: Option<ClockTime>,
}

impl MinuteTicker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    pub fn poll(&mut self, now: ClockTime) -> Option<ClockTime> {
        if self.last == Some(now) {
            return None;
        }
        self.last = Some(now);
        Some(now)
    }
}
