/// Visual head movement between two ticks, in pixel space.
///
/// Purely cosmetic: the simulation only ever looks at grid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadTween {
    pub start: (f64, f64),
    pub end: (f64, f64),
    /// Fraction of the move already shown, in [0, 1]
    pub progress: f64,
}

impl HeadTween {
    /// A finished tween resting at `at`
    pub fn resting(at: (f64, f64)) -> Self {
        Self {
            start: at,
            end: at,
            progress: 1.0,
        }
    }

    /// Restart from `start` toward `end`; called once per tick
    pub fn retarget(&mut self, start: (f64, f64), end: (f64, f64)) {
        self.start = start;
        self.end = end;
        self.progress = 0.0;
    }

    /// Advance by one frame's worth of progress
    pub fn advance(&mut self, step: f64) {
        self.progress = (self.progress + step).min(1.0);
    }

    /// Displayed head position
    pub fn position(&self) -> (f64, f64) {
        let t = self.progress.clamp(0.0, 1.0);
        (
            self.start.0 + (self.end.0 - self.start.0) * t,
            self.start.1 + (self.end.1 - self.start.1) * t,
        )
    }
}
