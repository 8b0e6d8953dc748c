/// Turns absolute cursor positions into per-event deltas.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CursorTracker {
    last_position: Option<(f32, f32)>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `(x, y)` and returns the movement since the previous call.
    ///
    /// The returned y delta is positive when the cursor moves up the screen.
    /// The first call only records the position and returns `None`.
    pub fn advance(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let delta = self
            .last_position
            .map(|(last_x, last_y)| (x - last_x, last_y - y));
        self.last_position = Some((x, y));
        delta
    }

    /// Forgets the last position, the next event is treated as the first one.
    pub fn reset(&mut self) {
        self.last_position = None;
    }

    #[cfg(test)]
    pub fn last_position(&self) -> Option<(f32, f32)> {
        self.last_position
    }
}
