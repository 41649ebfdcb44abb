//! Movement input snapshot.

/// The movement controls held during one simulation step.
///
/// An explicit snapshot passed into the step function each frame; there is
/// no global key state. Opposing controls cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Drive forward along the heading.
    pub forward: bool,
    /// Drive backward against the heading.
    pub backward: bool,
    /// Turn counter-clockwise (decreasing heading in raster coordinates).
    pub turn_left: bool,
    /// Turn clockwise (increasing heading in raster coordinates).
    pub turn_right: bool,
}

impl InputState {
    /// No controls held.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Signed drive direction: +1 forward, -1 backward, 0 neither or both.
    #[inline]
    pub fn drive_direction(&self) -> f32 {
        (self.forward as i8 - self.backward as i8) as f32
    }

    /// Signed turn direction: +1 clockwise, -1 counter-clockwise, 0 neither
    /// or both.
    #[inline]
    pub fn turn_direction(&self) -> f32 {
        (self.turn_right as i8 - self.turn_left as i8) as f32
    }
}
