use bevy::prelude::*;

use crate::MAX_FRAME_DELTA;

/// Gameplay time, advanced once per rendered frame.
///
/// Frame deltas are clamped so a long pause (tab switch, breakpoint) does not
/// feed one huge step into the simulation.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FrameClock {
    pub delta: f32,
    pub elapsed: f32,
}

impl FrameClock {
    pub fn advance(&mut self, raw_delta: f32) {
        self.delta = raw_delta.clamp(0.0, MAX_FRAME_DELTA);
        self.elapsed += self.delta;
    }
}

pub fn advance_frame_clock(time: Res<Time>, mut clock: ResMut<FrameClock>) {
    clock.advance(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_frames_are_clamped() {
        let mut clock = FrameClock::default();
        clock.advance(2.5);
        assert_eq!(clock.delta, MAX_FRAME_DELTA);
        clock.advance(0.016);
        assert_eq!(clock.delta, 0.016);
        assert!((clock.elapsed - (MAX_FRAME_DELTA + 0.016)).abs() < 1e-6);
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut clock = FrameClock::default();
        clock.advance(-1.0);
        assert_eq!(clock.delta, 0.0);
        assert_eq!(clock.elapsed, 0.0);
    }
}
