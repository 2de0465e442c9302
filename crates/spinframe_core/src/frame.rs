// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame sequencing with wrap-around.

/// Direction of a physical frame step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Toward higher frame indices
    Forward,
    /// Toward lower frame indices
    Backward,
}

impl StepDirection {
    /// Get the opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Owns the current frame index of a fixed-length sequence
#[derive(Debug, Clone)]
pub struct FrameSequencer {
    /// Number of frames (at least one)
    frame_count: usize,
    /// Current frame, always in `0..frame_count`
    current: usize,
}

impl FrameSequencer {
    /// Create a sequencer positioned at frame 0.
    ///
    /// A zero count is raised to one; configuration validation rejects it
    /// before a sequencer is ever built.
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count: frame_count.max(1),
            current: 0,
        }
    }

    /// Get the number of frames
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Get the current frame index
    pub fn current(&self) -> usize {
        self.current
    }

    /// Step one frame forward, wrapping to 0 after the last frame
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.frame_count;
        self.current
    }

    /// Step one frame back, wrapping to the last frame before 0
    pub fn retreat(&mut self) -> usize {
        self.current = (self.current + self.frame_count - 1) % self.frame_count;
        self.current
    }

    /// Step in the given direction
    pub fn step(&mut self, direction: StepDirection) -> usize {
        match direction {
            StepDirection::Forward => self.advance(),
            StepDirection::Backward => self.retreat(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps_after_full_turn() {
        for count in 1..=12 {
            let mut seq = FrameSequencer::new(count);
            for _ in 0..count {
                seq.advance();
            }
            assert_eq!(seq.current(), 0, "count {count}");
        }
    }

    #[test]
    fn test_retreat_inverts_advance() {
        let mut seq = FrameSequencer::new(7);
        for start in 0..7 {
            while seq.current() != start {
                seq.advance();
            }
            seq.advance();
            assert_eq!(seq.retreat(), start);
        }
    }

    #[test]
    fn test_retreat_from_zero() {
        let mut seq = FrameSequencer::new(36);
        assert_eq!(seq.retreat(), 35);
        assert_eq!(seq.advance(), 0);
    }

    #[test]
    fn test_single_frame() {
        let mut seq = FrameSequencer::new(1);
        assert_eq!(seq.advance(), 0);
        assert_eq!(seq.retreat(), 0);
        assert_eq!(FrameSequencer::new(0).frame_count(), 1);
    }
}
