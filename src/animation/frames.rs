use std::future::{ready, Future};

/// Source of animation frames, each frame resolves to its timestamp in milliseconds.
pub trait FrameSource {
    fn next_frame(&mut self) -> impl Future<Output = f64>;
}

/// Frames ready immediately, each `step_ms` after the previous one.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepFrames {
    now_ms:  f64,
    step_ms: f64,
}

impl FixedStepFrames {
    pub fn new(step_ms: f64) -> Self {
        Self::starting_at(0.0, step_ms)
    }

    pub fn starting_at(now_ms: f64, step_ms: f64) -> Self {
        Self { now_ms, step_ms }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl FrameSource for FixedStepFrames {
    fn next_frame(&mut self) -> impl Future<Output = f64> {
        self.now_ms += self.step_ms;
        ready(self.now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_advance_by_step() {
        let mut frames = FixedStepFrames::starting_at(100.0, 16.0);
        let stamps: Vec<f64> = (0..3).map(|_| pollster::block_on(frames.next_frame())).collect();
        assert_eq!(stamps, vec![116.0, 132.0, 148.0]);
        assert_eq!(frames.now_ms(), 148.0);
    }
}
