//! Timed path reveal
//!
//! Lives outside `sim`: the session never reads a clock. The scheduler turns
//! elapsed frame time into "reveal progressed to k" notifications that the
//! driver forwards through `TickInput::reveal_progress`.

use crate::sim::GoalPath;

#[derive(Debug, Clone)]
pub struct RevealScheduler {
    /// Seconds between segments
    delay: f32,
    elapsed: f32,
    /// Last node index shown
    shown: usize,
    /// Final node index (path edges)
    last: usize,
}

impl RevealScheduler {
    /// Start revealing `path`, one segment every `delay` seconds
    pub fn new(path: &GoalPath, delay: f32) -> Self {
        Self {
            delay: delay.max(f32::EPSILON),
            elapsed: 0.0,
            shown: 0,
            last: path.edges(),
        }
    }

    /// Advance by `dt`; returns the new reveal index when it moved
    pub fn advance(&mut self, dt: f32) -> Option<usize> {
        if self.is_done() {
            return None;
        }
        self.elapsed += dt;
        let mut moved = false;
        while self.elapsed >= self.delay && self.shown < self.last {
            self.elapsed -= self.delay;
            self.shown += 1;
            moved = true;
        }
        moved.then_some(self.shown)
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::NodeId;

    fn path(len: usize) -> GoalPath {
        GoalPath::new((0..len).map(NodeId).collect())
    }

    #[test]
    fn test_reveals_one_segment_per_delay() {
        let mut reveal = RevealScheduler::new(&path(4), 0.25);
        assert_eq!(reveal.advance(0.1), None);
        assert_eq!(reveal.advance(0.2), Some(1));
        assert_eq!(reveal.advance(0.5), Some(3));
        assert!(reveal.is_done());
        assert_eq!(reveal.advance(10.0), None);
        assert_eq!(reveal.shown(), 3);
    }

    #[test]
    fn test_large_step_caps_at_last_node() {
        let mut reveal = RevealScheduler::new(&path(3), 0.1);
        assert_eq!(reveal.advance(5.0), Some(2));
    }
}
