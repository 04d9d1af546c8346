//! Per-repaint task queue
//!
//! Models a "run before next repaint" primitive as an explicit FIFO. Tasks
//! requested while a frame is being processed land in the following frame,
//! so a task that reschedules itself never recurses.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct FrameQueue<T> {
    pending: VecDeque<T>,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<T> FrameQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task for the next frame
    pub fn request(&mut self, task: T) {
        self.pending.push_back(task);
    }

    /// Take every task due this frame, leaving an empty queue for the next one
    pub fn begin_frame(&mut self) -> VecDeque<T> {
        std::mem::take(&mut self.pending)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_requested_during_frame_run_next_frame() {
        let mut queue = FrameQueue::new();
        queue.request(1);
        queue.request(2);

        let due = queue.begin_frame();
        for task in due {
            queue.request(task * 10);
        }

        assert!(!queue.is_empty());
        let next: Vec<i32> = queue.begin_frame().into_iter().collect();
        assert_eq!(next, vec![10, 20]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_frame() {
        let mut queue: FrameQueue<()> = FrameQueue::new();
        assert!(queue.begin_frame().is_empty());
        assert!(queue.is_empty());
    }
}
