use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Finished,
}

/// A frame-paced task that runs a side effect on every tick until a fixed
/// deadline. The tick that crosses the deadline still runs, matching a
/// "draw, then check the clock" frame loop.
#[derive(Clone, Debug)]
pub struct TimedTask {
    started_at: Instant,
    duration: Duration,
    ticks: u64,
    finished: bool,
}

impl TimedTask {
    pub fn start(now: Instant, duration: Duration) -> Self {
        Self {
            started_at: now,
            duration,
            ticks: 0,
            finished: false,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.started_at + self.duration
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn cancel(&mut self) {
        self.finished = true;
    }

    pub fn tick<F: FnMut(u64)>(&mut self, now: Instant, mut effect: F) -> TaskStatus {
        if self.finished {
            return TaskStatus::Finished;
        }
        effect(self.ticks);
        self.ticks += 1;
        if now >= self.deadline() {
            self.finished = true;
            TaskStatus::Finished
        } else {
            TaskStatus::Running
        }
    }
}
