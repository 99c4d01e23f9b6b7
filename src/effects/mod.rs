pub mod confetti;
pub mod controller;
pub mod snowfall;
pub mod timed_task;
