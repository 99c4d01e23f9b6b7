//! Terminal New Year prediction chest: open the chest, get a random
//! prediction on a styled card, watch the confetti, save the card as a PNG.

pub mod app;
pub mod config;
pub mod effects;
pub mod error;
pub mod event;
pub mod export;
pub mod logging;
pub mod prediction;
pub mod session;
pub mod ui;
