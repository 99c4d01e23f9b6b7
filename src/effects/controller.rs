use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::layout::Rect;

use crate::effects::confetti::{BurstParams, ConfettiField, ParticleEmitter};
use crate::effects::snowfall::Snowfall;
use crate::effects::timed_task::{TaskStatus, TimedTask};

#[derive(Clone, Debug)]
pub struct EffectsSettings {
    pub celebration: Duration,
    pub snowflakes: Option<usize>,
}

impl Default for EffectsSettings {
    fn default() -> Self {
        Self {
            celebration: Duration::from_millis(3000),
            snowflakes: Some(40),
        }
    }
}

/// Owns every decorative particle on screen. Created when the chest view is
/// mounted; `unmount` (or dropping it) removes everything it spawned.
/// Effects only read the view state, they never write it.
pub struct EffectsController {
    settings: EffectsSettings,
    confetti: ConfettiField,
    snow: Option<Snowfall>,
    celebration: Option<TimedTask>,
    rng: SmallRng,
    mounted: bool,
}

impl EffectsController {
    pub fn mount(area: Rect, settings: EffectsSettings, mut rng: SmallRng) -> Self {
        let snow = settings
            .snowflakes
            .filter(|&n| n > 0)
            .map(|n| Snowfall::new(area.width, area.height, n, &mut rng));
        let confetti_rng = SmallRng::from_rng(&mut rng).unwrap_or_else(|_| SmallRng::seed_from_u64(0));
        Self {
            confetti: ConfettiField::new(area.width, area.height, confetti_rng),
            snow,
            celebration: None,
            rng,
            settings,
            mounted: true,
        }
    }

    pub fn confetti(&self) -> &ConfettiField {
        &self.confetti
    }

    pub fn snow(&self) -> Option<&Snowfall> {
        self.snow.as_ref()
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn resize(&mut self, area: Rect) {
        self.confetti.resize(area.width, area.height);
        if let Some(snow) = self.snow.as_mut() {
            snow.resize(area.width, area.height);
        }
    }

    /// Start the fireworks. A celebration already in flight restarts its clock.
    pub fn celebrate(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        tracing::debug!(duration_ms = self.settings.celebration.as_millis() as u64, "celebration started");
        self.celebration = Some(TimedTask::start(now, self.settings.celebration));
    }

    pub fn tick(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        if let Some(task) = self.celebration.as_mut() {
            let confetti = &mut self.confetti;
            let status = task.tick(now, |_| fire_cannons(&mut *confetti));
            if status == TaskStatus::Finished {
                tracing::debug!(ticks = task.ticks(), "celebration finished");
                self.celebration = None;
            }
        }
        self.confetti.step();
        if let Some(snow) = self.snow.as_mut() {
            snow.step(&mut self.rng);
        }
    }

    pub fn unmount(&mut self) {
        if let Some(task) = self.celebration.as_mut() {
            task.cancel();
        }
        self.celebration = None;
        self.confetti.clear();
        if let Some(snow) = self.snow.as_mut() {
            snow.clear();
        }
        self.snow = None;
        self.mounted = false;
    }
}

impl Drop for EffectsController {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn fire_cannons(emitter: &mut dyn ParticleEmitter) {
    emitter.emit_burst(&BurstParams::left_cannon());
    emitter.emit_burst(&BurstParams::right_cannon());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(snowflakes: Option<usize>) -> EffectsController {
        let settings = EffectsSettings {
            celebration: Duration::from_millis(100),
            snowflakes,
        };
        EffectsController::mount(Rect::new(0, 0, 80, 24), settings, SmallRng::seed_from_u64(1))
    }

    #[test]
    fn celebration_emits_two_bursts_per_tick() {
        let mut fx = controller(None);
        let t0 = Instant::now();
        fx.celebrate(t0);
        fx.tick(t0);
        assert_eq!(fx.confetti().particles().len(), 10);
        assert!(fx.is_celebrating());
    }

    #[test]
    fn celebration_self_terminates() {
        let mut fx = controller(None);
        let t0 = Instant::now();
        fx.celebrate(t0);
        let mut now = t0;
        for _ in 0..10 {
            now += Duration::from_millis(33);
            fx.tick(now);
        }
        assert!(!fx.is_celebrating());
        let before = fx.confetti().particles().len();
        fx.tick(now + Duration::from_millis(33));
        assert!(fx.confetti().particles().len() <= before, "no new bursts after deadline");
    }

    #[test]
    fn unmount_removes_all_particles() {
        let mut fx = controller(Some(25));
        let t0 = Instant::now();
        fx.celebrate(t0);
        fx.tick(t0);
        assert!(fx.snow().is_some());

        fx.unmount();
        assert!(fx.confetti().is_empty());
        assert!(fx.snow().is_none());
        assert!(!fx.is_celebrating());

        // an unmounted controller ignores further requests
        fx.celebrate(t0);
        fx.tick(t0);
        assert!(fx.confetti().is_empty());
    }

    #[test]
    fn zero_snowflakes_disables_snow() {
        let fx = controller(Some(0));
        assert!(fx.snow().is_none());
    }
}
