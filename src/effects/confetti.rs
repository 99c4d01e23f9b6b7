use rand::rngs::SmallRng;
use rand::Rng;
use ratatui::style::Color;

pub const FESTIVE_COLORS: [Color; 4] = [
    Color::Rgb(0xFF, 0xD7, 0x00),
    Color::Rgb(0xFF, 0xA5, 0x00),
    Color::Rgb(0xFF, 0x45, 0x00),
    Color::Rgb(0x80, 0x00, 0x80),
];

const SHAPES: [char; 5] = ['■', '▪', '●', '◆', '•'];

/// Normalized emission point: `(0, 0)` is the top-left corner of the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

/// One burst request, in the vocabulary of a browser confetti cannon:
/// `angle` is in degrees with 90 pointing straight up, `spread` is the cone
/// width in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstParams {
    pub count: usize,
    pub angle: f32,
    pub spread: f32,
    pub origin: Origin,
    pub colors: Vec<Color>,
}

impl BurstParams {
    pub fn left_cannon() -> Self {
        Self {
            count: 5,
            angle: 60.0,
            spread: 55.0,
            origin: Origin { x: 0.0, y: 0.5 },
            colors: FESTIVE_COLORS.to_vec(),
        }
    }

    pub fn right_cannon() -> Self {
        Self {
            angle: 120.0,
            origin: Origin { x: 1.0, y: 0.5 },
            ..Self::left_cannon()
        }
    }
}

/// Fire-and-forget particle sink. Nothing is returned to the caller.
pub trait ParticleEmitter {
    fn emit_burst(&mut self, params: &BurstParams);
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    heading: f32,
    velocity: f32,
    pub color: Color,
    pub shape: char,
    age: u32,
}

/// Confetti simulated in "square units": one unit per column horizontally
/// and two per row vertically, so trajectories are not squashed by the
/// terminal cell aspect ratio.
pub struct ConfettiField {
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    rng: SmallRng,
}

const START_VELOCITY: f32 = 0.05;
const DECAY: f32 = 0.9;
const GRAVITY: f32 = 0.012;
const LIFETIME_TICKS: u32 = 90;

impl ConfettiField {
    pub fn new(cols: u16, rows: u16, rng: SmallRng) -> Self {
        let mut field = Self {
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            rng,
        };
        field.resize(cols, rows);
        field
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.width = f32::from(cols.max(1));
        self.height = f32::from(rows.max(1)) * 2.0;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            p.x += p.heading.cos() * p.velocity * width;
            p.y += p.heading.sin() * p.velocity * width + GRAVITY * height;
            p.velocity *= DECAY;
            p.age += 1;
        }
        self.particles
            .retain(|p| p.age < LIFETIME_TICKS && p.y < height && p.x >= -1.0 && p.x <= width + 1.0);
    }

    /// Cell a particle currently occupies, relative to the field's top-left.
    pub fn cell_of(p: &Particle) -> (i32, i32) {
        (p.x.floor() as i32, (p.y / 2.0).floor() as i32)
    }
}

impl ParticleEmitter for ConfettiField {
    fn emit_burst(&mut self, params: &BurstParams) {
        if params.colors.is_empty() {
            return;
        }
        let base = -params.angle.to_radians();
        let spread = params.spread.to_radians();
        for _ in 0..params.count {
            let heading = base + (0.5 * spread - self.rng.r#gen::<f32>() * spread);
            let velocity = START_VELOCITY * 0.5 + self.rng.r#gen::<f32>() * START_VELOCITY;
            let color = params.colors[self.rng.gen_range(0..params.colors.len())];
            let shape = SHAPES[self.rng.gen_range(0..SHAPES.len())];
            self.particles.push(Particle {
                x: params.origin.x * self.width,
                y: params.origin.y * self.height,
                heading,
                velocity,
                color,
                shape,
                age: 0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field() -> ConfettiField {
        ConfettiField::new(80, 24, SmallRng::seed_from_u64(42))
    }

    #[test]
    fn burst_spawns_requested_count_at_origin() {
        let mut f = field();
        f.emit_burst(&BurstParams::left_cannon());
        assert_eq!(f.particles().len(), 5);
        for p in f.particles() {
            assert_eq!(p.x, 0.0);
            assert_eq!(p.y, 24.0);
            assert!(FESTIVE_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn left_cannon_flies_right_and_up() {
        let mut f = field();
        f.emit_burst(&BurstParams::left_cannon());
        f.step();
        for p in f.particles() {
            assert!(p.x > 0.0, "particle moved left: {}", p.x);
            assert!(p.y < 24.0, "particle did not rise: {}", p.y);
        }
    }

    #[test]
    fn right_cannon_flies_left() {
        let mut f = field();
        f.emit_burst(&BurstParams::right_cannon());
        f.step();
        for p in f.particles() {
            assert!(p.x < 80.0);
        }
    }

    #[test]
    fn particles_expire() {
        let mut f = field();
        f.emit_burst(&BurstParams::left_cannon());
        for _ in 0..LIFETIME_TICKS {
            f.step();
        }
        assert!(f.is_empty());
    }

    #[test]
    fn burst_without_colors_is_ignored() {
        let mut f = field();
        let params = BurstParams {
            colors: Vec::new(),
            ..BurstParams::left_cannon()
        };
        f.emit_burst(&params);
        assert!(f.is_empty());
    }
}
