use rand::Rng;
use rand::rngs::SmallRng;

const FLAKES: [char; 3] = ['·', '*', '❄'];

#[derive(Clone, Debug)]
pub struct Flake {
    pub x: f32,
    pub y: f32,
    speed: f32,
    sway: f32,
    pub glyph: char,
}

/// Ambient snow drifting down the screen and wrapping back to the top.
/// Positions are in cells.
pub struct Snowfall {
    cols: f32,
    rows: f32,
    flakes: Vec<Flake>,
}

impl Snowfall {
    pub fn new(cols: u16, rows: u16, count: usize, rng: &mut SmallRng) -> Self {
        let cols = f32::from(cols.max(1));
        let rows = f32::from(rows.max(1));
        let flakes = (0..count)
            .map(|_| Flake {
                x: rng.gen_range(0.0..cols),
                y: rng.gen_range(0.0..rows),
                speed: rng.gen_range(0.05..0.25),
                sway: rng.gen_range(0.0..std::f32::consts::TAU),
                glyph: FLAKES[rng.gen_range(0..FLAKES.len())],
            })
            .collect();
        Self { cols, rows, flakes }
    }

    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = f32::from(cols.max(1));
        self.rows = f32::from(rows.max(1));
        for flake in &mut self.flakes {
            flake.x = flake.x.rem_euclid(self.cols);
            flake.y = flake.y.rem_euclid(self.rows);
        }
    }

    pub fn step(&mut self, rng: &mut SmallRng) {
        for flake in &mut self.flakes {
            flake.sway += 0.15;
            flake.y += flake.speed;
            flake.x = (flake.x + flake.sway.sin() * 0.1).rem_euclid(self.cols);
            if flake.x >= self.cols {
                flake.x = 0.0;
            }
            if flake.y >= self.rows {
                flake.y = 0.0;
                flake.x = rng.gen_range(0.0..self.cols);
            }
        }
    }

    pub fn clear(&mut self) {
        self.flakes.clear();
    }
}
