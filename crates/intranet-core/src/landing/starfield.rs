use rand::Rng;

/// Canvas area covered by one star on average.
pub const AREA_PER_STAR: f64 = 9500.0;

/// Vertical position stars respawn at after leaving the bottom edge.
const RESPAWN_Y: f64 = -5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Depth in `[0.1, 1.0)`; nearer stars are bigger, brighter and faster.
    pub z: f64,
    pub speed: f64,
}

impl Star {
    pub fn radius(&self) -> f64 {
        self.z * 2.2
    }

    pub fn alpha(&self) -> f64 {
        0.3 + self.z
    }
}

/// The falling-star backdrop of the landing page.
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    width: f64,
    height: f64,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new<R: Rng>(width: f64, height: f64, rng: &mut R) -> Self {
        let mut field = Self::default();
        field.resize(width, height, rng);
        field
    }

    /// Regenerates the stars for a new canvas size.
    pub fn resize<R: Rng>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let count = ((self.width * self.height) / AREA_PER_STAR).floor() as usize;
        self.stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0.0..1.0) * self.width,
                y: rng.gen_range(0.0..1.0) * self.height,
                z: rng.gen_range(0.1..1.0),
                speed: rng.gen_range(0.2..0.8),
            })
            .collect();
    }

    /// Advances one animation frame.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        for star in &mut self.stars {
            star.y += star.speed * star.z;
            if star.y > self.height {
                star.y = RESPAWN_Y;
                star.x = rng.gen_range(0.0..1.0) * self.width;
            }
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
