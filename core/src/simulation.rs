use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::DlaError;
use crate::heightfield::{HeightField2D, point_matrix};
use crate::lattice::DlaLattice;
use crate::utils::normalize_sqrt2;
use crate::walk::{WalkConfig, attach_particle};

// One DLA terrain run: lattice, walk configuration, height field and a
// seeded RNG, all exclusively owned. Single-threaded and synchronous by
// design; `run` executes to completion.
pub struct DlaSimulation {
    lattice: DlaLattice,
    field: HeightField2D,
    walk: WalkConfig,
    rng: StdRng,
    // Height-field updates happen every `update_every`-th expansion.
    update_every: usize,
    expansions: usize,
}

impl DlaSimulation {
    pub const DEFAULT_INITIAL_SIZE: usize = 2;
    const FIELD_INITIAL_SIZE: usize = 2;

    // Rejects a zero target and an initial size too small to hold the
    // seed. The RNG is seeded explicitly so runs are reproducible.
    pub fn new(target_size: usize, initial_size: usize, seed: u64) -> Result<Self, DlaError> {
        Self::with_config(target_size, initial_size, seed, WalkConfig::default(), 1)
    }

    pub fn with_config(
        target_size: usize,
        initial_size: usize,
        seed: u64,
        walk: WalkConfig,
        update_every: usize,
    ) -> Result<Self, DlaError> {
        if update_every == 0 {
            return Err(DlaError::InvalidArgument(
                "update frequency must be positive",
            ));
        }
        Ok(Self {
            lattice: DlaLattice::new(target_size, initial_size)?,
            field: HeightField2D::new(Self::FIELD_INITIAL_SIZE)?,
            walk,
            rng: StdRng::seed_from_u64(seed),
            update_every,
            expansions: 0,
        })
    }

    pub fn lattice(&self) -> &DlaLattice {
        &self.lattice
    }

    pub fn height_field(&self) -> &HeightField2D {
        &self.field
    }

    // Runs `particles` walk-and-attach cycles, growing the lattice as
    // attachments approach the border. Ends with a catch-up expansion to
    // the target size and one unconditional height-field update over the
    // full aggregate.
    pub fn run(&mut self, particles: usize) {
        for _ in 0..particles {
            let attachment = attach_particle(&mut self.lattice, &self.walk, &mut self.rng);
            if attachment.expanded {
                self.on_expansion();
            }
        }

        if self.lattice.size() < self.lattice.target_size() {
            let remaining = self.lattice.target_size();
            self.lattice.expand(remaining);
            self.on_expansion();
        }
        let size = self.lattice.size();
        self.field.update(self.lattice.points_mut(), size);
    }

    // Every expansion passes through here; the field update itself is
    // subject to the rate limit, the counter is not.
    fn on_expansion(&mut self) {
        if self.expansions % self.update_every == 0 {
            let size = self.lattice.size();
            self.field.update(self.lattice.points_mut(), size);
        }
        self.expansions += 1;
    }

    // Smoothed height field rendered to grayscale, the primary output
    // handed to the image writer.
    pub fn height_field_image(&self) -> Vec<Vec<u8>> {
        self.field.render()
    }

    // Raw per-point tree heights on the lattice grid, sqrt-normalized the
    // same way as the field.
    pub fn point_height_image(&self) -> Vec<Vec<u8>> {
        let grid = point_matrix(self.lattice.points(), self.lattice.size());
        normalize_sqrt2(&grid)
    }

    // Binary mask of the aggregate: occupied cells white, empty black.
    pub fn aggregate_image(&self) -> Vec<Vec<u8>> {
        let size = self.lattice.size();
        let mut mask = vec![vec![0u8; size]; size];
        for p in self.lattice.points() {
            if p.x < size && p.y < size {
                mask[p.y][p.x] = 255;
            }
        }
        mask
    }
}
