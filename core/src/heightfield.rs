use crate::DlaError;
use crate::point::LatticePoint;
use crate::utils::{HeightMap2D, normalize_sqrt2};

// Fixed smoothing kernel. Interior cells get the truncated weighted
// average; the outer 2-cell border is copied through unchanged.
const KERNEL: [[i64; 5]; 5] = [
    [3, 13, 22, 13, 3],
    [13, 60, 98, 60, 13],
    [22, 98, 162, 98, 22],
    [13, 60, 98, 60, 13],
    [3, 13, 22, 13, 3],
];
const KERNEL_SUM: i64 = 946;

// Extra smoothing passes applied when rendering the final image.
const RENDER_SMOOTH_PASSES: usize = 10;

// Persistent, accumulating elevation field over the aggregate.
//
// Each update resamples the previous field to the new lattice size and adds
// the current per-point tree heights on top, so relief from earlier, coarser
// stages keeps contributing instead of being overwritten. `size` tracks the
// size of the most recent update, which may lag one update behind the
// lattice's own size.
pub struct HeightField2D {
    grid: HeightMap2D,
    size: usize,
}

impl HeightField2D {
    pub fn new(initial_size: usize) -> Result<Self, DlaError> {
        if initial_size == 0 {
            return Err(DlaError::InvalidArgument(
                "height field size must be positive",
            ));
        }
        Ok(Self {
            grid: vec![vec![0; initial_size]; initial_size],
            size: initial_size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn grid(&self) -> &HeightMap2D {
        &self.grid
    }

    // One full field update: refresh the tree heights, rasterize them at
    // the new size, resample the old field to the same size, add the two,
    // smooth once. Resample-then-add order is load-bearing: swapping it
    // changes the numbers.
    pub fn update(&mut self, points: &mut [LatticePoint], new_size: usize) {
        compute_heights(points);
        let detail = point_matrix(points, new_size);
        let base = if new_size == self.size {
            std::mem::take(&mut self.grid)
        } else {
            resample(&self.grid, self.size, new_size)
        };
        let merged = merge(&base, &detail, new_size);
        self.grid = smooth(&merged, new_size);
        self.size = new_size;
    }

    // Grayscale render of the field: 10 extra smoothing passes for visual
    // softening, then sqrt normalization to [0, 255]. Works on a copy, so
    // the stored field is unchanged and repeated renders agree.
    pub fn render(&self) -> Vec<Vec<u8>> {
        let mut grid = self.grid.clone();
        for _ in 0..RENDER_SMOOTH_PASSES {
            grid = smooth(&grid, self.size);
        }
        normalize_sqrt2(&grid)
    }
}

// Depth-to-leaf relaxation over the aggregate tree, newest points first.
// Walks up the parent chain as long as the parent's height is not already
// above the child's, so each pass is monotone and idempotent; heights are
// never reset between calls.
pub fn compute_heights(points: &mut [LatticePoint]) {
    for i in (0..points.len()).rev() {
        let mut cur = i;
        while let Some(parent) = points[cur].parent {
            if points[parent].height <= points[cur].height + 1 {
                points[parent].height = points[cur].height + 1;
                cur = parent;
            } else {
                break;
            }
        }
    }
}

// Rasterizes per-point heights into a zeroed size×size matrix. Points
// outside the bounds are silently dropped.
pub fn point_matrix(points: &[LatticePoint], size: usize) -> HeightMap2D {
    let mut grid = vec![vec![0; size]; size];
    for p in points {
        if p.x < size && p.y < size {
            grid[p.y][p.x] = p.height;
        }
    }
    grid
}

// Bilinear resampling from old_size to new_size. Floor indices are clamped
// to old_size - 2 to keep the 2x2 stencil in bounds; results are truncated
// to integers. A single-cell source just replicates its value.
pub fn resample(old: &HeightMap2D, old_size: usize, new_size: usize) -> HeightMap2D {
    if new_size == old_size {
        return old.clone();
    }
    if old_size == 1 {
        return vec![vec![old[0][0]; new_size]; new_size];
    }

    let scale = new_size as f64 / old_size as f64;
    let mut out = vec![vec![0; new_size]; new_size];

    for y in 0..new_size {
        for x in 0..new_size {
            let gx = x as f64 / scale;
            let gy = y as f64 / scale;
            let gxi = (gx as usize).min(old_size - 2);
            let gyi = (gy as usize).min(old_size - 2);

            let c00 = old[gyi][gxi] as f64;
            let c10 = old[gyi][gxi + 1] as f64;
            let c01 = old[gyi + 1][gxi] as f64;
            let c11 = old[gyi + 1][gxi + 1] as f64;

            let tx = gx - gxi as f64;
            let ty = gy - gyi as f64;

            out[y][x] = blerp(c00, c10, c01, c11, tx, ty) as i32;
        }
    }

    out
}

fn lerp(s: f64, e: f64, t: f64) -> f64 {
    s + (e - s) * t
}

fn blerp(c00: f64, c10: f64, c01: f64, c11: f64, tx: f64, ty: f64) -> f64 {
    lerp(lerp(c00, c10, tx), lerp(c01, c11, tx), ty)
}

// Elementwise sum of the resampled base field and the fresh point matrix.
pub fn merge(base: &HeightMap2D, detail: &HeightMap2D, size: usize) -> HeightMap2D {
    let mut out = vec![vec![0; size]; size];
    for y in 0..size {
        for x in 0..size {
            out[y][x] = base[y][x] + detail[y][x];
        }
    }
    out
}

// One convolution pass with the fixed 5x5 kernel. Only interior cells are
// written; the 2-cell border keeps its input values.
pub fn smooth(map: &HeightMap2D, size: usize) -> HeightMap2D {
    let mut out = map.clone();
    for y in 2..size.saturating_sub(2) {
        for x in 2..size.saturating_sub(2) {
            let mut sum: i64 = 0;
            for ky in 0..5 {
                for kx in 0..5 {
                    sum += map[y + ky - 2][x + kx - 2] as i64 * KERNEL[ky][kx];
                }
            }
            out[y][x] = (sum / KERNEL_SUM) as i32;
        }
    }
    out
}
