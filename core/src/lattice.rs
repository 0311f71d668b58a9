use crate::DlaError;
use crate::point::{LatticePoint, PointId};

// How close to the border an attachment may land before the lattice grows.
const EDGE_MARGIN: usize = 2;

// Square growable lattice holding the aggregate.
//
// `cells[y][x]` maps a cell to the aggregated point occupying it, if any.
// `points` is the arena of aggregated points in attachment order; the seed
// is always entry 0. Expansion rebuilds the grid but never the arena, so
// parent indices survive every resize.
pub struct DlaLattice {
    cells: Vec<Vec<Option<PointId>>>,
    points: Vec<LatticePoint>,
    size: usize,
    target_size: usize,
    center: usize,
}

impl DlaLattice {
    // `target_size` is the final lattice size, `initial_size` the starting
    // one. The seed cell sits at `initial_size/2 - 1`, so sizes below 2
    // are rejected along with a zero target.
    pub fn new(target_size: usize, initial_size: usize) -> Result<Self, DlaError> {
        if target_size == 0 {
            return Err(DlaError::InvalidArgument("target size must be positive"));
        }
        if initial_size < 2 {
            return Err(DlaError::InvalidArgument(
                "initial size must be at least 2 so the seed cell exists",
            ));
        }

        let center = initial_size / 2 - 1;
        let mut cells = vec![vec![None; initial_size]; initial_size];
        let points = vec![LatticePoint::seed(center, center)];
        cells[center][center] = Some(0);

        Ok(Self {
            cells,
            points,
            size: initial_size,
            target_size,
            center,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn center(&self) -> usize {
        self.center
    }

    // Aggregated points in attachment order, oldest first.
    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [LatticePoint] {
        &mut self.points
    }

    pub fn is_aggregated(&self, x: usize, y: usize) -> bool {
        self.cells[y][x].is_some()
    }

    // Contact test for the walker: if the cell is free and touches the
    // aggregate, returns the first aggregated 4-neighbor in the fixed scan
    // order left, right, up, down. That neighbor becomes the parent.
    pub fn contact_parent(&self, x: usize, y: usize) -> Option<PointId> {
        if self.cells[y][x].is_some() {
            return None;
        }
        if x > 0 {
            if let Some(id) = self.cells[y][x - 1] {
                return Some(id);
            }
        }
        if x < self.size - 1 {
            if let Some(id) = self.cells[y][x + 1] {
                return Some(id);
            }
        }
        if y > 0 {
            if let Some(id) = self.cells[y - 1][x] {
                return Some(id);
            }
        }
        if y < self.size - 1 {
            if let Some(id) = self.cells[y + 1][x] {
                return Some(id);
            }
        }
        None
    }

    // Permanently adds the cell to the aggregate. The parent edge is
    // immutable from here on.
    pub fn attach(&mut self, x: usize, y: usize, parent: PointId) -> PointId {
        debug_assert!(self.cells[y][x].is_none());
        let id = self.points.len();
        self.points.push(LatticePoint::attached(x, y, parent));
        self.cells[y][x] = Some(id);
        id
    }

    // True when an attachment at (x, y) landed close enough to the border
    // that the lattice should grow.
    pub fn needs_expansion(&self, x: usize, y: usize) -> bool {
        self.size < self.target_size
            && (x < EDGE_MARGIN
                || x + EDGE_MARGIN >= self.size
                || y < EDGE_MARGIN
                || y + EDGE_MARGIN >= self.size)
    }

    // Grows the lattice by `increment` cells per side, clamped to the
    // target size. Every aggregated point is translated by the same offset
    // on both axes and re-marked in the fresh grid, so relative distances
    // and parent/child adjacency are preserved exactly.
    pub fn expand(&mut self, increment: usize) {
        if self.size >= self.target_size {
            return;
        }

        let new_size = (self.size + increment).min(self.target_size);
        let new_center = new_size / 2;
        let offset = new_center - self.center;

        let mut cells = vec![vec![None; new_size]; new_size];
        for (id, p) in self.points.iter_mut().enumerate() {
            p.x += offset;
            p.y += offset;
            cells[p.y][p.x] = Some(id);
        }

        self.cells = cells;
        self.size = new_size;
        self.center = new_center;
    }
}

#[cfg(test)]
mod tests {
    use super::DlaLattice;

    #[test]
    fn lattice_seed_invariant() {
        let lattice = DlaLattice::new(20, 4).unwrap();
        assert_eq!(lattice.size(), 4);
        assert_eq!(lattice.center(), 1);
        assert_eq!(lattice.points().len(), 1);

        let seed = &lattice.points()[0];
        assert_eq!((seed.x, seed.y), (1, 1));
        assert_eq!(seed.parent, None);
        assert_eq!(seed.height, 0);
        assert!(lattice.is_aggregated(1, 1));
    }

    #[test]
    fn lattice_rejects_bad_sizes() {
        assert!(DlaLattice::new(0, 2).is_err());
        assert!(DlaLattice::new(10, 0).is_err());
        assert!(DlaLattice::new(10, 1).is_err());
    }

    #[test]
    fn lattice_contact_scan_order() {
        let mut lattice = DlaLattice::new(20, 8).unwrap();
        // Seed at (3, 3); attach a second point to its right.
        let seed = 0;
        let right = lattice.attach(4, 3, seed);
        // (4, 2) touches `right` below it (down) and nothing else.
        assert_eq!(lattice.contact_parent(4, 2), Some(right));
        // (5, 3) touches `right` to its left; left wins the scan.
        assert_eq!(lattice.contact_parent(5, 3), Some(right));
        // An aggregated cell is never a contact site.
        assert_eq!(lattice.contact_parent(4, 3), None);
        // A free cell with no aggregated neighbors is not either.
        assert_eq!(lattice.contact_parent(6, 6), None);
    }

    #[test]
    fn lattice_attach_keeps_order() {
        let mut lattice = DlaLattice::new(20, 8).unwrap();
        let a = lattice.attach(4, 3, 0);
        let b = lattice.attach(5, 3, a);
        assert_eq!((a, b), (1, 2));
        assert_eq!(lattice.points().len(), 3);
        assert_eq!(lattice.points()[2].parent, Some(a));
    }

    #[test]
    fn lattice_expand_translates_uniformly() {
        let mut lattice = DlaLattice::new(20, 4).unwrap();
        let a = lattice.attach(2, 1, 0); // right of the seed at (1, 1)
        lattice.expand(10);

        assert_eq!(lattice.size(), 14);
        assert_eq!(lattice.center(), 7);

        // offset = 14/2 - 1 = 6 on both axes
        let seed = &lattice.points()[0];
        let child = &lattice.points()[a];
        assert_eq!((seed.x, seed.y), (7, 7));
        assert_eq!((child.x, child.y), (8, 7));
        // Adjacency and identity survive the rebuild.
        assert_eq!(child.parent, Some(0));
        assert!(lattice.is_aggregated(7, 7));
        assert!(lattice.is_aggregated(8, 7));
        assert!(!lattice.is_aggregated(1, 1));
    }

    #[test]
    fn lattice_expand_clamps_to_target() {
        let mut lattice = DlaLattice::new(6, 4).unwrap();
        lattice.expand(10);
        assert_eq!(lattice.size(), 6);
        // At the target the lattice never grows again.
        lattice.expand(10);
        assert_eq!(lattice.size(), 6);
    }

    #[test]
    fn lattice_needs_expansion_edge_margin() {
        let mut lattice = DlaLattice::new(20, 8).unwrap();
        assert!(lattice.needs_expansion(1, 4));
        assert!(lattice.needs_expansion(6, 4));
        assert!(lattice.needs_expansion(4, 0));
        assert!(!lattice.needs_expansion(3, 4));

        // No expansion once the target size is reached.
        lattice.expand(20);
        assert_eq!(lattice.size(), 20);
        assert!(!lattice.needs_expansion(0, 0));
    }
}
