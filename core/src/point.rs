// Index of an aggregated point in the lattice's arena. Parent links are
// arena indices so they stay valid across lattice rebuilds.
pub type PointId = usize;

// One aggregated lattice cell. Only aggregated points are materialized;
// empty cells are just `None` slots in the lattice grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticePoint {
    pub x: usize,
    pub y: usize,
    // Length of the longest downward path to a leaf, maintained by the
    // height-field generator. Never decreases.
    pub height: i32,
    pub parent: Option<PointId>,
}

impl LatticePoint {
    // The seed point: unique root of the aggregate tree.
    pub fn seed(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            height: 0,
            parent: None,
        }
    }

    // A point attached to an already-aggregated neighbor. The parent link
    // is set exactly once, here.
    pub fn attached(x: usize, y: usize, parent: PointId) -> Self {
        Self {
            x,
            y,
            height: 0,
            parent: Some(parent),
        }
    }
}
