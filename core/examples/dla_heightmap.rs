// Runs a full DLA simulation and saves three 512x512 grayscale images:
// the smoothed height field
// the raw per-point tree heights
// the aggregate mask
use dla_core::{DlaSimulation, flatten2};
use image::GrayImage;
use std::path::Path;

fn save_grayscale(grid: &[Vec<u8>], filename: &str) {
    let size = grid.len();
    let img = GrayImage::from_raw(size as u32, size as u32, flatten2(grid))
        .expect("buffer matches dimensions");
    img.save(Path::new(filename)).unwrap();
    println!("Saved {}", filename);
}

fn main() {
    let target_size = 512;
    let particles = 20_000;
    let seed = 2025;

    let mut sim = DlaSimulation::new(target_size, 4, seed).unwrap();
    println!("Running {} particles toward a {target_size}x{target_size} lattice...", particles);
    sim.run(particles);
    println!("Done: {} aggregated points", sim.lattice().points().len());

    save_grayscale(&sim.height_field_image(), "final_heightmap.png");
    save_grayscale(&sim.point_height_image(), "point_heights.png");
    save_grayscale(&sim.aggregate_image(), "aggregate.png");
}
