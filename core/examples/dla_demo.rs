use dla_core::DlaSimulation;

fn main() {
    // Grow a small 64x64 aggregate from 1500 particles, seed 2025
    let mut sim = DlaSimulation::new(64, 4, 2025).unwrap();
    sim.run(1500);

    println!(
        "aggregated {} points on a {}x{} lattice",
        sim.lattice().points().len(),
        sim.lattice().size(),
        sim.lattice().size()
    );
    let max_height = sim.lattice().points().iter().map(|p| p.height).max().unwrap();
    println!("deepest branch: {max_height}");

    // Print the top-left 16x16 corner of the smoothed field
    let field = sim.height_field().grid();
    for y in 0..16 {
        for x in 0..16 {
            print!("{:>5} ", field[y][x]);
        }
        println!();
    }
}
