// 2D height matrix: row-major Vec<Vec<i32>> of size N×N
// access as `map[y][x]`.
pub type HeightMap2D = Vec<Vec<i32>>;

// flatten a 2D grid (row-major) into a single Vec
// For converting to an image buffer (e.g. grayscale u8)
pub fn flatten2<T: Copy>(map: &[Vec<T>]) -> Vec<T> {
    map.iter().flat_map(|row| row.iter().copied()).collect()
}

// Square-root normalization of a height matrix into grayscale bytes:
// divide by the maximum, take the square root to lift mid and low
// elevations, scale to [0, 255], truncate and clamp. A field with no
// positive cells comes out all zeros instead of dividing by zero.
pub fn normalize_sqrt2(map: &HeightMap2D) -> Vec<Vec<u8>> {
    let max = map.iter().flatten().copied().max().unwrap_or(0);
    if max <= 0 {
        return map.iter().map(|row| vec![0u8; row.len()]).collect();
    }

    map.iter()
        .map(|row| {
            row.iter()
                .map(|&v| {
                    let normalized = (v.max(0) as f64 / max as f64).sqrt();
                    ((normalized * 255.0) as i32).clamp(0, 255) as u8
                })
                .collect()
        })
        .collect()
}
