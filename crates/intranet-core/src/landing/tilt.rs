/// Transform of a tile the pointer is not over.
pub const TILT_REST: &str = "rotateX(0deg) rotateY(0deg)";

/// Tilts a tile toward the pointer at (`x`, `y`).
///
/// The tile's bounding box is `left`, `top`, `width`, `height`. At the
/// edges the tile leans 5 degrees around X and 6 around Y.
pub fn tilt_transform(left: f64, top: f64, width: f64, height: f64, x: f64, y: f64) -> String {
    if width <= 0.0 || height <= 0.0 {
        return TILT_REST.to_string();
    }
    let dx = (x - left) / width - 0.5;
    let dy = (y - top) / height - 0.5;
    // Adding 0.0 turns -0.0 into 0.0 so the center prints as 0.00.
    format!(
        "rotateX({:.2}deg) rotateY({:.2}deg)",
        -dy * 10.0 + 0.0,
        dx * 12.0 + 0.0
    )
}
