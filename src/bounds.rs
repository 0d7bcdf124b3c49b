use crate::models::{BoundingBox, Geometry};

/// Axis-aligned bounding box over every position of every ring of every part.
///
/// # Panics
/// If `geometry` holds no positions. Loaded geometries always hold at least one.
pub fn bounds(geometry: &Geometry) -> BoundingBox {
    let mut coords = geometry.coords();
    let &[x0, y0] = coords
        .next()
        .expect("bounds() requires a geometry with at least one position");
    coords.fold(
        BoundingBox {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        },
        |b, &[x, y]| BoundingBox {
            min_x: b.min_x.min(x),
            min_y: b.min_y.min(y),
            max_x: b.max_x.max(x),
            max_y: b.max_y.max(y),
        },
    )
}
