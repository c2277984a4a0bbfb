//! Planar geometry helpers shared by the mesh and routing stages.

#[inline]
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}

/// Distance from point p to the closed segment [a, b].
pub fn point_to_segment_distance(
    px: f64, py: f64,
    ax: f64, ay: f64,
    bx: f64, by: f64,
) -> f64 {
    let (cx, cy) = closest_point_on_segment(px, py, ax, ay, bx, by);
    distance(px, py, cx, cy)
}

/// Closest point to p on the closed segment [a, b].
pub fn closest_point_on_segment(
    px: f64, py: f64,
    ax: f64, ay: f64,
    bx: f64, by: f64,
) -> (f64, f64) {
    let abx = bx - ax;
    let aby = by - ay;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return (ax, ay);
    }
    let t = (((px - ax) * abx + (py - ay) * aby) / len_sq).clamp(0.0, 1.0);
    (ax + t * abx, ay + t * aby)
}

/// Minimum distance between the closed segments [a1, a2] and [b1, b2].
pub fn segment_to_segment_distance(
    a1x: f64, a1y: f64, a2x: f64, a2y: f64,
    b1x: f64, b1y: f64, b2x: f64, b2y: f64,
) -> f64 {
    if segments_intersect(a1x, a1y, a2x, a2y, b1x, b1y, b2x, b2y) {
        return 0.0;
    }
    let d1 = point_to_segment_distance(a1x, a1y, b1x, b1y, b2x, b2y);
    let d2 = point_to_segment_distance(a2x, a2y, b1x, b1y, b2x, b2y);
    let d3 = point_to_segment_distance(b1x, b1y, a1x, a1y, a2x, a2y);
    let d4 = point_to_segment_distance(b2x, b2y, a1x, a1y, a2x, a2y);
    d1.min(d2).min(d3).min(d4)
}

fn segments_intersect(
    a1x: f64, a1y: f64, a2x: f64, a2y: f64,
    b1x: f64, b1y: f64, b2x: f64, b2y: f64,
) -> bool {
    let d1 = cross(b1x, b1y, b2x, b2y, a1x, a1y);
    let d2 = cross(b1x, b1y, b2x, b2y, a2x, a2y);
    let d3 = cross(a1x, a1y, a2x, a2y, b1x, b1y);
    let d4 = cross(a1x, a1y, a2x, a2y, b2x, b2y);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

#[inline]
fn cross(ox: f64, oy: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    (ax - ox) * (by - oy) - (ay - oy) * (bx - ox)
}

/// Axis-aligned rectangle overlap with optional clearance gap.
#[inline]
pub fn rects_overlap(
    a_min_x: f64, a_min_y: f64, a_max_x: f64, a_max_y: f64,
    b_min_x: f64, b_min_y: f64, b_max_x: f64, b_max_y: f64,
    clearance: f64,
) -> bool {
    !(a_max_x + clearance <= b_min_x
        || b_max_x + clearance <= a_min_x
        || a_max_y + clearance <= b_min_y
        || b_max_y + clearance <= a_min_y)
}
