use crate::Point2;

/// Checks if a point lies inside a polygon given by its vertices.
///
/// Even-odd rule: a horizontal ray is cast from `ptest` towards +x and the
/// edge crossings are counted. Edges are half-open in y, so a vertex shared
/// by two edges is counted once. The result does not depend on the winding
/// order. Points exactly on an edge get a fixed but unspecified answer.
pub fn is_point_inside_polygon(ptest: Point2, pts: &[Point2]) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = pts[i];
        let pj = pts[j];
        if (pi.y > ptest.y) != (pj.y > ptest.y) {
            // Edge straddles the ray, so pj.y != pi.y here
            let x_cross = (pj.x - pi.x) * (ptest.y - pi.y) / (pj.y - pi.y) + pi.x;
            if ptest.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}
