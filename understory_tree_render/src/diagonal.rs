// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{CubicBez, Point};

/// The curved edge drawn from `s` to `d`.
///
/// Both control points sit halfway along the depth (x) axis, the first at `s`'s breadth and the
/// second at `d`'s, so the curve leaves and enters its endpoints horizontally.
pub fn diagonal(s: Point, d: Point) -> CubicBez {
    let mid_x = (s.x + d.x) / 2.0;
    CubicBez::new(s, Point::new(mid_x, s.y), Point::new(mid_x, d.y), d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_points_split_the_depth_axis() {
        let c = diagonal(Point::new(200.0, 40.0), Point::new(0.0, 100.0));
        assert_eq!(c.p0, Point::new(200.0, 40.0));
        assert_eq!(c.p1, Point::new(100.0, 40.0));
        assert_eq!(c.p2, Point::new(100.0, 100.0));
        assert_eq!(c.p3, Point::new(0.0, 100.0));
    }

    #[test]
    fn coincident_endpoints_degenerate_to_a_point() {
        let o = Point::new(3.0, 4.0);
        let c = diagonal(o, o);
        assert_eq!([c.p0, c.p1, c.p2, c.p3], [o; 4]);
    }
}
