//! Tessellation of the 2D shapes into vertex lists.
//!
//! All coordinates are window pixels with the origin in the top-left corner.
//! Outlines come out as independent line segments (pairs of vertices) and
//! fills as independent triangles, so any number of shapes can share one
//! draw call.

use super::math::{Color, Point2, Rect};
use std::f32::consts::TAU;

/// Angle increment used when walking around an ellipse.
pub const ELLIPSE_ANGLE_STEP: f32 = 0.01;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ShapeVertex {
    pub fn new(p: Point2, color: Color) -> Self {
        ShapeVertex {
            position: [p.x, p.y],
            color: color.to_f32_array(),
        }
    }
}

fn corners(rect: &Rect) -> [Point2; 4] {
    [
        Point2::new(rect.x, rect.y),
        Point2::new(rect.x + rect.w, rect.y),
        Point2::new(rect.x + rect.w, rect.y + rect.h),
        Point2::new(rect.x, rect.y + rect.h),
    ]
}

/// Turns a closed polygon into segment pairs.
fn closed_loop(points: &[Point2], color: Color) -> Vec<ShapeVertex> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for (i, p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        out.push(ShapeVertex::new(*p, color));
        out.push(ShapeVertex::new(next, color));
    }
    out
}

pub fn rect_outline(rect: &Rect, color: Color) -> Vec<ShapeVertex> {
    closed_loop(&corners(rect), color)
}

pub fn rect_fill(rect: &Rect, color: Color) -> Vec<ShapeVertex> {
    let [a, b, c, d] = corners(rect);
    [a, b, c, c, d, a]
        .iter()
        .map(|p| ShapeVertex::new(*p, color))
        .collect()
}

pub fn ellipse_points(center: Point2, radius_x: f32, radius_y: f32) -> Vec<Point2> {
    let mut points = Vec::with_capacity((TAU / ELLIPSE_ANGLE_STEP) as usize + 1);
    let mut angle = 0.0_f32;
    while angle < TAU {
        points.push(Point2::new(
            center.x + radius_x * angle.cos(),
            center.y + radius_y * angle.sin(),
        ));
        angle += ELLIPSE_ANGLE_STEP;
    }
    points
}

pub fn ellipse_outline(
    center: Point2,
    radius_x: f32,
    radius_y: f32,
    color: Color,
) -> Vec<ShapeVertex> {
    closed_loop(&ellipse_points(center, radius_x, radius_y), color)
}

pub fn ellipse_fill(
    center: Point2,
    radius_x: f32,
    radius_y: f32,
    color: Color,
) -> Vec<ShapeVertex> {
    let points = ellipse_points(center, radius_x, radius_y);
    let mut out = Vec::with_capacity(points.len() * 3);
    for (i, p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        out.push(ShapeVertex::new(center, color));
        out.push(ShapeVertex::new(*p, color));
        out.push(ShapeVertex::new(next, color));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_outline_is_four_edges() {
        let v = rect_outline(&Rect::new(10.0, 20.0, 30.0, 40.0), Color::RED);
        assert_eq!(v.len(), 8);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[1].position, [40.0, 20.0]);
        // last edge closes the loop back at the origin corner
        assert_eq!(v[6].position, [10.0, 60.0]);
        assert_eq!(v[7].position, [10.0, 20.0]);
        assert!(v.iter().all(|s| s.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn rect_fill_is_two_triangles() {
        let v = rect_fill(&Rect::new(0.0, 0.0, 2.0, 2.0), Color::WHITE);
        assert_eq!(v.len(), 6);
        assert_eq!(v[2].position, v[3].position);
        assert_eq!(v[0].position, v[5].position);
    }

    #[test]
    fn ellipse_uses_fixed_angle_step() {
        let pts = ellipse_points(Point2::new(0.0, 0.0), 5.0, 5.0);
        // 0.00, 0.01, ... 6.28 all fall below 2*pi
        assert_eq!(pts.len(), 629);
        for p in &pts {
            assert!((p.distance(Point2::default()) - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn ellipse_respects_both_radii() {
        let pts = ellipse_points(Point2::new(100.0, 50.0), 20.0, 10.0);
        assert_eq!(pts[0], Point2::new(120.0, 50.0));
        let max_y = pts.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert!((max_y - 60.0).abs() < 1e-2);
    }

    #[test]
    fn ellipse_outline_and_fill_sizes() {
        let c = Point2::new(0.0, 0.0);
        let n = ellipse_points(c, 3.0, 3.0).len();
        assert_eq!(ellipse_outline(c, 3.0, 3.0, Color::BLUE).len(), n * 2);
        assert_eq!(ellipse_fill(c, 3.0, 3.0, Color::BLUE).len(), n * 3);
    }
}
