use std::mem;
use std::ops::{Add, Index, IndexMut, Mul};

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

pub type Point2 = Vec2;

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Vec4 { x, y, z, w }
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[f32; 4] {
        // Vec4 is repr(C) with four f32 fields
        let ary: &[f32; 4] = unsafe { mem::transmute(self) };
        ary
    }
    #[inline(always)]
    pub fn as_array_mut(&mut self) -> &mut [f32; 4] {
        let ary: &mut [f32; 4] = unsafe { mem::transmute(self) };
        ary
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    #[inline(always)]
    fn index(&self, i: usize) -> &f32 {
        self.as_array().index(i)
    }
}

impl IndexMut<usize> for Vec4 {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        self.as_array_mut().index_mut(i)
    }
}

/// Column-major 4x4 matrix, laid out the way `glUniformMatrix4fv` expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4x4 {
    pub c0: Vec4,
    pub c1: Vec4,
    pub c2: Vec4,
    pub c3: Vec4,
}

impl Mat4x4 {
    /// Same matrix `glOrtho` would build.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fnr = far - near;
        Mat4x4 {
            c0: Vec4::new(2.0 / rl, 0.0, 0.0, 0.0),
            c1: Vec4::new(0.0, 2.0 / tb, 0.0, 0.0),
            c2: Vec4::new(0.0, 0.0, -2.0 / fnr, 0.0),
            c3: Vec4::new(
                -(right + left) / rl,
                -(top + bottom) / tb,
                -(far + near) / fnr,
                1.0,
            ),
        }
    }

    /// Scales the x and y axes before projecting.
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        let mut m = *self;
        for i in 0..4 {
            m.c0[i] *= sx;
            m.c1[i] *= sy;
        }
        m
    }

    pub fn as_array(&self) -> [f32; 16] {
        let mut arr = [0.0; 16];
        for (i, col) in [self.c0, self.c1, self.c2, self.c3].iter().enumerate() {
            arr[i * 4..i * 4 + 4].copy_from_slice(col.as_array());
        }
        arr
    }

    pub fn transform(&self, v: Vec4) -> Vec4 {
        let mut out = Vec4::default();
        for row in 0..4 {
            out[row] = self.c0[row] * v.x
                + self.c1[row] * v.y
                + self.c2[row] * v.z
                + self.c3[row] * v.w;
        }
        out
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Dimension2i {
    pub w: i32,
    pub h: i32,
}

impl Dimension2i {
    pub const fn new(w: i32, h: i32) -> Self {
        Dimension2i { w, h }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    pub const GREEN: Color = Color::rgba(0, 255, 0, 255);
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    pub const YELLOW: Color = Color::rgba(255, 255, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub fn from_f32(rgba: [f32; 4]) -> Self {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::rgba(c(rgba[0]), c(rgba[1]), c(rgba[2]), c(rgba[3]))
    }

    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn ortho_maps_window_corners_to_ndc() {
        // y axis is inverted: top-left of the window is (-1, 1) in clip space
        let m = Mat4x4::orthographic(0.0, 800.0, 600.0, 0.0, -1.0, 1.0);

        let top_left = m.transform(Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert!(approx(top_left.x, -1.0) && approx(top_left.y, 1.0));

        let bottom_right = m.transform(Vec4::new(800.0, 600.0, 0.0, 1.0));
        assert!(approx(bottom_right.x, 1.0) && approx(bottom_right.y, -1.0));
    }

    #[test]
    fn mat_array_is_column_major() {
        let m = Mat4x4::orthographic(0.0, 2.0, 2.0, 0.0, -1.0, 1.0);
        let arr = m.as_array();
        // translation lives in the last column
        assert!(approx(arr[12], -1.0));
        assert!(approx(arr[13], 1.0));
        assert!(approx(arr[15], 1.0));
    }

    #[test]
    fn scaled_doubles_x() {
        let m = Mat4x4::orthographic(0.0, 800.0, 600.0, 0.0, -1.0, 1.0).scaled(2.0, 1.0);
        let p = m.transform(Vec4::new(200.0, 0.0, 0.0, 1.0));
        assert!(approx(p.x, 0.0));
    }

    #[test]
    fn color_float_conversion() {
        assert_eq!(Color::from_f32([1.0, 0.0, 0.5, 1.0]), Color::rgba(255, 0, 128, 255));
        assert_eq!(Color::WHITE.to_f32_array(), [1.0; 4]);
    }
}
