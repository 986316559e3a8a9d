//! The rendering wrapper the game talks to.
//!
//! `Graphics` keeps the projection, the current draw color and the renderers.
//! It needs a current GL context, so it is built from a [`System`] and must
//! be dropped before it.

use super::config::{EngineConfig, SpotlightConfig};
use super::error::EngineResult;
use super::math::{Color, Dimension2i, Mat4x4, Point2, Rect};
use super::primitives::*;
use super::renderer::{PrimitiveMode, ShapeRenderer, TexturedQuadRenderer};
use super::spotlight::{light_pos_to_gl, Spotlight};
use super::system::System;
use super::texture::{self, Texture};

const CLEAR_COLOR: [f32; 3] = [20.0 / 255.0, 20.0 / 255.0, 20.0 / 255.0];

/// Current draw color plus the rule that temporary overrides put it back.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawColor {
    current: Color,
}

impl DrawColor {
    pub fn get(&self) -> Color {
        self.current
    }

    pub fn set(&mut self, color: Color) {
        self.current = color;
    }

    /// Sets `color` and hands back the one it replaced.
    pub fn replace(&mut self, color: Color) -> Color {
        std::mem::replace(&mut self.current, color)
    }

    /// Runs `f` with `color` as the current color, then restores the old one.
    pub fn with<R>(&mut self, color: Color, f: impl FnOnce(&mut DrawColor) -> R) -> R {
        Self::override_in(self, |dc| dc, color, f)
    }

    /// Same as [`DrawColor::with`] for a draw color living inside `owner`,
    /// so `f` can borrow the whole owner.
    pub fn override_in<T, R>(
        owner: &mut T,
        slot: fn(&mut T) -> &mut DrawColor,
        color: Color,
        f: impl FnOnce(&mut T) -> R,
    ) -> R {
        let saved = slot(owner).replace(color);
        let r = f(owner);
        slot(owner).set(saved);
        r
    }
}

pub struct Graphics {
    shapes: ShapeRenderer,
    textures: TexturedQuadRenderer,
    spotlight: Option<Spotlight>,
    draw_color: DrawColor,
    viewport: Dimension2i,
    draw_scale: (f32, f32),
}

impl Graphics {
    /// Fails only on engine-internal setup. A broken spotlight shader is
    /// logged and leaves the spotlight disabled.
    pub fn new(
        system: &System,
        cfg: &EngineConfig,
        spotlight: &SpotlightConfig,
    ) -> EngineResult<Graphics> {
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }

        let spotlight = match Spotlight::from_files(
            &cfg.shaders.spotlight_vertex,
            &cfg.shaders.spotlight_fragment,
            spotlight.clone(),
        ) {
            Ok(s) => Some(s),
            Err(e) => {
                log::error!("spotlight disabled: {}", e);
                None
            }
        };

        let mut gfx = Graphics {
            shapes: ShapeRenderer::new()?,
            textures: TexturedQuadRenderer::new()?,
            spotlight,
            draw_color: DrawColor::default(),
            viewport: Dimension2i::default(),
            draw_scale: (1.0, 1.0),
        };
        gfx.set_viewport(system.drawable_size());
        gfx.set_draw_color(Color::WHITE);
        Ok(gfx)
    }

    pub fn viewport(&self) -> Dimension2i {
        self.viewport
    }

    /// Call after the window resizes so pixel coordinates keep matching.
    pub fn set_viewport(&mut self, size: Dimension2i) {
        self.viewport = size;
        unsafe { gl::Viewport(0, 0, size.w, size.h) };
        self.update_projection();
    }

    pub fn set_draw_scale(&mut self, sx: f32, sy: f32) {
        self.draw_scale = (sx, sy);
        self.update_projection();
    }

    fn update_projection(&mut self) {
        // y axis points down, like window coordinates
        let (w, h) = (self.viewport.w as f32, self.viewport.h as f32);
        let projection = Mat4x4::orthographic(0.0, w, h, 0.0, -1.0, 1.0)
            .scaled(self.draw_scale.0, self.draw_scale.1);
        self.shapes.set_projection(&projection);
        self.textures.set_projection(&projection);
    }

    pub fn clear_screen(&mut self) {
        unsafe {
            gl::ClearColor(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// Flushes pending shapes and swaps buffers.
    pub fn present(&mut self, system: &mut System) {
        self.shapes.flush();
        system.show_screen();
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color.get()
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color.set(color);
    }

    /// Draws with `color` inside `f`; the previous draw color is back
    /// afterwards.
    pub fn with_draw_color<R>(&mut self, color: Color, f: impl FnOnce(&mut Self) -> R) -> R {
        DrawColor::override_in(self, |g| &mut g.draw_color, color, f)
    }

    pub fn draw_rect(&mut self, rect: &Rect) {
        let v = rect_outline(rect, self.draw_color());
        self.shapes.submit(PrimitiveMode::Lines, &v);
    }

    pub fn draw_rect_colored(&mut self, rect: &Rect, color: Color) {
        self.with_draw_color(color, |g| g.draw_rect(rect));
    }

    pub fn fill_rect(&mut self, rect: &Rect) {
        let v = rect_fill(rect, self.draw_color());
        self.shapes.submit(PrimitiveMode::Triangles, &v);
    }

    pub fn fill_rect_colored(&mut self, rect: &Rect, color: Color) {
        self.with_draw_color(color, |g| g.fill_rect(rect));
    }

    pub fn draw_circle(&mut self, center: Point2, radius: f32) {
        self.draw_ellipse(center, radius, radius, self.draw_color());
    }

    pub fn fill_circle(&mut self, center: Point2, radius: f32) {
        self.fill_ellipse(center, radius, radius);
    }

    pub fn draw_ellipse(&mut self, center: Point2, radius_x: f32, radius_y: f32, color: Color) {
        let v = ellipse_outline(center, radius_x, radius_y, color);
        self.shapes.submit(PrimitiveMode::Lines, &v);
    }

    pub fn fill_ellipse(&mut self, center: Point2, radius_x: f32, radius_y: f32) {
        let v = ellipse_fill(center, radius_x, radius_y, self.draw_color());
        self.shapes.submit(PrimitiveMode::Triangles, &v);
    }

    /// Load failures are logged; the caller decides whether to go on
    /// without the texture.
    pub fn load_texture(&self, filename: &str) -> Option<Texture> {
        match texture::load_texture(filename) {
            Ok(t) => {
                log::debug!("loaded texture {} ({}x{})", filename, t.width(), t.height());
                Some(t)
            }
            Err(e) => {
                log::error!("Failed to load texture: {}", e);
                None
            }
        }
    }

    /// Texture tinted by the current draw color.
    pub fn draw_texture(&mut self, tex: &Texture, rect: &Rect) {
        let tint = self.draw_color().to_f32_array();
        self.shapes.flush();
        self.textures.draw(tex, rect, tint);
    }

    pub fn draw_texture_fullscreen(&mut self, tex: &Texture) {
        let (sx, sy) = self.draw_scale;
        let rect = Rect::new(0.0, 0.0, self.viewport.w as f32 / sx, self.viewport.h as f32 / sy);
        self.draw_texture(tex, &rect);
    }

    pub fn has_spotlight(&self) -> bool {
        self.spotlight.is_some()
    }

    pub fn spotlight_mut(&mut self) -> Option<&mut Spotlight> {
        self.spotlight.as_mut()
    }

    /// Lights the frame drawn so far around `light_pos` (window coordinates,
    /// top-left origin). Does nothing if the spotlight shader failed to load.
    pub fn draw_spotlight(&mut self, light_pos: Point2, normal_map: Option<&Texture>) {
        self.shapes.flush();
        if let Some(spotlight) = &self.spotlight {
            spotlight.draw(light_pos_to_gl(light_pos, self.viewport.h), normal_map);
        }
    }
}
