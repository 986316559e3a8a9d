use super::error::{EngineError, EngineResult};
use super::glutils::*;
use super::math::{Mat4x4, Rect};
use super::primitives::ShapeVertex;
use super::shaders::ShaderProgram;
use super::texture::Texture;
use gl::types::GLenum;

const SHAPE_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec2 position;
layout (location = 2) in vec4 color;
uniform mat4 projection;
out vec4 vColor;
void main() {
    gl_Position = projection * vec4(position, 0.0, 1.0);
    vColor = color;
}
"#;

const SHAPE_FRAGMENT_SHADER: &str = r#"#version 330 core
in vec4 vColor;
out vec4 FragColor;
void main() {
    FragColor = vColor;
}
"#;

const TEXTURED_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec2 position;
layout (location = 1) in vec2 texCoord;
uniform mat4 projection;
out vec2 vTexCoord;
void main() {
    gl_Position = projection * vec4(position, 0.0, 1.0);
    vTexCoord = texCoord;
}
"#;

const TEXTURED_FRAGMENT_SHADER: &str = r#"#version 330 core
in vec2 vTexCoord;
out vec4 FragColor;
uniform sampler2D image;
uniform vec4 tint;
void main() {
    FragColor = texture(image, vTexCoord) * tint;
}
"#;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrimitiveMode {
    Lines,
    Triangles,
}

impl PrimitiveMode {
    fn gl_mode(self) -> GLenum {
        match self {
            PrimitiveMode::Lines => gl::LINES,
            PrimitiveMode::Triangles => gl::TRIANGLES,
        }
    }
}

/// CPU side of the shape batch: vertices of one primitive mode waiting for a
/// draw call.
#[derive(Debug, Default)]
pub struct ShapeBatch {
    mode: Option<PrimitiveMode>,
    vertices: Vec<ShapeVertex>,
}

impl ShapeBatch {
    /// Queues vertices. Returns the previous batch if the mode changed and it
    /// has to be drawn first.
    pub fn push(
        &mut self,
        mode: PrimitiveMode,
        vertices: &[ShapeVertex],
    ) -> Option<(PrimitiveMode, Vec<ShapeVertex>)> {
        let flushed = match self.mode {
            Some(m) if m != mode => self.take(),
            _ => None,
        };
        self.mode = Some(mode);
        self.vertices.extend_from_slice(vertices);
        flushed
    }

    pub fn take(&mut self) -> Option<(PrimitiveMode, Vec<ShapeVertex>)> {
        let mode = self.mode.take()?;
        if self.vertices.is_empty() {
            return None;
        }
        Some((mode, std::mem::take(&mut self.vertices)))
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Buffered submission of flat-colored shapes.
pub struct ShapeRenderer {
    program: ShaderProgram,
    vao: VertexArray,
    batch: ShapeBatch,
}

impl ShapeRenderer {
    pub fn new() -> EngineResult<ShapeRenderer> {
        let program = ShaderProgram::from_str(SHAPE_VERTEX_SHADER, SHAPE_FRAGMENT_SHADER)
            .map_err(|e| EngineError::new("Failed to build shape shader", e.to_string()))?;

        Ok(ShapeRenderer {
            program,
            vao: VertexArray::new(&[(0, 2), (2, 4)]),
            batch: ShapeBatch::default(),
        })
    }

    pub fn set_projection(&mut self, projection: &Mat4x4) {
        self.flush();
        self.program.use_program();
        self.program.set_mat4("projection", projection);
        unsafe { gl::UseProgram(0) };
    }

    pub fn submit(&mut self, mode: PrimitiveMode, vertices: &[ShapeVertex]) {
        if let Some((m, v)) = self.batch.push(mode, vertices) {
            self.draw_shapes(m, &v);
        }
    }

    pub fn flush(&mut self) {
        if let Some((m, v)) = self.batch.take() {
            self.draw_shapes(m, &v);
        }
    }

    fn draw_shapes(&self, mode: PrimitiveMode, vertices: &[ShapeVertex]) {
        self.program.use_program();
        self.vao.bind();
        gl_buffer_data_arr_dyn(vertices);
        unsafe { gl::DrawArrays(mode.gl_mode(), 0, vertices.len() as i32) };
        self.vao.unbind();
        check_gl_err("draw shapes");
    }
}

/// Two triangles covering `rect`, as x, y, u, v. The top edge samples the
/// first image row.
pub fn textured_quad_vertices(rect: &Rect) -> [f32; 24] {
    let (l, t, r, b) = (rect.x, rect.y, rect.x + rect.w, rect.y + rect.h);
    #[rustfmt::skip]
    let vertices = [
        l, t, 0.0, 0.0,
        r, t, 1.0, 0.0,
        r, b, 1.0, 1.0,
        r, b, 1.0, 1.0,
        l, b, 0.0, 1.0,
        l, t, 0.0, 0.0,
    ];
    vertices
}

/// Draws textures stretched over rectangles, one quad per call.
pub struct TexturedQuadRenderer {
    program: ShaderProgram,
    vao: VertexArray,
}

impl TexturedQuadRenderer {
    pub fn new() -> EngineResult<TexturedQuadRenderer> {
        let program = ShaderProgram::from_str(TEXTURED_VERTEX_SHADER, TEXTURED_FRAGMENT_SHADER)
            .map_err(|e| EngineError::new("Failed to build texture shader", e.to_string()))?;

        Ok(TexturedQuadRenderer {
            program,
            vao: VertexArray::new(&[(0, 2), (1, 2)]),
        })
    }

    pub fn set_projection(&mut self, projection: &Mat4x4) {
        self.program.use_program();
        self.program.set_mat4("projection", projection);
        self.program.set_i32("image", 0);
        unsafe { gl::UseProgram(0) };
    }

    /// Draws `texture` over `rect`, modulated by `tint`. Pending shapes must
    /// be flushed first.
    pub fn draw(&self, texture: &Texture, rect: &Rect, tint: [f32; 4]) {
        let vertices = textured_quad_vertices(rect);

        self.program.use_program();
        self.program.set_vec4("tint", tint);
        texture.bind(0);
        self.vao.bind();
        gl_buffer_data_arr_dyn(&vertices);
        unsafe {
            gl::DrawArrays(gl::TRIANGLES, 0, 6);
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }
        self.vao.unbind();
        check_gl_err("draw texture");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Color, Point2};

    fn vertex() -> ShapeVertex {
        ShapeVertex::new(Point2::new(1.0, 2.0), Color::WHITE)
    }

    #[test]
    fn same_mode_accumulates() {
        let mut batch = ShapeBatch::default();
        assert!(batch.push(PrimitiveMode::Lines, &[vertex(), vertex()]).is_none());
        assert!(batch.push(PrimitiveMode::Lines, &[vertex(), vertex()]).is_none());
        assert_eq!(batch.len(), 4);
    }

    #[test]
    fn mode_change_hands_back_previous_batch() {
        let mut batch = ShapeBatch::default();
        batch.push(PrimitiveMode::Lines, &[vertex(), vertex()]);
        let (mode, verts) = batch.push(PrimitiveMode::Triangles, &[vertex(); 3]).unwrap();
        assert_eq!(mode, PrimitiveMode::Lines);
        assert_eq!(verts.len(), 2);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn take_empties_the_batch() {
        let mut batch = ShapeBatch::default();
        assert!(batch.take().is_none());
        batch.push(PrimitiveMode::Triangles, &[vertex(); 3]);
        assert!(batch.take().is_some());
        assert!(batch.is_empty());
        assert!(batch.take().is_none());
    }

    #[test]
    fn textured_quad_spans_rect() {
        let v = textured_quad_vertices(&Rect::new(10.0, 20.0, 30.0, 40.0));
        let corners: Vec<(f32, f32, f32, f32)> =
            v.chunks(4).map(|c| (c[0], c[1], c[2], c[3])).collect();
        assert_eq!(corners.len(), 6);
        // top-left maps to the first texel, bottom-right to the last
        assert!(corners.contains(&(10.0, 20.0, 0.0, 0.0)));
        assert!(corners.contains(&(40.0, 60.0, 1.0, 1.0)));
        assert!(corners.contains(&(40.0, 20.0, 1.0, 0.0)));
        assert!(corners.contains(&(10.0, 60.0, 0.0, 1.0)));
    }
}
