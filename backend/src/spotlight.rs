use super::config::SpotlightConfig;
use super::error::ShaderError;
use super::glutils::*;
use super::math::{Color, Point2};
use super::shaders::ShaderProgram;
use super::texture::Texture;
use rand::Rng;

// x, y, u, v; v = 0 is the first image row
#[rustfmt::skip]
const FULLSCREEN_QUAD: [f32; 24] = [
    -1.0, -1.0, 0.0, 1.0, // bottom left
     1.0, -1.0, 1.0, 1.0, // bottom right
    -1.0,  1.0, 0.0, 0.0, // top left

    -1.0,  1.0, 0.0, 0.0, // top left
     1.0, -1.0, 1.0, 1.0, // bottom right
     1.0,  1.0, 1.0, 0.0, // top right
];

const NORMAL_MAP_UNIT: u32 = 1;

/// Random RGB with the given alpha.
pub fn random_light_color<R: Rng>(rng: &mut R, alpha: f32) -> [f32; 4] {
    [rng.gen(), rng.gen(), rng.gen(), alpha]
}

/// Window coordinates (top-left origin) to `gl_FragCoord` space.
pub fn light_pos_to_gl(pos: Point2, viewport_height: i32) -> Point2 {
    Point2::new(pos.x, viewport_height as f32 - pos.y)
}

/// A full-screen light map: everything outside the light radius is
/// darkened towards the ambient color.
pub struct Spotlight {
    program: ShaderProgram,
    quad: VertexArray,
    params: SpotlightConfig,
}

impl Spotlight {
    pub fn from_files(
        vertex_file: &str,
        fragment_file: &str,
        params: SpotlightConfig,
    ) -> Result<Spotlight, ShaderError> {
        let program = ShaderProgram::from_files(vertex_file, fragment_file)?;

        let quad = VertexArray::new(&[(0, 2), (1, 2)]);
        quad.bind();
        gl_buffer_data_arr_stat(&FULLSCREEN_QUAD);
        quad.unbind();

        Ok(Spotlight {
            program,
            quad,
            params,
        })
    }

    pub fn color(&self) -> Color {
        Color::from_f32(self.params.color)
    }

    pub fn set_color(&mut self, color: Color) {
        self.params.color = color.to_f32_array();
    }

    /// Picks a new random light color, keeping the alpha.
    pub fn randomize_color<R: Rng>(&mut self, rng: &mut R) {
        self.params.color = random_light_color(rng, self.params.color[3]);
        log::debug!("spotlight color is now {:?}", self.params.color);
    }

    /// `light_pos` is already in GL coordinates.
    pub fn draw(&self, light_pos: Point2, normal_map: Option<&Texture>) {
        self.program.use_program();
        self.program.set_vec2("lightPos", light_pos);
        self.program.set_f32("lightRadius", self.params.radius);
        self.program.set_f32("lightIntensity", self.params.intensity);
        self.program.set_vec4("lightColor", self.params.color);
        self.program.set_f32("ditheringAmount", self.params.dithering);
        self.program.set_vec4("ambientColor", self.params.ambient);
        self.program.set_bool("useNormalMap", normal_map.is_some());
        if let Some(tex) = normal_map {
            tex.bind(NORMAL_MAP_UNIT);
            self.program.set_i32("normalMap", NORMAL_MAP_UNIT as i32);
        }

        let mut blend = [0_i32; 2];
        unsafe {
            gl::GetIntegerv(gl::BLEND_SRC_RGB, &mut blend[0]);
            gl::GetIntegerv(gl::BLEND_DST_RGB, &mut blend[1]);
            gl::BlendFunc(gl::DST_COLOR, gl::ZERO);
        }

        self.quad.bind();
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, 6) };
        self.quad.unbind();

        unsafe {
            gl::BlendFunc(blend[0] as u32, blend[1] as u32);
            if normal_map.is_some() {
                gl::BindTexture(gl::TEXTURE_2D, 0);
                gl::ActiveTexture(gl::TEXTURE0);
            }
            gl::UseProgram(0);
        }
        check_gl_err("draw spotlight");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn light_position_is_flipped() {
        let p = light_pos_to_gl(Point2::new(100.0, 150.0), 600);
        assert_eq!(p, Point2::new(100.0, 450.0));
    }

    #[test]
    fn quad_covers_clip_space() {
        let xs: Vec<f32> = FULLSCREEN_QUAD.chunks(4).map(|v| v[0]).collect();
        let ys: Vec<f32> = FULLSCREEN_QUAD.chunks(4).map(|v| v[1]).collect();
        assert_eq!(xs.len(), 6);
        assert!(xs.contains(&-1.0) && xs.contains(&1.0));
        assert!(ys.contains(&-1.0) && ys.contains(&1.0));
    }

    #[test]
    fn random_colors_keep_alpha() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors: Vec<[f32; 4]> = (0..16).map(|_| random_light_color(&mut rng, 0.5)).collect();
        for c in &colors {
            assert!(c[..3].iter().all(|v| (0.0..1.0).contains(v)));
            assert_eq!(c[3], 0.5);
        }
        assert_ne!(colors[0], colors[1]);
    }
}
