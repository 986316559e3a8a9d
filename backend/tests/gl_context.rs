//! Checks that need a real window and GL driver. Run with
//! `cargo test -p xcube-backend -- --ignored` on a machine with a display.
//!
//! SDL only tolerates one video context per process, so everything lives in
//! a single test.

use backend::config::{EngineConfig, SpotlightConfig, WindowConfig};
use backend::math::{Color, Dimension2i, Point2, Rect};
use backend::shaders::{compile_shader, ShaderProgram};
use backend::texture::load_texture;
use backend::{Graphics, System};
use std::fs;

const VALID_VS: &str = "#version 330 core
layout (location = 0) in vec2 position;
void main() { gl_Position = vec4(position, 0.0, 1.0); }
";
const VALID_FS: &str = "#version 330 core\nout vec4 c;\nvoid main() { c = vec4(1.0); }\n";
const BROKEN_FS: &str = "#version 330 core\nvoid main() { this is not glsl }\n";

#[test]
#[ignore = "needs a display and an OpenGL 3.3 driver"]
fn engine_against_real_context() {
    let window = WindowConfig {
        resizable: false,
        ..WindowConfig::default()
    };
    let mut system = System::new(&window).expect("system");

    // shaders
    let vs = compile_shader(gl::VERTEX_SHADER, VALID_VS).expect("vertex shader");
    assert_ne!(vs, 0);
    unsafe { gl::DeleteShader(vs) };
    assert!(compile_shader(gl::FRAGMENT_SHADER, BROKEN_FS).is_err());
    assert!(compile_shader(gl::FRAGMENT_SHADER, "").is_err());

    let program = ShaderProgram::from_str(VALID_VS, VALID_FS).expect("program");
    assert_ne!(program.id(), 0);
    assert!(ShaderProgram::from_str(VALID_VS, BROKEN_FS).is_err());

    // textures
    assert!(load_texture("no/such/texture.png").is_err());
    let mut ppm = b"P6\n2 2\n255\n".to_vec();
    ppm.extend_from_slice(&[255; 12]);
    let path = std::env::temp_dir().join(format!("xcube-gl-{}.ppm", std::process::id()));
    fs::write(&path, &ppm).unwrap();
    let tex = load_texture(path.to_str().unwrap());
    let _ = fs::remove_file(&path);
    let tex = tex.expect("texture");
    assert_ne!(tex.id(), 0);
    assert_eq!((tex.width(), tex.height()), (2, 2));

    // window size getters
    system.set_window_size(640, 480);
    assert_eq!(system.current_window_size(), Dimension2i::new(640, 480));
    system.set_window_size(800, 600);
    assert_eq!(system.current_window_size(), Dimension2i::new(800, 600));

    // a frame through the wrapper, spotlight loaded from the bundled sources
    let dir = env!("CARGO_MANIFEST_DIR");
    let mut cfg = EngineConfig::default();
    cfg.shaders.spotlight_vertex = format!("{dir}/shaders/spotlight.vert");
    cfg.shaders.spotlight_fragment = format!("{dir}/shaders/spotlight.frag");
    let mut gfx = Graphics::new(&system, &cfg, &SpotlightConfig::default()).expect("graphics");
    assert!(gfx.has_spotlight());
    if let Some(spotlight) = gfx.spotlight_mut() {
        spotlight.set_color(Color::BLUE);
        assert_eq!(spotlight.color(), Color::BLUE);
    }

    gfx.set_draw_color(Color::GREEN);
    gfx.clear_screen();
    gfx.draw_texture(&tex, &Rect::new(0.0, 0.0, 64.0, 64.0));
    gfx.draw_rect_colored(&Rect::new(10.0, 10.0, 50.0, 50.0), Color::RED);
    assert_eq!(gfx.draw_color(), Color::GREEN);
    gfx.fill_rect(&Rect::new(100.0, 100.0, 20.0, 20.0));
    gfx.draw_circle(Point2::new(200.0, 200.0), 30.0);
    gfx.draw_ellipse(Point2::new(300.0, 200.0), 40.0, 20.0, Color::YELLOW);
    gfx.draw_spotlight(Point2::new(400.0, 300.0), None);
    gfx.present(&mut system);
    assert!(backend::glutils::check_gl_err("frame"));

    // GL objects go before the context
    drop(program);
    drop(tex);
    drop(gfx);
}
