use crate::config::{GameConfig, KeysConfig};
use backend::math::{Color, Dimension2i, Point2, Vec2};
use backend::system::IoEvents;
use backend::texture::Texture;
use backend::timing::{Clock, FrameLimiter, SdlClock};
use backend::{EngineResult, Graphics, System};
use rand::Rng;
use sdl2::keyboard::{Keycode, Scancode};

const SPEED: f32 = 10.0;
const KEY_RADIUS: f32 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GameKey {
    pub pos: Point2,
    pub alive: bool,
}

pub fn spawn_keys<R: Rng>(cfg: &KeysConfig, rng: &mut R) -> Vec<GameKey> {
    (0..cfg.count)
        .map(|_| GameKey {
            pos: Point2::new(rng.gen_range(0.0..cfg.area_w), rng.gen_range(0.0..cfg.area_h)),
            alive: true,
        })
        .collect()
}

/// Directional keys pressed this frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Velocity in window coordinates (y down). Keys left untouched keep their
/// axis as it was.
pub fn steer(mut velocity: Vec2, dirs: Directions) -> Vec2 {
    if dirs.up {
        velocity.y = -SPEED;
    }
    if dirs.down {
        velocity.y = SPEED;
    }
    if dirs.left {
        velocity.x = -SPEED;
    }
    if dirs.right {
        velocity.x = SPEED;
    }
    velocity
}

pub struct SpotlightGame {
    // GL resources first: they must drop before `system`
    background: Option<Texture>,
    background_normal: Option<Texture>,
    gfx: Graphics,
    system: System,
    limiter: FrameLimiter<SdlClock>,
    frame_delay: u32,
    title: String,
    keys: Vec<GameKey>,
    light_pos: Point2,
    light_offset: Vec2,
    velocity: Vec2,
    rng: rand::rngs::ThreadRng,
}

impl SpotlightGame {
    pub fn new(cfg: &GameConfig) -> EngineResult<SpotlightGame> {
        let system = System::new(&cfg.engine.window)?;
        let gfx = Graphics::new(&system, &cfg.engine, &cfg.spotlight)?;

        // missing art degrades to a plain background
        let background = gfx.load_texture(&cfg.assets.background);
        let background_normal = gfx.load_texture(&cfg.assets.background_normal);

        let mut rng = rand::thread_rng();
        let keys = spawn_keys(&cfg.keys, &mut rng);
        log::info!("spawned {} keys", keys.len());

        let limiter = FrameLimiter::new(system.timer());
        Ok(SpotlightGame {
            background,
            background_normal,
            gfx,
            system,
            limiter,
            frame_delay: cfg.engine.frame.frame_delay_ms(),
            title: cfg.engine.window.title.clone(),
            keys,
            light_pos: Point2::default(),
            light_offset: Vec2::default(),
            velocity: Vec2::default(),
            rng,
        })
    }

    pub fn run(&mut self) {
        let mut last_title_update = 0;
        loop {
            self.limiter.set_frame_start();
            if !self.system.process_io_events() {
                break;
            }
            self.handle_io_events();
            self.handle_key_events();
            self.update();
            self.render();
            self.limiter.adjust_fps_delay(self.frame_delay);

            let now = self.limiter.clock().ticks_ms();
            if now.wrapping_sub(last_title_update) >= 1000 {
                last_title_update = now;
                let title = format!("{} - {:.0} FPS", self.title, self.limiter.average_fps());
                self.system.set_window_title(&title);
            }
        }
        log::info!("quitting");
    }

    fn handle_io_events(&mut self) {
        for ev in &self.system.events {
            match *ev {
                IoEvents::Resized(w, h) => {
                    log::debug!("viewport resized to {}x{}", w, h);
                    self.gfx.set_viewport(Dimension2i::new(w, h));
                }
                IoEvents::KeyDown(k) if k == Keycode::Space => {
                    if let Some(spotlight) = self.gfx.spotlight_mut() {
                        spotlight.randomize_color(&mut self.rng);
                    }
                }
                _ => {}
            }
        }
    }

    fn handle_key_events(&mut self) {
        let dirs = Directions {
            up: self.system.is_key_pressed(Scancode::W),
            down: self.system.is_key_pressed(Scancode::S),
            left: self.system.is_key_pressed(Scancode::A),
            right: self.system.is_key_pressed(Scancode::D),
        };
        self.velocity = steer(self.velocity, dirs);
    }

    fn update(&mut self) {
        // mouse drives the light; WASD nudges it away from the cursor
        if self.velocity != Vec2::default() {
            self.light_offset = self.light_offset + self.velocity;
            self.velocity = Vec2::default();
        }
        self.light_pos = self.system.mouse_position() + self.light_offset;
    }

    fn render(&mut self) {
        self.gfx.clear_screen();

        if let Some(bg) = &self.background {
            self.gfx.draw_texture_fullscreen(bg);
        }

        for key in self.keys.iter().filter(|k| k.alive) {
            self.gfx.draw_ellipse(key.pos, KEY_RADIUS, KEY_RADIUS, Color::YELLOW);
        }

        self.gfx.draw_spotlight(self.light_pos, self.background_normal.as_ref());
        self.gfx.present(&mut self.system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn keys_spawn_alive_inside_area() {
        let cfg = KeysConfig::default();
        let keys = spawn_keys(&cfg, &mut StdRng::seed_from_u64(1));
        assert_eq!(keys.len(), 5);
        for k in &keys {
            assert!(k.alive);
            assert!((0.0..750.0).contains(&k.pos.x));
            assert!((0.0..550.0).contains(&k.pos.y));
        }
    }

    #[test]
    fn steering_sets_axis_speed() {
        let dirs = Directions {
            up: true,
            right: true,
            ..Default::default()
        };
        let v = steer(Vec2::default(), dirs);
        assert_eq!(v, Vec2::new(SPEED, -SPEED));
    }

    #[test]
    fn later_key_wins_on_same_axis() {
        let dirs = Directions {
            left: true,
            right: true,
            ..Default::default()
        };
        let v = steer(Vec2::default(), dirs);
        assert_eq!(v.x, SPEED);
    }

    #[test]
    fn no_keys_keeps_velocity() {
        let v = steer(Vec2::new(3.0, 4.0), Directions::default());
        assert_eq!(v, Vec2::new(3.0, 4.0));
    }
}
