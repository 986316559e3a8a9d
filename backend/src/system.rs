use super::config::WindowConfig;
use super::error::{EngineError, EngineResult};
use super::glutils::print_opengl_info;
use super::math::{Dimension2i, Point2};
use super::texture::decode_image;
use super::timing::SdlClock;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::messagebox::{show_simple_message_box, MessageBoxFlag};
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::surface::Surface;
use sdl2::video::{FullscreenType, GLProfile, SwapInterval, WindowPos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonId {
    // x, y
    Left(i32, i32),
    Right(i32, i32),
    Middle(i32, i32),
    Other(i32, i32),
}

impl MouseButtonId {
    fn new(button: MouseButton, x: i32, y: i32) -> Self {
        match button {
            MouseButton::Left => MouseButtonId::Left(x, y),
            MouseButton::Right => MouseButtonId::Right(x, y),
            MouseButton::Middle => MouseButtonId::Middle(x, y),
            _ => MouseButtonId::Other(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoEvents {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
    // x, y, xrel, yrel
    MouseMotion(i32, i32, i32, i32),
    MouseButtonUp(MouseButtonId),
    MouseButtonDown(MouseButtonId),
    // dx, dy (usually -1 or 1 based on direction)
    MouseWheel(i32, i32),
    // new drawable size in pixels
    Resized(i32, i32),
}

/// Maps one SDL event. Key repeats are dropped so a held key reports a
/// single `KeyDown`. `Resized` carries the window size from the event; the
/// caller swaps in the drawable size.
pub fn io_event(event: Event) -> Option<IoEvents> {
    let io = match event {
        Event::Quit { .. }
        | Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } => IoEvents::Quit,
        Event::KeyDown {
            keycode: Some(k),
            repeat: false,
            ..
        } => IoEvents::KeyDown(k),
        Event::KeyUp {
            keycode: Some(k), ..
        } => IoEvents::KeyUp(k),
        Event::MouseMotion {
            x, y, xrel, yrel, ..
        } => IoEvents::MouseMotion(x, y, xrel, yrel),
        Event::MouseButtonDown {
            mouse_btn, x, y, ..
        } => IoEvents::MouseButtonDown(MouseButtonId::new(mouse_btn, x, y)),
        Event::MouseButtonUp {
            mouse_btn, x, y, ..
        } => IoEvents::MouseButtonUp(MouseButtonId::new(mouse_btn, x, y)),
        Event::MouseWheel { x, y, .. } => IoEvents::MouseWheel(x, y),
        Event::Window {
            win_event: WindowEvent::SizeChanged(w, h),
            ..
        } => IoEvents::Resized(w, h),
        _ => return None,
    };
    Some(io)
}

/// Window, GL context and input for the lifetime of the game.
///
/// Anything holding GL objects must be dropped before this.
pub struct System {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    // kept alive, never read
    _gl_ctx: sdl2::video::GLContext,
    timer: sdl2::TimerSubsystem,
    event_pump: sdl2::EventPump,
    pub events: Vec<IoEvents>,
}

impl System {
    pub fn new(cfg: &WindowConfig) -> EngineResult<System> {
        let sdl_context = sdl2::init().map_err(|e| EngineError::new("Failed to init SDL", e))?;
        let video_subsystem = sdl_context
            .video()
            .map_err(|e| EngineError::new("Failed to init SDL video", e))?;
        let timer = sdl_context
            .timer()
            .map_err(|e| EngineError::new("Failed to init SDL timer", e))?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let mut builder = video_subsystem.window(&cfg.title, cfg.width, cfg.height);
        builder.opengl().position_centered();
        if cfg.resizable {
            builder.resizable();
        }
        let window = builder
            .build()
            .map_err(|e| EngineError::new("Failed to create window", e.to_string()))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(|e| EngineError::new("Failed to create OpenGL context", e))?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
        if !gl::Viewport::is_loaded() || !gl::CreateShader::is_loaded() {
            return Err(EngineError::new(
                "Failed to load OpenGL functions",
                sdl2::get_error(),
            ));
        }
        window
            .gl_make_current(&gl_ctx)
            .map_err(|e| EngineError::new("Failed to make OpenGL context current", e))?;

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (3, 3));

        let event_pump = sdl_context
            .event_pump()
            .map_err(|e| EngineError::new("Failed to create event pump", e))?;

        print_opengl_info();

        let mut system = System {
            sdl_context,
            video_subsystem,
            window,
            _gl_ctx: gl_ctx,
            timer,
            event_pump,
            events: Vec::new(),
        };
        system.set_vertical_sync(cfg.vsync);
        if let Some(icon) = &cfg.icon {
            system.set_window_icon(icon);
        }
        if cfg.fullscreen {
            system.set_fullscreen(true);
        }
        Ok(system)
    }

    /// Drains pending events into `events`. Returns false once the user
    /// asked to quit.
    pub fn process_io_events(&mut self) -> bool {
        self.events.clear();
        let mut running = true;

        for event in self.event_pump.poll_iter() {
            let io = match io_event(event) {
                Some(IoEvents::Resized(..)) => {
                    let (w, h) = self.window.drawable_size();
                    IoEvents::Resized(w as i32, h as i32)
                }
                Some(io) => io,
                None => continue,
            };
            if io == IoEvents::Quit {
                running = false;
            }
            self.events.push(io);
        }
        running
    }

    pub fn is_key_pressed(&self, key: Scancode) -> bool {
        self.event_pump.keyboard_state().is_scancode_pressed(key)
    }

    /// Cursor position in window coordinates, origin top-left.
    pub fn mouse_position(&self) -> Point2 {
        let state = self.event_pump.mouse_state();
        Point2::new(state.x() as f32, state.y() as f32)
    }

    pub fn timer(&self) -> SdlClock {
        SdlClock::new(self.timer.clone())
    }

    pub fn set_window_title(&mut self, title: &str) {
        if let Err(e) = self.window.set_title(title) {
            log::warn!("Failed to set window title {:?}: {}", title, e);
            return;
        }
        log::debug!("Set window title to: {}", title);
    }

    /// Logs and leaves the icon unchanged if the image cannot be read.
    pub fn set_window_icon(&mut self, filename: &str) {
        let mut img = match decode_image(filename) {
            Ok(img) => img,
            Err(e) => {
                log::error!("Failed to load icon: {}", e);
                return;
            }
        };
        let pitch = img.width * 4;
        match Surface::from_data(
            &mut img.pixels,
            img.width,
            img.height,
            pitch,
            PixelFormatEnum::RGBA32,
        ) {
            Ok(icon) => {
                self.window.set_icon(icon);
                log::debug!("Set window icon to {}", filename);
            }
            Err(e) => log::error!("Failed to create icon surface for {}: {}", filename, e),
        };
    }

    pub fn set_fullscreen(&mut self, on: bool) {
        let mode = if on {
            FullscreenType::Desktop
        } else {
            FullscreenType::Off
        };
        if let Err(e) = self.window.set_fullscreen(mode) {
            log::warn!("Failed to change fullscreen mode: {}", e);
        }
        if !on {
            self.window.maximize();
        }
    }

    pub fn set_vertical_sync(&mut self, on: bool) {
        let interval = if on {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        match self.video_subsystem.gl_set_swap_interval(interval) {
            Ok(()) => log::debug!("Current VSYNC: {}", on),
            Err(e) => log::warn!("Failed to set VSYNC: {}", e),
        }
    }

    /// Resizes and re-centres the window.
    pub fn set_window_size(&mut self, w: u32, h: u32) {
        if let Err(e) = self.window.set_size(w, h) {
            log::warn!("Failed to set window size {}x{}: {}", w, h, e);
            return;
        }
        self.window.set_position(WindowPos::Centered, WindowPos::Centered);
        log::debug!("Set window size to {}x{}", w, h);
    }

    pub fn current_window_size(&self) -> Dimension2i {
        let (w, h) = self.window.size();
        Dimension2i::new(w as i32, h as i32)
    }

    /// Size of the GL framebuffer, which differs from the window size on
    /// high-DPI displays.
    pub fn drawable_size(&self) -> Dimension2i {
        let (w, h) = self.window.drawable_size();
        Dimension2i::new(w as i32, h as i32)
    }

    /// Size of the primary display, or (0, 0) if SDL cannot tell.
    pub fn maximum_window_size(&self) -> Dimension2i {
        match self.video_subsystem.current_display_mode(0) {
            Ok(mode) => Dimension2i::new(mode.w, mode.h),
            Err(e) => {
                log::warn!("Failed to get display mode: {}", e);
                Dimension2i::default()
            }
        }
    }

    pub fn show_info_message_box(&self, info: &str, title: &str) {
        if let Err(e) =
            show_simple_message_box(MessageBoxFlag::INFORMATION, title, info, &self.window)
        {
            log::error!("Failed to show message box: {}", e);
        }
    }

    pub fn show_screen(&mut self) {
        self.window.gl_swap_window();
    }
}
