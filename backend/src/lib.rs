//! Rendering backend of the X-CUBE 2D engine: an SDL2 window with an OpenGL
//! 3.3 core context, 2D primitives, textures and a spotlight light map.

pub mod config;
pub mod error;
pub mod glutils;
pub mod graphics;
pub mod math;
pub mod primitives;
pub mod renderer;
pub mod shaders;
pub mod spotlight;
pub mod system;
pub mod texture;
pub mod timing;

pub use error::{EngineError, EngineResult};
pub use graphics::Graphics;
pub use system::System;
