use gl::{types::*, *};
use std::ffi::CStr;

pub fn gl_error_name(err: GLenum) -> &'static str {
    match err {
        INVALID_ENUM => "GL_INVALID_ENUM",
        INVALID_VALUE => "GL_INVALID_VALUE",
        INVALID_OPERATION => "GL_INVALID_OPERATION",
        INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}

/// Logs and clears every pending GL error. Returns false if there was any.
pub fn check_gl_err(what: &str) -> bool {
    let mut clean = true;
    loop {
        let err = unsafe { gl::GetError() };
        if err == gl::NO_ERROR {
            return clean;
        }
        clean = false;
        log::error!("{what}: {} (0x{err:x})", gl_error_name(err));
    }
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unknown>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn print_opengl_info() {
    log::info!("GL_VENDOR = {}", gl_string(VENDOR));
    log::info!("GL_RENDERER = {}", gl_string(RENDERER));
    log::info!("GL_VERSION = {}", gl_string(VERSION));

    let mut mtu: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_IMAGE_UNITS, &mut mtu) };
    log::info!("MAX_TEXTURE_IMAGE_UNITS = {}", mtu);
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    gl_buffer_data_arr(buffer, STATIC_DRAW);
}

pub fn gl_buffer_data_arr_dyn<T: Sized>(buffer: &[T]) {
    gl_buffer_data_arr(buffer, STREAM_DRAW);
}

fn gl_buffer_data_arr<T: Sized>(buffer: &[T], usage: GLenum) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            usage,
        )
    };
}

/// `stride` and `pointer` are counted in floats.
pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}

/// A vertex array with a single interleaved float buffer.
pub struct VertexArray {
    vao: u32,
    vbo: u32,
}

impl VertexArray {
    /// `layout` lists (attribute index, float count) in buffer order.
    pub fn new(layout: &[(u32, u32)]) -> VertexArray {
        let (mut vao, mut vbo) = (0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);
            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(ARRAY_BUFFER, vbo);
        }

        let stride: u32 = layout.iter().map(|(_, size)| size).sum();
        let mut offset = 0;
        for (index, size) in layout {
            gl_vertex_attrib_ptr_enab(*index, *size, stride, offset);
            offset += *size as usize;
        }

        unsafe {
            gl::BindVertexArray(0);
            gl::BindBuffer(ARRAY_BUFFER, 0);
        }
        VertexArray { vao, vbo }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::BindBuffer(ARRAY_BUFFER, self.vbo);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::BindVertexArray(0);
            gl::BindBuffer(ARRAY_BUFFER, 0);
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
