use super::error::ShaderError;
use super::glutils::*;
use super::math::*;
use gl::types::GLenum;
use gl::*;
use std::ffi::CString;
use std::fs;

/// Reads a shader stage from disk. An empty file counts as a failure.
pub fn read_shader_source(path: &str) -> Result<String, ShaderError> {
    let code = fs::read_to_string(path).map_err(|e| ShaderError::Read {
        path: path.to_string(),
        source: e,
    })?;
    if code.trim().is_empty() {
        return Err(ShaderError::EmptySource);
    }
    log::trace!("shader source {}:\n{}", path, code);
    Ok(code)
}

fn stage_name(shader_type: GLenum) -> &'static str {
    match shader_type {
        VERTEX_SHADER => "vertex",
        FRAGMENT_SHADER => "fragment",
        GEOMETRY_SHADER => "geometry",
        _ => "unknown",
    }
}

/// Compiles one stage and returns the shader object id.
pub fn compile_shader(shader_type: GLenum, shader_code: &str) -> Result<u32, ShaderError> {
    if shader_code.trim().is_empty() {
        return Err(ShaderError::EmptySource);
    }
    let stage = stage_name(shader_type);

    let shader_id = unsafe { gl::CreateShader(shader_type) };
    if shader_id == 0 {
        return Err(ShaderError::CreateShader(stage));
    }

    unsafe {
        gl::ShaderSource(
            shader_id,
            1,
            &(shader_code.as_bytes().as_ptr().cast()),
            &(shader_code.len() as i32),
        );
        gl::CompileShader(shader_id);
    }

    // check if there are compilation errors
    let mut success = 0;
    unsafe {
        gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success);
    }

    if success == 0 {
        let log = shader_info_log(shader_id);
        unsafe { gl::DeleteShader(shader_id) };
        return Err(ShaderError::Compile { stage, log });
    }
    Ok(shader_id)
}

fn shader_info_log(shader_id: u32) -> String {
    let mut log_len = 0_i32;
    unsafe { gl::GetShaderiv(shader_id, INFO_LOG_LENGTH, &mut log_len) };
    let mut v: Vec<u8> = vec![0; log_len.max(1) as usize];
    let mut written = 0_i32;
    unsafe {
        gl::GetShaderInfoLog(shader_id, v.len() as i32, &mut written, v.as_mut_ptr().cast());
    }
    v.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&v).into_owned()
}

fn program_info_log(program_id: u32) -> String {
    let mut log_len = 0_i32;
    unsafe { gl::GetProgramiv(program_id, INFO_LOG_LENGTH, &mut log_len) };
    let mut v: Vec<u8> = vec![0; log_len.max(1) as usize];
    let mut written = 0_i32;
    unsafe {
        gl::GetProgramInfoLog(program_id, v.len() as i32, &mut written, v.as_mut_ptr().cast());
    }
    v.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&v).into_owned()
}

/// A linked vertex + fragment program. Deleted on drop.
#[derive(Debug)]
pub struct ShaderProgram {
    program_id: u32,
}

impl ShaderProgram {
    pub fn from_files(
        vertex_file: &str,
        fragment_file: &str,
    ) -> Result<ShaderProgram, ShaderError> {
        let vertex_code = read_shader_source(vertex_file)?;
        let fragment_code = read_shader_source(fragment_file)?;
        Self::from_str(&vertex_code, &fragment_code)
    }

    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<ShaderProgram, ShaderError> {
        if vertex_code.trim().is_empty() || fragment_code.trim().is_empty() {
            return Err(ShaderError::EmptySource);
        }

        let vertex_shader = compile_shader(VERTEX_SHADER, vertex_code)?;
        let fragment_shader = match compile_shader(FRAGMENT_SHADER, fragment_code) {
            Ok(s) => s,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex_shader) };
                return Err(e);
            }
        };

        let delete_shaders = || unsafe {
            gl::DeleteShader(vertex_shader);
            gl::DeleteShader(fragment_shader);
        };

        // create program and link shaders
        let shader_program = unsafe { gl::CreateProgram() };
        if shader_program == 0 {
            delete_shaders();
            return Err(ShaderError::CreateProgram);
        }
        unsafe {
            gl::AttachShader(shader_program, vertex_shader);
            gl::AttachShader(shader_program, fragment_shader);
            gl::BindAttribLocation(shader_program, 0, c"position".as_ptr());
            gl::BindAttribLocation(shader_program, 1, c"texCoord".as_ptr());
            gl::LinkProgram(shader_program);
        }

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(shader_program, LINK_STATUS, &mut success);
        }
        if success == 0 {
            let log = program_info_log(shader_program);
            unsafe { gl::DeleteProgram(shader_program) };
            delete_shaders();
            return Err(ShaderError::Link { log });
        }

        // not needed anymore
        delete_shaders();

        Ok(ShaderProgram {
            program_id: shader_program,
        })
    }

    pub fn id(&self) -> u32 {
        self.program_id
    }

    fn get_uniform_location(&self, name: &str) -> Option<i32> {
        let c_name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(self.program_id, c_name.as_ptr()) };
        if location == -1 {
            log::trace!(
                "program({}): '{}' is not an active uniform",
                self.program_id,
                name
            );
            return None;
        }
        Some(location)
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
        check_gl_err("use_program");
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_i32(name, i32::from(value));
    }

    pub fn set_i32(&self, name: &str, value: i32) {
        if let Some(location) = self.get_uniform_location(name) {
            unsafe { gl::Uniform1i(location, value) };
        }
    }

    pub fn set_f32(&self, name: &str, value: f32) {
        if let Some(location) = self.get_uniform_location(name) {
            unsafe { gl::Uniform1f(location, value) };
        }
    }

    pub fn set_vec2(&self, name: &str, v: Vec2) {
        if let Some(location) = self.get_uniform_location(name) {
            unsafe { gl::Uniform2f(location, v.x, v.y) };
        }
    }

    pub fn set_vec4(&self, name: &str, v: [f32; 4]) {
        if let Some(location) = self.get_uniform_location(name) {
            unsafe { gl::Uniform4f(location, v[0], v[1], v[2], v[3]) };
        }
    }

    pub fn set_mat4(&self, name: &str, mat: &Mat4x4) {
        if let Some(location) = self.get_uniform_location(name) {
            let arr = mat.as_array();
            unsafe { gl::UniformMatrix4fv(location, 1, FALSE, arr.as_ptr()) };
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}
