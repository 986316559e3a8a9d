use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Setup failure the engine cannot continue from.
#[derive(Debug, Error)]
#[error("{message}: {detail}")]
pub struct EngineError {
    pub message: &'static str,
    pub detail: String,
}

impl EngineError {
    pub fn new(message: &'static str, detail: impl Into<String>) -> Self {
        EngineError {
            message,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("error reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("shader source is empty")]
    EmptySource,
    #[error("gl::CreateShader({0}) failed")]
    CreateShader(&'static str),
    #[error("{stage} shader compilation error: {log}")]
    Compile { stage: &'static str, log: String },
    #[error("gl::CreateProgram() failed")]
    CreateProgram,
    #[error("program link error: {log}")]
    Link { log: String },
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("loading image {path} error: {reason}")]
    Decode { path: String, reason: String },
    #[error("{path}: 32-bit float images not supported here")]
    UnsupportedFormat { path: String },
    #[error("texture size {width}x{height} does not match {len} bytes of RGBA data")]
    InvalidSize {
        width: u32,
        height: u32,
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_carries_platform_detail() {
        let err = EngineError::new("Failed to create window", "No available video device");
        assert_eq!(
            err.to_string(),
            "Failed to create window: No available video device"
        );
    }

    #[test]
    fn compile_error_names_stage() {
        let err = ShaderError::Compile {
            stage: "fragment",
            log: "0:1(1): error: syntax error".to_string(),
        };
        assert!(err.to_string().starts_with("fragment shader compilation error"));
    }
}
