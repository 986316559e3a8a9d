use super::error::TextureError;
use super::glutils::check_gl_err;
use gl::{types::*, *};
use stb_image::image::LoadResult;

/// Decoded RGBA8 pixels, first row at the top.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub fn decode_image(filename: &str) -> Result<Image, TextureError> {
    unsafe {
        stb_image::stb_image::stbi_set_flip_vertically_on_load(0);
    }
    let img = match stb_image::image::load_with_depth(filename, 4, false) {
        LoadResult::ImageU8(img) => img,
        LoadResult::ImageF32(_) => {
            return Err(TextureError::UnsupportedFormat {
                path: filename.to_string(),
            })
        }
        LoadResult::Error(e) => {
            return Err(TextureError::Decode {
                path: filename.to_string(),
                reason: e,
            })
        }
    };
    Ok(Image {
        width: img.width as u32,
        height: img.height as u32,
        pixels: img.data,
    })
}

/// A 2D GL texture. The GL object is released on drop.
#[derive(Debug)]
pub struct Texture {
    id: u32,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn from_image(img: &Image) -> Result<Texture, TextureError> {
        Self::from_rgba(img.width, img.height, &img.pixels)
    }

    pub fn from_rgba(width: u32, height: u32, pixels: &[u8]) -> Result<Texture, TextureError> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize * 4 {
            return Err(TextureError::InvalidSize {
                width,
                height,
                len: pixels.len(),
            });
        }

        let params: [(GLenum, GLenum); 4] = [
            (TEXTURE_WRAP_S, CLAMP_TO_EDGE),
            (TEXTURE_WRAP_T, CLAMP_TO_EDGE),
            (TEXTURE_MIN_FILTER, LINEAR),
            (TEXTURE_MAG_FILTER, LINEAR),
        ];

        let mut texture = 0;
        unsafe {
            gl::GenTextures(1, &mut texture);
            gl::BindTexture(TEXTURE_2D, texture);
            for (n, p) in params {
                gl::TexParameteri(TEXTURE_2D, n, p as i32);
            }
            gl::PixelStorei(UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                TEXTURE_2D,
                0,
                RGBA as i32,
                width as i32,
                height as i32,
                0,
                RGBA,
                UNSIGNED_BYTE,
                pixels.as_ptr().cast(),
            );
            gl::BindTexture(TEXTURE_2D, 0);
        }
        check_gl_err("texture upload");

        Ok(Texture {
            id: texture,
            width,
            height,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bind(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(TEXTURE0 + unit);
            gl::BindTexture(TEXTURE_2D, self.id);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

/// Decodes `filename` and uploads it. Nothing touches GL if decoding fails.
pub fn load_texture(filename: &str) -> Result<Texture, TextureError> {
    let img = decode_image(filename)?;
    Texture::from_image(&img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn nonexistent_file_fails() {
        let err = decode_image("res/tex/does_not_exist.png").unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
        assert!(load_texture("res/tex/does_not_exist.png").is_err());
    }

    #[test]
    fn decodes_to_rgba() {
        // 2x1 binary PPM: one red pixel, one blue pixel
        let mut ppm = b"P6\n2 1\n255\n".to_vec();
        ppm.extend_from_slice(&[255, 0, 0, 0, 0, 255]);
        let path = std::env::temp_dir().join(format!("xcube-tex-{}.ppm", std::process::id()));
        fs::write(&path, &ppm).unwrap();

        let img = decode_image(path.to_str().unwrap());
        let _ = fs::remove_file(&path);
        let img = img.unwrap();

        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixels, vec![255, 0, 0, 255, 0, 0, 255, 255]);
    }

    #[test]
    fn wrong_pixel_count_rejected_before_upload() {
        let err = Texture::from_rgba(2, 2, &[0; 4]).unwrap_err();
        assert!(matches!(err, TextureError::InvalidSize { len: 4, .. }));
    }
}
