use std::any::Any;

use crate::backend::ImageResource;

/// Errors from building a [`PixelBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelBufferError {
    #[error("pixel buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    TooSmall {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Owned RGBA8 image with a tightly packed stride of `width * 4`.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, PixelBufferError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() < expected {
            return Err(PixelBufferError::TooSmall {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A `width` x `height` image filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let pixels = rgba.iter().copied().cycle().take(count * 4).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[offset..offset + 4].copy_from_slice(&rgba);
    }
}

impl ImageResource for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> Option<&[u8]> {
        Some(&self.pixels)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.pixels.len())
            .finish()
    }
}
