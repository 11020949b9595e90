use crate::foundation::core::Canvas;
use crate::foundation::error::{SweepError, SweepResult};
use crate::foundation::math::flatten_rgba8_to_rgb8;

/// A rendered or decoded frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha. Rendered frames are; decoded JPEGs are not.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Wrap straight-alpha RGBA8 bytes, checking the buffer length.
    pub fn from_straight(width: u32, height: u32, data: Vec<u8>) -> SweepResult<Self> {
        let frame = Self {
            width,
            height,
            data,
            premultiplied: false,
        };
        frame.check_len()?;
        Ok(frame)
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// RGBA8 at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Flatten over `bg` into tightly packed RGB8, e.g. for JPEG output.
    pub fn to_rgb8(&self, bg: [u8; 3]) -> SweepResult<Vec<u8>> {
        self.check_len()?;
        let mut out = vec![0u8; self.data.len() / 4 * 3];
        flatten_rgba8_to_rgb8(&mut out, &self.data, self.premultiplied, bg);
        Ok(out)
    }

    fn check_len(&self) -> SweepResult<()> {
        if self.data.len() != self.canvas().rgba_len() {
            return Err(SweepError::validation(format!(
                "frame data is {} bytes, expected {} for {}x{} rgba8",
                self.data.len(),
                self.canvas().rgba_len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}
