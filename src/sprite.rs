use crate::error::LookupError;
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use reqwest::Client;
use tracing::debug;

const THUMB_W: u32 = 48;
const THUMB_H: u32 = 48;

/// Pixels below this alpha are left unpainted.
const ALPHA_CUTOFF: u8 = 128;

/// Compact RGBA thumbnail of a downloaded sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteThumb {
    pub w: u32,
    pub h: u32,
    /// RGBA pixels in row-major order (len = w*h*4)
    pub pixels: Vec<u8>,
}

impl SpriteThumb {
    pub fn from_image(img: &DynamicImage) -> Self {
        let small = image::imageops::resize(&img.to_rgba8(), THUMB_W, THUMB_H, FilterType::Nearest);
        Self {
            w: small.width(),
            h: small.height(),
            pixels: small.into_raw(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LookupError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&img))
    }

    /// Pixel rows sized `w` x `h`; `None` marks a transparent cell.
    ///
    /// Returns the stored thumbnail directly when the size matches, otherwise
    /// resizes in memory from the thumbnail.
    pub fn pixels(&self, w: u32, h: u32) -> Vec<Vec<Option<(u8, u8, u8)>>> {
        let resized;
        let (src, sw, sh) = if self.w == w && self.h == h {
            (self.pixels.as_slice(), self.w, self.h)
        } else {
            let buf = match RgbaImage::from_raw(self.w, self.h, self.pixels.clone()) {
                Some(buf) => buf,
                None => return Vec::new(),
            };
            resized = image::imageops::resize(&buf, w.max(1), h.max(1), FilterType::Nearest);
            (resized.as_raw().as_slice(), resized.width(), resized.height())
        };

        let mut rows = Vec::with_capacity(sh as usize);
        for y in 0..sh {
            let mut row = Vec::with_capacity(sw as usize);
            for x in 0..sw {
                let idx = ((y * sw + x) * 4) as usize;
                let px = &src[idx..idx + 4];
                row.push(if px[3] < ALPHA_CUTOFF {
                    None
                } else {
                    Some((px[0], px[1], px[2]))
                });
            }
            rows.push(row);
        }
        rows
    }
}

/// Downloads sprite images for display.
#[derive(Debug, Clone)]
pub struct SpriteLoader {
    client: Client,
}

impl SpriteLoader {
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn load(&self, url: &str) -> Result<SpriteThumb, LookupError> {
        debug!(%url, "downloading sprite");
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let bytes = res.bytes().await?;
        SpriteThumb::from_bytes(&bytes)
    }
}
