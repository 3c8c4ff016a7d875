//! Decoded RGBA8 images: material diffuse maps and skybox panoramas.

use std::path::Path;

use anyhow::{Context, Result, ensure};

/// Row-major RGBA8 texels, top row first (as decoded).
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl TextureData {
    pub const BYTES_PER_TEXEL: usize = 4;

    /// Wrap raw RGBA8 texels. Rejects empty images and buffers that don't
    /// hold exactly `width * height` texels.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        ensure!(width > 0 && height > 0, "Empty texture {}x{}", width, height);
        let expected = width as usize * height as usize * Self::BYTES_PER_TEXEL;
        ensure!(
            data.len() == expected,
            "Texture {}x{} needs {} bytes, got {}",
            width,
            height,
            expected,
            data.len()
        );
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode any image file the `image` features cover (PNG, JPEG) to RGBA8.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let rgba = image::open(path)
            .with_context(|| format!("Failed to open image {:?}", path))?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        let texture = Self::from_rgba8(width, height, rgba.into_raw())
            .with_context(|| format!("Unusable image {:?}", path))?;

        log::debug!("Decoded {:?}: {}x{}", path, width, height);
        Ok(texture)
    }

    /// Texel at column `x`, row `y` (row 0 is the top of the image).
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_TEXEL;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.data[offset..offset + Self::BYTES_PER_TEXEL]);
        out
    }

    /// Nearest texel at `(u, v)` with wrap-around addressing.
    /// `v = 0` is the bottom row, as in OBJ texture coordinates.
    pub fn sample_nearest(&self, u: f32, v: f32) -> [u8; 4] {
        let wrap = |t: f32| t - t.floor();
        let x = ((wrap(u) * self.width as f32) as u32).min(self.width - 1);
        let y = (((1.0 - wrap(v)) * self.height as f32) as u32).min(self.height - 1);
        self.texel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const GRAY: [u8; 4] = [128, 128, 128, 255];

    /// 8x8-texel checkerboard, white in the top-left corner.
    fn checkerboard(size: u32) -> TextureData {
        let data = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .flat_map(|(x, y)| if (x / 8 + y / 8) % 2 == 0 { WHITE } else { GRAY })
            .collect();
        TextureData::from_rgba8(size, size, data).expect("checkerboard")
    }

    #[test]
    fn rejects_mismatched_buffers() {
        assert!(TextureData::from_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(TextureData::from_rgba8(0, 4, Vec::new()).is_err());
        assert!(TextureData::from_rgba8(1, 1, vec![1, 2, 3, 4]).is_ok());
    }

    #[test]
    fn texel_addresses_rows_top_down() {
        let data = [[1, 0, 0, 255], [2, 0, 0, 255], [3, 0, 0, 255], [4, 0, 0, 255]].concat();
        let tex = TextureData::from_rgba8(2, 2, data).expect("2x2");
        assert_eq!(tex.texel(1, 0)[0], 2);
        assert_eq!(tex.texel(0, 1)[0], 3);
        // v = 0 is the bottom row.
        assert_eq!(tex.sample_nearest(0.0, 0.0)[0], 3);
        assert_eq!(tex.sample_nearest(0.75, 0.75)[0], 2);
    }

    #[test]
    fn nearest_sampling_wraps() {
        let tex = checkerboard(16);
        assert_eq!(tex.sample_nearest(0.0, 0.99), WHITE);
        assert_eq!(tex.sample_nearest(0.6, 0.99), GRAY);
        assert_eq!(tex.sample_nearest(1.6, 1.99), tex.sample_nearest(0.6, 0.99));
        assert_eq!(tex.sample_nearest(-0.4, 0.99), GRAY);
    }

    #[test]
    fn load_decodes_png() {
        let tex = checkerboard(16);
        let path = std::env::temp_dir().join(format!("phongview-tex-{}.png", std::process::id()));
        image::save_buffer(&path, &tex.data, 16, 16, image::ExtendedColorType::Rgba8)
            .expect("write png");
        assert_eq!(TextureData::load(&path).expect("decode png"), tex);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(TextureData::load("/definitely/not/here.png").is_err());
    }
}
