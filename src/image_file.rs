use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";
/// Larger previews are scaled down to fit; GPU texture sides are limited.
const MAX_PREVIEW_SIDE: u32 = 1024;

/// A file handed to the controller by any selection path (browse dialog or drop).
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads the file and declares its content type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, content_type_for_path(path), bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

pub fn content_type_for_path(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_CONTENT_TYPE.to_string())
}

/// Decoded pixels ready to be uploaded as a texture.
#[derive(Clone, PartialEq, Eq)]
pub struct Preview {
    pub width: usize,
    pub height: usize,
    pub rgba: Arc<[u8]>,
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preview({}x{})", self.width, self.height)
    }
}

pub fn decode_preview(file: &ImageFile) -> Result<Preview, image::ImageError> {
    let image = image::load_from_memory(file.bytes())?;
    let image = if image.width() > MAX_PREVIEW_SIDE || image.height() > MAX_PREVIEW_SIDE {
        image.thumbnail(MAX_PREVIEW_SIDE, MAX_PREVIEW_SIDE)
    } else {
        image
    };
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Preview {
        width: width as usize,
        height: height as usize,
        rgba: rgba.into_raw().into(),
    })
}

#[cfg(test)]
pub mod fixture {
    use super::ImageFile;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 120, 40, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("encode png");
        bytes.into_inner()
    }

    pub fn png_file(name: &str) -> ImageFile {
        ImageFile::new(name, "image/png", png_bytes(4, 3))
    }
}
