use crate::error::{DrawError, Result};

/// Handle to an image registered with a `PdfDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

/// How the pixel data is stored in the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// Original JPEG bytes, embedded with `/DCTDecode`.
    Jpeg,
    /// Decoded 8-bit samples, embedded with `/FlateDecode`.
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }
}

/// A decoded raster image ready for embedding.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub encoding: ImageEncoding,
    pub color_space: ColorSpace,
    pub data: Vec<u8>,
    /// Alpha channel as 8-bit gray samples, embedded as an `/SMask`.
    pub alpha: Option<Vec<u8>>,
}

impl ImageData {
    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f64 / self.height as f64
    }

    /// Size `(width, height)` that keeps the aspect ratio at the given
    /// target height.
    pub fn scaled_to_height(&self, target_height: f64) -> (f64, f64) {
        (target_height * self.aspect_ratio(), target_height)
    }
}

/// Decode JPEG or PNG bytes, detected from their magic numbers.
pub fn load_image(data: Vec<u8>) -> Result<ImageData> {
    if data.starts_with(&[0xFF, 0xD8]) {
        parse_jpeg(data)
    } else if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        parse_png(&data)
    } else {
        Err(DrawError::UnsupportedImage(
            "expected JPEG or PNG data".to_string(),
        ))
    }
}

/// JPEG is passed through untouched; only the frame header is read.
fn parse_jpeg(data: Vec<u8>) -> Result<ImageData> {
    let (width, height, components) = jpeg_frame(&data)?;
    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        n => {
            return Err(DrawError::UnsupportedImage(format!(
                "JPEG with {} components",
                n
            )))
        }
    };
    Ok(ImageData {
        width,
        height,
        encoding: ImageEncoding::Jpeg,
        color_space,
        data,
        alpha: None,
    })
}

/// Walk the JPEG marker segments until a SOF0..SOF3 frame header.
fn jpeg_frame(data: &[u8]) -> Result<(u32, u32, u8)> {
    let mut i = 2;
    while i + 3 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        match marker {
            0xC0..=0xC3 => {
                let frame = data
                    .get(i + 5..i + 10)
                    .ok_or_else(|| DrawError::ImageDecode("truncated JPEG frame header".into()))?;
                let height = u16::from_be_bytes([frame[0], frame[1]]) as u32;
                let width = u16::from_be_bytes([frame[2], frame[3]]) as u32;
                return Ok((width, height, frame[4]));
            }
            0xFF | 0x00 => i += 1,
            0xD0..=0xD9 => i += 2,
            _ => {
                let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
                i += 2 + len;
            }
        }
    }
    Err(DrawError::ImageDecode("no JPEG frame header found".into()))
}

/// Decode a PNG to 8-bit samples, splitting any alpha channel out.
fn parse_png(data: &[u8]) -> Result<ImageData> {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| DrawError::ImageDecode(format!("PNG header: {}", e)))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| DrawError::ImageDecode(format!("PNG frame: {}", e)))?;
    buf.truncate(info.buffer_size());

    let (color_space, channels, has_alpha) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, 3, false),
        png::ColorType::Rgba => (ColorSpace::DeviceRGB, 4, true),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, 1, false),
        png::ColorType::GrayscaleAlpha => (ColorSpace::DeviceGray, 2, true),
        other => {
            return Err(DrawError::UnsupportedImage(format!(
                "PNG color type {:?}",
                other
            )))
        }
    };

    let (data, alpha) = if has_alpha {
        split_alpha(&buf, channels)
    } else {
        (buf, None)
    };

    Ok(ImageData {
        width: info.width,
        height: info.height,
        encoding: ImageEncoding::Raw,
        color_space,
        data,
        alpha,
    })
}

/// Separate interleaved samples whose last channel is alpha.
fn split_alpha(buf: &[u8], channels: usize) -> (Vec<u8>, Option<Vec<u8>>) {
    let pixels = buf.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);
    for px in buf.chunks_exact(channels) {
        color.extend_from_slice(&px[..channels - 1]);
        alpha.push(px[channels - 1]);
    }
    (color, Some(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_alpha_rgba() {
        let (rgb, alpha) = split_alpha(&[1, 2, 3, 4, 5, 6, 7, 8], 4);
        assert_eq!(rgb, vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(alpha, Some(vec![4, 8]));
    }

    #[test]
    fn jpeg_frame_header_is_found() {
        // SOI, APP0 (length 4), SOF0 with 16x8, 3 components.
        let data = vec![
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00,
            0x08, 0x00, 0x10, 0x03,
        ];
        let img = load_image(data).unwrap();
        assert_eq!((img.width, img.height), (16, 8));
        assert_eq!(img.color_space, ColorSpace::DeviceRGB);
        assert_eq!(img.encoding, ImageEncoding::Jpeg);
    }

    #[test]
    fn scaled_to_height_keeps_ratio() {
        let img = ImageData {
            width: 200,
            height: 100,
            encoding: ImageEncoding::Raw,
            color_space: ColorSpace::DeviceGray,
            data: vec![],
            alpha: None,
        };
        assert_eq!(img.scaled_to_height(25.0), (50.0, 25.0));
    }
}
