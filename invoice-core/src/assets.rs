use std::io;
use std::path::Path;

use pdf_draw::{load_image, ImageData};
use tracing::{debug, warn};

use crate::config::AssetPaths;

/// Decoded branding images. Either may be missing; the layout then draws
/// its text fallback or leaves the space empty.
#[derive(Debug, Clone, Default)]
pub struct BrandAssets {
    pub logo: Option<ImageData>,
    pub signature: Option<ImageData>,
}

impl BrandAssets {
    /// No images at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Read both images concurrently. Failures are logged and leave the
    /// slot empty; this never fails.
    pub async fn load(paths: &AssetPaths) -> Self {
        let (logo, signature) = tokio::join!(
            tokio::fs::read(&paths.logo),
            tokio::fs::read(&paths.signature)
        );
        BrandAssets {
            logo: decode("logo", &paths.logo, logo),
            signature: decode("signature", &paths.signature, signature),
        }
    }
}

fn decode(kind: &str, path: &Path, bytes: io::Result<Vec<u8>>) -> Option<ImageData> {
    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("{} not available at {}: {}", kind, path.display(), e);
            return None;
        }
    };
    match load_image(bytes) {
        Ok(image) => {
            debug!(
                "{} loaded from {} ({}x{})",
                kind,
                path.display(),
                image.width,
                image.height
            );
            Some(image)
        }
        Err(e) => {
            warn!("{} at {} could not be decoded: {}", kind, path.display(), e);
            None
        }
    }
}
