//! Source image loading
//!
//! Decodes user-picked photos into RGBA8 bitmaps and tracks which decode
//! is allowed to replace the displayed image.

use std::path::PathBuf;

pub mod source;

pub use source::{ImageSlot, LoadTicket, SourceImage};

/// Supported image extensions for the file dialog
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Open the native image picker
pub async fn pick_image_file() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Select an image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

/// Decode a file on the blocking pool
///
/// Errors are logged and swallowed: a failed decode leaves the current
/// image in place.
pub async fn load_image(path: PathBuf) -> Option<SourceImage> {
    let shown = path.display().to_string();
    let result = tokio::task::spawn_blocking(move || source::decode_file(&path)).await;
    match result {
        Ok(Ok(image)) => {
            tracing::info!(
                "Decoded {} ({}x{}, id {})",
                shown,
                image.width(),
                image.height(),
                image.id()
            );
            Some(image)
        }
        Ok(Err(e)) => {
            tracing::warn!("Failed to decode {}: {:#}", shown, e);
            None
        }
        Err(e) => {
            tracing::warn!("Decode task for {} did not finish: {}", shown, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Runtime::new().unwrap().block_on(future)
    }

    #[test]
    fn test_load_image_decodes_file() {
        let img = image::RgbaImage::from_pixel(5, 3, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let path = std::env::temp_dir().join(format!("orbe-load-{}.png", std::process::id()));
        std::fs::write(&path, &bytes).unwrap();

        let loaded = block_on(load_image(path.clone()));
        let _ = std::fs::remove_file(&path);

        let loaded = loaded.unwrap();
        assert_eq!((loaded.width(), loaded.height()), (5, 3));
        assert_eq!(&loaded.pixels()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_load_image_missing_file_is_none() {
        let loaded = block_on(load_image(PathBuf::from("/nonexistent/orbe/photo.jpg")));
        assert!(loaded.is_none());
    }
}
