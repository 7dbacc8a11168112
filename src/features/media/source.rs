//! Decoded source bitmaps and last-writer-wins replacement

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Longest side kept after decoding; larger photos are downscaled
pub const MAX_SOURCE_DIMENSION: u32 = 4096;

/// Process-wide id counter, shared by CPU render targets and GPU textures
static SOURCE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_source_id() -> u64 {
    SOURCE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A fully decoded RGBA8 image
///
/// Cloning is cheap; the pixel buffer is shared.
#[derive(Debug, Clone)]
pub struct SourceImage {
    id: u64,
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap raw RGBA8 pixels. Returns `None` for empty or mismatched buffers.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            id: next_source_id(),
            width,
            height,
            pixels: Arc::new(pixels),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Decode an encoded image (PNG or JPEG) from memory
pub fn decode_bytes(bytes: &[u8]) -> Result<SourceImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode image data")?;
    from_dynamic(img)
}

/// Decode an image file from disk
///
/// The format is sniffed from the contents, not the extension.
pub fn decode_file(path: &Path) -> Result<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    decode_bytes(&bytes).with_context(|| format!("Failed to decode {}", path.display()))
}

fn from_dynamic(img: image::DynamicImage) -> Result<SourceImage> {
    let img = if img.width().max(img.height()) > MAX_SOURCE_DIMENSION {
        img.resize(
            MAX_SOURCE_DIMENSION,
            MAX_SOURCE_DIMENSION,
            image::imageops::FilterType::Triangle,
        )
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba(width, height, rgba.into_raw())
        .with_context(|| format!("Decoded image has unusable size {}x{}", width, height))
}

/// Proof that a load was started, carrying its generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct SlotState {
    issued: u64,
    /// Newest generation that finished, successfully or not
    settled: u64,
    image: Option<SourceImage>,
}

/// Holder of the displayed source image
///
/// Every load takes a ticket from [`ImageSlot::begin`]. A finished decode
/// replaces the image only when no newer load has settled, successfully or
/// not, so a slow decode can never overwrite a later pick.
#[derive(Debug, Default)]
pub struct ImageSlot {
    state: Mutex<SlotState>,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load
    pub fn begin(&self) -> LoadTicket {
        let mut state = self.state.lock();
        state.issued += 1;
        LoadTicket(state.issued)
    }

    /// Offer a finished decode. Returns `true` if it became the current image.
    pub fn complete(&self, ticket: LoadTicket, image: SourceImage) -> bool {
        let mut state = self.state.lock();
        if ticket.0 <= state.settled {
            tracing::debug!(
                "Dropping stale decode (generation {}, settled {})",
                ticket.0,
                state.settled
            );
            return false;
        }
        state.settled = ticket.0;
        state.image = Some(image);
        true
    }

    /// Record a load that produced no image
    ///
    /// The displayed image is kept, and older loads still in flight can no
    /// longer replace it.
    pub fn abandon(&self, ticket: LoadTicket) {
        let mut state = self.state.lock();
        state.settled = state.settled.max(ticket.0);
    }

    /// Currently displayed image, if any
    pub fn current(&self) -> Option<SourceImage> {
        self.state.lock().image.clone()
    }

    /// Whether the most recent load is still pending
    pub fn is_loading(&self) -> bool {
        let state = self.state.lock();
        state.issued > state.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn solid(width: u32, height: u32) -> SourceImage {
        SourceImage::from_rgba(width, height, vec![200; (width * height * 4) as usize]).unwrap()
    }

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([x as u8 * 10, y as u8 * 10, 128, 255])
        });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_bytes() {
        let img = decode_bytes(&encoded_png(6, 4)).unwrap();
        assert_eq!((img.width(), img.height()), (6, 4));
        assert_eq!(img.pixels().len(), 6 * 4 * 4);
        assert_eq!(&img.pixels()[4..8], &[10, 0, 128, 255]);
    }

    #[test]
    fn test_oversized_image_is_downscaled() {
        let img = image::DynamicImage::new_rgba8(MAX_SOURCE_DIMENSION + 904, 10);
        let source = from_dynamic(img).unwrap();
        assert_eq!(source.width(), MAX_SOURCE_DIMENSION);
        assert!(source.height() >= 1 && source.height() <= 10);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_bytes(b"definitely not an image").is_err());
    }

    #[test]
    fn test_decode_missing_file_fails() {
        assert!(decode_file(Path::new("/nonexistent/orbe/photo.png")).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = solid(2, 2);
        let b = solid(2, 2);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn test_from_rgba_rejects_mismatch() {
        assert!(SourceImage::from_rgba(2, 2, vec![0; 3]).is_none());
        assert!(SourceImage::from_rgba(0, 0, Vec::new()).is_none());
    }

    #[test]
    fn test_latest_pick_wins_when_older_finishes_late() {
        let slot = ImageSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        let newer = solid(2, 2);
        let older = solid(3, 3);

        assert!(slot.complete(second, newer.clone()));
        assert!(!slot.complete(first, older));
        assert_eq!(slot.current().map(|i| i.id()), Some(newer.id()));
        assert!(!slot.is_loading());
    }

    #[test]
    fn test_in_order_completion_replaces() {
        let slot = ImageSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(slot.complete(first, solid(2, 2)));
        assert!(slot.is_loading());
        let last = solid(4, 4);
        assert!(slot.complete(second, last.clone()));
        assert_eq!(slot.current().map(|i| i.id()), Some(last.id()));
    }

    #[test]
    fn test_failed_decode_keeps_previous_image() {
        let slot = ImageSlot::new();
        let shown = solid(2, 2);
        assert!(slot.complete(slot.begin(), shown.clone()));
        let failed = slot.begin();
        assert!(slot.is_loading());
        slot.abandon(failed);
        assert!(!slot.is_loading());
        assert_eq!(slot.current().map(|i| i.id()), Some(shown.id()));
    }

    #[test]
    fn test_failed_newer_pick_blocks_older_late_decode() {
        let slot = ImageSlot::new();
        let shown = solid(2, 2);
        assert!(slot.complete(slot.begin(), shown.clone()));

        let older = slot.begin();
        let newer = slot.begin();
        slot.abandon(newer);
        assert!(!slot.complete(older, solid(3, 3)));
        assert_eq!(slot.current().map(|i| i.id()), Some(shown.id()));
        assert!(!slot.is_loading());
    }

    #[test]
    fn test_older_failure_does_not_end_newer_load() {
        let slot = ImageSlot::new();
        let first = slot.begin();
        let _second = slot.begin();
        slot.abandon(first);
        assert!(slot.is_loading());
    }
}
