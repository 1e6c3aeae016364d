//! Background asset decoding.
//!
//! Textures are decoded off the render thread and handed back through a
//! channel. Until a texture arrives the renderer draws with a 1x1
//! placeholder, so the first frame never blocks on I/O and a missing file
//! degrades to a flat-colored scene instead of a crash.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

/// Which slot in the scene a decoded image fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    TerrainHeightmap,
    TerrainAlbedo,
    WaterNormal,
    WaterDistortion,
    /// One face of the sky cubemap, +X -X +Y -Y +Z -Z order.
    SkyFace(usize),
}

/// A decoded RGBA8 image, not yet uploaded to the GPU.
pub struct DecodedImage {
    pub kind: AssetKind,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Spawns decode work and collects finished images.
///
/// `poll` is meant to be called once per frame; it drains whatever finished
/// since the last call and never blocks.
pub struct AssetLoader {
    tx: Sender<Result<DecodedImage, String>>,
    rx: Receiver<Result<DecodedImage, String>>,
    in_flight: usize,
}

impl AssetLoader {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx, in_flight: 0 }
    }

    /// Decode a PNG file on a background thread.
    pub fn load_png(&mut self, kind: AssetKind, path: impl AsRef<Path>) {
        let path: PathBuf = path.as_ref().to_owned();
        let tx = self.tx.clone();
        self.in_flight += 1;
        thread::spawn(move || {
            let result = decode_png(kind, &path);
            // The receiver only goes away when the renderer is dropped.
            let _ = tx.send(result);
        });
    }

    /// Produce an image on a background thread from a generator closure.
    pub fn generate<F>(&mut self, generator: F)
    where
        F: FnOnce() -> DecodedImage + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;
        thread::spawn(move || {
            let _ = tx.send(Ok(generator()));
        });
    }

    /// Drain every image that finished decoding since the last poll.
    ///
    /// Failures are logged and dropped; the slot keeps its placeholder.
    pub fn poll(&mut self) -> Vec<DecodedImage> {
        let mut ready = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(Ok(image)) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    ready.push(image);
                }
                Ok(Err(message)) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    log::warn!("asset decode failed: {message}");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        ready
    }

    /// Number of decode jobs still running.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// True once every submitted job has been polled off.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_png(kind: AssetKind, path: &Path) -> Result<DecodedImage, String> {
    let image = image::open(path)
        .map_err(|e| format!("{}: {e}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Ok(DecodedImage { kind, width, height, pixels: image.into_raw() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn poll_until_idle(loader: &mut AssetLoader) -> Vec<DecodedImage> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut all = Vec::new();
        while !loader.is_idle() {
            all.extend(loader.poll());
            assert!(Instant::now() < deadline, "asset loader stalled");
            thread::sleep(Duration::from_millis(1));
        }
        all
    }

    #[test]
    fn generated_images_arrive_with_their_kind() {
        let mut loader = AssetLoader::new();
        loader.generate(|| DecodedImage {
            kind: AssetKind::WaterNormal,
            width: 2,
            height: 2,
            pixels: vec![0; 16],
        });
        loader.generate(|| DecodedImage {
            kind: AssetKind::SkyFace(3),
            width: 1,
            height: 1,
            pixels: vec![0; 4],
        });

        let images = poll_until_idle(&mut loader);
        assert_eq!(images.len(), 2);
        assert!(images.iter().any(|i| i.kind == AssetKind::WaterNormal));
        assert!(images.iter().any(|i| i.kind == AssetKind::SkyFace(3)));
    }

    #[test]
    fn missing_file_is_dropped_not_fatal() {
        let mut loader = AssetLoader::new();
        loader.load_png(AssetKind::TerrainAlbedo, "definitely/not/here.png");
        let images = poll_until_idle(&mut loader);
        assert!(images.is_empty());
        assert!(loader.is_idle());
    }
}
