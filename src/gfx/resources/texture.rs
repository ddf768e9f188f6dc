//! Asynchronous texture loading
//!
//! Images are decoded on short-lived worker threads. Each load immediately
//! returns a [`TextureId`]; the result arrives through a oneshot channel and
//! is picked up by [`TextureCache::poll`] on the render thread. Until then
//! (or forever, if loading fails) the renderer samples a placeholder.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;

use crate::error::TextureError;

/// Handle to a texture slot in a [`TextureCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(usize);

impl TextureId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How texel values should be interpreted when sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Color images (albedo, backgrounds)
    Srgb,
    /// Data images such as normal maps
    Linear,
}

/// Decoded RGBA8 image
#[derive(Debug, Clone)]
pub struct TexelData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TexelData {
    pub fn decode(path: &Path) -> Result<Self, TextureError> {
        let image = image::open(path).map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = image.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }
}

#[derive(Debug, Clone)]
pub enum TextureState {
    Loading,
    Ready(Arc<TexelData>),
    Failed,
}

type LoadResult = Result<TexelData, TextureError>;

struct TextureSlot {
    path: PathBuf,
    color_space: ColorSpace,
    state: TextureState,
    receiver: Option<oneshot::Receiver<LoadResult>>,
}

impl TextureSlot {
    fn resolve(&mut self, result: LoadResult) {
        self.receiver = None;
        match result {
            Ok(data) => {
                log::info!(
                    "Loaded texture {} ({}x{})",
                    self.path.display(),
                    data.width,
                    data.height
                );
                self.state = TextureState::Ready(Arc::new(data));
            }
            Err(err) => {
                log::warn!("{}; rendering with placeholder", err);
                self.state = TextureState::Failed;
            }
        }
    }
}

/// Owns every texture referenced by the scene
#[derive(Default)]
pub struct TextureCache {
    slots: Vec<TextureSlot>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading an image and returns its handle without waiting
    pub fn load(&mut self, path: impl Into<PathBuf>, color_space: ColorSpace) -> TextureId {
        let path = path.into();
        let (sender, receiver) = oneshot::channel();

        let worker_path = path.clone();
        let spawned = thread::Builder::new()
            .name("texture-loader".to_string())
            .spawn(move || {
                // The receiver may already be gone if the scene was dropped
                let _ = sender.send(TexelData::decode(&worker_path));
            });

        let id = TextureId(self.slots.len());
        let mut slot = TextureSlot {
            path,
            color_space,
            state: TextureState::Loading,
            receiver: Some(receiver),
        };

        if let Err(err) = spawned {
            log::warn!("Could not spawn texture loader thread ({}); decoding inline", err);
            let result = TexelData::decode(&slot.path);
            slot.resolve(result);
        }

        self.slots.push(slot);
        id
    }

    /// Collects finished loads without blocking.
    ///
    /// Returns the ids whose state changed since the last poll.
    pub fn poll(&mut self) -> Vec<TextureId> {
        let mut changed = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(receiver) = slot.receiver.as_mut() else {
                continue;
            };
            let result = match receiver.try_recv() {
                Ok(Some(result)) => result,
                Ok(None) => continue,
                Err(oneshot::Canceled) => Err(TextureError::Cancelled(slot.path.clone())),
            };
            slot.resolve(result);
            changed.push(TextureId(index));
        }
        changed
    }

    /// Blocks until every pending load has finished
    pub fn wait_all(&mut self) -> Vec<TextureId> {
        let mut changed = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(receiver) = slot.receiver.take() else {
                continue;
            };
            let result = futures::executor::block_on(receiver)
                .unwrap_or_else(|_| Err(TextureError::Cancelled(slot.path.clone())));
            slot.resolve(result);
            changed.push(TextureId(index));
        }
        changed
    }

    pub fn state(&self, id: TextureId) -> Option<&TextureState> {
        self.slots.get(id.0).map(|slot| &slot.state)
    }

    /// Texels of a loaded texture, `None` while loading or after a failure
    pub fn texels(&self, id: TextureId) -> Option<&Arc<TexelData>> {
        match self.state(id)? {
            TextureState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn color_space(&self, id: TextureId) -> Option<ColorSpace> {
        self.slots.get(id.0).map(|slot| slot.color_space)
    }

    pub fn path(&self, id: TextureId) -> Option<&Path> {
        self.slots.get(id.0).map(|slot| slot.path.as_path())
    }

    pub fn pending_count(&self) -> usize {
        self.slots.iter().filter(|s| s.receiver.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nebula-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_ends_failed() {
        let mut cache = TextureCache::new();
        let id = cache.load("definitely/not/here.png", ColorSpace::Srgb);
        assert!(matches!(cache.state(id), Some(TextureState::Loading)));

        let changed = cache.wait_all();
        assert_eq!(changed, vec![id]);
        assert!(matches!(cache.state(id), Some(TextureState::Failed)));
        assert!(cache.texels(id).is_none());
        assert_eq!(cache.pending_count(), 0);
    }

    #[test]
    fn test_png_decodes_to_rgba() {
        let dir = scratch_dir("png");
        let path = dir.join("tiny.png");
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let mut cache = TextureCache::new();
        let id = cache.load(&path, ColorSpace::Linear);
        cache.wait_all();

        let texels = cache.texels(id).expect("texture should be ready");
        assert_eq!((texels.width, texels.height), (3, 2));
        assert_eq!(texels.rgba.len(), 3 * 2 * 4);
        assert_eq!(&texels.rgba[0..4], &[255, 0, 0, 255]);
        assert_eq!(cache.color_space(id), Some(ColorSpace::Linear));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_poll_eventually_resolves() {
        let mut cache = TextureCache::new();
        let id = cache.load("missing.jpg", ColorSpace::Srgb);

        let mut resolved = Vec::new();
        for _ in 0..1000 {
            resolved.extend(cache.poll());
            if !resolved.is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(resolved, vec![id]);
        // Already resolved slots are not reported again
        assert!(cache.poll().is_empty());
    }
}
