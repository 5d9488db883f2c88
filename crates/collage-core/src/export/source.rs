//! Where the export pipeline gets its bitmaps from.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use thiserror::Error;

use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::placement::ImageHandle;
use crate::session::CollageState;

/// Why a frame's bitmap could not be obtained.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("No image stored for {0}")]
    NotFound(ImageHandle),

    #[error("Image could not be decoded: {0}")]
    Decode(#[from] DecodeError),

    #[error("Image unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous access to decoded bitmaps by handle.
///
/// Each call is independent; the pipeline awaits all of them together and
/// tolerates individual failures.
pub trait ImageSource {
    fn acquire(
        &self,
        handle: ImageHandle,
    ) -> LocalBoxFuture<'_, Result<Arc<DecodedImage>, AcquireError>>;
}

/// Decoded bitmaps held in memory, keyed by handle.
///
/// Handles are never reused within one store.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: HashMap<ImageHandle, Arc<DecodedImage>>,
    next_id: u32,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image: DecodedImage) -> ImageHandle {
        let handle = ImageHandle(self.next_id);
        self.next_id += 1;
        self.images.insert(handle, Arc::new(image));
        handle
    }

    /// Decode `bytes` and keep the result.
    pub fn insert_encoded(&mut self, bytes: &[u8]) -> Result<ImageHandle, DecodeError> {
        let image = decode_image(bytes)?;
        Ok(self.insert(image))
    }

    pub fn get(&self, handle: ImageHandle) -> Option<Arc<DecodedImage>> {
        self.images.get(&handle).cloned()
    }

    pub fn remove(&mut self, handle: ImageHandle) -> Option<Arc<DecodedImage>> {
        self.images.remove(&handle)
    }

    /// Drop every bitmap no placement in `state` refers to, orphans
    /// included. Returns how many were dropped.
    pub fn retain_referenced(&mut self, state: &CollageState) -> usize {
        let before = self.images.len();
        self.images
            .retain(|handle, _| state.placements().any(|(_, p)| p.source == *handle));
        before - self.images.len()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageSource for ImageStore {
    fn acquire(
        &self,
        handle: ImageHandle,
    ) -> LocalBoxFuture<'_, Result<Arc<DecodedImage>, AcquireError>> {
        future::ready(self.get(handle).ok_or(AcquireError::NotFound(handle))).boxed_local()
    }
}
