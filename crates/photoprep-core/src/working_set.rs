//! The ordered images edited in one session.
//!
//! Each slot remembers the reference it was opened with (its original) and
//! the reference currently used as the base for rendering, which differs
//! after a crop or an upload. Session-created references are owned by the
//! session and released when they are replaced; externally supplied ones
//! are only ever dropped from this set, never released.

use std::sync::Arc;

use crate::error::ValidationError;

/// Where an image reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Supplied by the host, already persisted elsewhere
    External,
    /// Produced inside the session (crop result, fresh upload)
    Session,
}

/// Encoded image bytes plus ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    bytes: Arc<[u8]>,
    origin: ImageOrigin,
}

impl ImageRef {
    /// Reference to an already-persisted image supplied by the host.
    pub fn external(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
            origin: ImageOrigin::External,
        }
    }

    /// Reference created by this session.
    pub fn session(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
            origin: ImageOrigin::Session,
        }
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    pub fn is_session_owned(&self) -> bool {
        self.origin == ImageOrigin::Session
    }

    /// True if both references share the same allocation.
    pub fn same_image(&self, other: &ImageRef) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    original: ImageRef,
    current: ImageRef,
}

/// Ordered, fixed-length list of slots.
#[derive(Debug, Clone)]
pub(crate) struct WorkingSet {
    slots: Vec<Slot>,
}

impl WorkingSet {
    /// Build a working set; at least one image is required.
    pub fn new(images: Vec<ImageRef>) -> Result<Self, ValidationError> {
        if images.is_empty() {
            return Err(ValidationError::EmptyWorkingSet);
        }
        let slots = images
            .into_iter()
            .map(|image| Slot {
                original: image.clone(),
                current: image,
            })
            .collect();
        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Base image used for rendering `slot`.
    pub fn current(&self, slot: usize) -> Option<&ImageRef> {
        self.slots.get(slot).map(|s| &s.current)
    }

    /// Replace the base image of `slot`, keeping its original.
    pub fn replace_current(&mut self, slot: usize, image: ImageRef) {
        if let Some(s) = self.slots.get_mut(slot) {
            let previous = std::mem::replace(&mut s.current, image);
            release_if_orphaned(previous, &s.original);
        }
    }

    /// Make `image` both the original and the base of `slot`.
    pub fn install(&mut self, slot: usize, image: ImageRef) {
        if let Some(s) = self.slots.get_mut(slot) {
            let old_current = std::mem::replace(&mut s.current, image.clone());
            let old_original = std::mem::replace(&mut s.original, image);
            let distinct = !old_current.same_image(&old_original);
            release_if_orphaned(old_original, &s.original);
            if distinct {
                release_if_orphaned(old_current, &s.original);
            }
        }
    }

    /// Point the base image back at the original. Returns true if it changed.
    pub fn restore_original(&mut self, slot: usize) -> bool {
        let Some(s) = self.slots.get_mut(slot) else {
            return false;
        };
        if s.current.same_image(&s.original) {
            return false;
        }
        let previous = std::mem::replace(&mut s.current, s.original.clone());
        release_if_orphaned(previous, &s.original);
        true
    }
}

/// Drop a replaced reference, noting when the session owned it.
fn release_if_orphaned(image: ImageRef, still_held: &ImageRef) {
    if image.is_session_owned() && !image.same_image(still_held) {
        log::debug!("released session-owned image ({} bytes)", image.bytes().len());
    }
    drop(image);
}
