use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec4;
use helio_core::{CubeTexture, Result};
use parking_lot::{Mutex, RwLock, RwLockReadGuard};

/// Double-buffered cookie storage.
///
/// Writers fill the back buffer and publish it with a swap, readers only ever
/// see the front buffer, so a frame being synthesized never tears a frame
/// being rendered. Both buffers are allocated once.
#[derive(Debug)]
pub struct CookieSlot {
    front: RwLock<CubeTexture>,
    back: Mutex<CubeTexture>,
    generation: AtomicU64,
}

impl CookieSlot {
    pub fn new(size: u32) -> Result<Self> {
        Ok(Self {
            front: RwLock::new(CubeTexture::new(size)?),
            back: Mutex::new(CubeTexture::new(size)?),
            generation: AtomicU64::new(0),
        })
    }

    pub fn size(&self) -> u32 {
        self.front.read().size()
    }

    /// The currently published cookie.
    ///
    /// Drop the guard before publishing on the same thread; the lock is not
    /// reentrant and `publish_with` would deadlock.
    pub fn read(&self) -> RwLockReadGuard<'_, CubeTexture> {
        self.front.read()
    }

    /// Number of cookies published so far; zero means the light never had one.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Runs `fill` on the back buffer and, if it succeeds, makes the result
    /// the front buffer. On error the published cookie is left untouched.
    pub fn publish_with<E>(
        &self,
        fill: impl FnOnce(&mut CubeTexture) -> std::result::Result<(), E>,
    ) -> std::result::Result<u64, E> {
        let mut back = self.back.lock();
        fill(&mut back)?;
        std::mem::swap(&mut *self.front.write(), &mut *back);
        Ok(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Publishes a black cookie.
    pub fn clear(&self) -> u64 {
        let cleared: std::result::Result<u64, std::convert::Infallible> =
            self.publish_with(|back| {
                back.fill(Vec4::ZERO);
                Ok(())
            });
        match cleared {
            Ok(generation) => generation,
            Err(never) => match never {},
        }
    }
}
