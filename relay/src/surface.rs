//! Temporary-reference ledger for presenting frames.
//!
//! Drawing a JPEG in the browser goes through a short-lived object URL: the
//! bytes become a blob, the blob gets a URL, an image decodes from it, and
//! the image is drawn. Every URL created must be released, including when
//! decoding fails. [`ScopedRef`] ties the release to `Drop`, so any early
//! return or `?` still releases exactly once.
//!
//! The registry is a trait so the same guard backs `URL.createObjectURL` in
//! the browser and counting fakes in tests.

#[cfg(test)]
#[path = "surface_test.rs"]
pub(crate) mod surface_test;

/// Error presenting one frame. None of these end the session.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PresentError {
    /// The temporary reference could not be created; nothing to release.
    #[error("failed to create frame reference: {0}")]
    Create(String),
    /// The image could not be decoded or drawn.
    #[error("failed to decode frame: {0}")]
    Decode(String),
}

/// Creates and releases temporary references to frame bytes.
pub trait RefRegistry {
    type Handle;

    /// Allocate a reference to `bytes`.
    ///
    /// # Errors
    ///
    /// Returns a message when the platform refuses the allocation.
    fn create(&self, bytes: &[u8]) -> Result<Self::Handle, String>;

    /// Release a reference previously returned by [`Self::create`].
    fn release(&self, handle: &Self::Handle);
}

/// A live temporary reference, released when dropped.
pub struct ScopedRef<'r, R: RefRegistry> {
    registry: &'r R,
    handle: R::Handle,
}

impl<'r, R: RefRegistry> ScopedRef<'r, R> {
    /// Create a reference to `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError::Create`] if the registry refuses.
    pub fn create(registry: &'r R, bytes: &[u8]) -> Result<Self, PresentError> {
        let handle = registry.create(bytes).map_err(PresentError::Create)?;
        Ok(Self { registry, handle })
    }

    pub fn handle(&self) -> &R::Handle {
        &self.handle
    }
}

impl<R: RefRegistry> Drop for ScopedRef<'_, R> {
    fn drop(&mut self) {
        self.registry.release(&self.handle);
    }
}

/// Present one frame: create a reference, run `draw` with it, release it.
///
/// `draw` gets its own copy of the handle and may suspend (image decoding is
/// asynchronous in the browser). The reference is held across the whole
/// draw and released when it finishes, fails, or the presentation future is
/// dropped part-way.
///
/// # Errors
///
/// Returns [`PresentError::Create`] when no reference could be made and
/// [`PresentError::Decode`] when `draw` fails. The reference is released in
/// both the success and the decode-failure case.
pub async fn present_frame<R, F, Fut>(registry: &R, bytes: &[u8], draw: F) -> Result<(), PresentError>
where
    R: RefRegistry,
    R::Handle: Clone,
    F: FnOnce(R::Handle) -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    let scoped = ScopedRef::create(registry, bytes)?;
    draw(scoped.handle().clone()).await.map_err(PresentError::Decode)
}
