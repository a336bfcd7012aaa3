//! The camera list shared by the navbar, the grid, and the viewer.
//!
//! DESIGN
//! ======
//! A single `CameraStore` is provided through context as an
//! `RwSignal<CameraStore>`. Views read it with `with` and only the dashboard
//! shell writes it. Adds are applied immediately under a negative provisional
//! id; the server id replaces it when the create call returns.

#[cfg(test)]
#[path = "cameras_test.rs"]
mod cameras_test;

use relay::{Camera, NewCamera, placeholder_cameras};

/// Owned camera list plus the load/sync banner.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraStore {
    cameras: Vec<Camera>,
    pub loading: bool,
    pub error: Option<String>,
    next_provisional: i64,
}

impl Default for CameraStore {
    fn default() -> Self {
        Self {
            cameras: Vec::new(),
            loading: true,
            error: None,
            next_provisional: -1,
        }
    }
}

impl CameraStore {
    #[must_use]
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    /// Replace the list with a server response and clear the banner.
    /// Cameras still under a provisional id were added while the load was in
    /// flight; they stay, after the server's list.
    pub fn replace_all(&mut self, cameras: Vec<Camera>) {
        self.cameras = self.with_provisional(cameras);
        self.loading = false;
        self.error = None;
    }

    /// The initial load failed: show the banner and the placeholder pair,
    /// keeping provisional cameras.
    pub fn load_failed(&mut self, error: impl Into<String>) {
        self.cameras = self.with_provisional(placeholder_cameras());
        self.loading = false;
        self.error = Some(error.into());
    }

    fn with_provisional(&mut self, mut base: Vec<Camera>) -> Vec<Camera> {
        base.extend(self.cameras.drain(..).filter(|c| c.id < 0));
        base
    }

    /// Append under a fresh provisional id and return that id.
    pub fn add_optimistic(&mut self, camera: NewCamera) -> i64 {
        let id = self.next_provisional;
        self.next_provisional -= 1;
        self.cameras.push(camera.into_camera(id));
        id
    }

    /// Re-key the provisional camera under the server's id. Returns `false`
    /// when the provisional camera is gone (deleted before the server
    /// answered). If a reload already brought the server's copy in, the
    /// provisional duplicate is dropped instead.
    pub fn confirm(&mut self, provisional: i64, server_id: i64) -> bool {
        let Some(index) = self.cameras.iter().position(|c| c.id == provisional) else {
            return false;
        };
        if self.get(server_id).is_some() {
            self.cameras.remove(index);
        } else {
            self.cameras[index].id = server_id;
        }
        true
    }

    pub fn remove(&mut self, id: i64) -> Option<Camera> {
        let index = self.cameras.iter().position(|c| c.id == id)?;
        Some(self.cameras.remove(index))
    }

    /// A best-effort sync failed. The local change stays.
    pub fn sync_failed(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Whether a camera change should be mirrored to the backend. Local cameras
/// and cameras still holding a provisional id never are.
#[must_use]
pub fn needs_server_sync(camera: &Camera) -> bool {
    !camera.kind.is_local() && camera.id > 0
}
