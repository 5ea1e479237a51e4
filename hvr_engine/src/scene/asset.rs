/// Asset - a volumetric clip loaded by the native side

use std::sync::Arc;
use crate::native::{NativeRenderer, AssetHandle};

pub struct Asset {
    native: Arc<dyn NativeRenderer>,
    handle: AssetHandle,
    path: String,
}

impl Asset {
    pub fn new(native: Arc<dyn NativeRenderer>, path: &str) -> Self {
        let handle = native.asset_create(path);
        if handle.is_none() {
            crate::engine_warn!("hvr::Asset", "Native renderer could not load '{}'", path);
        }

        Self { native, handle, path: path.to_string() }
    }

    pub fn handle(&self) -> AssetHandle {
        self.handle
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_valid(&self) -> bool {
        !self.handle.is_none() && self.native.asset_is_valid(self.handle)
    }
}

impl Drop for Asset {
    fn drop(&mut self) {
        if !self.handle.is_none() {
            self.native.asset_delete(self.handle);
        }
    }
}
