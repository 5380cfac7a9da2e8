/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - hotel store, image store, claims reader, bucket/admin-group settings
 * - Clone-cheap (everything behind Arc)
 */
use std::sync::Arc;

use crate::repos::HotelStore;
use crate::services::{auth::ClaimsReader, storage::ImageStore};

#[derive(Clone)]
pub struct AppState {
    pub hotels: Arc<dyn HotelStore>,
    pub images: Arc<dyn ImageStore>,
    pub claims: Arc<ClaimsReader>,
    pub bucket_name: Arc<str>,
    pub admin_group: Arc<str>,
}

impl AppState {
    pub fn new(
        hotels: Arc<dyn HotelStore>,
        images: Arc<dyn ImageStore>,
        claims: Arc<ClaimsReader>,
        bucket_name: impl Into<Arc<str>>,
        admin_group: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            hotels,
            images,
            claims,
            bucket_name: bucket_name.into(),
            admin_group: admin_group.into(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("hotels", &self.hotels.backend_name())
            .field("images", &self.images.backend_name())
            .field("claims", &self.claims)
            .field("bucket_name", &self.bucket_name)
            .field("admin_group", &self.admin_group)
            .finish()
    }
}
