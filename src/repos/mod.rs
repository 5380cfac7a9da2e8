pub mod error;
pub mod hotel_repo;

pub use hotel_repo::{Hotel, HotelStore, MemoryHotelStore, PgHotelStore};
