pub mod claims;

pub use claims::{ClaimsError, ClaimsReader};
