pub mod health;
pub mod hotels;
