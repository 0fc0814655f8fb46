//! Database rows and request/response DTOs.

pub mod analytics;
pub mod car_owner;
pub mod lot;
pub mod lot_owner;
pub mod pagination;
pub mod user;
