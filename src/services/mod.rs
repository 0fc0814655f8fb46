//! Business logic services. Each function takes the pool explicitly and
//! returns a typed result; none of them touch the HTTP response.

pub mod analytics;
pub mod auth;
pub mod car_owner;
pub mod lot;
pub mod lot_owner;
