pub mod auth;
pub mod banners;
pub mod categories;
pub mod payments;
pub mod products;
pub mod properties;
pub mod uploads;
pub mod users;
