pub mod appointments;
pub mod auth;
pub mod client_packages;
pub mod clients;
pub mod dashboard;
pub mod packages;
pub mod reports;
pub mod scheduling;
pub mod services;
