pub mod appointment;
pub mod client;
pub mod client_package;
pub mod dashboard;
pub mod package;
pub mod payment;
pub mod report;
pub mod service;
pub mod user;
