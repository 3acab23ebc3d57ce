//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-step writes (the
//! appointment-completion flow, package creation with its covered-service
//! set) run inside a single transaction here rather than in handlers.

pub mod appointment_repo;
pub mod client_package_repo;
pub mod client_repo;
pub mod dashboard_repo;
pub mod package_repo;
pub mod payment_repo;
pub mod report_repo;
pub mod service_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepo;
pub use client_package_repo::ClientPackageRepo;
pub use client_repo::ClientRepo;
pub use dashboard_repo::DashboardRepo;
pub use package_repo::PackageRepo;
pub use payment_repo::PaymentRepo;
pub use report_repo::ReportRepo;
pub use service_repo::ServiceRepo;
pub use user_repo::UserRepo;
