pub mod appointments;
pub mod doctors;
pub mod files;
pub mod health;
pub mod prescriptions;
