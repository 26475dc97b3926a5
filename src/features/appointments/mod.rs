pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_filter;

pub use routes::routes;
pub use services::AppointmentService;
