mod appointment;

pub use appointment::{Appointment, AppointmentWithPrescription};
