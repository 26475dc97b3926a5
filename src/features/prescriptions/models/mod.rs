mod prescription;

pub use prescription::{Prescription, PrescriptionWithAppointment};
