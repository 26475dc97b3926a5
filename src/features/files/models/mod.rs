mod medical_file;

pub use medical_file::MedicalFile;
