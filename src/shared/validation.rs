use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating patient identifiers
    /// Patient ids become a path segment of the storage key, so only
    /// alphanumerics, underscores and hyphens are accepted (max 128 chars)
    /// - Valid: "patient-42", "P_0001", "3f2a9c"
    /// - Invalid: "../etc", "a/b", "john doe", ""
    pub static ref PATIENT_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap();
}
