//! Advisory validation for document fields.
//!
//! Validation never blocks rendering. It produces clear, descriptive messages
//! in Indonesian that the CLI reports as warnings next to the generated page.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref NIK_PATTERN: Regex = Regex::new(r"^\d{16}$").unwrap();
    static ref PHONE_SEPARATORS: Regex = Regex::new(r"[\s\-().+]").unwrap();
}

/// Validation error with detailed, user-friendly messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message in Indonesian
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} tidak boleh kosong", label)).with_suggestion(format!(
            "Mohon isi {} dengan data yang valid",
            label.to_lowercase()
        ))
    }

    /// Create error for invalid NIK format
    pub fn invalid_nik(field: &str) -> Self {
        Self::new(field, "NIK harus terdiri dari 16 digit angka")
            .with_suggestion("Periksa kembali NIK sesuai KTP, contoh: 3171234567890123")
    }

    /// Create error for invalid phone number
    pub fn invalid_phone(field: &str) -> Self {
        Self::new(field, "Nomor telepon tidak valid")
            .with_suggestion("Gunakan format nomor telepon Indonesia, contoh: 08123456789")
    }

    /// Create error for a place-and-date of birth without the place part
    pub fn invalid_ttl(field: &str, value: &str) -> Self {
        Self::new(field, format!("Format tempat, tanggal lahir '{}' tidak valid", value))
            .with_suggestion("Gunakan format: Tempat, DD Bulan YYYY (contoh: Jakarta, 15 Januari 1990)")
    }

    /// Create error for an end date that precedes its start date
    pub fn date_order(field: &str, start_label: &str, end_label: &str) -> Self {
        Self::new(
            field,
            format!("{} tidak boleh sebelum {}", end_label, start_label.to_lowercase()),
        )
    }

    /// Create error for an empty list
    pub fn empty_list(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} belum berisi data", label))
            .with_suggestion("Tambahkan minimal satu baris")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Formatted report suitable for a tool result or the terminal
    pub fn to_report(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Periksa kembali data: {} catatan ditemukan\n",
            self.errors.len()
        )];

        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }

        parts.join("\n")
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate NIK format (16 digits)
pub fn validate_nik(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "NIK"));
        return;
    }

    if !NIK_PATTERN.is_match(trimmed) {
        errors.add(ValidationError::invalid_nik(field));
    }
}

/// Validate NIK format (16 digits) - optional, only validate if provided
pub fn validate_nik_optional(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if !trimmed.is_empty() && !NIK_PATTERN.is_match(trimmed) {
        errors.add(ValidationError::invalid_nik(field));
    }
}

/// Validate phone number format
pub fn validate_phone(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "Nomor Telepon"));
        return;
    }

    let digits = PHONE_SEPARATORS.replace_all(trimmed, "");

    // Indonesian phone numbers should be 10-13 digits
    if !digits.chars().all(|c| c.is_ascii_digit()) || digits.len() < 10 || digits.len() > 13 {
        errors.add(ValidationError::invalid_phone(field));
    }
}

/// Validate tempat tanggal lahir format
pub fn validate_ttl(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "Tempat, Tanggal Lahir"));
        return;
    }

    // Should contain a comma separating place and date
    if !trimmed.contains(',') {
        errors.add(ValidationError::invalid_ttl(field, trimmed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_with_separators() {
        let mut errors = ValidationErrors::new();
        validate_phone("0812-3456-7890", "telp", &mut errors);
        validate_phone("(021) 520-1234", "telp_kantor", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_phone_too_short() {
        let mut errors = ValidationErrors::new();
        validate_phone("08123", "telp", &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validate_nik_optional_empty() {
        let mut errors = ValidationErrors::new();
        validate_nik_optional("", "nik", &mut errors);
        assert!(errors.is_empty());
        validate_nik_optional("12345", "nik", &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_report_numbering() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::empty_field("nama", "Nama"));
        errors.add(ValidationError::date_order("tanggal_keluar", "Tanggal Masuk", "Tanggal Keluar"));
        let report = errors.to_report();
        assert!(report.contains("2 catatan"));
        assert!(report.contains("1. [nama] Nama tidak boleh kosong"));
        assert!(report.contains("tidak boleh sebelum tanggal masuk"));
    }
}
