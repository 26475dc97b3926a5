//! Filename classifier for medical uploads
//!
//! Maps a filename to an allowed content type (by extension) and a semantic
//! category (by keywords in the name). Category inference is best-effort: it
//! looks at the filename only, never at the content.

use serde::{Deserialize, Serialize};
use sqlx::Type;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::shared::file_name::extension;

/// File types accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedFileType {
    Pdf,
    Jpeg,
    Png,
    Gif,
    Doc,
    Docx,
    Txt,
}

impl AllowedFileType {
    /// Human readable list used in rejection messages
    pub const SUPPORTED: &'static str = "PDF, JPG, PNG, GIF, DOC, DOCX, TXT";

    /// Match an extension (without dot), case-insensitively
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        extension(file_name).and_then(Self::from_extension)
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Txt => "text/plain",
        }
    }
}

/// Semantic bucket inferred from a filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "file_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    LabResults,
    Insurance,
    Prescription,
    MedicalRecords,
    Other,
}

/// Keyword rules, checked in order; the first match wins
const CATEGORY_RULES: &[(FileCategory, &[&str])] = &[
    (FileCategory::LabResults, &["lab", "test", "result"]),
    (FileCategory::Insurance, &["insurance", "card", "coverage"]),
    (FileCategory::Prescription, &["prescription", "rx", "medication"]),
    (FileCategory::MedicalRecords, &["medical", "history", "record"]),
];

impl FileCategory {
    /// Infer the category from substrings of the lowercased filename
    pub fn infer(file_name: &str) -> Self {
        let name = file_name.to_lowercase();
        CATEGORY_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(FileCategory::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::LabResults => "lab_results",
            FileCategory::Insurance => "insurance",
            FileCategory::Prescription => "prescription",
            FileCategory::MedicalRecords => "medical_records",
            FileCategory::Other => "other",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lab_results" => Ok(FileCategory::LabResults),
            "insurance" => Ok(FileCategory::Insurance),
            "prescription" => Ok(FileCategory::Prescription),
            "medical_records" => Ok(FileCategory::MedicalRecords),
            "other" => Ok(FileCategory::Other),
            _ => Err(format!("Unknown file category '{}'", s)),
        }
    }
}

/// Result of classifying an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub file_type: AllowedFileType,
    pub category: FileCategory,
}

/// Classify a filename, or `None` if its extension is not allowed
pub fn classify(file_name: &str) -> Option<Classification> {
    let file_type = AllowedFileType::from_file_name(file_name)?;
    Some(Classification {
        file_type,
        category: FileCategory::infer(file_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Word;
    use fake::Fake;

    #[test]
    fn test_allowed_extensions_map_to_content_type() {
        let cases = [
            ("scan.pdf", "application/pdf"),
            ("photo.jpg", "image/jpeg"),
            ("photo.jpeg", "image/jpeg"),
            ("xray.png", "image/png"),
            ("anim.gif", "image/gif"),
            ("letter.doc", "application/msword"),
            (
                "letter.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
            ("notes.txt", "text/plain"),
        ];

        for (name, expected) in cases {
            let file_type = AllowedFileType::from_file_name(name).unwrap();
            assert_eq!(file_type.content_type(), expected, "{}", name);

            let upper = name.to_uppercase();
            let file_type = AllowedFileType::from_file_name(&upper).unwrap();
            assert_eq!(file_type.content_type(), expected, "{}", upper);
        }

        assert_eq!(
            AllowedFileType::from_file_name("Scan.PdF").map(|t| t.content_type()),
            Some("application/pdf")
        );
    }

    #[test]
    fn test_disallowed_extensions_are_rejected() {
        for name in [
            "malware.exe",
            "archive.zip",
            "page.html",
            "image.webp",
            "pdf",
            "no_extension",
            "trailing.",
            "report.pdf.exe",
        ] {
            assert!(classify(name).is_none(), "{} should be rejected", name);
        }
    }

    #[test]
    fn test_category_rules() {
        assert_eq!(FileCategory::infer("blood_LAB.pdf"), FileCategory::LabResults);
        assert_eq!(FileCategory::infer("covid-test.png"), FileCategory::LabResults);
        assert_eq!(FileCategory::infer("Results_2024.pdf"), FileCategory::LabResults);
        assert_eq!(FileCategory::infer("insurance.pdf"), FileCategory::Insurance);
        assert_eq!(FileCategory::infer("ID_Card.jpg"), FileCategory::Insurance);
        assert_eq!(FileCategory::infer("coverage.docx"), FileCategory::Insurance);
        assert_eq!(FileCategory::infer("prescription.pdf"), FileCategory::Prescription);
        assert_eq!(FileCategory::infer("RX-0042.png"), FileCategory::Prescription);
        assert_eq!(FileCategory::infer("medication_plan.txt"), FileCategory::Prescription);
        assert_eq!(FileCategory::infer("Medical.pdf"), FileCategory::MedicalRecords);
        assert_eq!(FileCategory::infer("family_history.doc"), FileCategory::MedicalRecords);
        assert_eq!(FileCategory::infer("record.pdf"), FileCategory::MedicalRecords);
        assert_eq!(FileCategory::infer("selfie.png"), FileCategory::Other);
    }

    #[test]
    fn test_category_rule_order_first_match_wins() {
        assert_eq!(FileCategory::infer("Lab_Insurance.pdf"), FileCategory::LabResults);
        assert_eq!(FileCategory::infer("insurance_rx.pdf"), FileCategory::Insurance);
        assert_eq!(
            FileCategory::infer("medical_prescription.pdf"),
            FileCategory::Prescription
        );
        assert_eq!(
            FileCategory::infer("medical_record_card.pdf"),
            FileCategory::Insurance
        );
    }

    #[test]
    fn test_category_is_deterministic() {
        for _ in 0..200 {
            let word: String = Word().fake();
            let name = format!("{}.pdf", word);
            assert_eq!(FileCategory::infer(&name), FileCategory::infer(&name));
            assert_eq!(
                classify(&name).map(|c| c.category),
                Some(FileCategory::infer(&name))
            );
        }
    }

    #[test]
    fn test_category_string_round_trip() {
        for category in [
            FileCategory::LabResults,
            FileCategory::Insurance,
            FileCategory::Prescription,
            FileCategory::MedicalRecords,
            FileCategory::Other,
        ] {
            assert_eq!(category.as_str().parse::<FileCategory>(), Ok(category));
            assert_eq!(
                serde_json::to_string(&category).unwrap(),
                format!("\"{}\"", category)
            );
        }
        assert!("labs".parse::<FileCategory>().is_err());
    }
}
