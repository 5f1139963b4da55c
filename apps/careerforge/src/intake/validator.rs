//! Upload validation over the declared type, extension and size.

use thiserror::Error;

use crate::intake::UploadedFile;

/// Upload ceiling: 10 MiB. A file of exactly this size is accepted.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

pub const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".txt"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a PDF, DOC, DOCX, or TXT file")]
    UnsupportedType { name: String, content_type: String },

    #[error("File size must be less than 10MB")]
    FileTooLarge { size: u64, limit: u64 },
}

/// Accepts the file if its declared type OR its extension is on the allow-list,
/// and its size does not exceed [`MAX_UPLOAD_BYTES`]. Type is checked first.
pub fn validate(file: &UploadedFile) -> Result<(), ValidationError> {
    if !is_allowed_type(&file.name, &file.content_type) {
        return Err(ValidationError::UnsupportedType {
            name: file.name.clone(),
            content_type: file.content_type.clone(),
        });
    }

    let size = file.size();
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}

fn is_allowed_type(name: &str, content_type: &str) -> bool {
    let name_lower = name.to_lowercase();
    ALLOWED_MIME_TYPES.contains(&content_type)
        || ALLOWED_EXTENSIONS
            .iter()
            .any(|ext| name_lower.ends_with(ext))
}

/// Human-readable size for the uploaded-file card: "0 Bytes", "2 KB", "1.5 MB".
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{scaled:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: &str, size: usize) -> UploadedFile {
        UploadedFile::new(name, content_type, vec![b'a'; size])
    }

    #[test]
    fn test_accepts_each_allowed_mime_type() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(validate(&file("resume", mime, 10)).is_ok(), "{mime} rejected");
        }
    }

    #[test]
    fn test_accepts_by_extension_when_mime_unknown() {
        assert!(validate(&file("Resume.DOCX", "application/octet-stream", 10)).is_ok());
        assert!(validate(&file("cv.txt", "", 10)).is_ok());
    }

    #[test]
    fn test_rejects_when_type_and_extension_both_disallowed() {
        let err = validate(&file("photo.png", "image/png", 10)).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
        assert_eq!(err.to_string(), "Please upload a PDF, DOC, DOCX, or TXT file");
    }

    #[test]
    fn test_size_boundary_exactly_ten_mib_accepted() {
        let exact = file("cv.pdf", "application/pdf", MAX_UPLOAD_BYTES as usize);
        assert!(validate(&exact).is_ok());
    }

    #[test]
    fn test_size_boundary_one_byte_over_rejected() {
        let over = file("cv.pdf", "application/pdf", MAX_UPLOAD_BYTES as usize + 1);
        let err = validate(&over).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FileTooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                limit: MAX_UPLOAD_BYTES
            }
        );
        assert_eq!(err.to_string(), "File size must be less than 10MB");
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = validate(&file("big.exe", "application/x-msdownload", MAX_UPLOAD_BYTES as usize + 1))
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(2048), "2 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(MAX_UPLOAD_BYTES), "10 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }
}
