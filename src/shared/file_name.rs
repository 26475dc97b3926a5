/// Last path component of a client-supplied file name
///
/// Browsers and scripted clients may send `C:\scans\lab.pdf` or
/// `records/2024/lab.pdf`; only `lab.pdf` is kept.
pub fn base_name(file_name: &str) -> &str {
    file_name.rsplit(['/', '\\']).next().unwrap_or(file_name)
}

/// Extension of an uploaded file name, without the leading dot
///
/// Only the last path component is considered, so client-supplied names
/// like `C:\scans\lab.PDF` resolve to `PDF`. A name ending in a dot has no
/// extension.
pub fn extension(file_name: &str) -> Option<&str> {
    match base_name(file_name).rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("selfie.png"), "selfie.png");
        assert_eq!(base_name("records/2024/selfie.png"), "selfie.png");
        assert_eq!(base_name(r"C:\labs\selfie.png"), "selfie.png");
        assert_eq!(base_name(r"mixed/dir\lab.pdf"), "lab.pdf");
        assert_eq!(base_name("dir/"), "");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("report.pdf"), Some("pdf"));
        assert_eq!(extension("archive.tar.GZ"), Some("GZ"));
        assert_eq!(extension(".pdf"), Some("pdf"));
        assert_eq!(extension(r"C:\scans\lab.PDF"), Some("PDF"));
        assert_eq!(extension("dir.v2/README"), None);
        assert_eq!(extension("README"), None);
        assert_eq!(extension("trailing."), None);
        assert_eq!(extension(""), None);
    }
}
