//! Artifact storage types.

use bytes::Bytes;

use super::error::StorageError;

/// Logical classification of an uploaded file.
///
/// Each category maps to a fixed subdirectory of the upload root (local mode)
/// or a key segment (remote mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileCategory {
    /// Personal profile images.
    Personal,
    /// Driving and vehicle licenses.
    Licenses,
    /// Identity cards.
    IdCards,
    /// Vehicle photos.
    CarImages,
    /// Anything that does not match a known field.
    #[default]
    Others,
}

impl FileCategory {
    /// Directory (or key segment) the category's files live under.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Licenses => "licenses",
            Self::IdCards => "id_cards",
            Self::CarImages => "car_images",
            Self::Others => "others",
        }
    }

    /// Routes a multipart field name to its category.
    #[must_use]
    pub fn from_field(field: &str) -> Self {
        match field {
            "personalImage" => Self::Personal,
            "personalLicense" | "carLicense" => Self::Licenses,
            "idCard" => Self::IdCards,
            "carImage" => Self::CarImages,
            _ => Self::Others,
        }
    }

    /// All categories, in directory-creation order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Personal,
            Self::Licenses,
            Self::IdCards,
            Self::CarImages,
            Self::Others,
        ]
    }
}

/// A file received from a multipart submission, buffered in memory.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Multipart field the file was submitted under.
    pub field: String,
    /// Original filename as sent by the client.
    pub filename: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Bytes,
}

/// A stored file: durable URL plus, in remote mode, an opaque deletion handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Durable, publicly resolvable URL.
    pub url: String,
    /// Opaque handle required to delete the object later. Absent in local mode.
    pub public_id: Option<String>,
}

/// A stored file tagged with the field it was submitted under.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Multipart field name.
    pub field: String,
    /// The stored artifact.
    pub artifact: Artifact,
}

/// Outcome of one best-effort artifact removal.
#[derive(Debug)]
pub struct RemovalOutcome {
    /// The artifact the removal was attempted for.
    pub artifact: Artifact,
    /// Whether the removal succeeded.
    pub result: Result<(), StorageError>,
}

impl RemovalOutcome {
    /// Whether this removal succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Extracts the extension (including the leading dot) from a filename,
/// reduced to characters safe for storage keys.
#[must_use]
pub fn file_extension(filename: &str) -> String {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return String::new();
    };
    if ext.is_empty() || ext.contains('/') {
        return String::new();
    }
    let safe: String = ext
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if safe.is_empty() {
        String::new()
    } else {
        format!(".{safe}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("personalImage", FileCategory::Personal)]
    #[case("personalLicense", FileCategory::Licenses)]
    #[case("carLicense", FileCategory::Licenses)]
    #[case("idCard", FileCategory::IdCards)]
    #[case("carImage", FileCategory::CarImages)]
    #[case("somethingElse", FileCategory::Others)]
    #[case("", FileCategory::Others)]
    fn test_category_from_field(#[case] field: &str, #[case] expected: FileCategory) {
        assert_eq!(FileCategory::from_field(field), expected);
    }

    #[rstest]
    #[case("photo.png", ".png")]
    #[case("scan.PDF", ".PDF")]
    #[case("archive.tar.gz", ".gz")]
    #[case("noext", "")]
    #[case("trailingdot.", "")]
    #[case("weird.p/ng", "")]
    #[case("license.j+pg", ".jpg")]
    fn test_file_extension(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(file_extension(name), expected);
    }

    #[test]
    fn test_category_dirs_are_distinct() {
        let dirs: std::collections::HashSet<_> =
            FileCategory::all().iter().map(|c| c.dir()).collect();
        assert_eq!(dirs.len(), 5);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Extensions only ever contain a leading dot plus ASCII alphanumerics,
    // whatever the client named the file.
    proptest! {
        #[test]
        fn prop_extension_safe_chars(filename in ".*") {
            let ext = file_extension(&filename);
            if let Some(rest) = ext.strip_prefix('.') {
                prop_assert!(!rest.is_empty());
                prop_assert!(rest.chars().all(|c| c.is_ascii_alphanumeric()));
            } else {
                prop_assert!(ext.is_empty());
            }
        }
    }
}
