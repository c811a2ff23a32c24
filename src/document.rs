use std::fmt;
use std::path::Path;

/// Extensions accepted by the ingestion validation pass.
///
/// `docx` is accepted here although no extractor exists for it; such files pass
/// validation and are then skipped as producing no text.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "txt", "docx"];

/// An uploaded file: a name and its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub content: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Lower-cased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_name(&self.name)
    }

    pub fn is_supported(&self) -> bool {
        self.extension()
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
    }
}

/// File type resolved once from the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Text,
    Docx,
    Unsupported(Option<String>),
}

impl FileKind {
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("txt") => Self::Text,
            Some("docx") => Self::Docx,
            _ => Self::Unsupported(ext),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("pdf"),
            Self::Text => f.write_str("txt"),
            Self::Docx => f.write_str("docx"),
            Self::Unsupported(Some(ext)) => write!(f, ".{ext}"),
            Self::Unsupported(None) => f.write_str("extensionless"),
        }
    }
}
