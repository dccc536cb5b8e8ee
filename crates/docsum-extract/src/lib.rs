//! Text extraction from uploaded files.
//!
//! File type is inferred from the extension against a fixed allow-list;
//! anything else is an unsupported-file error before any bytes are read.

use std::fs;
use std::path::Path;

use docsum_core::error::{Error, Result, Stage};
use tracing::debug;

mod docx;

/// The file formats the extractor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    Pdf,
    Docx,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "txt" | "md" => Ok(FileKind::PlainText),
            "pdf" => Ok(FileKind::Pdf),
            "docx" => Ok(FileKind::Docx),
            _ => Err(Error::UnsupportedFile(path.display().to_string())),
        }
    }
}

/// Extract plain text from `path`, dispatching on the file extension.
///
/// Returns `NoTextDetected` when the file yields only whitespace, so the
/// caller never indexes an empty document.
pub fn extract_text(path: &Path) -> Result<String> {
    let kind = FileKind::from_path(path)?;
    debug!(path = %path.display(), ?kind, "extracting text");
    let text = match kind {
        FileKind::PlainText => read_text_lossy(path)?,
        FileKind::Pdf => pdf_extract::extract_text(path)
            .map_err(|e| Error::stage(Stage::Extract, anyhow::anyhow!("{e}")))?,
        FileKind::Docx => docx::extract_docx_text(path)
            .map_err(|e| Error::stage(Stage::Extract, e))?,
    };
    if text.trim().is_empty() {
        return Err(Error::NoTextDetected(path.display().to_string()));
    }
    Ok(text)
}

fn read_text_lossy(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(_) => {
            let bytes = fs::read(path).map_err(|e| Error::stage(Stage::Extract, e))?;
            Ok(String::from_utf8_lossy(&bytes).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_kind_allow_list() {
        assert_eq!(FileKind::from_path(Path::new("a.txt")).unwrap(), FileKind::PlainText);
        assert_eq!(FileKind::from_path(Path::new("a.PDF")).unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_path(Path::new("a.docx")).unwrap(), FileKind::Docx);
        assert!(matches!(
            FileKind::from_path(Path::new("a.xlsx")),
            Err(Error::UnsupportedFile(_))
        ));
        assert!(matches!(FileKind::from_path(Path::new("noext")), Err(Error::UnsupportedFile(_))));
    }
}
