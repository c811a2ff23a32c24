use crate::document::{Document, FileKind};
use crate::error::{ExtractionFailure, InvalidInput};
use tracing::{debug, warn};

/// Extract the text of `document`, dispatching on its file kind.
pub fn extract_text(document: &Document) -> Result<String, ExtractionFailure> {
    match document.kind() {
        FileKind::Pdf => read_pdf(&document.content),
        FileKind::Text => Ok(String::from_utf8(document.content.clone())?),
        kind @ (FileKind::Docx | FileKind::Unsupported(_)) => {
            Err(ExtractionFailure::NoExtractor(kind))
        }
    }
}

/// PDF-only entry point.
///
/// Rejects a missing file or a non-PDF name; a PDF that cannot be parsed yields
/// `Ok(None)`.
pub fn extract_pdf(file: Option<&Document>) -> Result<Option<String>, InvalidInput> {
    let file = file.ok_or(InvalidInput::NoFile)?;
    if file.kind() != FileKind::Pdf {
        return Err(InvalidInput::NotPdf {
            name: file.name.clone(),
        });
    }
    match read_pdf(&file.content) {
        Ok(text) => Ok(Some(text)),
        Err(e) => {
            warn!("Error opening file {}: {}", file.name, e);
            Ok(None)
        }
    }
}

/// Text layer of every page in page order, each page ending in a newline.
fn read_pdf(bytes: &[u8]) -> Result<String, ExtractionFailure> {
    // pdf-extract panics on some malformed inputs instead of returning an error
    let pages =
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractionFailure::Pdf("parser panicked".to_string()))?
        .map_err(|e| ExtractionFailure::Pdf(e.to_string()))?;
    let text = join_pages(&pages);
    debug!("Extracted {} chars from {} PDF pages", text.len(), pages.len());
    Ok(text)
}

fn join_pages(pages: &[String]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        text.push_str(page);
        if !page.is_empty() && !page.ends_with('\n') {
            text.push('\n');
        }
    }
    text
}
