//! Text extraction for uploaded syllabi. PDF pages go through `pdf-extract`;
//! a DOCX is a zip whose `word/document.xml` holds the runs, one `<w:p>` per
//! paragraph.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::IngestError;

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    /// Pick the reader from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" | "md" => Ok(Self::Text),
            _ => Err(IngestError::UnsupportedFile(ext)),
        }
    }
}

/// Plain text of a syllabus document. Whitespace-only output is an error so
/// scanned PDFs fail loudly instead of importing nothing.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, IngestError> {
    let text = match kind {
        DocumentKind::Pdf => pdf_text(bytes)?,
        DocumentKind::Docx => docx_text(bytes)?,
        DocumentKind::Text => String::from_utf8_lossy(bytes).into_owned(),
    };
    if text.trim().is_empty() {
        return Err(IngestError::NoText);
    }
    tracing::debug!(?kind, chars = text.len(), "extracted syllabus text");
    Ok(text)
}

pub fn pdf_text(bytes: &[u8]) -> Result<String, IngestError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| IngestError::Pdf(e.to_string()))
}

pub fn docx_text(bytes: &[u8]) -> Result<String, IngestError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| IngestError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|e| IngestError::Docx(format!("{DOCX_BODY}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| IngestError::Docx(e.to_string()))?;
    document_xml_text(&xml)
}

/// Text runs (`<w:t>`) joined per paragraph; tabs and breaks kept.
fn document_xml_text(xml: &str) -> Result<String, IngestError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event().map_err(|e| IngestError::Docx(e.to_string()))? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => {
                let text = t.unescape().map_err(|e| IngestError::Docx(e.to_string()))?;
                out.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn paragraph(text: &str) -> String {
        format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>")
    }

    fn docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs.iter().map(|p| paragraph(p)).collect();
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}</w:body></w:document>"
        );

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let opts = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        zip.start_file("[Content_Types].xml", opts).unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file(DOCX_BODY, opts).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    /// Single-page PDF with one line of Helvetica per entry, xref offsets
    /// computed as the file is assembled.
    fn pdf(lines: &[&str]) -> Vec<u8> {
        let mut content = String::from("BT /F1 12 Tf 72 720 Td 14 TL\n");
        for line in lines {
            content.push_str(&format!("({line}) Tj T*\n"));
        }
        content.push_str("ET");

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
        ];

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for off in offsets {
            out.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }

    #[test]
    fn kind_follows_extension() {
        assert_eq!(DocumentKind::from_path(Path::new("a/Bio.PDF")).unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_path(Path::new("bio.docx")).unwrap(), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_path(Path::new("bio.md")).unwrap(), DocumentKind::Text);
        assert!(matches!(
            DocumentKind::from_path(Path::new("bio.rtf")),
            Err(IngestError::UnsupportedFile(ext)) if ext == "rtf"
        ));
        assert!(DocumentKind::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn docx_paragraphs_become_lines() {
        let bytes = docx(&[
            "Calculus Homework 4 | homework | 5% | 2026-01-13 | 3",
            "Essay &amp; Reflection | project | 20% | 2026-01-17 | 10",
        ]);
        let text = extract_text(DocumentKind::Docx, &bytes).unwrap();
        assert_eq!(
            text,
            "Calculus Homework 4 | homework | 5% | 2026-01-13 | 3\n\
             Essay & Reflection | project | 20% | 2026-01-17 | 10\n"
        );
    }

    #[test]
    fn docx_tabs_and_breaks() {
        let xml = "<w:document xmlns:w=\"w\"><w:body><w:p><w:r><w:t>Exam</w:t><w:tab/>\
                   <w:t>25%</w:t><w:br/><w:t>Room 4</w:t></w:r></w:p>\
                   <w:p><w:r><w:instrText>IGNORED</w:instrText></w:r></w:p></w:body></w:document>";
        assert_eq!(document_xml_text(xml).unwrap(), "Exam\t25%\nRoom 4\n\n");
    }

    #[test]
    fn docx_without_body_is_rejected() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<w:styles/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = docx_text(&bytes).unwrap_err();
        assert!(err.to_string().contains(DOCX_BODY), "{err}");
        assert!(matches!(docx_text(b"not a zip"), Err(IngestError::Docx(_))));
    }

    #[test]
    fn pdf_text_is_extracted() {
        let bytes = pdf(&["Biology Exam 1 - due 2026-02-05 - 6h"]);
        let text = extract_text(DocumentKind::Pdf, &bytes).unwrap();
        assert!(text.contains("Biology Exam 1"), "{text:?}");
        assert!(text.contains("2026-02-05"), "{text:?}");
    }

    #[test]
    fn broken_pdf_and_blank_text_fail() {
        assert!(matches!(pdf_text(b"plain words"), Err(IngestError::Pdf(_))));
        assert!(matches!(
            extract_text(DocumentKind::Text, b"  \n\t"),
            Err(IngestError::NoText)
        ));
    }
}
