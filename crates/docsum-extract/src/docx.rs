//! Minimal DOCX text extraction: pull the text runs out of
//! `word/document.xml` inside the OOXML zip container.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

pub fn extract_docx_text(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file).context("read docx container")?;
    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| anyhow!("missing word/document.xml: {e}"))?
        .read_to_string(&mut document_xml)
        .context("read word/document.xml")?;
    Ok(plain_text_from_document_xml(&document_xml))
}

/// Collect `<w:t>` runs; `</w:p>` ends a paragraph, `<w:tab/>` and
/// `<w:br/>` become whitespace.
fn plain_text_from_document_xml(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                if let Ok(text) = t.unescape() {
                    out.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break, // salvage whatever was collected so far
            _ => {}
        }
    }
    out
}
