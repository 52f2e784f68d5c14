//! Structured-document (.docx) text extraction.
//!
//! Reads `word/document.xml` straight out of the zip container and joins the text of
//! each body-level `w:p` with `\n`, in document order. Paragraphs nested in tables or
//! text boxes are not body-level and are skipped.

use std::io::{Cursor, Read};

use roxmltree::{Document, Node};
use zip::ZipArchive;

use crate::extraction::{ExtractError, SourceFormat};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_paragraphs(bytes: &[u8]) -> Result<String, ExtractError> {
    let fail = |reason: String| ExtractError::failure(SourceFormat::StructuredDoc, reason);

    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| fail(format!("not a zip container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| fail(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| fail(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    let doc = Document::parse(&xml).map_err(|e| fail(format!("malformed XML: {e}")))?;

    let Some(body) = doc.root_element().children().find(|n| is_w(n, "body")) else {
        return Ok(String::new());
    };

    let paragraphs: Vec<String> = body
        .children()
        .filter(|n| is_w(n, "p"))
        .map(paragraph_text)
        .collect();

    Ok(paragraphs.join("\n"))
}

fn is_w(node: &Node, local: &str) -> bool {
    node.is_element() && node.tag_name().name() == local && node.tag_name().namespace() == Some(W_NS)
}

fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    collect_runs(paragraph, &mut text);
    text
}

// Runs may sit under wrappers (hyperlink, ins, smartTag, fldSimple). Paragraph
// properties and nested paragraphs (text boxes) carry no text of this paragraph.
fn collect_runs(node: Node, text: &mut String) {
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(W_NS) {
            continue;
        }
        match child.tag_name().name() {
            "r" => run_text(child, text),
            "pPr" | "p" | "txbxContent" | "del" => {}
            _ => collect_runs(child, text),
        }
    }
}

// Only direct run content counts; drawings and alternate content hold text boxes.
fn run_text(run: Node, text: &mut String) {
    for child in run.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(W_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => text.push_str(child.text().unwrap_or_default()),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
}
