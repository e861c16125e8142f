//! Builders for in-memory .docx fixtures
#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use cvsift::{CvRecord, document::SIDEBAR_KEYS, document::SidebarKey};
use zip::write::SimpleFileOptions;

const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" "#,
    r#"xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape" "#,
    r#"xmlns:v="urn:schemas-microsoft-com:vml""#
);

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, escape(text))
}

pub fn paragraph(text: &str) -> String {
    format!("<w:p>{}</w:p>", run(text))
}

pub fn styled(text: &str, style: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{style}"/></w:pPr>{}</w:p>"#,
        run(text)
    )
}

pub fn bullet(text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr>{}</w:p>"#,
        run(text)
    )
}

/// One paragraph whose lines are separated by `w:br`
pub fn broken_lines(lines: &[&str]) -> String {
    let runs: Vec<String> = lines.iter().map(|line| run(line)).collect();
    format!("<w:p>{}</w:p>", runs.join("<w:r><w:br/></w:r>"))
}

/// A floating text box with both the modern and the VML fallback copy
pub fn text_box(paragraphs: &[String]) -> String {
    let content = paragraphs.concat();
    format!(
        concat!(
            "<w:p><w:r><mc:AlternateContent>",
            r#"<mc:Choice Requires="wps"><w:drawing><wps:txbx><w:txbxContent>{0}</w:txbxContent></wps:txbx></w:drawing></mc:Choice>"#,
            "<mc:Fallback><w:pict><v:textbox><w:txbxContent>{0}</w:txbxContent></v:textbox></w:pict></mc:Fallback>",
            "</mc:AlternateContent></w:r></w:p>"
        ),
        content
    )
}

#[derive(Debug, Clone, Default)]
pub struct DocxBuilder {
    body: Vec<String>,
    headers: Vec<Vec<String>>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, paragraph: String) -> Self {
        self.body.push(paragraph);
        self
    }

    pub fn header(mut self, paragraphs: Vec<String>) -> Self {
        self.headers.push(paragraphs);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();

        writer.start_file("word/document.xml", options).unwrap();
        write!(
            writer,
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document {NAMESPACES}><w:body>{}</w:body></w:document>"#,
            self.body.concat()
        )
        .unwrap();

        for (index, paragraphs) in self.headers.iter().enumerate() {
            writer
                .start_file(format!("word/header{}.xml", index + 1), options)
                .unwrap();
            write!(
                writer,
                r#"<?xml version="1.0" encoding="UTF-8"?><w:hdr {NAMESPACES}>{}</w:hdr>"#,
                paragraphs.concat()
            )
            .unwrap();
        }

        writer.finish().unwrap().into_inner()
    }

    pub fn write(&self, path: &Path) -> PathBuf {
        std::fs::write(path, self.build()).unwrap();
        path.to_path_buf()
    }
}

fn sample_header() -> Vec<String> {
    vec![
        paragraph("Confidential"),
        text_box(&[
            paragraph("Senior Engineer"),
            paragraph("Ada Lovelace"),
            broken_lines(&["SKILLS.", "Python, Python", "AWS  ·  Azure"]),
            paragraph("Languages"),
            paragraph("Rust; Go"),
            paragraph("Tools"),
            paragraph("git | docker"),
            paragraph("Certifications"),
            paragraph("CKA"),
            paragraph("Industries"),
            paragraph("Banking"),
            paragraph("Spoken Languages"),
            paragraph("English, French"),
            paragraph("Academic Background"),
            paragraph("MSc Mathematics"),
        ]),
    ]
}

/// A complete CV: text-box header repeated on the first page, overview and
/// two experience entries
pub fn sample_cv() -> DocxBuilder {
    DocxBuilder::new()
        .header(sample_header())
        .header(sample_header())
        .body(paragraph("Ada Lovelace"))
        .body(styled("OVERVIEW", "Heading1"))
        .body(paragraph("Summary."))
        .body(styled("PROFESSIONAL EXPERIENCE", "Heading1"))
        .body(paragraph("Jan 2020 - Present | Acme"))
        .body(paragraph("Did X."))
        .body(bullet("• Shipped Y"))
        .body(paragraph("Environment: Go, SQL"))
        .body(styled("Initech, Engineer", "Heading2"))
        .body(paragraph("Maintained TPS."))
        .body(bullet("Wrote reports"))
}

fn label(key: SidebarKey) -> &'static str {
    match key {
        SidebarKey::Skills => "SKILLS",
        SidebarKey::Languages => "LANGUAGES",
        SidebarKey::Tools => "TOOLS",
        SidebarKey::Certifications => "CERTIFICATIONS",
        SidebarKey::Industries => "INDUSTRIES",
        SidebarKey::SpokenLanguages => "SPOKEN LANGUAGES",
        SidebarKey::AcademicBackground => "ACADEMIC BACKGROUND",
    }
}

/// How a template would lay a record out; `environment` decides how an
/// entry's environment line is written, `None` drops it
pub fn render_record(
    record: &CvRecord,
    environment: impl Fn(&[String]) -> Option<String>,
) -> DocxBuilder {
    let mut sidebar = vec![
        paragraph(&record.identity.title),
        paragraph(&record.identity.full_name),
    ];
    for key in SIDEBAR_KEYS {
        sidebar.push(paragraph(label(key)));
        sidebar.push(paragraph(&record.sidebar.get(key).join(", ")));
    }

    let mut builder = DocxBuilder::new()
        .header(vec![text_box(&sidebar)])
        .body(styled("OVERVIEW", "Heading1"))
        .body(paragraph(&record.overview))
        .body(styled("PROFESSIONAL EXPERIENCE", "Heading1"));

    for entry in &record.experiences {
        builder = builder.body(styled(&entry.heading, "Heading2"));
        if !entry.description.is_empty() {
            builder = builder.body(paragraph(&entry.description));
        }
        for item in &entry.bullets {
            builder = builder.body(bullet(item));
        }
        if let Some(line) = entry.environment.as_deref().and_then(&environment) {
            builder = builder.body(paragraph(&line));
        }
    }

    builder
}

/// The usual `Environment: a, b` line
pub fn comma_environment(tokens: &[String]) -> Option<String> {
    Some(format!("Environment: {}", tokens.join(", ")))
}
