use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:v="urn:schemas-microsoft-com:vml"><w:body>"#;
const DOCUMENT_CLOSE: &str = "</w:body></w:document>";

/// Builds minimal in-memory `.docx` packages.
#[derive(Default)]
pub struct DocxFixture {
    body: String,
    relationships: Vec<(String, String)>,
    media: Vec<(String, Vec<u8>)>,
    skip_relationships: bool,
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn drawing(relationship_id: &str) -> String {
    format!(
        r#"<w:r><w:drawing><wp:inline><a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="{relationship_id}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
    )
}

impl DocxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        self.body.push_str(&format!(
            r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            escape(text)
        ));
        self
    }

    pub fn image_paragraph(mut self, relationship_id: &str) -> Self {
        self.body
            .push_str(&format!("<w:p>{}</w:p>", drawing(relationship_id)));
        self
    }

    pub fn raw_paragraph(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// Adds `word/media/{name}` and a relationship `relationship_id -> media/{name}`.
    pub fn media(mut self, relationship_id: &str, name: &str, data: &[u8]) -> Self {
        self.relationships
            .push((relationship_id.to_string(), format!("media/{name}")));
        self.media.push((format!("word/media/{name}"), data.to_vec()));
        self
    }

    pub fn without_relationships(mut self) -> Self {
        self.skip_relationships = true;
        self
    }

    pub fn document_xml(&self) -> String {
        format!("{DOCUMENT_OPEN}{}{DOCUMENT_CLOSE}", self.body)
    }

    fn relationships_xml(&self) -> String {
        let entries: String = self
            .relationships
            .iter()
            .map(|(id, target)| {
                format!(
                    r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{target}"/>"#
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{entries}</Relationships>"#
        )
    }

    pub fn build(self) -> Bytes {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(self.document_xml().as_bytes()).unwrap();

        if !self.skip_relationships {
            zip.start_file("word/_rels/document.xml.rels", options)
                .unwrap();
            zip.write_all(self.relationships_xml().as_bytes()).unwrap();
        }

        for (name, data) in &self.media {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }

        Bytes::from(zip.finish().unwrap().into_inner())
    }
}

/// A zip archive with arbitrary entries and no document structure.
pub fn archive_with(entries: &[(&str, &[u8])]) -> Bytes {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    Bytes::from(zip.finish().unwrap().into_inner())
}
