// Shared fixtures for covergen-core integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" "#,
    r#"ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" "#,
    r#"ContentType="application/vnd.openxmlformats-officedocument."#,
    r#"wordprocessingml.document.main+xml"/>"#,
    "</Types>"
);

pub const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" "#,
    r#"Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" "#,
    r#"Target="word/document.xml"/>"#,
    "</Relationships>"
);

pub const DOCUMENT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    "</Relationships>"
);

/// Wrap paragraphs in a minimal WordprocessingML body.
pub fn document_xml(body: &str) -> String {
    format!(
        "{XML_DECL}{}<w:body>{body}</w:body></w:document>",
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#
    )
}

/// A minimal .docx: content types, package and document relationships, a
/// stored image-ish blob, and document.xml.
pub fn docx_bytes(document: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buf));
        let deflated = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = FileOptions::default().compression_method(CompressionMethod::Stored);

        zip.start_file("[Content_Types].xml", deflated).unwrap();
        zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
        zip.start_file("_rels/.rels", deflated).unwrap();
        zip.write_all(PACKAGE_RELS.as_bytes()).unwrap();
        zip.start_file("word/_rels/document.xml.rels", deflated).unwrap();
        zip.write_all(DOCUMENT_RELS.as_bytes()).unwrap();
        zip.add_directory("word/media/", stored).unwrap();
        zip.start_file("word/media/logo.bin", stored).unwrap();
        zip.write_all(&[0u8, 1, 2, 3, 0xff]).unwrap();
        zip.start_file("word/document.xml", deflated).unwrap();
        zip.write_all(document.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buf
}

pub fn write_docx(path: &Path, document: &str) {
    std::fs::write(path, docx_bytes(document)).expect("write docx fixture");
}
