#![allow(dead_code)]

pub mod speller;

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const IMAGE_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3, 4];

pub fn section_xml(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<hs:sec xmlns:hs="http://www.hancom.co.kr/hwpml/2011/section" "#,
            r#"xmlns:hp="http://www.hancom.co.kr/hwpml/2011/paragraph">{}</hs:sec>"#
        ),
        body
    )
}

/// A paragraph with one run per text
pub fn paragraph(runs: &[&str]) -> String {
    let mut xml = String::from(r#"<hp:p paraPrIDRef="0" styleIDRef="0">"#);
    for (i, text) in runs.iter().enumerate() {
        xml.push_str(&format!(
            r#"<hp:run charPrIDRef="{i}"><hp:t>{text}</hp:t></hp:run>"#
        ));
    }
    xml.push_str("</hp:p>");
    xml
}

/// A paragraph holding only a picture
pub fn picture_paragraph() -> String {
    r#"<hp:p paraPrIDRef="0"><hp:run charPrIDRef="0"><hp:pic id="1"><hc:img binaryItemIDRef="image1"/></hp:pic></hp:run></hp:p>"#
        .to_string()
}

/// Build a package holding the given content sections (index, xml) plus the
/// usual supporting entries.
pub fn build_package(sections: &[(usize, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file("mimetype", stored).unwrap();
    writer.write_all(b"application/hwp+zip").unwrap();

    writer.start_file("META-INF/container.xml", deflated).unwrap();
    writer
        .write_all(br#"<?xml version="1.0"?><ocf:container><ocf:rootfiles/></ocf:container>"#)
        .unwrap();

    writer.start_file("Contents/header.xml", deflated).unwrap();
    writer
        .write_all(r#"<?xml version="1.0"?><hh:head><hh:fontface lang="HANGUL"/></hh:head>"#.as_bytes())
        .unwrap();

    for (index, xml) in sections {
        writer
            .start_file(format!("Contents/section{index}.xml"), deflated)
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
    }

    writer.start_file("BinData/image1.png", stored).unwrap();
    writer.write_all(IMAGE_BYTES).unwrap();

    writer.start_file("Preview/PrvText.txt", deflated).unwrap();
    writer.write_all("미리보기".as_bytes()).unwrap();

    writer.finish().unwrap().into_inner()
}

/// Every entry of a package as (name, decompressed bytes), in archive order.
pub fn read_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        entries.push((file.name().to_string(), content));
    }
    entries
}

pub fn read_entry(bytes: &[u8], name: &str) -> String {
    read_entries(bytes)
        .into_iter()
        .find(|(entry, _)| entry == name)
        .map(|(_, content)| String::from_utf8(content).unwrap())
        .unwrap_or_else(|| panic!("missing entry {name}"))
}
