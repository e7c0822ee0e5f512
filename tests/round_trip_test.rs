mod common;

use common::*;
use hwpx_spell::document::{EditableView, Session, ViewParagraph, extract_paragraphs};
use hwpx_spell::DocumentError;
use std::path::Path;

fn sample_section() -> String {
    section_xml(&[
        paragraph(&["첫 번째 문단입니다."]),
        paragraph(&[""]),
        picture_paragraph(),
        paragraph(&["굵은 ", "글씨와 ", "보통 글씨"]),
        paragraph(&["마지막 &amp; 끝"]),
    ]
    .concat())
}

#[test]
fn test_extractor_keeps_every_paragraph() {
    let view = extract_paragraphs(&sample_section()).unwrap();

    assert_eq!(view.len(), 5);
    assert_eq!(
        view.paragraphs,
        vec![
            ViewParagraph::Text("첫 번째 문단입니다.".to_string()),
            ViewParagraph::Blank,
            ViewParagraph::Blank,
            ViewParagraph::Text("굵은 글씨와 보통 글씨".to_string()),
            ViewParagraph::Text("마지막 & 끝".to_string()),
        ]
    );
}

#[test]
fn test_lowest_section_index_is_used() {
    let first = section_xml(&paragraph(&["section three"]));
    let second = section_xml(&paragraph(&["section seven"]));
    let package = build_package(&[(7, &second), (3, &first)]);

    let session = Session::from_bytes(package).unwrap();

    assert_eq!(session.section().index, 3);
    assert_eq!(session.metadata().section_index, 3);
    assert_eq!(session.view().paragraph_texts(), vec!["section three"]);
}

#[test]
fn test_missing_section_is_content_not_found() {
    let out_of_range = section_xml(&paragraph(&["too far"]));
    let package = build_package(&[(100, &out_of_range)]);

    let result = Session::from_bytes(package);
    assert!(matches!(result, Err(DocumentError::ContentNotFound)));
}

#[test]
fn test_not_a_zip_package() {
    let result = Session::from_bytes(b"plain text, not a package".to_vec());
    assert!(matches!(result, Err(DocumentError::Zip(_))));
}

#[test]
fn test_save_without_edits_keeps_every_entry() {
    let section = sample_section();
    let package = build_package(&[(0, &section)]);
    let session = Session::from_bytes(package.clone()).unwrap();

    let saved = session.save().unwrap();

    assert_eq!(read_entries(&saved), read_entries(&package));
}

#[test]
fn test_save_rewrites_only_the_section() {
    let section = sample_section();
    let package = build_package(&[(0, &section)]);
    let mut session = Session::from_bytes(package.clone()).unwrap();

    let mut paragraphs = session.view().paragraphs.clone();
    paragraphs[3] = ViewParagraph::Text("고친 문단".to_string());
    session.set_view(EditableView::new(paragraphs));
    let saved = session.save().unwrap();

    let before = read_entries(&package);
    let after = read_entries(&saved);
    assert_eq!(
        before.iter().map(|(name, _)| name).collect::<Vec<_>>(),
        after.iter().map(|(name, _)| name).collect::<Vec<_>>()
    );
    for ((name, old), (_, new)) in before.iter().zip(&after) {
        if name == "Contents/section0.xml" {
            assert_ne!(old, new);
        } else {
            assert_eq!(old, new, "entry {name} changed");
        }
    }

    let updated = read_entry(&saved, "Contents/section0.xml");
    assert!(updated.contains(
        r#"<hp:run charPrIDRef="0"><hp:t>고친 문단</hp:t></hp:run><hp:run charPrIDRef="1"><hp:t></hp:t></hp:run><hp:run charPrIDRef="2"><hp:t></hp:t></hp:run>"#
    ));
    assert!(updated.contains(r#"<hc:img binaryItemIDRef="image1"/>"#));
    assert!(updated.contains("첫 번째 문단입니다."));
}

#[test]
fn test_mimetype_stays_first_and_stored() {
    let section = sample_section();
    let package = build_package(&[(0, &section)]);
    let mut session = Session::from_bytes(package).unwrap();
    session.set_view(EditableView::new(vec![ViewParagraph::Text("x".to_string())]));

    let saved = session.save().unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(saved)).unwrap();
    let first = archive.by_index(0).unwrap();

    assert_eq!(first.name(), "mimetype");
    assert_eq!(first.compression(), zip::CompressionMethod::Stored);
}

#[test]
fn test_every_save_starts_from_the_loaded_section() {
    let section = section_xml(&paragraph(&["원래 ", "문장"]));
    let package = build_package(&[(0, &section)]);
    let mut session = Session::from_bytes(package).unwrap();

    session.set_view(EditableView::new(vec![ViewParagraph::Text("첫 저장".to_string())]));
    let _ = session.save().unwrap();
    session.set_view(EditableView::new(vec![ViewParagraph::Text("원래 문장".to_string())]));
    let saved = session.save().unwrap();

    assert_eq!(read_entry(&saved, "Contents/section0.xml"), section);
}

#[test]
fn test_saved_document_loads_with_edited_text() {
    let section = sample_section();
    let package = build_package(&[(0, &section)]);
    let mut session = Session::from_bytes(package).unwrap();

    let mut paragraphs = session.view().paragraphs.clone();
    paragraphs[0] = ViewParagraph::Text("바뀐 <첫> 문단".to_string());
    session.set_view(EditableView::new(paragraphs.clone()));

    let reloaded = Session::from_bytes(session.save().unwrap()).unwrap();
    assert_eq!(reloaded.view().paragraphs, paragraphs);
}

#[tokio::test]
async fn test_load_rejects_legacy_and_unknown_extensions() {
    let legacy = Session::load(Path::new("report.hwp")).await;
    assert!(matches!(legacy, Err(DocumentError::LegacyFormat)));

    let other = Session::load(Path::new("report.docx")).await;
    assert!(matches!(other, Err(DocumentError::UnsupportedFormat(ext)) if ext == "docx"));
}

#[tokio::test]
async fn test_load_and_save_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("문서.hwpx");
    let output = dir.path().join("out.hwpx");
    let section = sample_section();
    std::fs::write(&input, build_package(&[(2, &section)])).unwrap();

    let session = Session::load(&input).await.unwrap();
    assert_eq!(session.metadata().paragraph_count, 5);
    assert!(session.metadata().file_path.ends_with("문서.hwpx"));

    session.save_to(&output).await.unwrap();
    let saved = std::fs::read(&output).unwrap();
    assert_eq!(read_entry(&saved, "Contents/section2.xml"), section);
}
