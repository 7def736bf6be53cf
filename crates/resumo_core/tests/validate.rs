use resumo_core::{validate, SelectedFile, PDF_MIME_TYPE};

fn file(name: &str, mime_type: &str) -> SelectedFile {
    SelectedFile::new(name, mime_type, b"%PDF-1.4".to_vec())
}

#[test]
fn accepts_pdf_mime_type_regardless_of_name() {
    assert!(validate(Some(&file("scan", PDF_MIME_TYPE))));
    assert!(validate(Some(&file("report.bin", PDF_MIME_TYPE))));
}

#[test]
fn accepts_pdf_extension_in_any_case() {
    for name in ["a.pdf", "b.PDF", "c.Pdf", "archive.tar.pDf"] {
        assert!(validate(Some(&file(name, ""))), "{name} should be accepted");
        assert!(validate(Some(&file(name, "application/octet-stream"))));
    }
}

#[test]
fn rejects_everything_else() {
    assert!(!validate(None));
    assert!(!validate(Some(&file("notes.txt", "text/plain"))));
    assert!(!validate(Some(&file("pdf", ""))));
    assert!(!validate(Some(&file("report.pdf.txt", "text/plain"))));
    assert!(!validate(Some(&file("report", "application/PDF"))));
}
