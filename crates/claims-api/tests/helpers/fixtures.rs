use axum_test::multipart::Part;

/// Minimal PDF-looking bytes; the service validates the declared content
/// type, not file magic.
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj <<>> endobj\ntrailer <<>>\n%%EOF\n".to_vec()
}

pub fn png_bytes() -> Vec<u8> {
    // PNG signature followed by filler
    let mut png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend_from_slice(&[0u8; 64]);
    png
}

pub fn pdf_part(file_name: &str) -> Part {
    Part::bytes(pdf_bytes())
        .file_name(file_name.to_string())
        .mime_type("application/pdf")
}

pub fn png_part(file_name: &str) -> Part {
    Part::bytes(png_bytes())
        .file_name(file_name.to_string())
        .mime_type("image/png")
}

pub fn text_part(file_name: &str) -> Part {
    Part::bytes(b"just some notes".to_vec())
        .file_name(file_name.to_string())
        .mime_type("text/plain")
}

/// A PDF part one byte over the 5 MiB cap.
pub fn oversized_pdf_part(file_name: &str) -> Part {
    Part::bytes(vec![0u8; 5 * 1024 * 1024 + 1])
        .file_name(file_name.to_string())
        .mime_type("application/pdf")
}
