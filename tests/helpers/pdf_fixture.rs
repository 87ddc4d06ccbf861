/// Builds a single-font PDF with one page per entry in `pages`, each page
/// drawing its lines top to bottom with Helvetica. Offsets in the xref table
/// are computed from the bytes actually written.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let font_id = 3;
    let first_page_id = 4;
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| first_page_id + i * 2).collect();

    let mut objects: Vec<(usize, String)> = vec![
        (1, "<< /Type /Catalog /Pages 2 0 R >>".to_string()),
        (
            2,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                page_ids
                    .iter()
                    .map(|id| format!("{} 0 R", id))
                    .collect::<Vec<_>>()
                    .join(" "),
                pages.len()
            ),
        ),
        (
            font_id,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ),
    ];

    for (page, &page_id) in pages.iter().zip(&page_ids) {
        let content_id = page_id + 1;
        let mut stream = String::from("BT\n/F1 12 Tf\n14 TL\n72 720 Td\n");
        for line in page.iter() {
            stream.push_str(&format!("({}) Tj T*\n", line));
        }
        stream.push_str("ET");

        objects.push((
            page_id,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
                font_id, content_id
            ),
        ));
        objects.push((
            content_id,
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ),
        ));
    }
    objects.sort_by_key(|(id, _)| *id);

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (id, body) in &objects {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, body).as_bytes());
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.extend_from_slice(xref.as_bytes());
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}
