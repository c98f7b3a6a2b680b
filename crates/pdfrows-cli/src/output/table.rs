use pdfrows_core::pattern::FieldMatch;
use pdfrows_core::preview::Preview;

pub fn print(preview: &Preview) {
    print!("{}", format_preview(preview));
}

/// Render a preview as plain text, one block per page.
pub fn format_preview(preview: &Preview) -> String {
    let mut out = String::new();

    for page in &preview.pages {
        out.push_str(&format!("\n--- Preview of Page {} ---\n\n", page.page_number));

        // No patterns: just show the text so patterns can be written against it
        if preview.pattern_count == 0 {
            for line in &page.lines {
                out.push_str(&line.text);
                out.push('\n');
            }
            continue;
        }

        for line in &page.lines {
            out.push_str(&format!("{:>4}: {}\n", line.line_index + 1, line.text));
            if line.matches.is_empty() {
                out.push_str("      no field matched\n");
            }
            for m in &line.matches {
                out.push_str(&format!("      matched '{}': {}\n", m.field, format_values(m)));
            }
        }
    }

    let (matched, unmatched) = preview.counts();
    out.push_str(&format!(
        "\n{} page(s), {} matching line(s), {} non-matching line(s) shown ({})\n",
        preview.pages.len(),
        matched,
        unmatched,
        preview.match_type
    ));

    out
}

fn format_values(m: &FieldMatch) -> String {
    match m.values.as_slice() {
        [(_, value)] => value.clone().unwrap_or_else(|| "-".into()),
        values => values
            .iter()
            .map(|(col, v)| format!("{}={}", col, v.as_deref().unwrap_or("-")))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
