use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Renders a plain-text table. The first column (the period or label) is
/// left aligned; every other column is right aligned so figures line up.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let aligns = (0..headers.len())
        .map(|idx| if idx == 0 { Align::Left } else { Align::Right })
        .collect::<Vec<_>>();
    render_aligned(headers, rows, &aligns)
}

fn render_aligned(headers: &[String], rows: &[Vec<String>], aligns: &[Align]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    for width in &mut widths {
        *width = (*width).max(3);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths, aligns));
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&rule, &widths, aligns));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths, aligns));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn format_row(values: &[String], widths: &[usize], aligns: &[Align]) -> String {
    let cells = values
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (value, width))| {
            let sanitized = sanitize_cell(value);
            let padding = " ".repeat(width.saturating_sub(display_width(&sanitized)));
            match aligns.get(idx).copied().unwrap_or(Align::Left) {
                Align::Left => format!("{sanitized}{padding}"),
                Align::Right => format!("{padding}{sanitized}"),
            }
        })
        .collect::<Vec<_>>();
    cells.join("  ").trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
