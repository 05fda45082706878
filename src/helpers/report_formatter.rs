/// Render headers and rows as a Markdown table with padded columns.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if headers.is_empty() || rows.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut table = String::from("| ");
    table.push_str(
        &headers.iter().zip(&widths)
            .map(|(h, w)| format!("{:<width$}", h, width = w))
            .collect::<Vec<_>>()
            .join(" | "),
    );
    table.push_str(" |\n| ");
    table.push_str(
        &widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join(" | "),
    );
    table.push_str(" |\n");

    for row in rows {
        table.push_str("| ");
        table.push_str(
            &row.iter().zip(&widths)
                .map(|(cell, w)| format!("{:<width$}", cell, width = w))
                .collect::<Vec<_>>()
                .join(" | "),
        );
        table.push_str(" |\n");
    }

    table
}

pub fn format_security_score(score: u32) -> String {
    if score >= 80 {
        format!("🟢 {}/100 (High)", score)
    } else if score >= 60 {
        format!("🟡 {}/100 (Medium)", score)
    } else {
        format!("🔴 {}/100 (Low)", score)
    }
}

pub fn format_resource_count(count: usize, total: usize) -> String {
    if total == 0 {
        return count.to_string();
    }

    let percentage = (count as f64 / total as f64) * 100.0;
    format!("{}/{} ({:.1}%)", count, total, percentage)
}

pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.1} seconds", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1} minutes", seconds / 60.0)
    } else {
        format!("{:.1} hours", seconds / 3600.0)
    }
}

pub fn format_connection_type(conn_type: &str) -> String {
    let lower = conn_type.to_lowercase();

    if lower.contains("private") {
        format!("🔒 {}", conn_type)
    } else if lower.contains("public") {
        format!("🌐 {}", conn_type)
    } else if lower.contains("service") {
        format!("🔗 {}", conn_type)
    } else {
        format!("📡 {}", conn_type)
    }
}

pub fn truncate_text(text: &str, max_length: usize) -> String {
    const SUFFIX: &str = "...";

    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let keep = max_length.saturating_sub(SUFFIX.len());
    let truncated: String = text.chars().take(keep).collect();
    format!("{}{}", truncated, SUFFIX)
}
