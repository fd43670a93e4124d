use domlog_core::{Level, Summary};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// The root domain's name is `""` everywhere it is used as a map key, but
/// is rendered as `global` in emitted lines for readability — a formatting
/// convention only (see SPEC_FULL.md §3).
pub fn render_domain_label(name: &str) -> &str {
    if name.is_empty() {
        "global"
    } else {
        name
    }
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("<unknown-time>"))
}

/// Render one normal record: `<timestamp> [<domain>] (<level-name>) <message>\n`.
pub fn render_line(level: Level, message: &str, domain_label: &str) -> String {
    format!(
        "{} [{}] ({}) {}\n",
        timestamp(),
        render_domain_label(domain_label),
        level.name(),
        message
    )
}

/// Render a coalescing summary:
/// `<timestamp> [<domain-list>] last message repeated <N> times\n`.
pub fn render_summary(summary: &Summary) -> String {
    let domains = summary
        .domains
        .iter()
        .map(|d| render_domain_label(d))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} [{}] last message repeated {} times\n",
        timestamp(),
        domains,
        summary.repeat_count
    )
}
