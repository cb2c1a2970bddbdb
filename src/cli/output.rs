//! Plain-text report helpers for the CLI

const RULE_WIDTH: usize = 60;
const KEY_WIDTH: usize = 20;

/// Print a title framed by double rules
pub fn print_section(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{rule}\n{title}\n{rule}");
}

/// Print a title underlined by a single rule
pub fn print_subsection(title: &str) {
    println!("\n{title}\n{}", "-".repeat(RULE_WIDTH / 2));
}

/// Group the digits of `n` in threes, e.g. `1234567` → `1,234,567`.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        r => r,
    };
    let (head, tail) = digits.split_at(lead);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    grouped.push_str(head);
    for group in tail.as_bytes().chunks(3) {
        grouped.push(',');
        grouped.extend(group.iter().map(|&b| char::from(b)));
    }
    grouped
}

/// Print an aligned `key: value` line
pub fn print_kv(key: &str, value: &str) {
    let label = format!("{key}:");
    println!("  {label:width$} {value}", width = KEY_WIDTH);
}
