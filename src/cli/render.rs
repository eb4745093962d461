//! Terminal rendering for backend records and toasts.

use serde_json::Value;
use terminal_size::{terminal_size, Width};

use crate::notify::{Toast, ToastKind, ToastPhase};

const FALLBACK_WIDTH: usize = 80;

/// Keys that commonly wrap a record list in backend responses.
const LIST_KEYS: &[&str] = &["advertisements", "items", "experts", "panels", "users", "results", "scores"];

/// Render a list of records as an ASCII table. `None` means the value has no
/// tabular shape and should be printed as JSON instead.
pub fn render_table(val: &Value, max_width: usize) -> Option<String> {
    let rows = records(val)?;
    if rows.is_empty() { return None; }

    let mut cols: Vec<String> = Vec::new();
    for r in rows {
        match r {
            Value::Object(map) => {
                for k in map.keys() {
                    if !cols.contains(k) { cols.push(k.clone()); }
                }
            }
            _ => return None,
        }
    }
    cols.sort_by_key(|c| column_rank(c));

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| cols.iter().map(|c| cell(r.get(c).unwrap_or(&Value::Null))).collect())
        .collect();

    let budget = max_width.max(cols.len() * 4) / cols.len().max(1);
    let mut widths: Vec<usize> = cols.iter().map(|c| c.chars().count().min(budget)).collect();
    for row in &cells {
        for (i, c) in row.iter().enumerate() {
            widths[i] = widths[i].max(c.chars().count().min(budget));
        }
    }

    let sep = separator(&widths);
    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&line(&cols, &widths));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&line(row, &widths));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format!("records: {}", rows.len()));
    Some(out)
}

/// Print a response: as a table when it has one, otherwise pretty JSON.
pub fn print_value(val: &Value) {
    match render_table(val, terminal_width()) {
        Some(t) => println!("{}", t),
        None => println!("{}", serde_json::to_string_pretty(val).unwrap_or_else(|_| val.to_string())),
    }
}

pub fn format_toast(t: &Toast) -> String {
    let (color, mark) = match t.kind {
        ToastKind::Success => ("\x1b[32m", "✔"),
        ToastKind::Error => ("\x1b[31m", "✖"),
    };
    let suffix = if t.phase == ToastPhase::Leaving { " (closing)" } else { "" };
    format!("{}{} {}\x1b[0m{}", color, mark, t.message, suffix)
}

pub fn terminal_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) if w > 4 => (w - 4) as usize,
        _ => FALLBACK_WIDTH,
    }
}

fn records(val: &Value) -> Option<&Vec<Value>> {
    match val {
        Value::Array(arr) => Some(arr),
        Value::Object(map) => LIST_KEYS.iter().find_map(|k| map.get(*k).and_then(Value::as_array)),
        _ => None,
    }
}

// id and name-like columns first, the rest alphabetically
fn column_rank(c: &str) -> (u8, String) {
    let r = match c {
        "_id" | "id" => 0,
        "title" | "name" | "fullName" => 1,
        "status" | "role" => 2,
        _ => 3,
    };
    (r, c.to_string())
}

fn cell(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(a) if a.iter().all(Value::is_string) => {
            a.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(", ")
        }
        other => other.to_string(),
    }
}

fn separator(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(w + 2));
        s.push('+');
    }
    s
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let text = truncate(cells.get(i).map(String::as_str).unwrap_or(""), *w);
        let pad = w.saturating_sub(text.chars().count());
        if is_numeric(&text) {
            s.push_str(&format!(" {}{} |", " ".repeat(pad), text));
        } else {
            s.push_str(&format!(" {}{} |", text, " ".repeat(pad)));
        }
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max { return s.to_string(); }
    if max <= 1 { return "…".to_string(); }
    s.chars().take(max - 1).collect::<String>() + "…"
}

fn is_numeric(s: &str) -> bool {
    let t = s.trim();
    !t.is_empty() && t.parse::<f64>().is_ok()
}
