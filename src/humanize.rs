// Copyright 2025 Cowboy AI, LLC.

//! String helpers used by the description renderers

/// Marker prefixed to a statement to negate it
pub const NEGATION: char = '!';

/// Join items into readable prose: `a`, `a and b`, `a, b and c`
pub fn join_and<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<S> = items.into_iter().collect();
    match items.len() {
        0 => String::new(),
        1 => items[0].as_ref().to_string(),
        n => {
            let head = items[..n - 1]
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{head} and {}", items[n - 1].as_ref())
        }
    }
}

/// Negate a statement, removing a double negation where one would appear
pub fn negate(statement: &str) -> String {
    if let Some(inner) = statement.strip_prefix(NEGATION) {
        if wrapped_in_parens(inner) {
            return inner[1..inner.len() - 1].to_string();
        }
        if !is_compound(inner) {
            return inner.to_string();
        }
    }

    if is_compound(statement) || statement.contains(NEGATION) {
        format!("{NEGATION}({statement})")
    } else {
        format!("{NEGATION}{statement}")
    }
}

/// Whether a statement joins several operands at its top level
pub fn is_compound(statement: &str) -> bool {
    let mut depth = 0usize;
    let mut previous = None;
    for ch in statement.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '&' | '|' | '^' if depth == 0 && previous == Some(' ') => return true,
            _ => {}
        }
        previous = Some(ch);
    }
    false
}

/// Whether the outermost parentheses enclose the entire statement
pub fn wrapped_in_parens(statement: &str) -> bool {
    if !(statement.starts_with('(') && statement.ends_with(')')) {
        return false;
    }
    let mut depth = 0usize;
    let last = statement.len() - 1;
    for (index, ch) in statement.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && index != last {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Type name of `T` with module paths removed, e.g. `Proposition<i32, String>`
pub fn pretty_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';') {
            out.push_str(last_path_segment(&segment));
            segment.clear();
            out.push(ch);
        } else {
            segment.push(ch);
        }
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
