//! Small utility helpers used across modules.

/// Case-insensitive substring match, the way the search endpoints expect
/// ("hop" finds "The Musical Hop"). An empty needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive equality with full Unicode folding ("Café" == "CAFÉ").
pub fn eq_ci(a: &str, b: &str) -> bool {
  a.to_lowercase() == b.to_lowercase()
}

/// Trimmed copy of `s`, or None when nothing is left.
pub fn non_blank(s: &str) -> Option<String> {
  let t = s.trim();
  if t.is_empty() { None } else { Some(t.to_string()) }
}

/// Log-safe truncation for user-supplied strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}
