//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Answer normalization used for correctness checks: lowercase plus trimming
/// of surrounding whitespace. Internal whitespace stays as-is, so formatting
/// differences inside an answer still count as a mismatch.
pub fn normalize_answer(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_all_occurrences() {
    let out = fill_template("{a} and {b} and {a}", &[("a", "x"), ("b", "y")]);
    assert_eq!(out, "x and y and x");
  }

  #[test]
  fn normalize_trims_and_lowercases_only() {
    assert_eq!(normalize_answer("  Paris "), "paris");
    assert_ne!(normalize_answer("de  prijs"), normalize_answer("de prijs"));
  }

  #[test]
  fn trunc_is_char_safe() {
    let s = "beïnvloeden van de vraag";
    assert_eq!(trunc_for_log(s, 100), s);
    assert!(trunc_for_log(s, 3).starts_with("beï"));
  }
}
