//! WGSL template substitution.

use std::borrow::Cow;

/// Replaces the first occurrence of each placeholder in `source`.
///
/// Placeholders that do not occur are ignored.
pub fn substitute<'a>(source: &'a str, replacements: &[(&str, &str)]) -> Cow<'a, str> {
    let mut out = Cow::Borrowed(source);
    for (placeholder, value) in replacements {
        if let Some(at) = out.find(placeholder) {
            let mut s = String::with_capacity(out.len() + value.len());
            s.push_str(&out[..at]);
            s.push_str(value);
            s.push_str(&out[at + placeholder.len()..]);
            out = Cow::Owned(s);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_first_occurrence_only() {
        let src = "@workgroup_size(__SIZE__) // __SIZE__";
        assert_eq!(
            substitute(src, &[("__SIZE__", "2, 3, 4")]),
            "@workgroup_size(2, 3, 4) // __SIZE__"
        );
    }

    #[test]
    fn untouched_source_is_borrowed() {
        let out = substitute("fn main() {}", &[("__MISSING__", "x")]);
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn applies_replacements_in_order() {
        let src = "const a = __A__; const b = __B__;";
        let out = substitute(src, &[("__A__", "1u"), ("__B__", "24u")]);
        assert_eq!(out, "const a = 1u; const b = 24u;");
    }
}
