//! Fixed-width numeric fields of FRD records.
//!
//! FRD floats are Fortran `E12.5` fields. Two things make plain `str::parse`
//! unreliable on them: neighbouring fields can touch (`-1.00000E+00-2.00000E+00`),
//! so records have to be cut by column, and three-digit exponents drop the
//! exponent letter (`1.23456-100`), so tokens have to be normalized first.

use std::borrow::Cow;

/// Rewrite a Fortran float token into a form `f64::from_str` accepts.
///
/// `1.234-5` becomes `1.234E-5`, `1.0D+03` becomes `1.0E+03`. Already valid
/// tokens are returned borrowed.
pub fn normalize_float_token(token: &str) -> Cow<'_, str> {
    let token = token.trim();
    let token: Cow<'_, str> = if token.contains(['d', 'D']) {
        Cow::Owned(token.replace(['d', 'D'], "E"))
    } else {
        Cow::Borrowed(token)
    };

    let bytes = token.as_bytes();
    let bare_sign = (1..bytes.len()).find(|&i| {
        matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E')
    });
    match bare_sign {
        Some(i) => Cow::Owned(format!("{}E{}", &token[..i], &token[i..])),
        None => token,
    }
}

/// Parse a Fortran float field. Blank fields yield `None`.
pub fn parse_frd_float(token: &str) -> Option<f64> {
    let normalized = normalize_float_token(token);
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().ok()
}

/// Parse an integer field, ignoring padding.
pub fn parse_frd_int(token: &str) -> Option<i32> {
    token.trim().parse().ok()
}

/// Field of `width` columns starting at `start`, clipped to the line end.
/// Returns `None` when the field lies entirely past the end of the line.
pub fn column(line: &str, start: usize, width: usize) -> Option<&str> {
    if start >= line.len() {
        return None;
    }
    line.get(start..(start + width).min(line.len()))
}

/// Consecutive `width`-column fields from `start` to the end of the line,
/// trailing blank fields dropped.
pub fn columns(line: &str, start: usize, width: usize) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut pos = start;
    while let Some(field) = column(line, pos, width) {
        fields.push(field);
        pos += width;
    }
    while fields.last().is_some_and(|f| f.trim().is_empty()) {
        fields.pop();
    }
    fields
}
