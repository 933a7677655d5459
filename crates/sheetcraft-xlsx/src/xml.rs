//! Small helpers shared by the XML part readers and writers

use quick_xml::events::BytesStart;

/// Escape text for use in element content or attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Text escaped for element content or attributes, with Excel's `_xHHHH_` encoding applied
///
/// Control characters XML 1.0 cannot carry are written as `_xHHHH_`, and a
/// literal `_` that would otherwise start such a sequence becomes `_x005F_`.
pub(crate) fn escape_text(s: &str) -> String {
    escape_xml(&encode_excel_escapes(s))
}

fn encode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (pos, c) in s.char_indices() {
        match c {
            '_' if starts_escape(&s[pos..]) => result.push_str("_x005F_"),
            '\t' | '\n' | '\r' => result.push(c),
            c if u32::from(c) < 0x20 => result.push_str(&format!("_x{:04X}_", u32::from(c))),
            c => result.push(c),
        }
    }
    result
}

/// Whether `s` begins with a complete `_xHHHH_` sequence
fn starts_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 7
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Unescaped value of an attribute, if present
pub(crate) fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Boolean attribute (`1`/`true`), falling back to `default` when absent
pub(crate) fn bool_attr(e: &BytesStart<'_>, key: &[u8], default: bool) -> bool {
    match attr_value(e, key).as_deref() {
        Some("1") | Some("true") => true,
        Some(_) => false,
        None => default,
    }
}

/// `"0"`/`"1"` as written in flag attributes
pub(crate) fn flag(on: bool) -> u8 {
    on as u8
}

/// Resolve a relationship target against the directory of the part that owns it
///
/// `("xl/worksheets", "../tables/table1.xml")` gives `xl/tables/table1.xml`;
/// absolute targets (`/xl/...`) are taken from the package root.
pub(crate) fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "." | "" => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}
