use crate::item::ItemFile;

const PLUGINFILE_PLACEHOLDER: &str = "@@PLUGINFILE@@/";

/// Lenient integer parse: leading whitespace and sign, then as many digits as present.
///
/// Trailing garbage is ignored, so `"12px"` yields 12. Returns `None` when no digit leads.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|byte| !byte.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Rewrites `@@PLUGINFILE@@/<name>` placeholders to the URLs of the attached files.
pub fn replace_pluginfile_urls(text: &str, files: &[ItemFile]) -> String {
    let mut output = text.to_string();
    for file in files {
        if file.fileurl.is_empty() {
            continue;
        }
        let name = file
            .fileurl
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(file.filename.as_str());
        let placeholder = format!("{PLUGINFILE_PLACEHOLDER}{name}");
        output = output.replace(&placeholder, &file.fileurl);
    }
    output
}
