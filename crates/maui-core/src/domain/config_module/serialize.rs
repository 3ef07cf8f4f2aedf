//! Rendering a config object back into module text.

use super::value::{ConfigMap, ConfigValue};

const INDENT: &str = "  ";
const MAX_INLINE_WIDTH: usize = 80;

/// `header + "module.exports = " + body + ";"`.
///
/// Two-space indentation, no trailing commas, single-quoted strings and
/// placeholder calls emitted as their original call text.
pub fn serialize(header: &str, body: &ConfigMap) -> String {
    let mut out = String::with_capacity(header.len() + 256);
    out.push_str(header);
    out.push_str("module.exports = ");
    write_map(&mut out, body, 0);
    out.push(';');
    out
}

/// Render a single value at top-level indentation.
pub fn render_value(value: &ConfigValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0, 0);
    out
}

fn write_value(out: &mut String, value: &ConfigValue, depth: usize, column: usize) {
    match value {
        ConfigValue::String(s) => write_string(out, s),
        ConfigValue::Number(n) => out.push_str(&format_number(*n)),
        ConfigValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        ConfigValue::Null => out.push_str("null"),
        ConfigValue::Call(call) => out.push_str(&call.call_text()),
        ConfigValue::Object(map) => write_map(out, map, depth),
        ConfigValue::Array(items) => write_array(out, items, depth, column),
    }
}

fn write_map(out: &mut String, map: &ConfigMap, depth: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    let last = map.len() - 1;
    for (i, (key, value)) in map.iter().enumerate() {
        let line_start = out.len();
        push_indent(out, depth + 1);
        write_key(out, key);
        out.push_str(": ");
        let column = out.len() - line_start;
        write_value(out, value, depth + 1, column);
        if i != last {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, depth);
    out.push('}');
}

fn write_array(out: &mut String, items: &[ConfigValue], depth: usize, column: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }

    if items.iter().all(|v| v.is_scalar() || matches!(v, ConfigValue::Call(_))) {
        let inline = inline_array(items);
        // trailing comma of the enclosing entry
        if column + inline.len() + 1 <= MAX_INLINE_WIDTH {
            out.push_str(&inline);
            return;
        }
    }

    out.push_str("[\n");
    let last = items.len() - 1;
    for (i, item) in items.iter().enumerate() {
        push_indent(out, depth + 1);
        write_value(out, item, depth + 1, (depth + 1) * INDENT.len());
        if i != last {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, depth);
    out.push(']');
}

fn inline_array(items: &[ConfigValue]) -> String {
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_value(&mut out, item, 0, 0);
    }
    out.push(']');
    out
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

fn is_identifier(key: &str) -> bool {
    let mut bytes = key.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'$')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}

fn write_string(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                out.push_str(&format!("\\u{{{:x}}}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config_module::evaluate::evaluate_object;
    use crate::domain::config_module::extract::extract;
    use crate::domain::config_module::value::{KnownCallables, PlaceholderCall};

    fn map(src: &str) -> ConfigMap {
        evaluate_object(src, &KnownCallables::default()).unwrap()
    }

    #[test]
    fn renders_nested_layout() {
        let body = map(
            "{ darkMode: ['class', '[data-mode=\"dark\"]'], theme: { extend: {} }, plugins: [] }",
        );
        let text = serialize("", &body);
        assert_eq!(
            text,
            "module.exports = {\n\
             \x20 darkMode: ['class', '[data-mode=\"dark\"]'],\n\
             \x20 theme: {\n\
             \x20   extend: {}\n\
             \x20 },\n\
             \x20 plugins: []\n\
             };"
        );
    }

    #[test]
    fn keeps_header_verbatim() {
        let header = "const { join } = require('path');\n\n";
        let text = serialize(header, &map("{ a: 1 }"));
        assert!(text.starts_with(header));
        assert!(text.ends_with("};"));
    }

    #[test]
    fn long_arrays_break_one_item_per_line() {
        let body = map(
            "{ content: [join(__dirname, 'src/**/!(*.stories|*.spec).{ts,html}'), \
             ...createGlobPatternsForDependencies(__dirname)] }",
        );
        let text = serialize("", &body);
        assert!(text.contains(
            "  content: [\n    join(__dirname, 'src/**/!(*.stories|*.spec).{ts,html}'),\n    \
             ...createGlobPatternsForDependencies(__dirname)\n  ]\n"
        ));
    }

    #[test]
    fn arrays_of_objects_are_never_inline() {
        let text = serialize("", &map("{ a: [{ b: 1 }] }"));
        assert!(text.contains("  a: [\n    {\n      b: 1\n    }\n  ]"));
    }

    #[test]
    fn quotes_and_escapes() {
        let text = serialize("", &map("{ 'data-x': \"it's\", ok_$: 'a\\\\b\\n' }"));
        assert!(text.contains("'data-x': 'it\\'s'"));
        assert!(text.contains("ok_$: 'a\\\\b\\n'"));
    }

    #[test]
    fn numbers_render_shortest() {
        assert_eq!(render_value(&ConfigValue::Number(1.0)), "1");
        assert_eq!(render_value(&ConfigValue::Number(-0.25)), "-0.25");
        assert_eq!(render_value(&ConfigValue::Number(-0.0)), "0");
    }

    #[test]
    fn non_finite_numbers_and_unicode_keys_round_trip() {
        let body = map("{ theme: { x: 1e400, y: -1e400 }, größe: 'ü' }");
        let text = serialize("const café = 1;\n", &body);
        assert!(text.contains("x: Infinity"));
        assert!(text.contains("y: -Infinity"));
        assert!(text.contains("'größe': 'ü'"));

        let extracted = extract(&text).unwrap();
        assert_eq!(extracted.header, "const café = 1;\n");
        let back = evaluate_object(extracted.literal, &KnownCallables::default()).unwrap();
        assert_eq!(back, body);
    }

    #[test]
    fn round_trips_through_extract_and_evaluate() {
        let mut body = map(
            "{ darkMode: ['class', '[data-mode=\"dark\"]'], \
             presets: [require('@spartan-ng/ui-core/hlm-tailwind-preset')], \
             content: [join(__dirname, 'src/**/*.{ts,html}'), ...createGlobPatternsForDependencies(__dirname)], \
             theme: { extend: { colors: { 'brand-1': '#fff', n: 1.5, z: null, t: true } } }, \
             plugins: [], '50': 'key', quote: 'it\\'s \\u2028' }",
        );
        body.insert(
            "call".into(),
            ConfigValue::Call(PlaceholderCall::new("path.join", "__dirname, 'x'")),
        );

        let header = "// generated\n";
        let text = serialize(header, &body);
        let extracted = extract(&text).unwrap();
        assert_eq!(extracted.header, header);
        let back = evaluate_object(extracted.literal, &KnownCallables::default()).unwrap();
        assert_eq!(back, body);
    }
}
