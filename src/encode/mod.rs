//! Serializes a [`Document`] back to configuration text.
//!
//! Sections are written first, then per-object entries, each as a header
//! line, one line per key in map order and a blank separator line. Arrays
//! re-emit in the form they were read in: indexed `key[i]=` lines for keys
//! recorded in the document's array hints, bare repeated `key=` lines
//! otherwise.

mod writer;

use crate::constants::CLASS_REFERENCE_PREFIX;
use crate::types::{ArrayHints, Document, Entries, Value};

use writer::{format_float, format_int, Writer};

/// Renders the document. Rendering cannot fail; every value has a textual
/// form.
pub fn to_string(document: &Document) -> String {
    let mut writer = Writer::new();

    for section in &document.sections {
        write_block(
            &mut writer,
            &section.name,
            &section.name,
            &section.entries,
            &document.array_hints,
        );
    }

    for object in &document.objects {
        write_block(
            &mut writer,
            &object.header(),
            &object.type_name,
            &object.entries,
            &document.array_hints,
        );
    }

    writer.finish()
}

fn write_block(
    writer: &mut Writer,
    header: &str,
    hint_scope: &str,
    entries: &Entries,
    hints: &ArrayHints,
) {
    writer.write_header(header);
    for (key, value) in entries {
        writer.write_entry(&format_entry(key, value, hint_scope, hints, false));
    }
    writer.write_separator();
}

/// Formats one `key=value` entry. Lists expand to several parts: newline
/// separated at the top level, comma separated when nested inside a struct
/// literal. The empty string means "emit nothing" (empty lists).
fn format_entry(
    key: &str,
    value: &Value,
    hint_scope: &str,
    hints: &ArrayHints,
    nested: bool,
) -> String {
    match value {
        Value::Bool(b) => format!("{key}={b}"),
        Value::Int(i) => format_int(key, *i),
        Value::Float(f) => format_float(key, *f),
        Value::Text(text) => format_text(key, text, nested),
        Value::Struct(entries) => format_struct(key, entries, hint_scope, hints),
        Value::List(items) => format_list(key, items, hint_scope, hints, nested),
    }
}

fn format_text(key: &str, text: &str, nested: bool) -> String {
    if text.starts_with(CLASS_REFERENCE_PREFIX) {
        return format!("{key}={text}");
    }
    if nested {
        if text.is_empty() {
            format!("{key}=")
        } else {
            format!("{key}=\"{text}\"")
        }
    } else {
        format!("{key}={text}")
    }
}

fn format_struct(key: &str, entries: &Entries, hint_scope: &str, hints: &ArrayHints) -> String {
    if entries.is_empty() {
        return format!("{key}=");
    }

    let mut parts: Vec<String> = Vec::with_capacity(entries.len());
    for (sub_key, sub_value) in entries {
        let part = format_entry(sub_key, sub_value, hint_scope, hints, true);
        if !part.is_empty() {
            parts.push(part);
        }
    }
    format!("{key}=({})", parts.join(","))
}

fn format_list(
    key: &str,
    items: &[Value],
    hint_scope: &str,
    hints: &ArrayHints,
    nested: bool,
) -> String {
    if items.is_empty() {
        return String::new();
    }

    let indexed = hints.contains(hint_scope, key);
    let mut parts: Vec<String> = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let part = if indexed {
            format_entry(&format!("{key}[{i}]"), item, hint_scope, hints, nested)
        } else {
            format_entry(key, item, hint_scope, hints, nested)
        };
        if !part.is_empty() {
            parts.push(part);
        }
    }

    parts.join(if nested { "," } else { "\n" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> ArrayHints {
        ArrayHints::default()
    }

    #[rstest::rstest]
    #[case(Value::Bool(true), "k=true")]
    #[case(Value::Bool(false), "k=false")]
    #[case(Value::Int(42), "k=42")]
    #[case(Value::Float(1.5), "k=1.500000")]
    #[case(Value::Text("DM-Rankin".into()), "k=DM-Rankin")]
    #[case(Value::Text("".into()), "k=")]
    fn test_top_level_scalars(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(format_entry("k", &value, "S", &hints(), false), expected);
    }

    #[rstest::rstest]
    fn test_nested_text_is_quoted() {
        assert_eq!(
            format_entry("k", &Value::Text("hi".into()), "S", &hints(), true),
            "k=\"hi\""
        );
        assert_eq!(
            format_entry("k", &Value::Text("".into()), "S", &hints(), true),
            "k="
        );
    }

    #[rstest::rstest]
    #[case(false)]
    #[case(true)]
    fn test_class_reference_is_never_quoted(#[case] nested: bool) {
        let value = Value::Text("Class'XGame.xDeathMatch'".into());
        assert_eq!(
            format_entry("k", &value, "S", &hints(), nested),
            "k=Class'XGame.xDeathMatch'"
        );
    }

    #[rstest::rstest]
    fn test_struct_formatting() {
        let mut entries = Entries::new();
        entries.insert("A".into(), Value::Int(1));
        entries.insert("B".into(), Value::Text("hi".into()));
        assert_eq!(
            format_entry("k", &Value::Struct(entries), "S", &hints(), false),
            "k=(A=1,B=\"hi\")"
        );
    }

    #[rstest::rstest]
    fn test_empty_struct_emits_bare_assignment() {
        assert_eq!(
            format_entry("k", &Value::Struct(Entries::new()), "S", &hints(), false),
            "k="
        );
    }

    #[rstest::rstest]
    fn test_bare_list_repeats_the_key() {
        let value = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(
            format_entry("k", &value, "S", &hints(), false),
            "k=1\nk=2"
        );
    }

    #[rstest::rstest]
    fn test_indexed_list_numbers_each_line() {
        let mut hints = ArrayHints::default();
        hints.record("S", "k");
        let value = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(
            format_entry("k", &value, "S", &hints, false),
            "k[0]=1\nk[1]=2"
        );
    }

    #[rstest::rstest]
    fn test_nested_list_joins_with_commas() {
        let mut hints = ArrayHints::default();
        hints.record("S", "W");
        let mut entries = Entries::new();
        entries.insert(
            "W".into(),
            Value::List(vec![Value::Int(1), Value::Int(2)]),
        );
        assert_eq!(
            format_entry("k", &Value::Struct(entries), "S", &hints, false),
            "k=(W[0]=1,W[1]=2)"
        );
    }

    #[rstest::rstest]
    fn test_empty_list_emits_nothing() {
        assert_eq!(
            format_entry("k", &Value::List(Vec::new()), "S", &hints(), false),
            ""
        );
    }

    #[rstest::rstest]
    fn test_document_layout() {
        let mut doc = Document::new();
        let idx = doc.get_or_create_section("Engine");
        doc.sections[idx]
            .entries
            .insert("Title".into(), Value::Text("UT2004".into()));
        let idx = doc.get_or_create_object("Inv", "WaveSetup");
        doc.objects[idx].entries.insert("Wave".into(), Value::Int(3));

        assert_eq!(
            to_string(&doc),
            "[Engine]\nTitle=UT2004\n\n[Inv WaveSetup]\nWave=3\n\n"
        );
    }
}
