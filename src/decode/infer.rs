use indexmap::map::Entry;
use memchr::memchr;
use smallvec::SmallVec;

use crate::constants::{has_array_index, strip_array_index, ASSIGN_CHAR};
use crate::error::{Error, Result};
use crate::types::{ArrayHints, Entries, Value};

/// Converts a raw text fragment into a typed [`Value`].
///
/// Precedence, first success wins:
/// 1. `true`/`false` (case-insensitive) -> `Bool`
/// 2. contains `.` and parses as f32 -> `Float`
/// 3. parses as i64 -> `Int`
/// 4. `(`...`)` -> `Struct` via the struct-literal sub-parser
/// 5. `"`...`"` -> `Text` with the quotes stripped
/// 6. anything else -> `Text` verbatim (bare identifiers, class references)
///
/// `scope` names the section or object type the fragment belongs to; indexed
/// keys found inside struct literals are recorded against it in `hints`.
pub(crate) fn infer_value(raw: &str, scope: &str, hints: &mut ArrayHints) -> Result<Value> {
    if raw.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }

    if raw.contains('.') {
        if let Ok(f) = raw.parse::<f32>() {
            return Ok(Value::Float(f));
        }
    }

    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::Int(i));
    }

    if raw.starts_with('(') && raw.ends_with(')') && raw.len() >= 2 {
        return parse_struct_literal(&raw[1..raw.len() - 1], scope, hints);
    }

    if raw.starts_with('"') && raw.ends_with('"') && raw.len() >= 2 {
        return Ok(Value::Text(raw[1..raw.len() - 1].to_string()));
    }

    Ok(Value::Text(raw.to_string()))
}

/// Parses the inside of a struct literal, `k1=v1,k2=v2,...`, already
/// stripped of its outer parentheses.
///
/// Only top-level commas split segments; a comma inside a nested `(`...`)`
/// belongs to the nested literal. One further level of struct nesting is
/// supported by the grammar. Segments without `=` are skipped. An indexed
/// `key[n]` segment accumulates into a `List` under the bare key and records
/// the indexed hint; a plain repeated key overwrites its earlier value.
fn parse_struct_literal(inner: &str, scope: &str, hints: &mut ArrayHints) -> Result<Value> {
    let mut entries = Entries::new();

    for segment in split_top_level(inner) {
        let Some(assign_idx) = memchr(ASSIGN_CHAR, segment.as_bytes()) else {
            continue;
        };
        let raw_key = &segment[..assign_idx];
        let raw_value = &segment[assign_idx + 1..];

        if has_array_index(raw_key) {
            let key = strip_array_index(raw_key);
            hints.record(scope, key);
            let value = infer_value(raw_value, scope, hints)?;
            match entries.entry(key.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(Value::List(vec![value]));
                }
                Entry::Occupied(mut slot) => match slot.get_mut() {
                    Value::List(items) => items.push(value),
                    existing => {
                        return Err(Error::format_inconsistency(
                            scope,
                            key,
                            existing.kind_name(),
                        ));
                    }
                },
            }
        } else {
            let value = infer_value(raw_value, scope, hints)?;
            entries.insert(raw_key.to_string(), value);
        }
    }

    Ok(Value::Struct(entries))
}

/// Splits on commas that are not inside parentheses.
fn split_top_level(s: &str) -> SmallVec<[&str; 8]> {
    let mut parts: SmallVec<[&str; 8]> = SmallVec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);

    parts
}
