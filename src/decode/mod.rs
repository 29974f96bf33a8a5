//! Line-by-line parser reconstructing a [`Document`] from raw text.
//!
//! Parsing is two passes: a prescan collects, per section, the keys that
//! appear more than once (the bare repeated-key array convention), then the
//! main state machine walks the lines and builds the document model. The
//! indexed `key[n]=` array convention is detected independently per line.

mod infer;
mod prescan;

use std::collections::{HashMap, HashSet};

use indexmap::map::Entry;
use log::debug;
use memchr::memchr;

use crate::constants::{has_array_index, strip_array_index, ASSIGN_CHAR, COMMENT_CHAR};
use crate::error::{Error, Result};
use crate::types::{Document, Entries, Value};

pub(crate) use infer::infer_value;

/// Parses raw configuration text into a [`Document`].
///
/// Comment lines (`;`), blank lines, lines outside any section and lines
/// without `=` are skipped silently. The only fatal condition is a key that
/// mixes the scalar and array conventions within one section.
pub fn from_str(text: &str) -> Result<Document> {
    let duplicates = prescan::duplicate_keys(text.lines());
    let mut parser = Parser::new(duplicates);

    for line in text.lines() {
        parser.feed(line)?;
    }

    Ok(parser.finish())
}

/// Where a parsed assignment lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    NoSection,
    Section(usize),
    Object(usize),
}

/// The parser's whole mutable state. The current scope is carried here, not
/// in any shared place, so independent documents can be parsed concurrently.
struct Parser {
    doc: Document,
    state: State,
    /// Full bracket-inner text of the active header, the prescan's scope key.
    scope: String,
    /// Section name, or per-object type name, for indexed-array hints.
    hint_scope: String,
    duplicates: HashMap<String, HashSet<String>>,
}

impl Parser {
    fn new(duplicates: HashMap<String, HashSet<String>>) -> Self {
        Parser {
            doc: Document::new(),
            state: State::NoSection,
            scope: String::new(),
            hint_scope: String::new(),
            duplicates,
        }
    }

    fn feed(&mut self, line: &str) -> Result<()> {
        if line.starts_with(COMMENT_CHAR) {
            return Ok(());
        }

        if line.starts_with('[') {
            self.enter_header(line);
            return Ok(());
        }

        if self.state == State::NoSection {
            return Ok(());
        }

        let Some(assign_idx) = memchr(ASSIGN_CHAR, line.as_bytes()) else {
            if !line.trim().is_empty() {
                debug!("skipping line without assignment: {line:?}");
            }
            return Ok(());
        };

        self.assign(&line[..assign_idx], &line[assign_idx + 1..])
    }

    /// Applies a `[...]` header line. A malformed header (unterminated
    /// bracket, empty section name, empty object or type name) resets the
    /// state so following assignments have no active entry.
    fn enter_header(&mut self, line: &str) {
        self.state = State::NoSection;
        self.scope.clear();
        self.hint_scope.clear();

        let Some(inner) = line
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        else {
            debug!("skipping malformed header: {line:?}");
            return;
        };

        // An embedded space makes this a per-object header; the split is at
        // the last space, so object names may themselves contain spaces.
        if let Some(space_idx) = inner.rfind(' ') {
            let object_name = &inner[..space_idx];
            let type_name = &inner[space_idx + 1..];
            if object_name.is_empty() || type_name.is_empty() {
                debug!("skipping malformed per-object header: {line:?}");
                return;
            }
            self.scope.push_str(inner);
            self.hint_scope.push_str(type_name);
            let idx = self.doc.get_or_create_object(object_name, type_name);
            self.state = State::Object(idx);
        } else {
            if inner.is_empty() {
                debug!("skipping empty section header");
                return;
            }
            self.scope.push_str(inner);
            self.hint_scope.push_str(inner);
            let idx = self.doc.get_or_create_section(inner);
            self.state = State::Section(idx);
        }
    }

    fn assign(&mut self, raw_key: &str, raw_value: &str) -> Result<()> {
        let Document {
            sections,
            objects,
            array_hints,
        } = &mut self.doc;

        let entries: &mut Entries = match self.state {
            State::Section(idx) => &mut sections[idx].entries,
            State::Object(idx) => &mut objects[idx].entries,
            State::NoSection => return Ok(()),
        };

        let indexed = has_array_index(raw_key);
        let key = if indexed {
            let key = strip_array_index(raw_key);
            array_hints.record(&self.hint_scope, key);
            key
        } else {
            raw_key
        };

        let is_array = indexed
            || self
                .duplicates
                .get(&self.scope)
                .is_some_and(|keys| keys.contains(key));

        let value = infer_value(raw_value, &self.hint_scope, array_hints)?;

        match entries.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                if is_array {
                    slot.insert(Value::List(vec![value]));
                } else {
                    slot.insert(value);
                }
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::List(items) if is_array => items.push(value),
                existing => {
                    return Err(Error::format_inconsistency(
                        &self.scope,
                        key,
                        existing.kind_name(),
                    ));
                }
            },
        }

        Ok(())
    }

    fn finish(self) -> Document {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_scalar_assignments() {
        let doc = from_str("[Engine]\nTitle=UT2004\nMaxPlayers=16\nSpeed=1.1\nCheats=false\n")
            .unwrap();
        let section = doc.section("Engine").unwrap();
        assert_eq!(section.get("Title"), Some(&Value::Text("UT2004".into())));
        assert_eq!(section.get("MaxPlayers"), Some(&Value::Int(16)));
        assert_eq!(section.get("Speed"), Some(&Value::Float(1.1)));
        assert_eq!(section.get("Cheats"), Some(&Value::Bool(false)));
    }

    #[rstest::rstest]
    fn test_bare_repeated_keys_become_a_list() {
        let doc = from_str("[Maps]\nMap=DM-Rankin\nMap=DM-Antalus\n").unwrap();
        let section = doc.section("Maps").unwrap();
        assert_eq!(
            section.get("Map"),
            Some(&Value::List(vec![
                Value::Text("DM-Rankin".into()),
                Value::Text("DM-Antalus".into()),
            ]))
        );
        assert!(!doc.is_indexed("Maps", "Map"));
    }

    #[rstest::rstest]
    fn test_indexed_keys_become_a_list_and_are_remembered() {
        let doc = from_str("[Maps]\nMap[0]=DM-Rankin\nMap[1]=DM-Antalus\n").unwrap();
        let section = doc.section("Maps").unwrap();
        assert_eq!(
            section.get("Map"),
            Some(&Value::List(vec![
                Value::Text("DM-Rankin".into()),
                Value::Text("DM-Antalus".into()),
            ]))
        );
        assert!(doc.is_indexed("Maps", "Map"));
    }

    #[rstest::rstest]
    fn test_single_indexed_key_is_a_one_element_list() {
        let doc = from_str("[Maps]\nMap[0]=DM-Rankin\n").unwrap();
        assert_eq!(
            doc.section("Maps").unwrap().get("Map"),
            Some(&Value::List(vec![Value::Text("DM-Rankin".into())]))
        );
    }

    #[rstest::rstest]
    fn test_per_object_header_splits_at_last_space() {
        let doc = from_str("[Variety Invasion WaveSetup]\nWaveLimit=16\n").unwrap();
        let object = doc.object("Variety Invasion", "WaveSetup").unwrap();
        assert_eq!(object.get("WaveLimit"), Some(&Value::Int(16)));
    }

    #[rstest::rstest]
    fn test_reencountered_object_header_reuses_entry() {
        let doc = from_str("[Inv WaveSetup]\nA=1\n[Other Thing]\nX=1\n[Inv WaveSetup]\nB=2\n")
            .unwrap();
        assert_eq!(doc.objects.len(), 2);
        let object = doc.object("Inv", "WaveSetup").unwrap();
        assert_eq!(object.get("A"), Some(&Value::Int(1)));
        assert_eq!(object.get("B"), Some(&Value::Int(2)));
    }

    #[rstest::rstest]
    fn test_reencountered_section_header_reuses_section() {
        let doc = from_str("[A]\nX=1\n[B]\nY=1\n[A]\nZ=2\n").unwrap();
        assert_eq!(doc.sections.len(), 2);
        let section = doc.section("A").unwrap();
        assert_eq!(section.get("X"), Some(&Value::Int(1)));
        assert_eq!(section.get("Z"), Some(&Value::Int(2)));
    }

    #[rstest::rstest]
    fn test_empty_value_is_empty_text() {
        let doc = from_str("[A]\nKey=\n").unwrap();
        assert_eq!(
            doc.section("A").unwrap().get("Key"),
            Some(&Value::Text("".into()))
        );
    }

    #[rstest::rstest]
    fn test_value_split_at_first_assign_char() {
        let doc = from_str("[A]\nKey=a=b\n").unwrap();
        assert_eq!(
            doc.section("A").unwrap().get("Key"),
            Some(&Value::Text("a=b".into()))
        );
    }

    #[rstest::rstest]
    fn test_comments_and_orphan_lines_are_skipped() {
        let doc = from_str(";Key=1\nOrphan=2\n[A]\n;another comment\nKey=3\nnot a pair\n")
            .unwrap();
        assert_eq!(doc.sections.len(), 1);
        let section = doc.section("A").unwrap();
        assert_eq!(section.entries.len(), 1);
        assert_eq!(section.get("Key"), Some(&Value::Int(3)));
    }

    #[rstest::rstest]
    #[case("[broken\nKey=1\n")]
    #[case("[]\nKey=1\n")]
    #[case("[ Type]\nKey=1\n")]
    #[case("[Name ]\nKey=1\n")]
    fn test_malformed_header_resets_state(#[case] text: &str) {
        let doc = from_str(text).unwrap();
        assert!(doc.is_empty());
    }

    #[rstest::rstest]
    fn test_malformed_header_ends_previous_section() {
        let doc = from_str("[A]\nX=1\n[broken\nY=2\n").unwrap();
        let section = doc.section("A").unwrap();
        assert_eq!(section.entries.len(), 1);
        assert!(section.get("Y").is_none());
    }

    #[rstest::rstest]
    fn test_scalar_then_indexed_is_a_format_inconsistency() {
        let err = from_str("[A]\nFoo=1\nFoo[0]=2\n").unwrap_err();
        match err {
            Error::FormatInconsistency { section, key, found } => {
                assert_eq!(section, "A");
                assert_eq!(key, "Foo");
                assert_eq!(found, "int");
            }
            other => panic!("expected FormatInconsistency, got {other:?}"),
        }
    }

    #[rstest::rstest]
    fn test_indexed_then_scalar_is_a_format_inconsistency() {
        let err = from_str("[A]\nFoo[0]=1\nFoo=2\n").unwrap_err();
        assert!(matches!(err, Error::FormatInconsistency { .. }));
    }

    #[rstest::rstest]
    fn test_struct_value_on_assignment_line() {
        let doc = from_str("[A]\nX=(A=1,B=\"hi\")\n").unwrap();
        let entries = doc.section("A").unwrap().get("X").unwrap().as_struct().unwrap();
        assert_eq!(entries["A"], Value::Int(1));
        assert_eq!(entries["B"], Value::Text("hi".into()));
    }

    #[rstest::rstest]
    fn test_indexed_hint_scope_is_type_name_for_objects() {
        let doc = from_str("[Inv WaveSetup]\nWave[0]=1\n").unwrap();
        assert!(doc.is_indexed("WaveSetup", "Wave"));
        assert!(!doc.is_indexed("Inv WaveSetup", "Wave"));
    }

    #[rstest::rstest]
    fn test_duplicate_keys_across_object_reencounter() {
        // The prescan scopes by the full header text, so the repeats are
        // seen as one scope even across the interleaved section.
        let doc = from_str("[Inv WaveSetup]\nWave=1\n[X]\nY=1\n[Inv WaveSetup]\nWave=2\n")
            .unwrap();
        let object = doc.object("Inv", "WaveSetup").unwrap();
        assert_eq!(
            object.get("Wave"),
            Some(&Value::List(vec![Value::Int(1), Value::Int(2)]))
        );
    }

    #[rstest::rstest]
    fn test_crlf_input() {
        let doc = from_str("[A]\r\nKey=1\r\n").unwrap();
        assert_eq!(doc.section("A").unwrap().get("Key"), Some(&Value::Int(1)));
    }

    #[rstest::rstest]
    fn test_empty_input_is_empty_document() {
        let doc = from_str("").unwrap();
        assert!(doc.is_empty());
    }
}
