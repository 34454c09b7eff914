//! Property tests for the reader's structural invariants.
//!
//! For any generated tag soup: the emitted element sequence is balanced
//! with matching names, depths follow the open/close discipline, parsing
//! terminates (including on every truncation of the input), void elements
//! never produce an end element, and the filter settings strictly remove
//! nodes without disturbing the rest of the stream.

use proptest::prelude::*;
use rustyhtml::reader::tree::is_void_element;
use rustyhtml::{HtmlReader, NodeKind, ReaderSettings, StringSource};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Event {
    kind: NodeKind,
    prefix: String,
    local: String,
    ns: String,
    value: String,
    depth: usize,
    empty: bool,
}

/// Pull the whole stream. `None` when the reader reported malformed input;
/// panics if the reader fails to terminate.
fn drain(reader: &mut HtmlReader<StringSource>) -> Option<Vec<Event>> {
    let mut events = Vec::new();
    for _ in 0..20_000 {
        match reader.read() {
            Ok(true) => events.push(Event {
                kind: reader.node_kind(),
                prefix: reader.prefix().to_string(),
                local: reader.local_name().to_string(),
                ns: reader.namespace_uri().to_string(),
                value: reader.value().to_string(),
                depth: reader.depth(),
                empty: reader.is_empty_element(),
            }),
            Ok(false) => return Some(events),
            Err(_) => return None,
        }
    }
    panic!("reader failed to terminate");
}

fn arb_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{1,8}",
        Just("<p>".to_string()),
        Just("</p>".to_string()),
        Just("<div>".to_string()),
        Just("</div>".to_string()),
        Just("<ul><li>one<li>two</ul>".to_string()),
        Just("<br>".to_string()),
        Just("<hr/>".to_string()),
        Just("<img src=\"i.png\">".to_string()),
        Just("<table><tr><td>c</table>".to_string()),
        Just("<a href=\"u\">".to_string()),
        Just("</a>".to_string()),
        Just("<!--note-->".to_string()),
        Just("<![CDATA[raw]]>".to_string()),
        Just("<?pi data?>".to_string()),
        Just("<!DOCTYPE html>".to_string()),
        Just("<svg><circle/></svg>".to_string()),
        Just("&amp;".to_string()),
        Just("< ".to_string()),
        Just("</nope>".to_string()),
        Just("<input type=text checked>".to_string()),
    ]
}

fn arb_document() -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_fragment(), 0..10).prop_map(|v| v.concat())
}

proptest! {
    /// Every non-empty Element has exactly one matching EndElement with the
    /// same (prefix, local, namespace), closed in nesting order, and no
    /// EndElement appears without its open.
    #[test]
    fn prop_balanced_and_matching(doc in arb_document()) {
        let Some(events) = drain(&mut HtmlReader::from_str(&doc)) else {
            return Ok(());
        };
        let mut stack: Vec<(String, String, String)> = Vec::new();
        for e in &events {
            match e.kind {
                NodeKind::Element if !e.empty => {
                    stack.push((e.prefix.clone(), e.local.clone(), e.ns.clone()));
                }
                NodeKind::EndElement => {
                    let open = stack.pop();
                    prop_assert!(open.is_some(), "end element without open: {:?}", e);
                    let open = open.unwrap();
                    prop_assert_eq!(&open.0, &e.prefix);
                    prop_assert_eq!(&open.1, &e.local);
                    prop_assert_eq!(&open.2, &e.ns);
                }
                _ => {}
            }
        }
        prop_assert!(stack.is_empty(), "unclosed elements left: {:?}", stack);
    }

    /// Depth starts at zero, rises by one per non-empty open and falls by
    /// one per close; every other node sits at the enclosing depth.
    #[test]
    fn prop_depth_discipline(doc in arb_document()) {
        let Some(events) = drain(&mut HtmlReader::from_str(&doc)) else {
            return Ok(());
        };
        let mut depth = 0usize;
        for e in &events {
            match e.kind {
                NodeKind::Element => {
                    prop_assert_eq!(e.depth, depth);
                    if !e.empty {
                        depth += 1;
                    }
                }
                NodeKind::EndElement => {
                    prop_assert!(depth > 0);
                    depth -= 1;
                    prop_assert_eq!(e.depth, depth);
                }
                _ => prop_assert_eq!(e.depth, depth),
            }
        }
        prop_assert_eq!(depth, 0);
    }

    /// Truncating the input at any character offset still terminates.
    #[test]
    fn prop_truncation_terminates(doc in arb_document(), cut in 0usize..256) {
        let mut truncated = doc;
        let mut idx = cut.min(truncated.len());
        while !truncated.is_char_boundary(idx) {
            idx -= 1;
        }
        truncated.truncate(idx);
        // Either a full stream or a malformed-input error; never a hang.
        let _ = drain(&mut HtmlReader::from_str(&truncated));
    }

    /// HTML void elements are always reported empty and never closed.
    #[test]
    fn prop_void_elements_stay_empty(doc in arb_document()) {
        let Some(events) = drain(&mut HtmlReader::from_str(&doc)) else {
            return Ok(());
        };
        for e in &events {
            if e.ns.is_empty() && is_void_element(&e.local) {
                match e.kind {
                    NodeKind::Element => prop_assert!(e.empty, "void open not empty: {:?}", e),
                    NodeKind::EndElement => {
                        prop_assert!(false, "end element emitted for void {}", e.local);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Each ignore flag strictly removes its kind; every other node is
    /// identical with or without the flag.
    #[test]
    fn prop_filters_strictly_remove(doc in arb_document()) {
        let Some(base) = drain(&mut HtmlReader::from_str(&doc)) else {
            return Ok(());
        };

        let cases: [(NodeKind, fn() -> ReaderSettings); 3] = [
            (NodeKind::Comment, || ReaderSettings {
                ignore_comments: true,
                ..ReaderSettings::default()
            }),
            (NodeKind::ProcessingInstruction, || ReaderSettings {
                ignore_processing_instructions: true,
                ..ReaderSettings::default()
            }),
            (NodeKind::Whitespace, || ReaderSettings {
                ignore_insignificant_whitespace: true,
                ..ReaderSettings::default()
            }),
        ];

        for (kind, settings) in cases {
            let mut reader =
                HtmlReader::with_settings(StringSource::new(doc.clone()), settings());
            let Some(filtered) = drain(&mut reader) else {
                return Ok(());
            };
            let expected: Vec<Event> =
                base.iter().filter(|e| e.kind != kind).cloned().collect();
            prop_assert_eq!(&filtered, &expected, "filter for {:?} disturbed the stream", kind);
        }
    }
}
