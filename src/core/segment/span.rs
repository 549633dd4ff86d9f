// Copyright 2019 Zhizhesihai (Beijing) Technology Limited.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// See the License for the specific language governing permissions and
// limitations under the License.

use error::{ErrorKind, Result};

use serde_json;

/// One unit of the segmenter output.
///
/// `begin` and `end` are character offsets into the segmented text, `end` is
/// exclusive. `text` is the surface form reported by the engine and is not
/// re-derived from the offsets.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
    pub pos: String,
    pub text: String,
}

impl Span {
    pub fn new(begin: usize, end: usize, pos: &str, text: &str) -> Span {
        Span {
            begin,
            end,
            pos: pos.to_string(),
            text: text.to_string(),
        }
    }
}

/// Parses the JSON array returned by the engine, keeping the engine order.
///
/// An empty array is a valid, empty segmentation. Anything that is not an
/// array of well-formed spans is rejected so that a broken payload never
/// reads as "no tokens".
pub fn parse_spans(payload: &str) -> Result<Vec<Span>> {
    let spans: Vec<Span> = serde_json::from_str(payload).map_err(|e| {
        ErrorKind::MalformedSegmentationOutput(format!("{}: '{}'", e, abbreviate(payload)))
    })?;

    for (i, span) in spans.iter().enumerate() {
        if span.end <= span.begin {
            bail!(ErrorKind::MalformedSegmentationOutput(format!(
                "span {} '{}' has end {} <= begin {}",
                i, span.text, span.end, span.begin
            )));
        }
    }
    Ok(spans)
}

fn abbreviate(payload: &str) -> String {
    const MAX_CHARS: usize = 64;
    if payload.chars().count() > MAX_CHARS {
        let mut head: String = payload.chars().take(MAX_CHARS).collect();
        head.push_str("...");
        head
    } else {
        payload.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::Error;

    fn is_malformed(err: &Error) -> bool {
        match *err.kind() {
            ErrorKind::MalformedSegmentationOutput(_) => true,
            _ => false,
        }
    }

    #[test]
    fn test_parse_spans() {
        let payload = r#"[
            {"begin":0,"end":6,"pos":"nt","text":"国务院办公厅"},
            {"begin":0,"end":3,"pos":"nt","text":"国务院"},
            {"begin":6,"end":8,"pos":"v","text":"转发"}
        ]"#;
        let spans = parse_spans(payload).unwrap();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0], Span::new(0, 6, "nt", "国务院办公厅"));
        assert_eq!(spans[1], Span::new(0, 3, "nt", "国务院"));
        assert_eq!(spans[2].pos, "v");
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_spans("[]").unwrap().is_empty());
        assert!(parse_spans(" [ ] ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        for payload in &[
            "",
            "null",
            "{}",
            "[{\"begin\":0}]",
            "[{\"begin\":-1,\"end\":2,\"pos\":\"n\",\"text\":\"x\"}]",
            "not json at all",
        ] {
            let res = parse_spans(payload);
            assert!(res.is_err(), "payload {:?} should be rejected", payload);
            assert!(is_malformed(&res.unwrap_err()));
        }
    }

    #[test]
    fn test_parse_rejects_empty_span() {
        let res = parse_spans(r#"[{"begin":3,"end":3,"pos":"w","text":""}]"#);
        assert!(is_malformed(&res.unwrap_err()));
    }
}
