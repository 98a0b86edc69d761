//! Suppression comments for dynamic translation calls.
//!
//! A comment containing the suppression marker silences the dynamic records of
//! the call on the same line, or of the call on the first code line after the
//! comment block it belongs to:
//!
//! ```js
//! $translate(key); // suppress-dynamic-translation-error
//!
//! // suppress-dynamic-translation-error
//! // the key comes from the server
//! $translate(serverKey);
//! ```
//!
//! Blank lines break the chain: a marker followed by an empty line does not
//! reach the code below it.

use std::collections::HashSet;

use swc_common::SourceMap;

use crate::core::parsers::script::ExtractedComments;

/// Upper bound on the comment lines skipped when looking for the target line.
pub const MAX_COMMENT_CHAIN_LINES: usize = 10;

/// Lines whose translation calls may be dynamic without a diagnostic.
#[derive(Debug, Default)]
pub struct Suppressions {
    lines: HashSet<usize>,
}

impl Suppressions {
    pub fn collect(comments: &ExtractedComments, source_map: &SourceMap, marker: &str) -> Self {
        let comments_with_lines: Vec<_> = comments
            .iter()
            .map(|cmt| {
                let start = source_map.lookup_char_pos(cmt.span.lo).line;
                let end = source_map.lookup_char_pos(cmt.span.hi).line;
                (start, end, cmt)
            })
            .collect();

        let comment_lines: HashSet<usize> = comments_with_lines
            .iter()
            .flat_map(|(start, end, _)| *start..=*end)
            .collect();

        let mut lines = HashSet::new();
        for (start, end, cmt) in &comments_with_lines {
            if !cmt.text.contains(marker) {
                continue;
            }
            lines.insert(*start);
            lines.insert(*end);
            lines.insert(Self::find_next_non_comment_line(*end, &comment_lines));
        }

        Self { lines }
    }

    pub fn covers(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    fn find_next_non_comment_line(line: usize, comment_lines: &HashSet<usize>) -> usize {
        let mut next = line + 1;
        let max_line = line + MAX_COMMENT_CHAIN_LINES;
        while comment_lines.contains(&next) && next < max_line {
            next += 1;
        }
        next
    }
}
