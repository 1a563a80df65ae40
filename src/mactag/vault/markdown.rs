//! Builds [`NoteMetadata`] from the raw text of a markdown note.
//!
//! Frontmatter is the YAML block delimited by `---` lines at the very top of the
//! file; only its `tags` key is read. Inline tags are found in body text with
//! pulldown-cmark so that code blocks, inline code and raw HTML never count.

use crate::model::{FrontmatterTags, NoteMetadata, TagOccurrence};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::ops::Range;
use tracing::debug;

pub fn parse_note(content: &str) -> NoteMetadata {
    let (frontmatter, body) = split_frontmatter(content);
    NoteMetadata {
        tags: inline_tags(body),
        frontmatter_tags: frontmatter.and_then(frontmatter_tags),
    }
}

/// Returns `(frontmatter, body)`. Without a closed frontmatter block the whole
/// content is body.
fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == "---" => {
            let start = first.len();
            let mut offset = start;
            for line in lines {
                let trimmed = line.trim_end();
                if trimmed == "---" || trimmed == "..." {
                    return (Some(&content[start..offset]), &content[offset + line.len()..]);
                }
                offset += line.len();
            }
            (None, content)
        }
        _ => (None, content),
    }
}

fn frontmatter_tags(yaml: &str) -> Option<FrontmatterTags> {
    if yaml.trim().is_empty() {
        return None;
    }
    match serde_yaml::from_str::<serde_yaml::Mapping>(yaml) {
        Ok(map) => map.get("tags").and_then(FrontmatterTags::from_yaml),
        Err(e) => {
            debug!(error = %e, "ignoring unparsable frontmatter");
            None
        }
    }
}

fn inline_tags(body: &str) -> Vec<TagOccurrence> {
    let mut tags = Vec::new();
    let mut run = TextRun::default();
    let mut in_code_block = false;

    for (event, range) in Parser::new_ext(body, Options::all()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                run.boundary(&mut tags);
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                run.boundary(&mut tags);
            }
            Event::Text(text) => {
                if !in_code_block {
                    run.push(&text, body, range);
                }
            }
            Event::Start(
                Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. },
            )
            | Event::End(
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image,
            ) => run.flush(&mut tags),
            Event::Start(_)
            | Event::End(_)
            | Event::SoftBreak
            | Event::HardBreak
            | Event::Rule
            | Event::TaskListMarker(_) => run.boundary(&mut tags),
            // Inline code, HTML and the like: text right after them is not at a word start.
            _ => run.opaque(&mut tags),
        }
    }
    run.flush(&mut tags);

    tags
}

/// Stands in for the last character of markup that produced no text.
const OPAQUE: char = '\u{FFFC}';

/// Body text between two markup events. The parser may split one run of
/// text into several events.
#[derive(Default)]
struct TextRun {
    text: String,
    /// Byte offsets in `text` of `#` written as `\#` in the source.
    escaped: Vec<usize>,
    /// Character before `text`; `None` at the start of a block or line.
    lead: Option<char>,
}

impl TextRun {
    fn push(&mut self, text: &str, body: &str, range: Range<usize>) {
        let bytes = body.as_bytes();
        let mut source_hashes = body[range.clone()]
            .match_indices('#')
            .map(|(i, _)| {
                let at = range.start + i;
                at > 0 && bytes[at - 1] == b'\\'
            });

        let base = self.text.len();
        for (i, _) in text.match_indices('#') {
            if source_hashes.next().unwrap_or(false) {
                self.escaped.push(base + i);
            }
        }
        self.text.push_str(text);
    }

    /// Scans the collected text for tags, then clears it.
    fn flush(&mut self, tags: &mut Vec<TagOccurrence>) {
        let text = &self.text;
        let mut prev = self.lead;
        let mut chars = text.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            let starts_tag = c == '#'
                && !self.escaped.contains(&idx)
                && prev.map_or(true, char::is_whitespace);
            if !starts_tag {
                prev = Some(c);
                continue;
            }

            let start = idx + c.len_utf8();
            let mut end = start;
            while let Some(&(i, next)) = chars.peek() {
                if !is_tag_char(next) {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }

            let name = &text[start..end];
            if !name.is_empty() && !name.chars().all(|c| c.is_ascii_digit()) {
                tags.push(TagOccurrence::new(format!("#{}", name)));
            }
            prev = text[..end].chars().next_back();
        }

        self.lead = prev;
        self.text.clear();
        self.escaped.clear();
    }

    fn boundary(&mut self, tags: &mut Vec<TagOccurrence>) {
        self.flush(tags);
        self.lead = None;
    }

    fn opaque(&mut self, tags: &mut Vec<TagOccurrence>) {
        self.flush(tags);
        self.lead = Some(OPAQUE);
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(content: &str) -> Vec<String> {
        parse_note(content).tags.into_iter().map(|t| t.tag).collect()
    }

    #[test]
    fn test_inline_tags_in_order() {
        assert_eq!(inline("Some #a text and #b\n"), vec!["#a", "#b"]);
    }

    #[test]
    fn test_inline_tag_at_line_start() {
        assert_eq!(inline("#project/alpha is going well"), vec!["#project/alpha"]);
    }

    #[test]
    fn test_heading_marker_is_not_a_tag() {
        assert_eq!(inline("# Title\n\nbody #real"), vec!["#real"]);
    }

    #[test]
    fn test_tags_inside_headings_count() {
        assert_eq!(inline("## Meeting #work\n"), vec!["#work"]);
    }

    #[test]
    fn test_numeric_only_is_not_a_tag() {
        assert_eq!(inline("issue #123 and #v2"), vec!["#v2"]);
    }

    #[test]
    fn test_hash_inside_word_is_not_a_tag() {
        assert_eq!(inline("C# and a#b and url.com/#anchor"), Vec::<String>::new());
    }

    #[test]
    fn test_code_is_ignored() {
        let content = "Use `#notatag` here.\n\n```\n#nope\n```\n\n#yes\n";
        assert_eq!(inline(content), vec!["#yes"]);
    }

    #[test]
    fn test_escaped_hash_is_not_a_tag() {
        assert_eq!(inline("see \\#notatag here"), Vec::<String>::new());
        assert_eq!(inline("\\#first then #second"), vec!["#second"]);
    }

    #[test]
    fn test_hash_after_code_span_is_not_a_tag() {
        assert_eq!(inline("run `cmd`#notatag"), Vec::<String>::new());
        assert_eq!(inline("run `cmd` #real"), vec!["#real"]);
    }

    #[test]
    fn test_hash_after_inline_html_is_not_a_tag() {
        assert_eq!(inline("a <b>x</b>#nope"), Vec::<String>::new());
    }

    #[test]
    fn test_tag_after_line_break() {
        assert_eq!(inline("first line\n#second"), vec!["#second"]);
    }

    #[test]
    fn test_tag_in_task_item() {
        assert_eq!(inline("- [ ] #todo call back\n"), vec!["#todo"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(inline("#a #a"), vec!["#a", "#a"]);
    }

    #[test]
    fn test_tag_stops_at_punctuation() {
        assert_eq!(inline("see #todo, then #next."), vec!["#todo", "#next"]);
    }

    #[test]
    fn test_tag_in_emphasis() {
        assert_eq!(inline("*#important* note"), vec!["#important"]);
    }

    #[test]
    fn test_unicode_tags() {
        assert_eq!(inline("note #café"), vec!["#café"]);
    }

    #[test]
    fn test_frontmatter_list() {
        let meta = parse_note("---\ntags: [b, c]\ntitle: x\n---\nbody #a\n");
        assert_eq!(
            meta.frontmatter_tags,
            Some(FrontmatterTags::Many(vec!["b".into(), "c".into()]))
        );
        assert_eq!(meta.tags, vec![TagOccurrence::new("#a")]);
    }

    #[test]
    fn test_frontmatter_block_list() {
        let meta = parse_note("---\ntags:\n  - one\n  - two\n---\n");
        assert_eq!(
            meta.frontmatter_tags,
            Some(FrontmatterTags::Many(vec!["one".into(), "two".into()]))
        );
    }

    #[test]
    fn test_frontmatter_bare_string() {
        let meta = parse_note("---\ntags: x\n---\n");
        assert_eq!(meta.frontmatter_tags, Some(FrontmatterTags::One("x".into())));
    }

    #[test]
    fn test_frontmatter_is_not_scanned_for_inline_tags() {
        let meta = parse_note("---\ntitle: \"#notinline\"\n---\ntext\n");
        assert!(meta.tags.is_empty());
        assert!(meta.frontmatter_tags.is_none());
    }

    #[test]
    fn test_frontmatter_without_tags() {
        let meta = parse_note("---\ntitle: hello\n---\nbody\n");
        assert!(meta.frontmatter_tags.is_none());
    }

    #[test]
    fn test_invalid_frontmatter_is_ignored() {
        let meta = parse_note("---\ntags: [unclosed\n---\n#a\n");
        assert!(meta.frontmatter_tags.is_none());
        assert_eq!(meta.tags, vec![TagOccurrence::new("#a")]);
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let meta = parse_note("---\ntags: [a]\n#b\n");
        assert!(meta.frontmatter_tags.is_none());
    }

    #[test]
    fn test_crlf_frontmatter() {
        let meta = parse_note("---\r\ntags: [a]\r\n---\r\nbody #b\r\n");
        assert_eq!(meta.frontmatter_tags, Some(FrontmatterTags::Many(vec!["a".into()])));
        assert_eq!(meta.tags, vec![TagOccurrence::new("#b")]);
    }

    #[test]
    fn test_empty_note() {
        assert_eq!(parse_note(""), NoteMetadata::default());
    }
}
