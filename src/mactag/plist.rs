//! XML property list encoding for the Finder tag attribute.
//!
//! `com.apple.metadata:_kMDItemUserTags` holds a property list whose root is an
//! array of strings. Only that shape is ever produced here.

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
    "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    "<plist version=\"1.0\">\n",
);
const FOOTER: &str = "</plist>";
const INDENT: &str = "  ";

pub fn encode_tags<S: AsRef<str>>(tags: &[S]) -> String {
    let mut out = String::from(HEADER);

    if tags.is_empty() {
        out.push_str(INDENT);
        out.push_str("<array/>\n");
    } else {
        out.push_str(INDENT);
        out.push_str("<array>\n");
        for tag in tags {
            out.push_str(INDENT);
            out.push_str(INDENT);
            out.push_str("<string>");
            out.push_str(&escape(tag.as_ref()));
            out.push_str("</string>\n");
        }
        out.push_str(INDENT);
        out.push_str("</array>\n");
    }

    out.push_str(FOOTER);
    out
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            // XML parsers fold a literal CR into LF.
            '\r' => escaped.push_str("&#xD;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
