//! Parser for the composer's tag dialect.
//!
//! Recognised tags toggle bold, italic and monospace runs; `<br/>` and `\n`
//! are hard breaks. Anything else, including a stray `<` or a closing tag
//! with nothing open, is literal text.
//!
//! Inside a monospace run only `</font>` is recognised, so code spans keep
//! their raw text. Known limitations: a code span containing `</font>` ends
//! early, and composed text is not escaped, so prose such as `&lt;b&gt;`
//! reaches this parser as `<b>` and is read as a tag.

use crate::render::{BOLD_CLOSE, BOLD_OPEN, BREAK, ITALIC_CLOSE, ITALIC_OPEN, MONO_CLOSE, MONO_OPEN};

/// Font selection flags for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    /// Bold weight
    pub bold: bool,
    /// Oblique slant
    pub italic: bool,
    /// Monospace family
    pub mono: bool,
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Literal text
    pub text: String,
    /// Effective style
    pub style: TextStyle,
}

/// A parsed markup token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Styled text
    Text(Run),
    /// Forced line break
    Break,
}

#[derive(Clone, Copy)]
enum Tag {
    Open(Flag),
    Close(Flag),
    Break,
}

#[derive(Clone, Copy)]
enum Flag {
    Bold,
    Italic,
    Mono,
}

const TAGS: [(&str, Tag); 7] = [
    (BOLD_OPEN, Tag::Open(Flag::Bold)),
    (BOLD_CLOSE, Tag::Close(Flag::Bold)),
    (ITALIC_OPEN, Tag::Open(Flag::Italic)),
    (ITALIC_CLOSE, Tag::Close(Flag::Italic)),
    (MONO_OPEN, Tag::Open(Flag::Mono)),
    (MONO_CLOSE, Tag::Close(Flag::Mono)),
    (BREAK, Tag::Break),
];

/// Parse markup on top of a base style.
pub fn parse_markup(markup: &str, base: TextStyle) -> Vec<Token> {
    let mut parser = MarkupParser::new(base);
    let mut rest = markup;

    while let Some(pos) = rest.find(|c: char| c == '<' || c == '\n') {
        parser.buffer.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(after) = rest.strip_prefix('\n') {
            parser.line_break();
            rest = after;
            continue;
        }

        let found = TAGS
            .iter()
            .find(|(tag, kind)| parser.recognises(*kind) && rest.starts_with(tag));
        match found {
            Some((tag, kind)) if parser.apply(*kind) => rest = &rest[tag.len()..],
            _ => {
                parser.buffer.push('<');
                rest = &rest[1..];
            }
        }
    }

    parser.buffer.push_str(rest);
    parser.finish()
}

struct MarkupParser {
    base: TextStyle,
    bold: usize,
    italic: usize,
    mono: usize,
    buffer: String,
    tokens: Vec<Token>,
}

impl MarkupParser {
    fn new(base: TextStyle) -> Self {
        Self {
            base,
            bold: 0,
            italic: 0,
            mono: 0,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    fn style(&self) -> TextStyle {
        TextStyle {
            bold: self.base.bold || self.bold > 0,
            italic: self.base.italic || self.italic > 0,
            mono: self.base.mono || self.mono > 0,
        }
    }

    fn counter(&mut self, flag: Flag) -> &mut usize {
        match flag {
            Flag::Bold => &mut self.bold,
            Flag::Italic => &mut self.italic,
            Flag::Mono => &mut self.mono,
        }
    }

    fn recognises(&self, tag: Tag) -> bool {
        self.mono == 0 || matches!(tag, Tag::Close(Flag::Mono))
    }

    /// Returns false when the tag should be treated as literal text.
    fn apply(&mut self, tag: Tag) -> bool {
        match tag {
            Tag::Open(flag) => {
                self.flush();
                *self.counter(flag) += 1;
            }
            Tag::Close(flag) => {
                if *self.counter(flag) == 0 {
                    return false;
                }
                self.flush();
                *self.counter(flag) -= 1;
            }
            Tag::Break => self.line_break(),
        }
        true
    }

    fn line_break(&mut self) {
        self.flush();
        self.tokens.push(Token::Break);
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        let style = self.style();

        if let Some(Token::Text(last)) = self.tokens.last_mut() {
            if last.style == style {
                last.text.push_str(&text);
                return;
            }
        }
        self.tokens.push(Token::Text(Run { text, style }));
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush();
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, bold: bool, italic: bool, mono: bool) -> Token {
        Token::Text(Run {
            text: text.to_string(),
            style: TextStyle { bold, italic, mono },
        })
    }

    #[test]
    fn test_plain_text() {
        let tokens = parse_markup("hello world", TextStyle::default());
        assert_eq!(tokens, vec![run("hello world", false, false, false)]);
    }

    #[test]
    fn test_nested_tags() {
        let tokens = parse_markup("a<b>b<i>c</i></b>", TextStyle::default());
        assert_eq!(
            tokens,
            vec![
                run("a", false, false, false),
                run("b", true, false, false),
                run("c", true, true, false),
            ]
        );
    }

    #[test]
    fn test_code_span() {
        let tokens = parse_markup("use <font face=\"Courier\">api:</font> here", TextStyle::default());
        assert_eq!(
            tokens,
            vec![
                run("use ", false, false, false),
                run("api:", false, false, true),
                run(" here", false, false, false),
            ]
        );
    }

    #[test]
    fn test_tags_inside_code_span_are_literal() {
        let tokens = parse_markup(
            "Use <font face=\"Courier\"><i> or <br/></font> for italics",
            TextStyle::default(),
        );
        assert_eq!(
            tokens,
            vec![
                run("Use ", false, false, false),
                run("<i> or <br/>", false, false, true),
                run(" for italics", false, false, false),
            ]
        );
    }

    #[test]
    fn test_breaks() {
        let tokens = parse_markup("a<br/>b\nc", TextStyle::default());
        assert_eq!(
            tokens,
            vec![
                run("a", false, false, false),
                Token::Break,
                run("b", false, false, false),
                Token::Break,
                run("c", false, false, false),
            ]
        );
    }

    #[test]
    fn test_unknown_tags_are_literal() {
        let tokens = parse_markup("x < y <span> </b>", TextStyle::default());
        assert_eq!(tokens, vec![run("x < y <span> </b>", false, false, false)]);
    }

    #[test]
    fn test_base_style_applies() {
        let base = TextStyle {
            bold: true,
            ..Default::default()
        };
        let tokens = parse_markup("<b>x</b>y", base);
        assert_eq!(tokens, vec![run("xy", true, false, false)]);
    }
}
