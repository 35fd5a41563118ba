//! Selection-set query language.
//!
//! ```text
//! Document   := [ 'query' [ Name ] ] '{' FieldList '}'
//! FieldList  := Field ( Separator Field )*
//! Separator  := ',' | whitespace
//! Field      := Name [ '{' FieldList '}' ]
//! Name       := [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! `#` starts a comment that runs to the end of the line.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid regex"));

/// Nesting limit for selection sets; matches serde_json's recursion limit.
const MAX_DEPTH: usize = 128;

/// Error returned when a query does not follow the selection grammar.
///
/// Offsets are byte offsets into the query text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The query contains no tokens at all.
    #[error("empty query document")]
    EmptyDocument,
    /// A selection set with no fields, `{}`.
    #[error("empty selection set at offset {offset}")]
    EmptySelection {
        /// Offset of the opening brace.
        offset: usize,
    },
    /// A field name that is not a valid identifier.
    #[error("invalid field name '{name}' at offset {offset}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Offset of the name.
        offset: usize,
    },
    /// A token that is not allowed where it appears.
    #[error("unexpected '{found}' at offset {offset}, expected {expected}")]
    UnexpectedToken {
        /// Text of the token.
        found: String,
        /// Offset of the token.
        offset: usize,
        /// What the grammar required instead.
        expected: &'static str,
    },
    /// The query ended while more input was required.
    #[error("unexpected end of query, expected {expected}")]
    UnexpectedEnd {
        /// What the grammar required.
        expected: &'static str,
    },
    /// A `{` whose matching `}` never appears.
    #[error("unclosed brace opened at offset {offset}")]
    UnclosedBrace {
        /// Offset of the opening brace.
        offset: usize,
    },
    /// Input after the closing brace of the document.
    #[error("unexpected trailing input at offset {offset}")]
    TrailingInput {
        /// Offset of the first trailing token.
        offset: usize,
    },
    /// Selection sets nested deeper than the supported limit.
    #[error("selection nested too deeply at offset {offset}")]
    TooDeep {
        /// Offset of the brace that exceeded the limit.
        offset: usize,
    },
}

/// One requested field, with an optional nested selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Member name to select.
    pub name: String,
    /// Sub-fields to keep when the member is an object or a list of objects.
    pub selection: Option<SelectionSet>,
}

/// Ordered list of field requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    fields: Vec<Field>,
}

impl SelectionSet {
    /// Builds a selection set from already-validated fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Fields in the order they were written.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of fields at this level.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the set holds no fields. Parsed sets are never empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, field) in self.fields.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", field.name)?;
            if let Some(selection) = &field.selection {
                write!(f, "{}", selection)?;
            }
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Comma,
    Word(&'a str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => write!(f, "{{"),
            Token::Close => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Word(word) => write!(f, "{}", word),
        }
    }
}

fn tokenize(src: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        match c {
            '{' => tokens.push((start, Token::Open)),
            '}' => tokens.push((start, Token::Close)),
            ',' => tokens.push((start, Token::Comma)),
            '#' => {
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => {}
            _ => {
                let mut end = start + c.len_utf8();
                while let Some(&(idx, c)) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '{' | '}' | ',' | '#') {
                        break;
                    }
                    end = idx + c.len_utf8();
                    chars.next();
                }
                tokens.push((start, Token::Word(&src[start..end])));
            }
        }
    }
    tokens
}

struct Parser<'a> {
    tokens: Vec<(usize, Token<'a>)>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<(usize, Token<'a>)> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<(usize, Token<'a>)> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn name(word: &str, offset: usize) -> Result<String, SyntaxError> {
        if !NAME.is_match(word) {
            return Err(SyntaxError::InvalidName {
                name: word.to_string(),
                offset,
            });
        }
        Ok(word.to_string())
    }

    fn document(&mut self) -> Result<SelectionSet, SyntaxError> {
        if let Some((_, Token::Word("query"))) = self.peek() {
            self.pos += 1;
            if let Some((offset, Token::Word(name))) = self.peek() {
                Self::name(name, offset)?;
                self.pos += 1;
            }
        }
        let selection = self.selection_set()?;
        match self.peek() {
            Some((offset, _)) => Err(SyntaxError::TrailingInput { offset }),
            None => Ok(selection),
        }
    }

    fn selection_set(&mut self) -> Result<SelectionSet, SyntaxError> {
        let open = match self.next() {
            Some((offset, Token::Open)) => offset,
            Some((offset, token)) => {
                return Err(SyntaxError::UnexpectedToken {
                    found: token.to_string(),
                    offset,
                    expected: "'{'",
                })
            }
            None => return Err(SyntaxError::UnexpectedEnd { expected: "'{'" }),
        };
        if self.depth == MAX_DEPTH {
            return Err(SyntaxError::TooDeep { offset: open });
        }
        if let Some((_, Token::Close)) = self.peek() {
            return Err(SyntaxError::EmptySelection { offset: open });
        }

        self.depth += 1;
        let mut fields = vec![self.field()?];
        loop {
            match self.next() {
                Some((_, Token::Close)) => break,
                Some((_, Token::Comma)) => fields.push(self.field()?),
                Some((_, Token::Word(_))) => {
                    self.pos -= 1;
                    fields.push(self.field()?);
                }
                Some((offset, Token::Open)) => {
                    return Err(SyntaxError::UnexpectedToken {
                        found: Token::Open.to_string(),
                        offset,
                        expected: "',' or '}'",
                    })
                }
                None => return Err(SyntaxError::UnclosedBrace { offset: open }),
            }
        }
        self.depth -= 1;
        Ok(SelectionSet::new(fields))
    }

    fn field(&mut self) -> Result<Field, SyntaxError> {
        match self.next() {
            Some((offset, Token::Word(word))) => {
                let name = Self::name(word, offset)?;
                let selection = match self.peek() {
                    Some((_, Token::Open)) => Some(self.selection_set()?),
                    _ => None,
                };
                Ok(Field { name, selection })
            }
            Some((offset, token)) => Err(SyntaxError::UnexpectedToken {
                found: token.to_string(),
                offset,
                expected: "a field name",
            }),
            None => Err(SyntaxError::UnexpectedEnd {
                expected: "a field name",
            }),
        }
    }
}

/// Parses a selection-set query.
pub fn parse(query: &str) -> Result<SelectionSet, SyntaxError> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Err(SyntaxError::EmptyDocument);
    }
    Parser {
        tokens,
        pos: 0,
        depth: 0,
    }
    .document()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &SelectionSet) -> Vec<&str> {
        set.fields().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn parses_nested_selection() {
        let set = parse("{metadata{name},apiVersion,priority,volumes,seLinuxContext{type}}").unwrap();
        assert_eq!(
            names(&set),
            vec!["metadata", "apiVersion", "priority", "volumes", "seLinuxContext"]
        );
        let metadata = set.fields()[0].selection.as_ref().unwrap();
        assert_eq!(names(metadata), vec!["name"]);
        assert!(set.fields()[1].selection.is_none());
    }

    #[test]
    fn whitespace_comments_and_query_keyword() {
        let query = "query Scc {\n  metadata { name } # identity\n  apiVersion\n  priority\n}\n";
        let set = parse(query).unwrap();
        assert_eq!(set.to_string(), "{metadata{name},apiVersion,priority}");
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let set = parse("{a, b, a}").unwrap();
        assert_eq!(names(&set), vec!["a", "b", "a"]);
    }

    #[test]
    fn rejects_empty_document() {
        assert_eq!(parse("").unwrap_err(), SyntaxError::EmptyDocument);
        assert_eq!(parse("  # nothing\n").unwrap_err(), SyntaxError::EmptyDocument);
    }

    #[test]
    fn rejects_empty_selection() {
        assert_eq!(parse("{}").unwrap_err(), SyntaxError::EmptySelection { offset: 0 });
        assert_eq!(parse("{a{ }}").unwrap_err(), SyntaxError::EmptySelection { offset: 2 });
    }

    #[test]
    fn rejects_unmatched_braces() {
        assert_eq!(parse("{a{b}").unwrap_err(), SyntaxError::UnclosedBrace { offset: 0 });
        assert_eq!(parse("{a}}").unwrap_err(), SyntaxError::TrailingInput { offset: 3 });
        assert!(matches!(
            parse("a}").unwrap_err(),
            SyntaxError::UnexpectedToken { offset: 0, .. }
        ));
    }

    #[test]
    fn rejects_invalid_names() {
        assert_eq!(
            parse("{meta-data}").unwrap_err(),
            SyntaxError::InvalidName {
                name: "meta-data".into(),
                offset: 1
            }
        );
        assert!(matches!(
            parse("{1st}").unwrap_err(),
            SyntaxError::InvalidName { .. }
        ));
    }

    #[test]
    fn rejects_stray_commas() {
        assert!(matches!(
            parse("{a,,b}").unwrap_err(),
            SyntaxError::UnexpectedToken { offset: 3, .. }
        ));
        assert!(matches!(
            parse("{a,}").unwrap_err(),
            SyntaxError::UnexpectedToken { offset: 3, .. }
        ));
        assert!(matches!(
            parse("{,a}").unwrap_err(),
            SyntaxError::UnexpectedToken { offset: 1, .. }
        ));
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert_eq!(parse("{a} b").unwrap_err(), SyntaxError::TrailingInput { offset: 4 });
        assert_eq!(parse("{a}{b}").unwrap_err(), SyntaxError::TrailingInput { offset: 3 });
    }

    #[test]
    fn rejects_sibling_selection_sets() {
        assert!(matches!(
            parse("{a{b}{c}}").unwrap_err(),
            SyntaxError::UnexpectedToken { offset: 5, .. }
        ));
    }

    #[test]
    fn rejects_truncated_query() {
        assert_eq!(
            parse("{a,").unwrap_err(),
            SyntaxError::UnexpectedEnd {
                expected: "a field name"
            }
        );
        assert_eq!(
            parse("query").unwrap_err(),
            SyntaxError::UnexpectedEnd { expected: "'{'" }
        );
    }

    #[test]
    fn limits_nesting() {
        let deep = format!("{}{}", "{a".repeat(MAX_DEPTH + 1), "}".repeat(MAX_DEPTH + 1));
        assert!(matches!(parse(&deep).unwrap_err(), SyntaxError::TooDeep { .. }));
        let ok = format!("{}{}", "{a".repeat(MAX_DEPTH - 1), "}".repeat(MAX_DEPTH - 1));
        assert!(parse(&ok).is_ok());
    }
}
