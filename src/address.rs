use crate::editor::EditError;
use std::fmt;

/// A block address: the flattened component list identifying a block by the
/// types and labels of its enclosing chain, e.g. `resource.aws_instance.foo`.
///
/// An address carries no segmentation of its own. Whether `a.b` names a
/// labelled top-level block or a nested chain is resolved structurally by
/// the matcher, against the document being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    parts: Vec<String>,
}

impl Address {
    /// Parse an address string. Components are separated by `.`; a component
    /// may be quoted to embed delimiters, with backslash escapes inside
    /// double quotes.
    pub fn parse(input: &str) -> Result<Self, EditError> {
        let parts = parse_components(input)?;
        if parts.is_empty() {
            return Err(EditError::MalformedAddress {
                input: input.to_string(),
                message: "empty address".to_string(),
            });
        }
        Ok(Self { parts })
    }

    /// Build an address from already-resolved components. Used by the walker,
    /// which reads components straight out of parsed block headers.
    pub fn from_parts(parts: Vec<String>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Render the address so that it re-parses to an equal value: components
    /// joined by `.`, quoting any component that contains a delimiter,
    /// quote, backslash, or whitespace.
    pub fn as_string(&self) -> String {
        let rendered: Vec<String> = self.parts.iter().map(|part| format_component(part)).collect();
        rendered.join(".")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

fn parse_components(input: &str) -> Result<Vec<String>, EditError> {
    let malformed = |message: &str| EditError::MalformedAddress {
        input: input.to_string(),
        message: message.to_string(),
    };

    let mut parts = Vec::new();
    let mut current = String::new();
    // A quoted empty component ("") is a valid, non-empty part.
    let mut current_quoted = false;
    let mut chars = input.chars().peekable();
    let mut in_quotes = false;
    let mut quote_char = '\0';

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == quote_char {
                in_quotes = false;
                continue;
            }

            if quote_char == '"' && ch == '\\' {
                let next = chars.next().ok_or_else(|| malformed("dangling escape"))?;
                let escaped = match next {
                    '"' => '"',
                    '\\' => '\\',
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                };
                current.push(escaped);
                continue;
            }

            current.push(ch);
            continue;
        }

        match ch {
            '.' => {
                if current.is_empty() && !current_quoted {
                    return Err(malformed("empty address component"));
                }
                parts.push(std::mem::take(&mut current));
                current_quoted = false;
            }
            '"' | '\'' => {
                if !current.is_empty() || current_quoted {
                    return Err(malformed("unexpected quote inside component"));
                }
                in_quotes = true;
                current_quoted = true;
                quote_char = ch;
            }
            ch if ch.is_whitespace() => {
                return Err(malformed("whitespace not allowed outside quotes"));
            }
            other => current.push(other),
        }
    }

    if in_quotes {
        return Err(malformed("unterminated quote"));
    }

    if current.is_empty() && !current_quoted {
        if parts.is_empty() {
            return Ok(parts);
        }
        return Err(malformed("empty address component"));
    }
    parts.push(current);

    Ok(parts)
}

fn format_component(part: &str) -> String {
    let needs_quoting = part.is_empty()
        || part
            .chars()
            .any(|ch| ch == '.' || ch == '"' || ch == '\'' || ch == '\\' || ch.is_whitespace());

    if !needs_quoting {
        return part.to_string();
    }

    let mut out = String::with_capacity(part.len() + 2);
    out.push('"');
    for ch in part.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
