//! Replacement template with a single insertion slot.
//!
//! `{0}` and `{}` both mark the slot; `{{` and `}}` are literal braces.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("Unsupported placeholder '{{{0}}}': only '{{0}}' or '{{}}' can be used")]
    UnsupportedPlaceholder(String),

    #[error("Unclosed '{{' at byte {0}")]
    UnclosedBrace(usize),

    #[error("Single '}}' at byte {0}, use '}}}}' for a literal brace")]
    UnmatchedClosingBrace(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Slot,
}

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    parts: Vec<Part>,
}

impl Template {
    /// Parses `source`.
    ///
    /// # Errors
    /// Returns error on unbalanced braces or a placeholder other than `{0}`/`{}`.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, next)| next == '{').is_some() => literal.push('{'),
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, ch)) => name.push(ch),
                            None => return Err(TemplateError::UnclosedBrace(pos)),
                        }
                    }
                    if !name.is_empty() && name != "0" {
                        return Err(TemplateError::UnsupportedPlaceholder(name));
                    }
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(Part::Slot);
                }
                '}' if chars.next_if(|&(_, next)| next == '}').is_some() => literal.push('}'),
                '}' => return Err(TemplateError::UnmatchedClosingBrace(pos)),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        Ok(Self { source: source.to_string(), parts })
    }

    /// Splices `inner` into every slot.
    #[must_use]
    pub fn apply(&self, inner: &str) -> String {
        self.parts.iter().fold(String::new(), |mut out, part| {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Slot => out.push_str(inner),
            }
            out
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
