//! Bulk attribute strings: `NAME=value, OTHER="quoted, value"`.
//!
//! Token priority in logos is longest match first, so a quoted string wins
//! over a bare word that starts with `"`. Unquoted values run to the next
//! comma and keep their inner spacing (`FGCOLOR=255 0 0`).

use logos::Logos;

use crate::error::{Error, Result};

/// Token produced by the attribute-string lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    /// Double-quoted string, no escapes.
    #[regex(r#""[^"]*""#)]
    Quoted,

    /// Any run of characters that is not whitespace or punctuation.
    #[regex(r#"[^ \t\n\r=,"]+"#)]
    Word,

    #[token("=")]
    Equals,

    #[token(",")]
    Comma,
}

#[derive(Debug, Clone, Copy)]
struct Spanned {
    token: Token,
    start: usize,
    end: usize,
}

fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let mut out = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(token) => out.push(Spanned {
                token,
                start: span.start,
                end: span.end,
            }),
            Err(()) => {
                return Err(Error::AttributeParse {
                    position: span.start,
                    message: format!("unexpected character {:?}", &input[span]),
                })
            }
        }
    }
    Ok(out)
}

/// Parse a bulk attribute string into `(name, value)` pairs in source order.
///
/// Empty input yields no pairs. A trailing comma is accepted.
pub fn parse_attributes(input: &str) -> Result<Vec<(String, String)>> {
    let tokens = tokenize(input)?;
    let mut pairs = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let name_tok = tokens[i];
        if name_tok.token != Token::Word {
            return Err(Error::AttributeParse {
                position: name_tok.start,
                message: "expected attribute name".into(),
            });
        }
        let name = &input[name_tok.start..name_tok.end];
        i += 1;

        match tokens.get(i) {
            Some(t) if t.token == Token::Equals => i += 1,
            Some(t) => {
                return Err(Error::AttributeParse {
                    position: t.start,
                    message: format!("expected '=' after {name}"),
                })
            }
            None => {
                return Err(Error::AttributeParse {
                    position: input.len(),
                    message: format!("expected '=' after {name}"),
                })
            }
        }

        let value = match tokens.get(i) {
            Some(t) if t.token == Token::Quoted => {
                i += 1;
                input[t.start + 1..t.end - 1].to_owned()
            }
            Some(t) if t.token == Token::Word => {
                let start = t.start;
                let mut end = t.end;
                i += 1;
                while let Some(next) = tokens.get(i) {
                    if next.token != Token::Word {
                        break;
                    }
                    end = next.end;
                    i += 1;
                }
                input[start..end].to_owned()
            }
            // `NAME=` followed by a comma or the end sets an empty value.
            Some(t) if t.token == Token::Comma => String::new(),
            None => String::new(),
            Some(t) => {
                return Err(Error::AttributeParse {
                    position: t.start,
                    message: format!("unexpected token in value of {name}"),
                })
            }
        };

        pairs.push((name.to_owned(), value));

        match tokens.get(i) {
            Some(t) if t.token == Token::Comma => i += 1,
            Some(t) => {
                return Err(Error::AttributeParse {
                    position: t.start,
                    message: "expected ',' between attributes".into(),
                })
            }
            None => {}
        }
    }

    Ok(pairs)
}
