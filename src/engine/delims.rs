//! Rewrites templates written with custom delimiters into Tera syntax.
//!
//! With a pair `L`/`R`: `L expr R` becomes `{{ expr }}`, `L% tag %R` becomes
//! `{% tag %}` and `L# note #R` becomes `{# note #}`. Tera markers appearing
//! in literal text are emitted as string expressions so they print verbatim.

use crate::config::Delimiters;
use crate::error::{Result, VelvetError};

pub fn translate(template: &str, source: &str, delimiters: &Delimiters) -> Result<String> {
    let left = delimiters.left.as_str();
    let right = delimiters.right.as_str();

    let mut out = String::with_capacity(source.len() + 16);
    let mut rest = source;
    let mut offset = 0;

    while let Some(start) = rest.find(left) {
        push_literal(&mut out, &rest[..start]);

        let after = &rest[start + left.len()..];
        let (open, close, marker) = match after.as_bytes().first() {
            Some(b'%') => ("{%", "%}", "%"),
            Some(b'#') => ("{#", "#}", "#"),
            _ => ("{{", "}}", ""),
        };
        let body = &after[marker.len()..];
        let closing = format!("{marker}{right}");

        let Some(end) = body.find(&closing) else {
            return Err(VelvetError::DelimiterSyntax {
                template: template.to_string(),
                delimiter: format!("{left}{marker}"),
                offset: offset + start,
            });
        };

        out.push_str(open);
        out.push_str(&body[..end]);
        out.push_str(close);

        let consumed = start + left.len() + marker.len() + end + closing.len();
        offset += consumed;
        rest = &rest[consumed..];
    }

    push_literal(&mut out, rest);
    Ok(out)
}

fn push_literal(out: &mut String, text: &str) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '{' {
            if let Some(next @ ('{' | '%' | '#')) = chars.peek().copied() {
                chars.next();
                out.push_str("{{ \"{");
                out.push(next);
                out.push_str("\" }}");
                continue;
            }
        }
        out.push(c);
    }
}
