use std::fmt;
use std::ops::Range;

use hcl_edit::expr::Expression;
use hcl_edit::{Decorate, Decorated, Span};

use crate::document::{Document, Edit, is_locals};

/// Which matches an update rewrites when several `locals` blocks define the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Rewrite the attribute in every `locals` block that defines it.
    #[default]
    All,
    /// Rewrite only the first definition in document order.
    First,
}

/// A single rewritten attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalMatch {
    /// Ordinal of the `locals` block among all `locals` blocks (0-based).
    pub block: usize,
    /// Source text of the value before the rewrite.
    pub previous: String,
}

/// Result of [`update_local`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    pub matches: Vec<LocalMatch>,
}

impl Update {
    pub fn found(&self) -> bool {
        !self.matches.is_empty()
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.matches.len() {
            0 => write!(f, "no match"),
            1 => write!(f, "1 match"),
            n => write!(f, "{} matches", n),
        }
    }
}

/// Replace the value of local `name` with the string literal `value`.
///
/// Only top-level `locals` blocks are searched. The new value is always a
/// quoted string, whatever the old expression was, and keeps the old
/// value's surrounding whitespace and comments. A missing name is not an
/// error: the returned [`Update`] is simply empty and the document is
/// untouched.
pub fn update_local(doc: &mut Document, name: &str, value: &str, mode: MatchMode) -> Update {
    let literal = Expression::String(Decorated::new(value.to_string()))
        .to_string()
        .trim()
        .to_string();

    // (locals ordinal, span of the old value, old value as re-encoded)
    let mut replaced = Vec::new();
    for (ordinal, block) in doc.body.blocks_mut().filter(|b| is_locals(b)).enumerate() {
        let Some(mut attr) = block.body.get_attribute_mut(name) else {
            continue;
        };

        let expr = attr.value_mut();
        let span = expr.span();
        let rendered = expr.to_string().trim().to_string();
        let decor = expr.decor().clone();
        *expr = Expression::String(Decorated::new(value.to_string()));
        *expr.decor_mut() = decor;
        replaced.push((ordinal, span, rendered));

        if mode == MatchMode::First {
            break;
        }
    }

    let mut update = Update::default();
    for (ordinal, span, rendered) in replaced {
        let span = span.and_then(|span| trim_span(doc.source(), span));
        let previous = match &span {
            Some(span) => doc.source()[span.clone()].to_string(),
            None => rendered,
        };
        doc.record(span.map(|span| Edit {
            span,
            text: literal.clone(),
        }));

        tracing::debug!(local = name, block = ordinal, %previous, "replaced local value");
        update.matches.push(LocalMatch {
            block: ordinal,
            previous,
        });
    }

    if !update.found() {
        tracing::error!(local = name, "local '{}' not found", name);
    }

    update
}

/// Narrow `span` to the non-whitespace text it covers; `None` if it is out of bounds.
fn trim_span(source: &str, span: Range<usize>) -> Option<Range<usize>> {
    let text = source.get(span.clone())?;
    let start = span.start + (text.len() - text.trim_start().len());
    let end = span.end - (text.len() - text.trim_end().len());
    Some(start..end.max(start))
}
