use std::fmt::Write;

use crate::{
    Ident,
    dialect::Grammar,
    ident::split_alias,
};

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result;
}

pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) grammar: &'a dyn Grammar,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, grammar: &'a dyn Grammar) -> Self {
        Self { writer, grammar }
    }

    /// Writes a column expression such as `t.name as n`: every dot segment on
    /// both sides of the `as` is quoted, `*` and quoted segments are kept as is.
    pub(crate) fn write_column(&mut self, value: &str) -> std::fmt::Result {
        match split_alias(value.trim()) {
            (column, Some(alias)) => {
                self.write_segments(column)?;
                self.writer.write_str(" as ")?;
                self.write_segments(alias)
            }
            (column, None) => self.write_segments(column),
        }
    }

    fn write_segments(&mut self, value: &str) -> std::fmt::Result {
        if is_quoted(value, self.grammar.quote()) {
            return self.writer.write_str(value);
        }
        self.write_table(value)
    }

    pub(crate) fn write_table(&mut self, ident: &str) -> std::fmt::Result {
        for (i, part) in ident.split('.').enumerate() {
            if i > 0 {
                self.writer.write_char('.')?;
            }
            self.write_ident(part)?;
        }
        Ok(())
    }

    /// `*` and segments already quoted by this grammar are written as is.
    pub(crate) fn write_ident(&mut self, part: &str) -> std::fmt::Result {
        if part == "*" || is_quoted(part, self.grammar.quote()) {
            return self.writer.write_str(part);
        }
        let quoted = self.grammar.wrap_identifier(part);
        self.writer.write_str(&quoted)
    }

    pub(crate) fn write_alias(&mut self, alias: Option<&Ident>) -> std::fmt::Result {
        if let Some(alias) = alias {
            self.writer.write_str(" as ")?;
            self.write_table(alias.as_str())?;
        }
        Ok(())
    }
}

/// Wrapped in `quote` with every inner quote doubled.
fn is_quoted(value: &str, quote: char) -> bool {
    let Some(inner) = value
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
    else {
        return false;
    };
    let mut chars = inner.chars();
    while let Some(char) = chars.next() {
        if char == quote && chars.next() != Some(quote) {
            return false;
        }
    }
    true
}
