use std::{borrow::Cow, sync::Arc};

use smol_str::SmolStr;

use crate::writer::{self, FormatWriter};

/// A column or table reference, optionally in `name as alias` form.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ident(SmolStr);

impl Ident {
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    #[inline]
    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn split_alias(&self) -> (&str, Option<&str>) {
        split_alias(self.0.as_str())
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FormatWriter for Ident {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut writer::FormatContext<'_, W>,
    ) -> std::fmt::Result {
        context.write_column(self.0.as_str())
    }
}

pub trait IntoIdent {
    fn into_ident(self) -> Ident;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> Ident {
        self
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> Ident {
        self.clone()
    }
}

impl IntoIdent for &str {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self.trim())
    }
}

impl IntoIdent for &String {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self.trim())
    }
}

impl IntoIdent for String {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self.trim())
    }
}

impl IntoIdent for Arc<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self.trim())
    }
}

impl IntoIdent for Cow<'_, str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self.trim())
    }
}

impl IntoIdent for SmolStr {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self.trim())
    }
}

/// A table in a `from` or `join`, with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    table: Ident,
    maybe_alias: Option<Ident>,
}

impl TableRef {
    pub fn new<T: IntoIdent>(table: T) -> Self {
        Self {
            table: table.into_ident(),
            maybe_alias: None,
        }
    }

    pub fn aliased<T: IntoIdent, A: IntoIdent>(table: T, alias: A) -> Self {
        Self {
            table: table.into_ident(),
            maybe_alias: Some(alias.into_ident()),
        }
    }

    pub fn table(&self) -> &Ident {
        &self.table
    }

    pub fn alias(&self) -> Option<&Ident> {
        self.maybe_alias.as_ref()
    }
}

impl FormatWriter for TableRef {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut writer::FormatContext<'_, W>,
    ) -> std::fmt::Result {
        self.table.format_writer(context)?;
        context.write_alias(self.maybe_alias.as_ref())
    }
}

pub trait IntoTableRef {
    fn into_table_ref(self) -> TableRef;
}

impl IntoTableRef for TableRef {
    fn into_table_ref(self) -> TableRef {
        self
    }
}

impl<T: IntoIdent> IntoTableRef for T {
    fn into_table_ref(self) -> TableRef {
        TableRef::new(self)
    }
}

impl<T: IntoIdent, A: IntoIdent> IntoTableRef for (T, A) {
    fn into_table_ref(self) -> TableRef {
        TableRef::aliased(self.0, self.1)
    }
}

pub fn split_alias(s: &str) -> (&str, Option<&str>) {
    match find_as(s.as_bytes()) {
        Some((start, end)) => {
            let rest = &s[end..];
            // anything after a second `as` is dropped
            let alias = match find_as(rest.as_bytes()) {
                Some((next, _)) => &rest[..next],
                None => rest,
            };
            (&s[..start], Some(alias))
        }
        None => (s, None),
    }
}

/// Span of the first whitespace delimited `as` keyword, case insensitive,
/// from the start of the leading whitespace to the end of the trailing one.
fn find_as(h: &[u8]) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < h.len() {
        if !h[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let mut j = i;
        while j < h.len() && h[j].is_ascii_whitespace() {
            j += 1;
        }
        if start > 0
            && j + 2 < h.len()
            && (h[j] | 0x20) == b'a'
            && (h[j + 1] | 0x20) == b's'
            && h[j + 2].is_ascii_whitespace()
        {
            let mut end = j + 2;
            while end < h.len() && h[end].is_ascii_whitespace() {
                end += 1;
            }
            if end < h.len() {
                return Some((start, end));
            }
        }
        i = j;
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::{dialect::Dialect, tests::format_writer};

    use super::*;

    #[test]
    fn test_find_as() {
        assert_eq!(Some((5, 9)), find_as(b"users as u"));
        assert_eq!(None, find_as(b"users"));
        assert_eq!(Some((5, 9)), find_as(b"users as u as bob"));
        assert_eq!(Some((5, 10)), find_as(b"users  AS\tu"));
        assert_eq!(None, find_as(b"users as "));
        assert_eq!(None, find_as(b"alias"));
    }

    #[test]
    fn test_split_alias() {
        assert_eq!(("users", Some("u")), split_alias("users as u"));
        assert_eq!(("users", Some("u")), split_alias("users As u aS bob"));
        assert_eq!(("users", None), split_alias("users"));
    }

    #[test]
    fn test_format_ident_simple() {
        let ident = format_writer(Ident::new_static("users"), Dialect::Postgres);
        assert_eq!("\"users\"", ident);
        let ident = format_writer(Ident::new_static("users"), Dialect::MySql);
        assert_eq!("`users`", ident)
    }

    #[test]
    fn test_format_writer_spaces() {
        let ident = format_writer(Ident::new_static("an sql table"), Dialect::Postgres);
        assert_eq!("\"an sql table\"", ident);
    }

    #[test]
    fn test_format_writer_alias() {
        let ident = format_writer(Ident::new_static("users as foo"), Dialect::Postgres);
        assert_eq!("\"users\" as \"foo\"", ident);
        let ident = format_writer(Ident::new_static("rnk AS rank"), Dialect::MySql);
        assert_eq!("`rnk` as `rank`", ident);
    }

    #[test]
    fn test_format_writer_dot() {
        let ident = format_writer(Ident::new_static("x.y"), Dialect::Postgres);
        assert_eq!("\"x\".\"y\"", ident);
        let ident = format_writer(Ident::new_static("x.y"), Dialect::MySql);
        assert_eq!("`x`.`y`", ident);
    }

    #[test]
    fn test_format_writer_space_dot() {
        let ident = Ident::new_static("some space.x.y as some.table");
        let ident = format_writer(ident, Dialect::MySql);
        assert_eq!("`some space`.`x`.`y` as `some`.`table`", ident);
    }

    #[test]
    fn test_format_writer_star_and_quoted() {
        let ident = format_writer(Ident::new_static("*"), Dialect::MySql);
        assert_eq!("*", ident);
        let ident = format_writer(Ident::new_static("t.*"), Dialect::MySql);
        assert_eq!("`t`.*", ident);
        let ident = format_writer(Ident::new_static("`already` as b"), Dialect::MySql);
        assert_eq!("`already` as `b`", ident);
    }

    #[test]
    fn test_table_ref() {
        let table = format_writer(("users", "u").into_table_ref(), Dialect::MySql);
        assert_eq!("`users` as `u`", table);
        let table = format_writer("users as u".into_table_ref(), Dialect::Postgres);
        assert_eq!("\"users\" as \"u\"", table);
    }
}
