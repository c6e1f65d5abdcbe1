use std::fmt;

use crate::{
    bind::Array,
    expression::Expression,
    ident::{Ident, IntoIdent},
    writer::{self, FormatWriter},
};

/// An entry of a select or group by list.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Ident(Ident),
    Aliased(Ident, Ident),
    Raw(Expression),
}

impl Column {
    pub fn new<C: IntoIdent>(column: C) -> Self {
        let ident = column.into_ident();
        if ident.is_empty() {
            return Column::Ident(Ident::new_static("*"));
        }
        Column::Ident(ident)
    }

    pub fn aliased<C: IntoIdent, A: IntoIdent>(column: C, alias: A) -> Self {
        match Self::new(column) {
            Column::Ident(ident) => Column::Aliased(ident, alias.into_ident()),
            other => other,
        }
    }
}

impl FormatWriter for Column {
    fn format_writer<W: fmt::Write>(
        &self,
        context: &mut writer::FormatContext<'_, W>,
    ) -> fmt::Result {
        match self {
            Column::Ident(ident) => ident.format_writer(context),
            Column::Aliased(ident, alias) => {
                ident.format_writer(context)?;
                context.write_alias(Some(alias))
            }
            Column::Raw(raw) => context.writer.write_str(raw.sql()),
        }
    }
}

pub type Columns = Array<Column>;

pub trait IntoColumn {
    fn into_column(self) -> Column;
}

impl IntoColumn for Column {
    fn into_column(self) -> Column {
        self
    }
}

impl IntoColumn for Expression {
    fn into_column(self) -> Column {
        Column::Raw(self)
    }
}

impl IntoColumn for Ident {
    fn into_column(self) -> Column {
        Column::new(self)
    }
}

impl IntoColumn for &str {
    fn into_column(self) -> Column {
        Column::new(self)
    }
}

impl IntoColumn for String {
    fn into_column(self) -> Column {
        Column::new(self)
    }
}

impl IntoColumn for &String {
    fn into_column(self) -> Column {
        Column::new(self)
    }
}

impl<C: IntoIdent, A: IntoIdent> IntoColumn for (C, A) {
    fn into_column(self) -> Column {
        Column::aliased(self.0, self.1)
    }
}

pub trait IntoColumns {
    fn into_columns(self) -> Columns;
}

impl<T: IntoColumn> IntoColumns for T {
    fn into_columns(self) -> Columns {
        Columns::One(self.into_column())
    }
}

impl<T: IntoColumn> IntoColumns for Vec<T> {
    fn into_columns(self) -> Columns {
        self.into_iter().map(IntoColumn::into_column).collect()
    }
}

impl<T: IntoColumn, const N: usize> IntoColumns for [T; N] {
    fn into_columns(self) -> Columns {
        self.into_iter().map(IntoColumn::into_column).collect()
    }
}

impl<T: IntoColumn + Clone> IntoColumns for &[T] {
    fn into_columns(self) -> Columns {
        self.iter().cloned().map(IntoColumn::into_column).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{dialect::Dialect, tests::format_writer};

    use super::*;

    #[test]
    fn test_empty_column_is_star() {
        assert_eq!(Column::Ident(Ident::new("*")), "".into_column());
        assert_eq!(Column::Ident(Ident::new("*")), "  ".into_column());
    }

    #[test]
    fn test_into_columns() {
        assert_eq!(2, ["a", "b"].into_columns().len());
        assert_eq!(1, "a".into_columns().len());
        assert_eq!(3, vec!["a".to_owned(), "b".to_owned(), "c".to_owned()].into_columns().len());
        assert_eq!(0, Vec::<&str>::new().into_columns().len());
    }

    #[test]
    fn test_format_aliased() {
        let column = ("t.rnk", "rank").into_column();
        assert_eq!("`t`.`rnk` as `rank`", format_writer(column, Dialect::MySql));
        let column = "rnk as rank".into_column();
        assert_eq!("\"rnk\" as \"rank\"", format_writer(column, Dialect::Postgres));
    }
}
