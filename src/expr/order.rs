use std::{fmt, str::FromStr};

use crate::{
    Ident,
    error::Error,
    expression::Expression,
    writer::{self, FormatWriter},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    #[default]
    Asc,
    Desc,
}

impl Ordering {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ordering::Asc => "asc",
            Ordering::Desc => "desc",
        }
    }
}

impl FromStr for Ordering {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let direction = value.trim();
        if direction.eq_ignore_ascii_case("asc") {
            Ok(Ordering::Asc)
        } else if direction.eq_ignore_ascii_case("desc") {
            Ok(Ordering::Desc)
        } else {
            Err(Error::InvalidDirection(value.to_owned()))
        }
    }
}

impl FormatWriter for Ordering {
    fn format_writer<W: fmt::Write>(
        &self,
        context: &mut writer::FormatContext<'_, W>,
    ) -> fmt::Result {
        context.writer.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderExpr {
    Column(Ident, Ordering),
    Raw(Expression),
}

impl FormatWriter for OrderExpr {
    fn format_writer<W: fmt::Write>(
        &self,
        context: &mut writer::FormatContext<'_, W>,
    ) -> fmt::Result {
        match self {
            OrderExpr::Column(ident, ordering) => {
                ident.format_writer(context)?;
                context.writer.write_char(' ')?;
                ordering.format_writer(context)
            }
            OrderExpr::Raw(raw) => context.writer.write_str(raw.sql()),
        }
    }
}

/// Ordered `order by` entries. A column keeps its first position,
/// ordering it again only replaces the direction.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Order {
    projections: Vec<OrderExpr>,
}

impl Order {
    pub fn column(&mut self, column: Ident, ordering: Ordering) {
        let existing = self.projections.iter_mut().find_map(|proj| match proj {
            OrderExpr::Column(ident, current) if *ident == column => Some(current),
            _ => None,
        });
        match existing {
            Some(current) => *current = ordering,
            None => self.projections.push(OrderExpr::Column(column, ordering)),
        }
    }

    pub fn raw(&mut self, raw: Expression) {
        if !raw.is_empty() {
            self.projections.push(OrderExpr::Raw(raw));
        }
    }

    pub fn projections(&self) -> &[OrderExpr] {
        &self.projections
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }
}
