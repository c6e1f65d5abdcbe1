use crate::{bind::Bind, error::Error};

/// Executes compiled statements. Implemented outside this crate on top of
/// a real driver; placeholders are always `?` and bindings arrive in order.
pub trait Connection {
    type Row;
    type Error: std::error::Error + Send + Sync + 'static;
    /// Rows pulled from the driver one at a time.
    type Cursor<'c>: Iterator<Item = Result<Self::Row, Self::Error>>
    where
        Self: 'c;

    fn query(&self, sql: &str, bindings: &[Bind]) -> Result<Vec<Self::Row>, Self::Error>;

    /// Starts the statement without buffering its result set.
    fn cursor<'c>(&'c self, sql: &str, bindings: &[Bind]) -> Result<Self::Cursor<'c>, Self::Error>;

    /// Returns the number of affected rows.
    fn execute(&self, sql: &str, bindings: &[Bind]) -> Result<u64, Self::Error>;
}

/// Rows returned by [`crate::Builder::fetch_iter`], buffered or streamed
/// depending on [`crate::Builder::lazy`].
pub enum Rows<'c, C: Connection + 'c> {
    Buffered(std::vec::IntoIter<C::Row>),
    Streamed(C::Cursor<'c>),
}

impl<'c, C: Connection + 'c> Rows<'c, C> {
    pub fn is_streamed(&self) -> bool {
        matches!(self, Rows::Streamed(_))
    }
}

impl<'c, C: Connection + 'c> Iterator for Rows<'c, C> {
    type Item = Result<C::Row, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Rows::Buffered(rows) => rows.next().map(Ok),
            Rows::Streamed(cursor) => cursor
                .next()
                .map(|row| row.map_err(|err| Error::Connection(Box::new(err)))),
        }
    }
}
