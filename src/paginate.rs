use crate::expr::Order;

/// `order by`/`limit`/`offset` of a statement.
///
/// A select owns two of these: one for its own rows and one applied to the
/// result of its unions.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Paginator {
    pub(crate) order: Order,
    maybe_limit: Option<u64>,
    maybe_offset: Option<u64>,
}

impl Paginator {
    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn limit(&self) -> Option<u64> {
        self.maybe_limit
    }

    /// The offset, `None` when unset or zero.
    pub fn offset(&self) -> Option<u64> {
        self.maybe_offset.filter(|offset| *offset > 0)
    }

    pub(crate) fn set_limit(&mut self, limit: u64) {
        self.maybe_limit = Some(limit);
    }

    pub(crate) fn set_offset(&mut self, offset: u64) {
        self.maybe_offset = Some(offset);
    }

    /// Zero based `page` of `per_page` rows.
    pub(crate) fn paginate(&mut self, page: u64, per_page: u64) {
        self.maybe_limit = Some(per_page);
        self.maybe_offset = Some(page.saturating_mul(per_page));
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty() && self.maybe_limit.is_none() && self.offset().is_none()
    }
}
