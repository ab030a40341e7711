//! The request-level diagnostics collection returned by [`crate::Schema::builder`]'s
//! `build` failures and [`crate::Request::new`] failures: a non-empty list
//! of fatal errors that stringifies to the first one plus a count suffix,
//! mirroring the original source's `_Errors` aggregate type.

use std::fmt;

#[derive(Debug)]
pub struct Errors<E> {
    items: Vec<E>,
}

impl<E> Errors<E> {
    pub fn new(items: Vec<E>) -> Self {
        debug_assert!(!items.is_empty());
        Self { items }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }
}

impl<E: fmt::Display> fmt::Display for Errors<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items[0])?;
        if self.items.len() > 1 {
            write!(f, " ({} more)", self.items.len() - 1)?;
        }
        Ok(())
    }
}

impl<E: fmt::Display + fmt::Debug> std::error::Error for Errors<E> {}
