//! One page of a cursored resource.

use serde::Serialize;

use super::cursor::Cursor;

/// The items extracted from a single response plus the cursor to the next
/// page.
///
/// An empty `items` list is a valid page (the window held no matching
/// entries). `next` is `None` when the payload carried no bottom cursor,
/// which the upstream API does at the end of reply threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult<T> {
    pub items: Vec<T>,
    pub next: Option<Cursor>,
}

impl<T> ExtractionResult<T> {
    pub fn new(items: Vec<T>, next: Option<Cursor>) -> Self {
        ExtractionResult { items, next }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
