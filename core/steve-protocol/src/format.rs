//! Deterministic, human-readable rendering for diagnostics and tooling.
//!
//! Records render as `Name(Key: value, Key: value)`. Nested records and lists
//! of records render inline, so a whole token stream fits the same shape.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

/// A value that can describe itself as a named record of fields.
pub trait Formattable {
    fn format_fields(&self, f: &mut FieldFormatter);

    fn to_formatted(&self) -> String {
        let mut f = FieldFormatter::new();
        self.format_fields(&mut f);
        f.finish()
    }
}

#[derive(Debug, Default)]
pub struct FieldFormatter {
    out: String,
    // One entry per open record: whether it already holds a field.
    open: Vec<bool>,
}

impl FieldFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, name: &str) -> &mut Self {
        self.out.push_str(name);
        self.out.push('(');
        self.open.push(false);
        self
    }

    pub fn pair(&mut self, key: &str, value: impl fmt::Display) -> &mut Self {
        self.separate();
        // Writing into a String cannot fail.
        let _ = write!(self.out, "{}: {}", key, value);
        self
    }

    pub fn nested(&mut self, key: &str, value: &dyn Formattable) -> &mut Self {
        self.separate();
        self.out.push_str(key);
        self.out.push_str(": ");
        value.format_fields(self);
        self
    }

    pub fn list<'a, T, I>(&mut self, key: &str, items: I) -> &mut Self
    where
        T: Formattable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.separate();
        self.out.push_str(key);
        self.out.push_str(": [");
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            item.format_fields(self);
        }
        self.out.push(']');
        self
    }

    pub fn end(&mut self) -> &mut Self {
        if self.open.pop().is_some() {
            self.out.push(')');
        }
        self
    }

    /// Closes any records left open and returns the rendered text.
    pub fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.end();
        }
        self.out
    }

    fn separate(&mut self) {
        if let Some(has_fields) = self.open.last_mut() {
            if *has_fields {
                self.out.push_str(", ");
            }
            *has_fields = true;
        }
    }
}
