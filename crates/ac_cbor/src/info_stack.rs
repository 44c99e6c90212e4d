use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use ac_reflect::info::TypeInfo;

use crate::Error;

/// The types being processed, outermost first.
///
/// Attached to errors as [`Error::Context`] when the `debug` feature is on.
#[derive(Default, Clone)]
pub(crate) struct TypeInfoStack {
    stack: Vec<&'static TypeInfo>,
}

impl TypeInfoStack {
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, type_info: &'static TypeInfo) {
        self.stack.push(type_info);
    }

    #[inline]
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    #[inline]
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Wraps `error` with the current stack, unless it is empty or the
    /// error already carries one.
    pub fn attach(&self, error: Error) -> Error {
        if self.stack.is_empty() || matches!(error, Error::Context { .. }) {
            return error;
        }
        Error::Context {
            stack: self.to_string(),
            source: Box::new(error),
        }
    }
}

impl fmt::Display for TypeInfoStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.stack.iter();

        if let Some(first) = iter.next() {
            write!(f, "`{}`", first.type_path())?;
        }
        for info in iter {
            write!(f, " -> `{}`", info.type_path())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_reflect::info::Typed;
    use alloc::format;

    #[test]
    fn display_chain() {
        let mut stack = TypeInfoStack::new();
        assert_eq!(format!("{stack}"), "");

        stack.push(<Vec<i32>>::type_info());
        stack.push(i32::type_info());
        assert_eq!(format!("{stack}"), "`alloc::vec::Vec<i32>` -> `i32`");

        let error = stack.attach(Error::UnexpectedTag(3));
        assert_eq!(
            error.to_string(),
            "Unexpected tag 3 (stack: `alloc::vec::Vec<i32>` -> `i32`)"
        );
        // Already carries a stack.
        let error = stack.attach(error);
        assert!(matches!(error.innermost(), Error::UnexpectedTag(3)));
        assert!(!matches!(error, Error::Context { ref source, .. } if matches!(**source, Error::Context { .. })));

        stack.pop();
        stack.clear();
        assert!(matches!(stack.attach(Error::UnexpectedTag(3)), Error::UnexpectedTag(3)));
    }
}
