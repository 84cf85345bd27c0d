//! Fixed strings known at build time and exact matching against them.
//!
//! A [`Literal`] is a byte string with a capacity fixed by its type. An
//! [`OptionTable`] is an ordered set of literals that a run-time token is
//! matched against, first declared entry first.
//!
//! ```
//! use lfl::{literal, option_table};
//!
//! const HELP: lfl::jig::Literal<4> = literal!("help");
//! let table = option_table!["directory", "help"];
//!
//! assert_eq!(table.match_index(b"help"), (true, 1));
//! assert_eq!(table.is_match(b"help"), Some(HELP.as_bytes()));
//! ```

pub mod literal;
pub mod option;

pub use literal::{Literal, LiteralError};
pub use option::OptionTable;

/// Counts the bytes before the first NUL. A slice without a NUL counts whole.
pub const fn length(bytes: &[u8]) -> usize {
    let mut index = 0;
    while index < bytes.len() && bytes[index] != 0 {
        index += 1;
    }
    index
}

/// Element count of a fixed-size array. Slices and scalars do not type check.
pub const fn array_size<T, const N: usize>(_: &[T; N]) -> usize {
    N
}

/// Length of the longest string in `names`, zero for an empty list.
pub const fn max_length(names: &[&str]) -> usize {
    let mut longest = 0;
    let mut index = 0;
    while index < names.len() {
        if names[index].len() > longest {
            longest = names[index].len();
        }
        index += 1;
    }
    longest
}

/// Compares the first `n` bytes of `lhs` and `rhs`.
///
/// Returns false when either side is shorter than `n`, and also when a NUL
/// byte shows up within those `n` bytes, even if both sides carry it at the
/// same place. Option names never contain NUL, so the matching code relies on
/// this rather than treating NUL as ordinary data.
pub const fn is_same_n(lhs: &[u8], rhs: &[u8], n: usize) -> bool {
    if lhs.len() < n || rhs.len() < n {
        return false;
    }

    let mut index = 0;
    while index < n {
        if lhs[index] != rhs[index] || lhs[index] == 0 || rhs[index] == 0 {
            return false;
        }
        index += 1;
    }

    true
}

/// Builds a [`Literal`] whose capacity is exactly the length of the text.
#[macro_export]
macro_rules! literal {
    ($text:expr) => {
        $crate::jig::Literal::<{ $text.len() }>::new($text)
    };
}

/// Builds an [`OptionTable`] sized from its entries.
///
/// The capacity is the longest name, the entry count is the number of names.
#[macro_export]
macro_rules! option_table {
    ($($name:expr),+ $(,)?) => {
        $crate::jig::OptionTable::<
            { $crate::jig::max_length(&[$($name),+]) },
            { $crate::jig::array_size(&[$($name),+]) },
        >::new([$($name),+])
    };
}
