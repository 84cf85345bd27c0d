use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{AddAssign, Index};

use super::is_same_n;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("{needed} bytes do not fit in a literal of capacity {capacity}")]
    Capacity { needed: usize, capacity: usize },
}

/// A byte string stored inline with room for `N` bytes.
///
/// `len` never exceeds `N` and only grows through the append operations.
/// Bytes past `len` are kept zeroed and take no part in comparisons.
#[derive(Clone, Copy)]
pub struct Literal<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> Literal<N> {
    pub const fn empty() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Copies `text` in. Text longer than `N` panics, which makes a `const`
    /// initializer fail to build.
    pub const fn new(text: &str) -> Self {
        let text = text.as_bytes();
        assert!(text.len() <= N, "text does not fit in the literal capacity");

        let mut bytes = [0; N];
        let mut index = 0;
        while index < text.len() {
            bytes[index] = text[index];
            index += 1;
        }

        Self {
            bytes,
            len: text.len(),
        }
    }

    /// Copies exactly `len` bytes from the start of `raw`.
    ///
    /// `len` is trusted to be the string length (see [`super::length`]); no
    /// terminator is looked for.
    pub fn from_raw(raw: &[u8], len: usize) -> Result<Self, LiteralError> {
        if len > raw.len() {
            return Err(LiteralError::OutOfRange {
                index: len,
                len: raw.len(),
            });
        }
        let mut literal = Self::empty();
        literal.append(&raw[..len])?;
        Ok(literal)
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    /// Same as [`Literal::len`].
    pub const fn size(&self) -> usize {
        self.len
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice().split_at(self.len).0
    }

    /// Same as [`Literal::as_bytes`].
    pub const fn get(&self) -> &[u8] {
        self.as_bytes()
    }

    pub fn at(&self, index: usize) -> Result<u8, LiteralError> {
        self.as_bytes()
            .get(index)
            .copied()
            .ok_or(LiteralError::OutOfRange {
                index,
                len: self.len,
            })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.as_bytes().iter()
    }

    /// Compares `candidate` over this literal's length only.
    ///
    /// Anything after that length is not looked at, so `b"helpful"` is the
    /// same as `help`. A shorter candidate or a NUL within the length is not.
    pub const fn is_same(&self, candidate: &[u8]) -> bool {
        is_same_n(self.as_bytes(), candidate, self.len)
    }

    pub fn append(&mut self, tail: &[u8]) -> Result<(), LiteralError> {
        let needed = self.len + tail.len();
        if needed > N {
            return Err(LiteralError::Capacity {
                needed,
                capacity: N,
            });
        }
        self.bytes[self.len..needed].copy_from_slice(tail);
        self.len = needed;
        Ok(())
    }

    pub fn push_str(&mut self, tail: &str) -> Result<(), LiteralError> {
        self.append(tail.as_bytes())
    }

    pub fn push(&mut self, byte: u8) -> Result<(), LiteralError> {
        self.append(&[byte])
    }

    /// Joins `self` and `other` into a literal of capacity `O`.
    pub fn concat<const M: usize, const O: usize>(
        &self,
        other: &Literal<M>,
    ) -> Result<Literal<O>, LiteralError> {
        let mut joined = Literal::<O>::from_raw(self.as_bytes(), self.len)?;
        joined.append(other.as_bytes())?;
        Ok(joined)
    }
}

impl<const N: usize> Default for Literal<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const N: usize> AsRef<[u8]> for Literal<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> Index<usize> for Literal<N> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        match self.as_bytes().get(index) {
            Some(byte) => byte,
            None => panic!(
                "{}",
                LiteralError::OutOfRange {
                    index,
                    len: self.len
                }
            ),
        }
    }
}

impl<'a, const N: usize> IntoIterator for &'a Literal<N> {
    type Item = &'a u8;
    type IntoIter = std::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<const N: usize, const M: usize> AddAssign<&Literal<M>> for Literal<N> {
    fn add_assign(&mut self, rhs: &Literal<M>) {
        if let Err(err) = self.append(rhs.as_bytes()) {
            panic!("{}", err);
        }
    }
}

impl<const N: usize> AddAssign<&str> for Literal<N> {
    fn add_assign(&mut self, rhs: &str) {
        if let Err(err) = self.push_str(rhs) {
            panic!("{}", err);
        }
    }
}

impl<const N: usize, const M: usize> PartialEq<Literal<M>> for Literal<N> {
    fn eq(&self, other: &Literal<M>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> Eq for Literal<N> {}

impl<const N: usize> PartialEq<[u8]> for Literal<N> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize, const K: usize> PartialEq<[u8; K]> for Literal<N> {
    fn eq(&self, other: &[u8; K]) -> bool {
        self.as_bytes() == other.as_slice()
    }
}

impl<const N: usize> PartialEq<str> for Literal<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for Literal<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<Literal<N>> for str {
    fn eq(&self, other: &Literal<N>) -> bool {
        other == self
    }
}

impl<const N: usize> PartialEq<Literal<N>> for &str {
    fn eq(&self, other: &Literal<N>) -> bool {
        other == self
    }
}

// Lexicographic by byte, a shorter equal prefix sorting first.
impl<const N: usize, const M: usize> PartialOrd<Literal<M>> for Literal<N> {
    fn partial_cmp(&self, other: &Literal<M>) -> Option<Ordering> {
        Some(self.as_bytes().cmp(other.as_bytes()))
    }
}

impl<const N: usize> Ord for Literal<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl<const N: usize> PartialOrd<str> for Literal<N> {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some(self.as_bytes().cmp(other.as_bytes()))
    }
}

impl<const N: usize> PartialOrd<&str> for Literal<N> {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        Some(self.as_bytes().cmp(other.as_bytes()))
    }
}

impl<const N: usize> PartialOrd<Literal<N>> for &str {
    fn partial_cmp(&self, other: &Literal<N>) -> Option<Ordering> {
        Some(self.as_bytes().cmp(other.as_bytes()))
    }
}

impl<const N: usize> Hash for Literal<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl<const N: usize> fmt::Display for Literal<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl<const N: usize> fmt::Debug for Literal<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Literal")
            .field(&String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jig::length;
    use crate::literal;
    use proptest::prelude::*;

    #[test]
    fn construction_keeps_text_without_terminator() {
        const DIRECTORY: Literal<9> = literal!("directory");

        assert_eq!(DIRECTORY.size(), 9);
        assert_eq!(DIRECTORY.get(), b"directory");
        assert_eq!(DIRECTORY.get()[0], b'd');
        assert_eq!(DIRECTORY.to_string(), "directory");
    }

    #[test]
    fn spare_capacity_is_not_content() {
        let dir = Literal::<16>::new("dir");
        assert_eq!(dir.len(), 3);
        assert_eq!(dir.capacity(), 16);
        assert_eq!(dir, literal!("dir"));
        assert_eq!(dir, "dir");
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn new_rejects_oversized_text() {
        let _ = Literal::<3>::new("help");
    }

    #[test]
    fn equality_against_literals_and_raw_text() {
        let directory = literal!("directory");

        assert_eq!(directory, literal!("directory"));
        assert_eq!(directory, "directory");
        assert_eq!("directory", directory);
        assert_eq!(directory, *b"directory");
        assert_eq!(directory, b"directory"[..]);

        assert_ne!(directory, literal!("directorz"));
        assert_ne!(directory, literal!("director"));
        assert_ne!(directory, "help");
    }

    #[test]
    fn ordering_is_lexicographic_then_by_length() {
        assert!(literal!("directory") < literal!("eirectory"));
        assert!(!(literal!("directory") < literal!("directory")));
        assert!(literal!("dir") < literal!("directory"));
        assert!(literal!("ea") > literal!("directory"));
        assert!(literal!("help") < "version");
        assert!("help" < literal!("version"));
    }

    #[test]
    fn at_reports_range_errors() {
        let help = literal!("help");
        assert_eq!(help.at(0), Ok(b'h'));
        assert_eq!(help.at(3), Ok(b'p'));
        assert_eq!(
            help.at(4),
            Err(LiteralError::OutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_past_length_panics() {
        let dir = Literal::<8>::new("dir");
        let _ = dir[3];
    }

    #[test]
    fn iteration_walks_content_only() {
        let dir = Literal::<8>::new("dir");
        let collected: Vec<u8> = dir.iter().copied().collect();
        assert_eq!(collected, b"dir");
        assert_eq!((&dir).into_iter().count(), 3);
    }

    #[test]
    fn append_grows_until_capacity() {
        let mut path = Literal::<12>::empty();
        path.push_str("lfl").unwrap();
        path.push(b'/').unwrap();
        path.append(b"help").unwrap();
        assert_eq!(path, "lfl/help");

        let err = path.push_str("version").unwrap_err();
        assert_eq!(
            err,
            LiteralError::Capacity {
                needed: 15,
                capacity: 12
            }
        );
        assert_eq!(path, "lfl/help");
    }

    #[test]
    fn add_assign_appends() {
        let mut words = Literal::<32>::new("directory");
        words += &literal!("cucumber");
        words += "!";
        assert_eq!(words, "directorycucumber!");
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn add_assign_past_capacity_panics() {
        let mut help = literal!("help");
        help += "!";
    }

    #[test]
    fn appending_empty_changes_nothing() {
        let mut help = Literal::<8>::new("help");
        help += &literal!("");
        help.append(b"").unwrap();
        assert_eq!(help.len(), 4);
        assert_eq!(help, "help");
    }

    #[test]
    fn concat_sums_lengths() {
        let joined: Literal<17> = literal!("directory").concat(&literal!("cucumber")).unwrap();
        assert_eq!(joined.len(), 17);
        assert_eq!(joined, literal!("directorycucumber"));

        let too_small: Result<Literal<16>, _> = literal!("directory").concat(&literal!("cucumber"));
        assert_eq!(
            too_small.unwrap_err(),
            LiteralError::Capacity {
                needed: 17,
                capacity: 16
            }
        );
    }

    #[test]
    fn from_raw_round_trips_with_length() {
        let raw: &[u8] = b"directory\0";
        let literal = Literal::<9>::from_raw(raw, length(raw)).unwrap();
        assert_eq!(literal, literal!("directory"));
    }

    #[test]
    fn from_raw_checks_bounds() {
        assert_eq!(
            Literal::<16>::from_raw(b"help", 5).unwrap_err(),
            LiteralError::OutOfRange { index: 5, len: 4 }
        );
        assert_eq!(
            Literal::<2>::from_raw(b"help", 4).unwrap_err(),
            LiteralError::Capacity {
                needed: 4,
                capacity: 2
            }
        );
    }

    #[test]
    fn is_same_compares_literal_length_only() {
        let help = literal!("help");
        assert!(help.is_same(b"help"));
        assert!(help.is_same(b"helpful"));
        assert!(!help.is_same(b"hel"));
        assert!(!help.is_same(b"hlep"));
        assert!(!help.is_same(b""));
    }

    #[test]
    fn is_same_never_matches_embedded_nul() {
        let raw = Literal::<4>::from_raw(b"he\0p", 4).unwrap();
        assert_eq!(raw, *b"he\0p");
        assert!(!raw.is_same(b"he\0p"));
    }

    #[test]
    fn debug_shows_text() {
        assert_eq!(format!("{:?}", literal!("help")), "Literal(\"help\")");
    }

    proptest! {
        #[test]
        fn ordering_matches_string_ordering(a in "[a-z]{0,16}", b in "[a-z]{0,16}") {
            let lhs = Literal::<16>::new(&a);
            let rhs = Literal::<16>::new(&b);
            prop_assert_eq!(lhs.cmp(&rhs), a.cmp(&b));
            prop_assert_eq!(lhs == rhs, a == b);
        }

        #[test]
        fn concat_is_associative(a in "[a-z]{0,8}", b in "[a-z]{0,8}", c in "[a-z]{0,8}") {
            let (a, b, c) = (Literal::<8>::new(&a), Literal::<8>::new(&b), Literal::<8>::new(&c));

            let ab: Literal<16> = a.concat(&b).unwrap();
            let left: Literal<24> = ab.concat(&c).unwrap();
            let bc: Literal<16> = b.concat(&c).unwrap();
            let right: Literal<24> = a.concat(&bc).unwrap();

            prop_assert_eq!(left, right);
            prop_assert_eq!(left.len(), a.len() + b.len() + c.len());
        }

        #[test]
        fn raw_construction_matches_text(text in "[ -~]{0,24}") {
            let mut raw = text.clone().into_bytes();
            raw.push(0);
            let from_raw = Literal::<24>::from_raw(&raw, length(&raw)).unwrap();
            prop_assert_eq!(from_raw, Literal::<24>::new(&text));
            prop_assert!(from_raw.is_same(text.as_bytes()));
        }
    }
}
