use super::Literal;

/// An ordered, fixed set of option names.
///
/// Entries keep declaration order and are never changed after construction.
/// Lookups scan from the first entry, so with duplicate names the earliest
/// one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionTable<const CAP: usize, const K: usize> {
    entries: [Literal<CAP>; K],
}

impl<const CAP: usize, const K: usize> OptionTable<CAP, K> {
    pub const fn new(names: [&str; K]) -> Self {
        let mut entries = [Literal::<CAP>::empty(); K];
        let mut index = 0;
        while index < K {
            entries[index] = Literal::new(names[index]);
            index += 1;
        }
        Self { entries }
    }

    pub const fn from_literals(entries: [Literal<CAP>; K]) -> Self {
        Self { entries }
    }

    pub const fn len(&self) -> usize {
        K
    }

    pub const fn is_empty(&self) -> bool {
        K == 0
    }

    /// Text of the first entry that `candidate` starts with, compared over the
    /// entry's length, or `None`.
    ///
    /// An empty entry matches any candidate, the empty slice included.
    pub const fn is_match(&self, candidate: &[u8]) -> Option<&[u8]> {
        let (found, index) = self.match_index(candidate);
        if found {
            Some(self.entries[index].as_bytes())
        } else {
            None
        }
    }

    /// Index of the first entry matching `candidate` as in
    /// [`OptionTable::is_match`].
    ///
    /// A miss is `(false, K)`.
    pub const fn match_index(&self, candidate: &[u8]) -> (bool, usize) {
        let mut index = 0;
        while index < K {
            if self.entries[index].is_same(candidate) {
                return (true, index);
            }
            index += 1;
        }
        (false, K)
    }

    pub const fn position(&self, candidate: &[u8]) -> Option<usize> {
        match self.match_index(candidate) {
            (true, index) => Some(index),
            (false, _) => None,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Literal<CAP>> {
        self.entries.get(index)
    }

    /// Entry `I`, with `I` checked against the table size at build time.
    pub const fn literal<const I: usize>(&self) -> &Literal<CAP> {
        const { assert!(I < K, "option index out of range") };
        &self.entries[I]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Literal<CAP>> {
        self.entries.iter()
    }
}

impl<'a, const CAP: usize, const K: usize> IntoIterator for &'a OptionTable<CAP, K> {
    type Item = &'a Literal<CAP>;
    type IntoIter = std::slice::Iter<'a, Literal<CAP>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
