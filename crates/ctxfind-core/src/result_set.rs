use std::collections::BTreeSet;

/// Distinct line numbers produced by one search over one file, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    lines: BTreeSet<usize>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, line: usize) -> bool {
        self.lines.insert(line)
    }

    pub fn contains(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Largest line in the set; drives the width of rendered line numbers.
    pub fn max_line(&self) -> Option<usize> {
        self.lines.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl Extend<usize> for ResultSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

impl FromIterator<usize> for ResultSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = usize;
    type IntoIter = std::collections::btree_set::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}
