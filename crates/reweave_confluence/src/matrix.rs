//! The ternary invalidation outcome and the NxN invalidation matrix.

use std::fmt;

/// The three-valued outcome of asking "does applying P invalidate Q's match?".
///
/// Never collapsed to a boolean: the two analysis modes interpret the
/// undecided case oppositely.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Invalidation {
    /// P provably never invalidates Q's preconditions.
    Safe,
    /// Static analysis cannot decide; interpreted per analysis mode.
    #[default]
    Undecided,
    /// P provably invalidates Q.
    Unsafe,
}

impl Invalidation {
    /// The conventional integer encoding: -1 safe, 0 undecided, 1 unsafe.
    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Safe => -1,
            Self::Undecided => 0,
            Self::Unsafe => 1,
        }
    }

    /// Decodes the conventional integer encoding; any positive value is
    /// unsafe, any negative value safe.
    #[must_use]
    pub fn from_i8(value: i8) -> Self {
        match value {
            v if v < 0 => Self::Safe,
            0 => Self::Undecided,
            _ => Self::Unsafe,
        }
    }
}

impl fmt::Display for Invalidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "-"),
            Self::Undecided => write!(f, "0"),
            Self::Unsafe => write!(f, "X"),
        }
    }
}

/// A square ternary matrix: cell (p, q) answers "does applying option p
/// invalidate option q's preconditions?".
///
/// Not symmetric in general. The diagonal is fixed to [`Invalidation::Safe`]
/// by convention: an option never invalidates itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidationMatrix {
    n: usize,
    cells: Vec<Invalidation>,
}

impl InvalidationMatrix {
    /// Creates an NxN matrix with the diagonal pre-filled `Safe` and every
    /// off-diagonal cell `Undecided`.
    #[must_use]
    pub fn diagonal(n: usize) -> Self {
        let mut matrix = Self {
            n,
            cells: vec![Invalidation::Undecided; n * n],
        };
        for i in 0..n {
            matrix.set(i, i, Invalidation::Safe);
        }
        matrix
    }

    /// The matrix dimension.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns true if the matrix is zero-sized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Gets cell (p, q).
    ///
    /// # Panics
    /// Panics if an index is out of range.
    #[must_use]
    pub fn get(&self, p: usize, q: usize) -> Invalidation {
        assert!(p < self.n && q < self.n, "matrix index out of range");
        self.cells[p * self.n + q]
    }

    /// Sets cell (p, q).
    ///
    /// # Panics
    /// Panics if an index is out of range.
    pub fn set(&mut self, p: usize, q: usize, value: Invalidation) {
        assert!(p < self.n && q < self.n, "matrix index out of range");
        self.cells[p * self.n + q] = value;
    }
}

impl fmt::Display for InvalidationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in 0..self.n {
            for q in 0..self.n {
                if q > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.get(p, q))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
