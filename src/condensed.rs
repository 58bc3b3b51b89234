use crate::LinkageError;
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use num_traits::Float;
use std::io::{Read, Write};
use std::ops::{Index, IndexMut};

const F64_BYTES: usize = 8;

/// The upper triangle (excluding the diagonal) of a symmetric pairwise dissimilarity matrix,
/// stored row after row in a single flat vector.
///
/// For `N` observations the matrix holds `N * (N - 1) / 2` values. The dissimilarity between
/// observations `i` and `j`, with `i < j`, lives at `condensed_index(N, i, j)`.
///
/// # Examples
/// ```
///use geolinkage::CondensedMatrix;
///
///// d(0,1) = 1.0, d(0,2) = 3.0, d(1,2) = 2.0
///let matrix = CondensedMatrix::from_vec(vec![1.0, 3.0, 2.0]).unwrap();
///assert_eq!(3, matrix.observations());
///assert_eq!(2.0, matrix[[1, 2]]);
///assert_eq!(3.0, matrix.get(2, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedMatrix<T> {
    data: Vec<T>,
    observations: usize,
}

/// Converts a row and column of the full `size` by `size` matrix into an index of the condensed
/// matrix. The row must be strictly less than the column.
pub fn condensed_index(size: usize, row: usize, column: usize) -> usize {
    debug_assert!(row < column, "row {row} must be less than column {column}");
    debug_assert!(column < size, "column {column} out of bounds for {size} observations");
    row_start(size, row) + (column - row - 1)
}

/// The inverse of `condensed_index`: the `(row, column)` pair, with `row < column`, stored at
/// `idx` of a condensed matrix over `size` observations.
pub fn condensed_pair(size: usize, idx: usize) -> (usize, usize) {
    debug_assert!(size >= 2 && idx < size * (size - 1) / 2);
    let b = 2.0 * size as f64 - 1.0;
    let discriminant = (b * b - 8.0 * idx as f64).max(0.0);
    let mut row = ((b - discriminant.sqrt()) / 2.0).floor() as usize;
    // The float estimate can be one off for large matrices
    while row > 0 && row_start(size, row) > idx {
        row -= 1;
    }
    while row + 2 < size && row_start(size, row + 1) <= idx {
        row += 1;
    }
    let column = idx - row_start(size, row) + row + 1;
    (row, column)
}

/// Recovers the number of observations from the length of a condensed matrix. An empty matrix
/// is reported as a single observation. Returns `None` when no whole number of observations
/// yields this length.
pub fn observations_for_len(len: usize) -> Option<usize> {
    let estimate = ((1.0 + (1.0 + 8.0 * len as f64).sqrt()) / 2.0).round() as usize;
    (estimate.saturating_sub(1)..=estimate + 1)
        .find(|&n| n >= 1 && n.checked_mul(n - 1).map(|product| product / 2) == Some(len))
}

fn row_start(size: usize, row: usize) -> usize {
    size * row - row * (row + 1) / 2
}

impl<T: Float> CondensedMatrix<T> {
    /// Wraps a flat vector of dissimilarities. The number of observations is recovered from the
    /// vector's length.
    ///
    /// # Returns
    /// * The matrix, or `MalformedMatrix` if the length isn't `N * (N - 1) / 2` for any `N`, or
    ///   `InsufficientData` if it describes fewer than two observations.
    pub fn from_vec(data: Vec<T>) -> Result<Self, LinkageError> {
        let observations = observations_for_len(data.len()).ok_or_else(|| {
            LinkageError::MalformedMatrix(format!(
                "length {} is not N * (N - 1) / 2 for any number of observations N",
                data.len()
            ))
        })?;
        if observations < 2 {
            return Err(LinkageError::InsufficientData(observations));
        }
        Ok(CondensedMatrix { data, observations })
    }

    pub(crate) fn from_parts(data: Vec<T>, observations: usize) -> Self {
        debug_assert_eq!(data.len(), observations * (observations - 1) / 2);
        CondensedMatrix { data, observations }
    }

    /// Returns the number of observations the matrix describes.
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Returns the number of stored dissimilarities.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns the dissimilarity between observations `a` and `b` in either order. The
    /// dissimilarity of an observation with itself is zero.
    pub fn get(&self, a: usize, b: usize) -> T {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => self.data[condensed_index(self.observations, a, b)],
            std::cmp::Ordering::Greater => self.data[condensed_index(self.observations, b, a)],
            std::cmp::Ordering::Equal => T::zero(),
        }
    }

    pub(crate) fn set(&mut self, a: usize, b: usize, value: T) {
        let idx = if a < b {
            condensed_index(self.observations, a, b)
        } else {
            condensed_index(self.observations, b, a)
        };
        self.data[idx] = value;
    }

    pub(crate) fn map_in_place<F: Fn(T) -> T>(&mut self, f: F) {
        self.data.iter_mut().for_each(|value| *value = f(*value));
    }
}

impl CondensedMatrix<f64> {
    /// Serialises the matrix as little-endian 64 bit floats in condensed index order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0; self.data.len() * F64_BYTES];
        LittleEndian::write_f64_into(&self.data, &mut bytes);
        bytes
    }

    /// Loads a matrix previously written by `to_bytes`. Values are taken verbatim; neither
    /// symmetry nor finiteness is checked.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LinkageError> {
        if bytes.len() % F64_BYTES != 0 {
            return Err(LinkageError::MalformedMatrix(format!(
                "byte length must be a multiple of {F64_BYTES}, found {}",
                bytes.len()
            )));
        }
        let mut values = vec![0.0; bytes.len() / F64_BYTES];
        LittleEndian::read_f64_into(bytes, &mut values);
        Self::from_vec(values)
    }

    /// Streams the `to_bytes` layout into a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), LinkageError> {
        for value in &self.data {
            writer.write_f64::<LittleEndian>(*value)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Reads the `to_bytes` layout from a reader until it is exhausted.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self, LinkageError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }
}

impl<T> Index<[usize; 2]> for CondensedMatrix<T> {
    type Output = T;

    fn index(&self, idx: [usize; 2]) -> &T {
        &self.data[condensed_index(self.observations, idx[0], idx[1])]
    }
}

impl<T> IndexMut<[usize; 2]> for CondensedMatrix<T> {
    fn index_mut(&mut self, idx: [usize; 2]) -> &mut T {
        let i = condensed_index(self.observations, idx[0], idx[1]);
        &mut self.data[i]
    }
}
