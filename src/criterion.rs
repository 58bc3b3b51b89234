use crate::LinkageError;
use num_traits::Float;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The rule used to derive the dissimilarity between a newly merged cluster and every other
/// cluster from the dissimilarities of the two clusters that merged.
///
/// Every criterion is an instance of the Lance-Williams recurrence
///
/// ```text
/// d(ij, k) = alpha_i * d(i, k) + alpha_j * d(j, k) + beta * d(i, j) + gamma * |d(i, k) - d(j, k)|
/// ```
///
/// with the coefficients returned by `LinkageCriterion::coefficients`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LinkageCriterion {
    /// The minimum dissimilarity between any pair of members.
    Single,
    /// The maximum dissimilarity between any pair of members.
    Complete,
    /// The mean dissimilarity over all pairs of members (UPGMA).
    Average,
    /// The mean of the two parent clusters' dissimilarities, ignoring their sizes (WPGMA).
    Weighted,
    /// The increase in within-cluster variance caused by the merge. Computed on squared
    /// dissimilarities.
    Ward,
}

/// The coefficients of one Lance-Williams update.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LanceWilliams<T> {
    pub alpha_i: T,
    pub alpha_j: T,
    pub beta: T,
    pub gamma: T,
}

impl<T: Float> LanceWilliams<T> {
    /// Applies the recurrence to the dissimilarities of the merging clusters `i` and `j` to a
    /// third cluster `k`.
    pub fn apply(&self, d_ik: T, d_jk: T, d_ij: T) -> T {
        self.alpha_i * d_ik + self.alpha_j * d_jk + self.beta * d_ij + self.gamma * (d_ik - d_jk).abs()
    }

    /// Ward's coefficients, the only ones that depend on the size of the third cluster.
    pub(crate) fn ward(size_i: usize, size_j: usize, size_k: usize) -> Self {
        let (n_i, n_j, n_k) = (as_float::<T>(size_i), as_float::<T>(size_j), as_float::<T>(size_k));
        let total = n_i + n_j + n_k;
        LanceWilliams {
            alpha_i: (n_i + n_k) / total,
            alpha_j: (n_j + n_k) / total,
            beta: -n_k / total,
            gamma: T::zero(),
        }
    }
}

impl LinkageCriterion {
    pub const ALL: [LinkageCriterion; 5] = [
        LinkageCriterion::Single,
        LinkageCriterion::Complete,
        LinkageCriterion::Average,
        LinkageCriterion::Weighted,
        LinkageCriterion::Ward,
    ];

    /// Returns the Lance-Williams coefficients for merging clusters of sizes `size_i` and
    /// `size_j`, seen from a third cluster of size `size_k`.
    ///
    /// # Examples
    /// ```
    ///use geolinkage::LinkageCriterion;
    ///
    ///let lw = LinkageCriterion::Average.coefficients::<f64>(1, 3, 2);
    ///assert_eq!(0.25, lw.alpha_i);
    ///assert_eq!(0.75, lw.alpha_j);
    ///assert_eq!(2.5, lw.apply(1.0, 3.0, 0.5));
    /// ```
    pub fn coefficients<T: Float>(&self, size_i: usize, size_j: usize, size_k: usize) -> LanceWilliams<T> {
        let half = T::from(0.5).unwrap_or_else(T::zero);
        let (n_i, n_j) = (as_float::<T>(size_i), as_float::<T>(size_j));
        match self {
            Self::Single => LanceWilliams { alpha_i: half, alpha_j: half, beta: T::zero(), gamma: -half },
            Self::Complete => LanceWilliams { alpha_i: half, alpha_j: half, beta: T::zero(), gamma: half },
            Self::Average => LanceWilliams {
                alpha_i: n_i / (n_i + n_j),
                alpha_j: n_j / (n_i + n_j),
                beta: T::zero(),
                gamma: T::zero(),
            },
            Self::Weighted => LanceWilliams { alpha_i: half, alpha_j: half, beta: T::zero(), gamma: T::zero() },
            Self::Ward => LanceWilliams::ward(size_i, size_j, size_k),
        }
    }

    /// Whether the criterion's recurrence holds on squared dissimilarities rather than the
    /// dissimilarities themselves.
    pub fn on_squares(&self) -> bool {
        matches!(self, Self::Ward)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Complete => "complete",
            Self::Average => "average",
            Self::Weighted => "weighted",
            Self::Ward => "ward",
        }
    }
}

pub(crate) fn as_float<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::max_value)
}

impl Display for LinkageCriterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LinkageCriterion {
    type Err = LinkageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "complete" => Ok(Self::Complete),
            "average" => Ok(Self::Average),
            "weighted" => Ok(Self::Weighted),
            "ward" => Ok(Self::Ward),
            // Both need cluster centroids, which pairwise dissimilarities alone can't provide
            "centroid" | "median" => Err(LinkageError::UnsupportedCriterion(format!(
                "'{s}' linkage requires centroid tracking and is not available"
            ))),
            _ => Err(LinkageError::UnsupportedCriterion(format!("unrecognised method name '{s}'"))),
        }
    }
}
