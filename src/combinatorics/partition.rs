//! Integer partitions of leaf counts and grouping of runs.
//!
//! The children of a vertex with `n` leaves split those leaves according to
//! an integer partition of `n`. Written as an ascending composition, the
//! partition also fixes the order of the children by size.

// =#========================================================================#=
// PARTITIONS
// =#========================================================================#=
/// Returns the ascending integer partitions of `n` with at least two parts.
///
/// The single-part partition `[n]` is excluded, since a vertex can't have
/// a single child. The order of the partitions is the order used for shape
/// ranks: `[1, 1, ..., 1]` comes first, each following partition is the
/// lexicographic successor of its predecessor.
///
/// Each call returns a fresh iterator.
///
/// # Example
/// ```
/// use treerank::combinatorics::partitions;
///
/// let parts: Vec<Vec<usize>> = partitions(4).collect();
/// assert_eq!(parts, vec![vec![1, 1, 1, 1], vec![1, 1, 2], vec![1, 3], vec![2, 2]]);
/// ```
pub fn partitions(n: usize) -> Partitions {
    Partitions::new(n)
}

/// Iterator over ascending compositions, see [partitions].
///
/// Generates the successor in place (rule "asc"): find the rightmost
/// position that can be incremented and redistribute the remainder.
#[derive(Debug, Clone)]
pub struct Partitions {
    parts: Vec<usize>,
    k: usize,
}

impl Partitions {
    fn new(n: usize) -> Self {
        let mut parts = vec![0; n + 1];
        let k = if n > 0 {
            parts[1] = n;
            1
        } else {
            0
        };
        Partitions { parts, k }
    }
}

impl Iterator for Partitions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.k == 0 {
            return None;
        }

        let a = &mut self.parts;
        let mut k = self.k;
        let x = a[k - 1] + 1;
        let mut y = a[k] - 1;
        k -= 1;
        while x <= y {
            a[k] = x;
            y -= x;
            k += 1;
        }
        a[k] = x + y;
        self.k = k;

        // [n] is always last
        if k == 0 {
            return None;
        }
        Some(a[..=k].to_vec())
    }
}

// =#========================================================================#=
// GROUPING
// =#========================================================================#=
/// Splits `values` into maximal runs of consecutive elements that are
/// equal to the first element of their run under `equal`.
///
/// # Example
/// ```
/// use treerank::combinatorics::group_by;
///
/// let groups = group_by(&[1, 1, 2, 3, 3], |a, b| a == b);
/// assert_eq!(groups, vec![&[1, 1][..], &[2][..], &[3, 3][..]]);
/// ```
pub fn group_by<T, F>(values: &[T], mut equal: F) -> Vec<&[T]>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..values.len() {
        if !equal(&values[i], &values[start]) {
            groups.push(&values[start..i]);
            start = i;
        }
    }
    if start < values.len() {
        groups.push(&values[start..]);
    }
    groups
}

/// Groups a partition into runs of equal parts, e.g. `[1, 2, 2]` into
/// `[[1], [2, 2]]`.
pub fn group_partition(part: &[usize]) -> Vec<&[usize]> {
    group_by(part, |a, b| a == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partitions_exclude_single_part() {
        assert_eq!(partitions(0).count(), 0);
        assert_eq!(partitions(1).count(), 0);
        assert_eq!(partitions(2).collect::<Vec<_>>(), vec![vec![1, 1]]);
        assert!(partitions(9).all(|p| p.len() >= 2));
    }

    #[test]
    fn test_group_by_empty() {
        let empty: [usize; 0] = [];
        assert!(group_by(&empty, |a, b| a == b).is_empty());
    }
}
