//! Natural-order string comparison
//!
//! Embedded runs of decimal digits are compared by numeric value instead of
//! character by character, so `alpha.2` sorts before `alpha.10`.

use std::cmp::Ordering;

/// Compares two strings in natural order.
///
/// Scans both strings left to right. When both current characters are ASCII
/// digits, the maximal digit runs on each side are consumed and compared as
/// unsigned integers. Otherwise characters are compared by code point. When
/// one string runs out first, it sorts first. Strings that differ only in
/// leading zeros are ordered by the first digit run whose width differs, the
/// narrower run first, so `Equal` means the strings are identical.
///
/// # Example
/// ```
/// use minver_runner::domain::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("alpha.2", "alpha.10"), Ordering::Less);
/// assert_eq!(natural_cmp("beta", "alpha"), Ordering::Greater);
/// assert_eq!(natural_cmp("7", "007"), Ordering::Less);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut leading_zeros = Ordering::Equal;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let start_a = i;
            while i < a.len() && a[i].is_ascii_digit() {
                i += 1;
            }
            let start_b = j;
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }

            let ordering = compare_digit_runs(&a[start_a..i], &b[start_b..j]);
            if ordering != Ordering::Equal {
                return ordering;
            }
            if leading_zeros == Ordering::Equal {
                leading_zeros = (i - start_a).cmp(&(j - start_b));
            }
            continue;
        }

        if a[i] != b[j] {
            return a[i].cmp(&b[j]);
        }

        i += 1;
        j += 1;
    }

    (a.len() - i)
        .cmp(&(b.len() - j))
        .then(leading_zeros)
}

/// Natural comparison of optional strings; an absent value sorts first.
pub fn natural_cmp_opt(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => natural_cmp(a, b),
    }
}

// Runs can exceed any fixed-width integer, so compare magnitudes textually.
fn compare_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(run: &[char]) -> &[char] {
    let first_significant = run.iter().position(|c| *c != '0').unwrap_or(run.len());
    &run[first_significant..]
}
