//! Levenshtein edit distance over logical characters.
//!
//! Two interchangeable backends sit behind one trait: the `strsim`
//! crate's implementation and a local dynamic-programming one. The
//! strsim backend is the default; the local backend stays available
//! as a fallback and as a cross-check in tests.

/// Minimum number of single-character insertions, deletions, and
/// substitutions turning `a` into `b`. Implementations operate on
/// `char`s, never bytes.
pub trait DistanceBackend {
    fn distance(&self, a: &str, b: &str) -> usize;

    fn name(&self) -> &'static str;
}

/// Backend delegating to `strsim::levenshtein`.
#[derive(Debug, Default)]
pub struct StrsimBackend;

impl DistanceBackend for StrsimBackend {
    fn distance(&self, a: &str, b: &str) -> usize {
        strsim::levenshtein(a, b)
    }

    fn name(&self) -> &'static str {
        "strsim"
    }
}

/// Local dynamic-programming backend over the (n+1) x (m+1) grid,
/// rolled down to two rows.
#[derive(Debug, Default)]
pub struct DpBackend;

impl DistanceBackend for DpBackend {
    fn distance(&self, a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        if a.is_empty() {
            return b.len();
        }
        if b.is_empty() {
            return a.len();
        }

        let mut prev: Vec<usize> = (0..=b.len()).collect();
        let mut curr = vec![0usize; b.len() + 1];

        for (i, ca) in a.iter().enumerate() {
            curr[0] = i + 1;
            for (j, cb) in b.iter().enumerate() {
                let substitution = prev[j] + usize::from(ca != cb);
                let deletion = prev[j + 1] + 1;
                let insertion = curr[j] + 1;
                curr[j + 1] = substitution.min(deletion).min(insertion);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[b.len()]
    }

    fn name(&self) -> &'static str {
        "dp"
    }
}

/// Backend selected at startup when the caller expresses no
/// preference.
pub fn default_backend() -> Box<dyn DistanceBackend> {
    Box::new(StrsimBackend)
}
