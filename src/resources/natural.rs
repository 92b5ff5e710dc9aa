//! Natural ("human") string ordering used by the resource item types.
//!
//! Strings are split into runs of ASCII digits and runs of everything else.
//! Digit runs compare by numeric value, other runs compare case-insensitively,
//! and any remaining tie is broken by plain byte order so that only equal
//! strings compare equal.

use std::cmp::Ordering;

/// Compare two strings in natural order: `"a2" < "a10"`, `"B" > "a"`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut x = Runs { rest: a };
    let mut y = Runs { rest: b };
    loop {
        match (x.next(), y.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ra), Some(rb)) => match cmp_run(ra, rb) {
                Ordering::Equal => {}
                other => return other,
            },
        }
    }
}

/// [`natural_cmp`] with `None` ordered first.
pub fn natural_cmp_opt(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => natural_cmp(a, b),
    }
}

fn cmp_run(a: &str, b: &str) -> Ordering {
    match (is_digits(a), is_digits(b)) {
        (true, true) => {
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    }
}

#[inline]
fn is_digits(run: &str) -> bool {
    run.bytes().next().is_some_and(|c| c.is_ascii_digit())
}

/// Iterator over maximal digit / non-digit runs.
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Runs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(natural_cmp("page2.css", "page10.css"), Ordering::Less);
        assert_eq!(natural_cmp("v10", "v9"), Ordering::Greater);
        assert_eq!(natural_cmp("v007", "v7"), Ordering::Less);
    }

    #[test]
    fn text_ignores_case_until_the_tie_break() {
        assert_eq!(natural_cmp("a.css", "B.css"), Ordering::Less);
        assert_eq!(natural_cmp("A", "a"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn prefixes_and_none_sort_first() {
        assert_eq!(natural_cmp("/a", "/a/b"), Ordering::Less);
        assert_eq!(natural_cmp("", "x"), Ordering::Less);
        assert_eq!(natural_cmp_opt(None, Some("print")), Ordering::Less);
        assert_eq!(natural_cmp_opt(Some("print"), Some("screen")), Ordering::Less);
    }
}
