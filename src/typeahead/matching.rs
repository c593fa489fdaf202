//! Candidate filtering and ordering.
//!
//! Both seams take the query explicitly, so a custom matcher or sorter can be
//! exercised without building a whole widget.

/// Decides whether a candidate belongs in the suggestion list.
pub trait Matcher<T> {
    fn matches(&self, item: &T, query: &str) -> bool;
}

impl<T, F> Matcher<T> for F
where
    F: Fn(&T, &str) -> bool,
{
    fn matches(&self, item: &T, query: &str) -> bool {
        self(item, query)
    }
}

/// Orders the matched candidates. Consumes its input.
pub trait Sorter<T> {
    fn sort(&self, items: Vec<T>, query: &str) -> Vec<T>;
}

impl<T, F> Sorter<T> for F
where
    F: Fn(Vec<T>, &str) -> Vec<T>,
{
    fn sort(&self, items: Vec<T>, query: &str) -> Vec<T> {
        self(items, query)
    }
}

/// Case-insensitive substring match.
pub fn default_matcher<T: AsRef<str>>(item: &T, query: &str) -> bool {
    item.as_ref()
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Stable three-bucket partition: case-insensitive prefix matches, then
/// case-sensitive substring matches, then everything else.
pub fn default_sorter<T: AsRef<str>>(items: Vec<T>, query: &str) -> Vec<T> {
    let lowered_query = query.to_lowercase();
    let mut begins_with = Vec::new();
    let mut case_sensitive = Vec::new();
    let mut case_insensitive = Vec::new();

    for item in items {
        let text = item.as_ref();
        if text.to_lowercase().starts_with(&lowered_query) {
            begins_with.push(item);
        } else if text.contains(query) {
            case_sensitive.push(item);
        } else {
            case_insensitive.push(item);
        }
    }

    begins_with.extend(case_sensitive);
    begins_with.extend(case_insensitive);
    begins_with
}
