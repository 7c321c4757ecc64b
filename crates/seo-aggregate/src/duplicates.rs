//! Exact-match grouping of content-pages by a shared string field.

use seo_types::{DuplicateGroup, PageRecord, PageRef};
use std::collections::HashMap;

/// Groups `pages` by the value `key` extracts, keeping only groups with more
/// than one member. Pages with no value (`key` returns `None`) never group.
pub fn group_by<F>(pages: &[&PageRecord], key: F) -> Vec<DuplicateGroup>
where
    F: Fn(&PageRecord) -> Option<String>,
{
    let mut groups: HashMap<String, Vec<PageRef>> = HashMap::new();
    for page in pages {
        if let Some(value) = key(page) {
            groups.entry(value).or_default().push(PageRef {
                url: page.url.clone(),
            });
        }
    }

    let mut result: Vec<DuplicateGroup> = groups
        .into_iter()
        .filter(|(_, pages)| pages.len() > 1)
        .map(|(value, pages)| DuplicateGroup {
            count: pages.len(),
            value,
            pages,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    result
}
