//! Page slicing over an already-fetched, ordered list.

/// 1-based page of `per_page` items. Pages below 1 or past the end are empty.
pub fn paginate<T>(items: &[T], page: i64, per_page: usize) -> &[T] {
    if page < 1 || per_page == 0 {
        return &[];
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(per_page))
        .unwrap_or(usize::MAX);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// `page` query value; anything that is not an integer means the first page.
pub fn page_param(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse().ok()).unwrap_or(1)
}
