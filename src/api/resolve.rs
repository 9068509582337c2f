//! Name to ID lookup over paginated list endpoints

use super::error::ApiError;
use log::debug;
use std::future::Future;
use uuid::Uuid;

/// Page size requested from every list endpoint
pub const PAGE_SIZE: u32 = 100;

/// One page of a list endpoint
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// `None` when the server sent no entity array
    pub items: Option<Vec<T>>,
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Cursor for the following page; empty and absent both end the listing
    pub fn next_cursor(&self) -> Option<String> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }
}

/// Walk `list` page by page until an entity named exactly `name` turns up.
///
/// Pages are requested strictly in order and no page is fetched after a
/// match. Within a page the earliest match wins.
pub async fn find_id_by_name<T, F, Fut, N, I>(
    kind: &str,
    name: &str,
    mut list: F,
    name_of: N,
    id_of: I,
) -> Result<Uuid, ApiError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
    N: Fn(&T) -> &str,
    I: Fn(&T) -> Uuid,
{
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let page = list(cursor.take()).await?;
        pages += 1;

        let items = page
            .items
            .as_ref()
            .ok_or_else(|| ApiError::empty(format!("unable to list {}s", kind)))?;

        if let Some(found) = items.iter().find(|&item| name_of(item) == name) {
            let id = id_of(found);
            debug!("Resolved {} '{}' to {} after {} page(s)", kind, name, id, pages);
            return Ok(id);
        }

        match page.next_cursor() {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!("No {} named '{}' in {} page(s)", kind, name, pages);
    Err(ApiError::NotFound {
        kind: kind.to_string(),
        name: name.to_string(),
    })
}

/// Collect every entity from a list endpoint
pub async fn collect_all<T, F, Fut>(kind: &str, mut list: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    let mut all = Vec::new();
    let mut cursor = None;

    loop {
        let page = list(cursor.take()).await?;
        let next = page.next_cursor();
        let items = page
            .items
            .ok_or_else(|| ApiError::empty(format!("unable to list {}s", kind)))?;
        all.extend(items);

        match next {
            Some(token) => cursor = Some(token),
            None => return Ok(all),
        }
    }
}

/// Use `value` directly when it is a UUID, otherwise resolve it as a name
pub fn parse_id(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value).ok()
}
