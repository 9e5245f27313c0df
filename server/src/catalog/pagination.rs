use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Select};
use serde::Deserialize;

pub const PAGE_SIZE: u64 = 5;

/// The `?page=` query parameter. Kept as a raw string so that garbage
/// falls back to the first page instead of rejecting the request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// 1-based page number; absent, non-numeric and non-positive values map to 1.
    pub fn number(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<M> {
    pub items: Vec<M>,
    pub current_page_number: u64,
}

/// Row offset of a 1-based page, if the database can address it.
fn offset(number: u64) -> Option<u64> {
    (number - 1)
        .checked_mul(PAGE_SIZE)
        .filter(|offset| *offset <= i64::MAX as u64)
}

pub async fn paginate<C, E>(db: &C, select: Select<E>, number: u64) -> Result<Page<E::Model>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: Sync,
{
    let number = number.max(1);
    if offset(number).is_none() {
        tracing::trace!(page = number, "Page is past any storable offset");
        return Ok(Page {
            items: Vec::new(),
            current_page_number: number,
        });
    }
    let items = select.paginate(db, PAGE_SIZE).fetch_page(number - 1).await?;
    tracing::trace!(page = number, items = items.len(), "Fetched page");
    Ok(Page {
        items,
        current_page_number: number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(String::from),
        }
    }

    #[test]
    fn defaults_to_the_first_page() {
        assert_eq!(query(None).number(), 1);
        assert_eq!(query(Some("")).number(), 1);
        assert_eq!(query(Some("abc")).number(), 1);
    }

    #[test]
    fn rejects_non_positive_pages() {
        assert_eq!(query(Some("0")).number(), 1);
        assert_eq!(query(Some("-3")).number(), 1);
    }

    #[test]
    fn parses_numeric_pages() {
        assert_eq!(query(Some("3")).number(), 3);
        assert_eq!(query(Some(" 12 ")).number(), 12);
    }

    #[test]
    fn huge_pages_have_no_offset() {
        assert_eq!(offset(1), Some(0));
        assert_eq!(offset(3), Some(10));
        assert_eq!(offset(u64::MAX), None);
        assert_eq!(offset(2_000_000_000_000_000_000), None);
    }
}
