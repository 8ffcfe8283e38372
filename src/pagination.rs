//! Page requests and page results shared by every list endpoint.

use crate::criteria::QueryParams;
use crate::errors::ServiceError;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Select};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageableError {
    #[error("Invalid value '{value}' for paging parameter '{parameter}'")]
    InvalidParameter { parameter: String, value: String },
}

/// Zero-based page request with optional ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl Pageable {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    /// Reads `page`, `size` and every `sort=<property>[,<property>...][,asc|desc]`.
    ///
    /// A missing or zero `size` falls back to `default_size`; larger sizes are
    /// capped at `max_size`.
    pub fn from_params(
        params: &QueryParams,
        default_size: u64,
        max_size: u64,
    ) -> Result<Self, PageableError> {
        let number = |name: &str| -> Result<Option<u64>, PageableError> {
            params
                .get(name)
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .map_err(|_| PageableError::InvalidParameter {
                            parameter: name.to_string(),
                            value: raw.to_string(),
                        })
                })
                .transpose()
        };

        let page = number("page")?.unwrap_or(0);
        let size = match number("size")? {
            Some(0) | None => default_size,
            Some(size) => size,
        }
        .min(max_size)
        .max(1);

        let mut sort = Vec::new();
        for raw in params.get_all("sort") {
            let mut parts: Vec<&str> = raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            let direction = match parts.last().map(|p| p.to_ascii_lowercase()) {
                Some(d) if d == "desc" => {
                    parts.pop();
                    Direction::Desc
                }
                Some(d) if d == "asc" => {
                    parts.pop();
                    Direction::Asc
                }
                _ => Direction::Asc,
            };
            sort.extend(parts.into_iter().map(|property| SortOrder {
                property: property.to_string(),
                direction,
            }));
        }

        Ok(Self { page, size, sort })
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        Self {
            content,
            number: pageable.page,
            size: pageable.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    pub fn map<U>(mut self, f: impl FnMut(T) -> U) -> Page<U> {
        let content = std::mem::take(&mut self.content).into_iter().map(f).collect();
        self.with_content(content)
    }

    /// Same page position and totals around different rows.
    pub fn with_content<U>(&self, content: Vec<U>) -> Page<U> {
        Page {
            content,
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

/// Entities that can be listed page by page with client-chosen ordering.
pub trait SortableEntity: EntityTrait {
    /// Name used in error keys and alert headers.
    const ENTITY_NAME: &'static str;

    fn id_column() -> Self::Column;

    /// Maps a JSON property name to the column it sorts by.
    fn sort_column(property: &str) -> Option<Self::Column>;
}

/// Orders `select` by the requested properties, then by id so pages stay stable.
pub fn apply_sort<E: SortableEntity>(
    mut select: Select<E>,
    pageable: &Pageable,
) -> Result<Select<E>, ServiceError> {
    let mut by_id = false;
    for order in &pageable.sort {
        let column = E::sort_column(&order.property).ok_or_else(|| {
            ServiceError::bad_request_alert(
                format!("Unknown sort property '{}'", order.property),
                E::ENTITY_NAME,
                "badsort",
            )
        })?;
        by_id |= order.property == "id";
        select = match order.direction {
            Direction::Asc => select.order_by_asc(column),
            Direction::Desc => select.order_by_desc(column),
        };
    }
    if !by_id {
        select = select.order_by_asc(E::id_column());
    }
    Ok(select)
}

/// Counts the rows `select` matches and loads the requested slice of them.
pub async fn fetch_page<E, C>(
    select: Select<E>,
    pageable: &Pageable,
    db: &C,
) -> Result<Page<E::Model>, ServiceError>
where
    E: SortableEntity,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let total = select.clone().count(db).await?;
    let rows = apply_sort(select, pageable)?
        .offset(pageable.offset())
        .limit(pageable.size)
        .all(db)
        .await?;
    Ok(Page::new(rows, pageable, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn defaults_apply_without_parameters() {
        let pageable = Pageable::from_params(&QueryParams::default(), 20, 100).unwrap();
        assert_eq!(pageable, Pageable::new(0, 20));
        assert_eq!(pageable.offset(), 0);
    }

    #[rstest]
    #[case("0", 20)]
    #[case("5", 5)]
    #[case("1000", 100)]
    fn size_is_defaulted_and_capped(#[case] raw: &str, #[case] expected: u64) {
        let pageable = Pageable::from_params(&params(&[("size", raw)]), 20, 100).unwrap();
        assert_eq!(pageable.size, expected);
    }

    #[test]
    fn parses_repeated_sort_parameters() {
        let pageable = Pageable::from_params(
            &params(&[("sort", "total,desc"), ("sort", "creationDate"), ("page", "3")]),
            20,
            100,
        )
        .unwrap();

        assert_eq!(pageable.page, 3);
        assert_eq!(
            pageable.sort,
            vec![SortOrder::desc("total"), SortOrder::asc("creationDate")]
        );
        assert_eq!(pageable.offset(), 60);
    }

    #[test]
    fn one_direction_applies_to_several_properties() {
        let pageable =
            Pageable::from_params(&params(&[("sort", "name,lastName,DESC")]), 20, 100).unwrap();
        assert_eq!(
            pageable.sort,
            vec![SortOrder::desc("name"), SortOrder::desc("lastName")]
        );
    }

    #[test]
    fn rejects_non_numeric_page() {
        let err = Pageable::from_params(&params(&[("page", "first")]), 20, 100).unwrap_err();
        assert_eq!(
            err,
            PageableError::InvalidParameter {
                parameter: "page".into(),
                value: "first".into()
            }
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(20, 1)]
    #[case(21, 2)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] pages: u64) {
        let page: Page<()> = Page::new(Vec::new(), &Pageable::new(0, 20), total);
        assert_eq!(page.total_pages(), pages);
    }
}
