use super::{parse_distinct, Criteria, CriteriaError, QueryParams, RangeFilter};
use crate::entities::{sale, sale_transaction};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{sea_query::Query, ColumnTrait, Condition};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleCriteria {
    pub id: Option<RangeFilter<i64>>,
    pub creation_date: Option<RangeFilter<DateTime<Utc>>>,
    pub total: Option<RangeFilter<Decimal>>,
    pub transactions_id: Option<RangeFilter<i64>>,
    pub client_id: Option<RangeFilter<i64>>,
    pub seller_id: Option<RangeFilter<i64>>,
    pub distinct: Option<bool>,
}

impl Criteria for SaleCriteria {
    type Entity = sale::Entity;

    fn from_params(params: &QueryParams) -> Result<Self, CriteriaError> {
        Ok(Self {
            id: RangeFilter::parse(params, "id")?,
            creation_date: RangeFilter::parse(params, "creationDate")?,
            total: RangeFilter::parse(params, "total")?,
            transactions_id: RangeFilter::parse(params, "transactionsId")?,
            client_id: RangeFilter::parse(params, "clientId")?,
            seller_id: RangeFilter::parse(params, "sellerId")?,
            distinct: parse_distinct(params)?,
        })
    }

    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(f) = &self.id {
            cond = cond.add(f.to_condition(sale::Column::Id));
        }
        if let Some(f) = &self.creation_date {
            cond = cond.add(f.to_condition(sale::Column::CreationDate));
        }
        if let Some(f) = &self.total {
            cond = cond.add(f.to_condition(sale::Column::Total));
        }
        if let Some(f) = &self.transactions_id {
            cond = cond.add(transactions_condition(f));
        }
        if let Some(f) = &self.client_id {
            cond = cond.add(f.to_condition(sale::Column::ClientId));
        }
        if let Some(f) = &self.seller_id {
            cond = cond.add(f.to_condition(sale::Column::SellerId));
        }
        cond
    }

    fn distinct(&self) -> bool {
        self.distinct.unwrap_or(false)
    }
}

/// Matches sales owning at least one transaction whose id satisfies `filter`.
///
/// `specified` asks whether any transaction exists at all, so it is answered
/// with a bare `IN` / `NOT IN` over the owning sale ids.
fn transactions_condition(filter: &RangeFilter<i64>) -> Condition {
    let owners = |cond: Condition| {
        let mut select = Query::select();
        select
            .column(sale_transaction::Column::SaleId)
            .from(sale_transaction::Entity);
        if !cond.is_empty() {
            select.cond_where(cond);
        }
        select
    };

    let mut cond = Condition::all();
    match filter.specified {
        Some(true) => {
            cond = cond.add(sale::Column::Id.in_subquery(owners(Condition::all())));
        }
        Some(false) => {
            cond = cond.add(sale::Column::Id.not_in_subquery(owners(Condition::all())));
        }
        None => {}
    }

    let by_id = RangeFilter {
        specified: None,
        ..filter.clone()
    }
    .to_condition(sale_transaction::Column::Id);
    if !by_id.is_empty() {
        cond = cond.add(sale::Column::Id.in_subquery(owners(by_id)));
    }
    cond
}
