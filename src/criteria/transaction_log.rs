use super::{parse_distinct, Criteria, CriteriaError, QueryParams, RangeFilter, StringFilter};
use crate::entities::transaction_log;
use chrono::{DateTime, Utc};
use sea_orm::Condition;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionLogCriteria {
    pub id: Option<RangeFilter<i64>>,
    pub timestamp: Option<RangeFilter<DateTime<Utc>>>,
    pub operation_type: Option<StringFilter>,
    pub field_changed: Option<StringFilter>,
    pub old_value: Option<StringFilter>,
    pub new_value: Option<StringFilter>,
    pub modified_by: Option<StringFilter>,
    pub sale_transaction_id: Option<RangeFilter<i64>>,
    pub distinct: Option<bool>,
}

impl Criteria for TransactionLogCriteria {
    type Entity = transaction_log::Entity;

    fn from_params(params: &QueryParams) -> Result<Self, CriteriaError> {
        Ok(Self {
            id: RangeFilter::parse(params, "id")?,
            timestamp: RangeFilter::parse(params, "timestamp")?,
            operation_type: StringFilter::parse(params, "operationType")?,
            field_changed: StringFilter::parse(params, "fieldChanged")?,
            old_value: StringFilter::parse(params, "oldValue")?,
            new_value: StringFilter::parse(params, "newValue")?,
            modified_by: StringFilter::parse(params, "modifiedBy")?,
            sale_transaction_id: RangeFilter::parse(params, "saleTransactionId")?,
            distinct: parse_distinct(params)?,
        })
    }

    fn to_condition(&self) -> Condition {
        use transaction_log::Column;

        let strings = [
            (&self.operation_type, Column::OperationType),
            (&self.field_changed, Column::FieldChanged),
            (&self.old_value, Column::OldValue),
            (&self.new_value, Column::NewValue),
            (&self.modified_by, Column::ModifiedBy),
        ];

        let mut cond = Condition::all();
        if let Some(f) = &self.id {
            cond = cond.add(f.to_condition(Column::Id));
        }
        if let Some(f) = &self.timestamp {
            cond = cond.add(f.to_condition(Column::Timestamp));
        }
        for (filter, column) in strings {
            if let Some(f) = filter {
                cond = cond.add(f.to_condition(column));
            }
        }
        if let Some(f) = &self.sale_transaction_id {
            cond = cond.add(f.to_condition(Column::SaleTransactionId));
        }
        cond
    }

    fn distinct(&self) -> bool {
        self.distinct.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    #[test]
    fn sale_transaction_unspecified_matches_orphaned_rows() {
        let params: QueryParams = [
            ("saleTransactionId.specified", "false"),
            ("operationType.equals", "DELETE"),
        ]
        .into_iter()
        .collect();
        let criteria = TransactionLogCriteria::from_params(&params).unwrap();

        let sql = transaction_log::Entity::find()
            .filter(criteria.to_condition())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""transaction_log"."operation_type" = 'DELETE'"#), "{sql}");
        assert!(sql.contains(r#""transaction_log"."sale_transaction_id" IS NULL"#), "{sql}");
    }
}
