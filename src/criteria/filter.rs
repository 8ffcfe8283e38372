use super::{CriteriaError, QueryParams};
use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, Condition, Value,
};
use std::str::FromStr;

/// Filter over an ordered value: ids, amounts, quantities, instants.
///
/// Parsed from `<field>.<operator>=<value>` query parameters. Every operator
/// that is present contributes one predicate and all of them are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter<T> {
    pub equals: Option<T>,
    pub not_equals: Option<T>,
    pub in_values: Option<Vec<T>>,
    pub not_in: Option<Vec<T>>,
    pub specified: Option<bool>,
    pub greater_than: Option<T>,
    pub less_than: Option<T>,
    pub greater_than_or_equal: Option<T>,
    pub less_than_or_equal: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_values: None,
            not_in: None,
            specified: None,
            greater_than: None,
            less_than: None,
            greater_than_or_equal: None,
            less_than_or_equal: None,
        }
    }
}

/// Filter over a text column; `contains` and `doesNotContain` ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringFilter {
    pub equals: Option<String>,
    pub not_equals: Option<String>,
    pub in_values: Option<Vec<String>>,
    pub not_in: Option<Vec<String>>,
    pub specified: Option<bool>,
    pub contains: Option<String>,
    pub does_not_contain: Option<String>,
}

fn parse_value<V: FromStr>(field: &str, op: &str, raw: &str) -> Result<V, CriteriaError> {
    raw.trim()
        .parse()
        .map_err(|_| CriteriaError::invalid_value(field, op, raw))
}

fn parse_list<V: FromStr>(field: &str, op: &str, raw: &str) -> Result<Vec<V>, CriteriaError> {
    raw.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(|item| parse_value(field, op, item))
        .collect()
}

impl<T: FromStr> RangeFilter<T> {
    /// Reads every operator given for `field`; `None` when the field is absent.
    pub fn parse(params: &QueryParams, field: &str) -> Result<Option<Self>, CriteriaError> {
        let mut filter = Self::default();
        let mut seen = false;

        for (op, raw) in params.operators(field) {
            match op {
                "equals" => filter.equals = Some(parse_value(field, op, raw)?),
                "notEquals" => filter.not_equals = Some(parse_value(field, op, raw)?),
                "in" => filter.in_values = Some(parse_list(field, op, raw)?),
                "notIn" => filter.not_in = Some(parse_list(field, op, raw)?),
                "specified" => filter.specified = Some(parse_value(field, op, raw)?),
                "greaterThan" => filter.greater_than = Some(parse_value(field, op, raw)?),
                "lessThan" => filter.less_than = Some(parse_value(field, op, raw)?),
                "greaterThanOrEqual" => {
                    filter.greater_than_or_equal = Some(parse_value(field, op, raw)?)
                }
                "lessThanOrEqual" => {
                    filter.less_than_or_equal = Some(parse_value(field, op, raw)?)
                }
                _ => continue,
            }
            seen = true;
        }

        Ok(seen.then_some(filter))
    }
}

impl<T> RangeFilter<T>
where
    T: Into<Value> + Clone,
{
    pub fn to_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        let mut cond = Condition::all();
        if let Some(v) = &self.equals {
            cond = cond.add(column.eq(v.clone()));
        }
        if let Some(v) = &self.not_equals {
            cond = cond.add(column.ne(v.clone()));
        }
        if let Some(values) = &self.in_values {
            cond = cond.add(column.is_in(values.iter().cloned()));
        }
        if let Some(values) = &self.not_in {
            cond = cond.add(column.is_not_in(values.iter().cloned()));
        }
        if let Some(specified) = self.specified {
            cond = cond.add(if specified {
                column.is_not_null()
            } else {
                column.is_null()
            });
        }
        if let Some(v) = &self.greater_than {
            cond = cond.add(column.gt(v.clone()));
        }
        if let Some(v) = &self.less_than {
            cond = cond.add(column.lt(v.clone()));
        }
        if let Some(v) = &self.greater_than_or_equal {
            cond = cond.add(column.gte(v.clone()));
        }
        if let Some(v) = &self.less_than_or_equal {
            cond = cond.add(column.lte(v.clone()));
        }
        cond
    }
}

impl StringFilter {
    pub fn parse(params: &QueryParams, field: &str) -> Result<Option<Self>, CriteriaError> {
        let mut filter = Self::default();
        let mut seen = false;

        for (op, raw) in params.operators(field) {
            match op {
                "equals" => filter.equals = Some(raw.to_string()),
                "notEquals" => filter.not_equals = Some(raw.to_string()),
                "in" => filter.in_values = Some(parse_list(field, op, raw)?),
                "notIn" => filter.not_in = Some(parse_list(field, op, raw)?),
                "specified" => filter.specified = Some(parse_value(field, op, raw)?),
                "contains" => filter.contains = Some(raw.to_string()),
                "doesNotContain" => filter.does_not_contain = Some(raw.to_string()),
                _ => continue,
            }
            seen = true;
        }

        Ok(seen.then_some(filter))
    }

    pub fn to_condition<C: ColumnTrait>(&self, column: C) -> Condition {
        let mut cond = Condition::all();
        if let Some(v) = &self.equals {
            cond = cond.add(column.eq(v.as_str()));
        }
        if let Some(v) = &self.not_equals {
            cond = cond.add(column.ne(v.as_str()));
        }
        if let Some(values) = &self.in_values {
            cond = cond.add(column.is_in(values.iter().cloned()));
        }
        if let Some(values) = &self.not_in {
            cond = cond.add(column.is_not_in(values.iter().cloned()));
        }
        if let Some(specified) = self.specified {
            cond = cond.add(if specified {
                column.is_not_null()
            } else {
                column.is_null()
            });
        }
        if let Some(v) = &self.contains {
            cond = cond.add(upper(column).like(like_pattern(v)));
        }
        if let Some(v) = &self.does_not_contain {
            cond = cond.add(upper(column).not_like(like_pattern(v)));
        }
        cond
    }
}

fn upper<C: ColumnTrait>(column: C) -> Expr {
    Expr::expr(Func::upper(Expr::col((column.entity_name(), column))))
}

fn like_pattern(value: &str) -> String {
    format!("%{}%", value.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::seller;
    use assert_matches::assert_matches;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    fn sql(cond: Condition) -> String {
        seller::Entity::find()
            .filter(cond)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn absent_field_yields_no_filter() {
        let parsed = RangeFilter::<i64>::parse(&params(&[("name.equals", "x")]), "id").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn unknown_operator_is_ignored() {
        let parsed = RangeFilter::<i64>::parse(&params(&[("id.between", "1")]), "id").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn parses_every_range_operator() {
        let filter = RangeFilter::<i64>::parse(
            &params(&[
                ("id.equals", "1"),
                ("id.notEquals", "2"),
                ("id.in", "3,4"),
                ("id.notIn", "5"),
                ("id.specified", "true"),
                ("id.greaterThan", "6"),
                ("id.lessThan", "7"),
                ("id.greaterThanOrEqual", "8"),
                ("id.lessThanOrEqual", "9"),
            ]),
            "id",
        )
        .unwrap()
        .unwrap();

        assert_eq!(filter.equals, Some(1));
        assert_eq!(filter.not_equals, Some(2));
        assert_eq!(filter.in_values, Some(vec![3, 4]));
        assert_eq!(filter.not_in, Some(vec![5]));
        assert_eq!(filter.specified, Some(true));
        assert_eq!(filter.greater_than, Some(6));
        assert_eq!(filter.less_than, Some(7));
        assert_eq!(filter.greater_than_or_equal, Some(8));
        assert_eq!(filter.less_than_or_equal, Some(9));
    }

    #[test]
    fn malformed_value_is_reported_with_parameter_name() {
        let err = RangeFilter::<i64>::parse(&params(&[("id.equals", "abc")]), "id").unwrap_err();
        assert_matches!(err, CriteriaError::InvalidValue { ref parameter, ref value }
            if parameter == "id.equals" && value == "abc");
    }

    #[test]
    fn range_condition_ands_predicates() {
        let filter = RangeFilter {
            greater_than: Some(1_i64),
            less_than_or_equal: Some(10_i64),
            ..Default::default()
        };
        let sql = sql(filter.to_condition(seller::Column::Id));
        assert!(sql.contains(r#""seller"."id" > 1 AND "seller"."id" <= 10"#), "{sql}");
    }

    #[test]
    fn specified_false_means_null() {
        let filter = RangeFilter::<i64> {
            specified: Some(false),
            ..Default::default()
        };
        let sql = sql(filter.to_condition(seller::Column::Id));
        assert!(sql.contains(r#""seller"."id" IS NULL"#), "{sql}");
    }

    #[test]
    fn string_contains_is_case_insensitive() {
        let filter = StringFilter::parse(&params(&[("name.contains", "ann")]), "name")
            .unwrap()
            .unwrap();
        let sql = sql(filter.to_condition(seller::Column::Name));
        assert!(sql.contains(r#"UPPER("seller"."name") LIKE '%ANN%'"#), "{sql}");
    }

    #[test]
    fn string_does_not_contain_and_in() {
        let filter = StringFilter::parse(
            &params(&[("name.doesNotContain", "x"), ("name.in", "a,b")]),
            "name",
        )
        .unwrap()
        .unwrap();
        assert_eq!(filter.in_values, Some(vec!["a".to_string(), "b".to_string()]));

        let sql = sql(filter.to_condition(seller::Column::Name));
        assert!(sql.contains(r#""seller"."name" IN ('a', 'b')"#), "{sql}");
        assert!(sql.contains(r#"UPPER("seller"."name") NOT LIKE '%X%'"#), "{sql}");
    }
}
