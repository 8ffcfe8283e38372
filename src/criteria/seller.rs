use super::{parse_distinct, Criteria, CriteriaError, QueryParams, RangeFilter, StringFilter};
use crate::entities::seller;
use sea_orm::Condition;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SellerCriteria {
    pub id: Option<RangeFilter<i64>>,
    pub name: Option<StringFilter>,
    pub last_name: Option<StringFilter>,
    pub employee_code: Option<StringFilter>,
    pub distinct: Option<bool>,
}

impl Criteria for SellerCriteria {
    type Entity = seller::Entity;

    fn from_params(params: &QueryParams) -> Result<Self, CriteriaError> {
        Ok(Self {
            id: RangeFilter::parse(params, "id")?,
            name: StringFilter::parse(params, "name")?,
            last_name: StringFilter::parse(params, "lastName")?,
            employee_code: StringFilter::parse(params, "employeeCode")?,
            distinct: parse_distinct(params)?,
        })
    }

    fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(f) = &self.id {
            cond = cond.add(f.to_condition(seller::Column::Id));
        }
        if let Some(f) = &self.name {
            cond = cond.add(f.to_condition(seller::Column::Name));
        }
        if let Some(f) = &self.last_name {
            cond = cond.add(f.to_condition(seller::Column::LastName));
        }
        if let Some(f) = &self.employee_code {
            cond = cond.add(f.to_condition(seller::Column::EmployeeCode));
        }
        cond
    }

    fn distinct(&self) -> bool {
        self.distinct.unwrap_or(false)
    }
}
