/// Raw query-string pairs in request order.
///
/// Criteria and paging parameters use dotted keys (`name.contains=abc`) and
/// repeated keys (`sort=id,desc&sort=name,asc`), neither of which maps onto a
/// plain deserialized struct, so handlers receive the pairs as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// Last value given for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value given for `key`, in request order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `(operator, value)` pairs for keys of the form `<field>.<operator>`
    pub fn operators<'a>(&'a self, field: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.0.iter().filter_map(move |(k, v)| {
            k.strip_prefix(field)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|op| (op, v.as_str()))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_only_match_exact_field_prefix() {
        let params: QueryParams = [
            ("name.contains", "ann"),
            ("lastName.equals", "Smith"),
            ("name", "ignored"),
            ("named.equals", "nope"),
        ]
        .into_iter()
        .collect();

        let ops: Vec<_> = params.operators("name").collect();
        assert_eq!(ops, vec![("contains", "ann")]);
    }

    #[test]
    fn get_returns_last_and_get_all_keeps_order() {
        let params: QueryParams = [("sort", "id,desc"), ("sort", "name,asc"), ("page", "2")]
            .into_iter()
            .collect();

        assert_eq!(params.get("sort"), Some("name,asc"));
        assert_eq!(
            params.get_all("sort").collect::<Vec<_>>(),
            vec!["id,desc", "name,asc"]
        );
        assert_eq!(params.get("size"), None);
    }
}
