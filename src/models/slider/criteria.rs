//! Filtering criteria for slider queries, read from query parameters such as
//! `id.greaterThan=5&presentation.contains=foo&userId.specified=true`.
//!
//! The same criteria either compile to a parameterized SQL `WHERE` fragment
//! (Postgres) or are evaluated directly against rows (memory store). Both
//! follow SQL NULL semantics: a missing value never satisfies a comparison,
//! only `specified=false`.

use super::types::Slider;

#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaError {
    InvalidValue { key: String, value: String },
}

impl std::fmt::Display for CriteriaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriteriaError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{value}' for filter '{key}'")
            }
        }
    }
}

/// A bind parameter for the generated SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Long(i64),
    Text(String),
    LongList(Vec<i64>),
    TextList(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongFilter {
    pub equals: Option<i64>,
    pub not_equals: Option<i64>,
    pub in_list: Option<Vec<i64>>,
    pub not_in_list: Option<Vec<i64>>,
    pub specified: Option<bool>,
    pub greater_than: Option<i64>,
    pub less_than: Option<i64>,
    pub greater_than_or_equal: Option<i64>,
    pub less_than_or_equal: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringFilter {
    pub equals: Option<String>,
    pub not_equals: Option<String>,
    pub in_list: Option<Vec<String>>,
    pub not_in_list: Option<Vec<String>>,
    pub specified: Option<bool>,
    pub contains: Option<String>,
    pub does_not_contain: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliderCriteria {
    pub id: Option<LongFilter>,
    pub presentation: Option<StringFilter>,
    pub user_id: Option<LongFilter>,
    /// Accepted for compatibility; slider rows are already unique.
    pub distinct: Option<bool>,
}

fn invalid(key: &str, value: &str) -> CriteriaError {
    CriteriaError::InvalidValue { key: key.to_string(), value: value.to_string() }
}

fn parse_long(key: &str, raw: &str) -> Result<i64, CriteriaError> {
    raw.trim().parse::<i64>().map_err(|_| invalid(key, raw))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, CriteriaError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

impl LongFilter {
    /// Apply one `<field>.<op>=<raw>` parameter. Unknown operators are ignored.
    fn set(&mut self, key: &str, op: &str, raw: &str) -> Result<(), CriteriaError> {
        match op {
            "equals" => self.equals = Some(parse_long(key, raw)?),
            "notEquals" => self.not_equals = Some(parse_long(key, raw)?),
            "in" => self.in_list = Some(split_list(raw).map(|v| parse_long(key, v)).collect::<Result<_, _>>()?),
            "notIn" => self.not_in_list = Some(split_list(raw).map(|v| parse_long(key, v)).collect::<Result<_, _>>()?),
            "specified" => self.specified = Some(parse_bool(key, raw)?),
            "greaterThan" => self.greater_than = Some(parse_long(key, raw)?),
            "lessThan" => self.less_than = Some(parse_long(key, raw)?),
            "greaterThanOrEqual" => self.greater_than_or_equal = Some(parse_long(key, raw)?),
            "lessThanOrEqual" => self.less_than_or_equal = Some(parse_long(key, raw)?),
            _ => {}
        }
        Ok(())
    }

    pub fn matches(&self, value: Option<i64>) -> bool {
        if let Some(specified) = self.specified {
            if specified != value.is_some() {
                return false;
            }
        }
        let has_comparison = self.equals.is_some()
            || self.not_equals.is_some()
            || self.in_list.is_some()
            || self.not_in_list.is_some()
            || self.greater_than.is_some()
            || self.less_than.is_some()
            || self.greater_than_or_equal.is_some()
            || self.less_than_or_equal.is_some();
        let Some(v) = value else {
            return !has_comparison;
        };
        self.equals.is_none_or(|e| v == e)
            && self.not_equals.is_none_or(|e| v != e)
            && self.in_list.as_ref().is_none_or(|l| l.contains(&v))
            && self.not_in_list.as_ref().is_none_or(|l| !l.contains(&v))
            && self.greater_than.is_none_or(|b| v > b)
            && self.less_than.is_none_or(|b| v < b)
            && self.greater_than_or_equal.is_none_or(|b| v >= b)
            && self.less_than_or_equal.is_none_or(|b| v <= b)
    }

    fn build_sql(&self, col: &str, w: &mut WhereBuilder) {
        if let Some(v) = self.equals {
            w.push(|n| format!("{col} = ${n}"), SqlParam::Long(v));
        }
        if let Some(v) = self.not_equals {
            w.push(|n| format!("{col} <> ${n}"), SqlParam::Long(v));
        }
        if let Some(list) = &self.in_list {
            w.push(|n| format!("{col} = ANY(${n})"), SqlParam::LongList(list.clone()));
        }
        if let Some(list) = &self.not_in_list {
            w.push(|n| format!("{col} <> ALL(${n})"), SqlParam::LongList(list.clone()));
        }
        if let Some(specified) = self.specified {
            w.push_bare(specified_sql(col, specified));
        }
        if let Some(v) = self.greater_than {
            w.push(|n| format!("{col} > ${n}"), SqlParam::Long(v));
        }
        if let Some(v) = self.less_than {
            w.push(|n| format!("{col} < ${n}"), SqlParam::Long(v));
        }
        if let Some(v) = self.greater_than_or_equal {
            w.push(|n| format!("{col} >= ${n}"), SqlParam::Long(v));
        }
        if let Some(v) = self.less_than_or_equal {
            w.push(|n| format!("{col} <= ${n}"), SqlParam::Long(v));
        }
    }
}

impl StringFilter {
    fn set(&mut self, key: &str, op: &str, raw: &str) -> Result<(), CriteriaError> {
        match op {
            "equals" => self.equals = Some(raw.to_string()),
            "notEquals" => self.not_equals = Some(raw.to_string()),
            "in" => self.in_list = Some(split_list(raw).map(String::from).collect()),
            "notIn" => self.not_in_list = Some(split_list(raw).map(String::from).collect()),
            "specified" => self.specified = Some(parse_bool(key, raw)?),
            "contains" => self.contains = Some(raw.to_string()),
            "doesNotContain" => self.does_not_contain = Some(raw.to_string()),
            _ => {}
        }
        Ok(())
    }

    /// `contains` and `doesNotContain` compare case-insensitively.
    pub fn matches(&self, value: Option<&str>) -> bool {
        if let Some(specified) = self.specified {
            if specified != value.is_some() {
                return false;
            }
        }
        let has_comparison = self.equals.is_some()
            || self.not_equals.is_some()
            || self.in_list.is_some()
            || self.not_in_list.is_some()
            || self.contains.is_some()
            || self.does_not_contain.is_some();
        let Some(v) = value else {
            return !has_comparison;
        };
        let upper = v.to_uppercase();
        self.equals.as_deref().is_none_or(|e| v == e)
            && self.not_equals.as_deref().is_none_or(|e| v != e)
            && self.in_list.as_ref().is_none_or(|l| l.iter().any(|e| e == v))
            && self.not_in_list.as_ref().is_none_or(|l| l.iter().all(|e| e != v))
            && self.contains.as_deref().is_none_or(|c| upper.contains(&c.to_uppercase()))
            && self.does_not_contain.as_deref().is_none_or(|c| !upper.contains(&c.to_uppercase()))
    }

    fn build_sql(&self, col: &str, w: &mut WhereBuilder) {
        if let Some(v) = &self.equals {
            w.push(|n| format!("{col} = ${n}"), SqlParam::Text(v.clone()));
        }
        if let Some(v) = &self.not_equals {
            w.push(|n| format!("{col} <> ${n}"), SqlParam::Text(v.clone()));
        }
        if let Some(list) = &self.in_list {
            w.push(|n| format!("{col} = ANY(${n})"), SqlParam::TextList(list.clone()));
        }
        if let Some(list) = &self.not_in_list {
            w.push(|n| format!("{col} <> ALL(${n})"), SqlParam::TextList(list.clone()));
        }
        if let Some(specified) = self.specified {
            w.push_bare(specified_sql(col, specified));
        }
        // STRPOS keeps `%` and `_` in the search text literal, unlike LIKE
        if let Some(v) = &self.contains {
            w.push(|n| format!("STRPOS(UPPER({col}), UPPER(${n})) > 0"), SqlParam::Text(v.clone()));
        }
        if let Some(v) = &self.does_not_contain {
            w.push(|n| format!("STRPOS(UPPER({col}), UPPER(${n})) = 0"), SqlParam::Text(v.clone()));
        }
    }
}

fn specified_sql(col: &str, specified: bool) -> String {
    if specified {
        format!("{col} IS NOT NULL")
    } else {
        format!("{col} IS NULL")
    }
}

/// Accumulates AND-ed conditions with 1-based `$N` placeholders.
struct WhereBuilder {
    parts: Vec<String>,
    params: Vec<SqlParam>,
    param_offset: usize,
}

impl WhereBuilder {
    fn new(param_offset: usize) -> Self {
        Self { parts: Vec::new(), params: Vec::new(), param_offset }
    }

    fn push(&mut self, sql: impl FnOnce(usize) -> String, param: SqlParam) {
        let n = self.param_offset + self.params.len() + 1;
        self.parts.push(sql(n));
        self.params.push(param);
    }

    fn push_bare(&mut self, sql: String) {
        self.parts.push(sql);
    }

    fn finish(self) -> (String, Vec<SqlParam>) {
        if self.parts.is_empty() {
            return ("1=1".to_string(), Vec::new());
        }
        (self.parts.join(" AND "), self.params)
    }
}

impl SliderCriteria {
    /// Parse criteria from decoded query pairs. Pairs that are not filters
    /// (paging, sorting, unknown fields) are skipped.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, CriteriaError> {
        let mut criteria = SliderCriteria::default();
        for (key, value) in pairs {
            if key == "distinct" {
                criteria.distinct = Some(parse_bool(key, value)?);
                continue;
            }
            let Some((field, op)) = key.split_once('.') else {
                continue;
            };
            match field {
                "id" => criteria.id.get_or_insert_with(LongFilter::default).set(key, op, value)?,
                "presentation" => criteria
                    .presentation
                    .get_or_insert_with(StringFilter::default)
                    .set(key, op, value)?,
                "userId" => criteria.user_id.get_or_insert_with(LongFilter::default).set(key, op, value)?,
                _ => {}
            }
        }
        Ok(criteria)
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.presentation.is_none() && self.user_id.is_none()
    }

    pub fn matches(&self, slider: &Slider) -> bool {
        self.id.as_ref().is_none_or(|f| f.matches(slider.id))
            && self.presentation.as_ref().is_none_or(|f| f.matches(slider.presentation.as_deref()))
            && self.user_id.as_ref().is_none_or(|f| f.matches(slider.user_id))
    }

    /// Compile to a WHERE fragment over the `s` alias of the `slider` table.
    /// Placeholders start after `param_offset`.
    pub fn to_sql(&self, param_offset: usize) -> (String, Vec<SqlParam>) {
        let mut w = WhereBuilder::new(param_offset);
        if let Some(f) = &self.id {
            f.build_sql("s.id", &mut w);
        }
        if let Some(f) = &self.presentation {
            f.build_sql("s.presentation", &mut w);
        }
        if let Some(f) = &self.user_id {
            f.build_sql("s.user_id", &mut w);
        }
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn slider(id: i64, presentation: Option<&str>, user_id: Option<i64>) -> Slider {
        Slider {
            id: Some(id),
            presentation: presentation.map(String::from),
            user_id,
            user: None,
        }
    }

    #[test]
    fn empty_criteria_passes_everything() {
        let c = SliderCriteria::from_pairs(&pairs(&[("page", "0"), ("sort", "id,desc")])).unwrap();
        assert!(c.is_empty());
        let (sql, params) = c.to_sql(0);
        assert_eq!(sql, "1=1");
        assert!(params.is_empty());
        assert!(c.matches(&slider(1, None, None)));
    }

    #[test]
    fn parses_every_long_operator() {
        let c = SliderCriteria::from_pairs(&pairs(&[
            ("id.equals", "1"),
            ("id.notEquals", "2"),
            ("id.in", "1, 3,"),
            ("id.notIn", "4"),
            ("id.specified", "true"),
            ("id.greaterThan", "0"),
            ("id.lessThan", "9"),
            ("id.greaterThanOrEqual", "1"),
            ("id.lessThanOrEqual", "1"),
        ]))
        .unwrap();
        let f = c.id.unwrap();
        assert_eq!(f.equals, Some(1));
        assert_eq!(f.in_list, Some(vec![1, 3]));
        assert_eq!(f.not_in_list, Some(vec![4]));
        assert_eq!(f.specified, Some(true));
        assert_eq!(f.less_than_or_equal, Some(1));
    }

    #[test]
    fn malformed_long_is_an_error() {
        let err = SliderCriteria::from_pairs(&pairs(&[("userId.equals", "abc")])).unwrap_err();
        assert_eq!(err, CriteriaError::InvalidValue { key: "userId.equals".into(), value: "abc".into() });
        assert!(SliderCriteria::from_pairs(&pairs(&[("presentation.specified", "maybe")])).is_err());
    }

    #[test]
    fn unknown_fields_and_operators_are_ignored() {
        let c = SliderCriteria::from_pairs(&pairs(&[("color.equals", "red"), ("id.startsWith", "1")])).unwrap();
        assert_eq!(c.id, Some(LongFilter::default()));
        assert!(c.presentation.is_none());
    }

    #[test]
    fn id_range_filters_match_like_sql() {
        let row = slider(5, Some("AAAAAAAAAA"), Some(1));
        let found = |q: &[(&str, &str)]| SliderCriteria::from_pairs(&pairs(q)).unwrap().matches(&row);
        assert!(found(&[("id.equals", "5")]));
        assert!(!found(&[("id.notEquals", "5")]));
        assert!(found(&[("id.greaterThanOrEqual", "5")]));
        assert!(!found(&[("id.greaterThan", "5")]));
        assert!(found(&[("id.lessThanOrEqual", "5")]));
        assert!(!found(&[("id.lessThan", "5")]));
    }

    #[test]
    fn presentation_filters_match_like_sql() {
        let row = slider(5, Some("AAAAAAAAAA"), Some(1));
        let found = |q: &[(&str, &str)]| SliderCriteria::from_pairs(&pairs(q)).unwrap().matches(&row);
        assert!(found(&[("presentation.equals", "AAAAAAAAAA")]));
        assert!(!found(&[("presentation.equals", "BBBBBBBBBB")]));
        assert!(found(&[("presentation.in", "AAAAAAAAAA,BBBBBBBBBB")]));
        assert!(!found(&[("presentation.in", "BBBBBBBBBB")]));
        assert!(found(&[("presentation.specified", "true")]));
        assert!(!found(&[("presentation.specified", "false")]));
        assert!(found(&[("presentation.contains", "aaa")]));
        assert!(!found(&[("presentation.contains", "BBB")]));
        assert!(found(&[("presentation.doesNotContain", "BBB")]));
        assert!(!found(&[("presentation.doesNotContain", "AAA")]));
    }

    #[test]
    fn null_values_only_satisfy_unspecified() {
        let row = slider(5, Some("x"), None);
        let found = |q: &[(&str, &str)]| SliderCriteria::from_pairs(&pairs(q)).unwrap().matches(&row);
        assert!(found(&[("userId.specified", "false")]));
        assert!(!found(&[("userId.specified", "true")]));
        assert!(!found(&[("userId.equals", "1")]));
        assert!(!found(&[("userId.notEquals", "1")]));
        assert!(!found(&[("userId.notIn", "1,2")]));
    }

    #[test]
    fn builds_parameterized_sql_in_field_order() {
        let c = SliderCriteria::from_pairs(&pairs(&[
            ("userId.in", "1,2"),
            ("presentation.contains", "50%"),
            ("id.greaterThan", "3"),
            ("presentation.specified", "true"),
        ]))
        .unwrap();
        let (sql, params) = c.to_sql(0);
        assert_eq!(
            sql,
            "s.id > $1 AND s.presentation IS NOT NULL AND STRPOS(UPPER(s.presentation), UPPER($2)) > 0 \
             AND s.user_id = ANY($3)"
        );
        assert_eq!(
            params,
            vec![SqlParam::Long(3), SqlParam::Text("50%".into()), SqlParam::LongList(vec![1, 2])]
        );
    }

    #[test]
    fn param_offset_shifts_placeholders() {
        let c = SliderCriteria::from_pairs(&pairs(&[("presentation.notIn", "a,b")])).unwrap();
        let (sql, _) = c.to_sql(2);
        assert_eq!(sql, "s.presentation <> ALL($3)");
    }
}
