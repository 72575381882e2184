use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchOperator {
    #[serde(rename = "contain")]
    Contain,
    #[serde(rename = "equal")]
    Equal,
    #[serde(rename = "start_with")]
    StartWith,
    #[serde(rename = "end_with")]
    EndWith,
    #[serde(rename = "not_equal")]
    NotEqual,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "in")]
    In,
}

pub const ALL_OPERATORS: [SearchOperator; 11] = [
    SearchOperator::Contain,
    SearchOperator::Equal,
    SearchOperator::StartWith,
    SearchOperator::EndWith,
    SearchOperator::NotEqual,
    SearchOperator::Lt,
    SearchOperator::Gt,
    SearchOperator::Lte,
    SearchOperator::Gte,
    SearchOperator::Between,
    SearchOperator::In,
];

/// Conditions offered by the advanced number/date pickers.
pub const CONDITION_OPERATORS: [SearchOperator; 5] = [
    SearchOperator::Lt,
    SearchOperator::Gt,
    SearchOperator::Lte,
    SearchOperator::Gte,
    SearchOperator::Between,
];

impl SearchOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchOperator::Contain => "contain",
            SearchOperator::Equal => "equal",
            SearchOperator::StartWith => "start_with",
            SearchOperator::EndWith => "end_with",
            SearchOperator::NotEqual => "not_equal",
            SearchOperator::Lt => "<",
            SearchOperator::Gt => ">",
            SearchOperator::Lte => "<=",
            SearchOperator::Gte => ">=",
            SearchOperator::Between => "between",
            SearchOperator::In => "in",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        ALL_OPERATORS
            .into_iter()
            .find(|operator| operator.as_str() == raw)
    }

    /// Human-readable label for condition pickers.
    pub fn label(self) -> &'static str {
        match self {
            SearchOperator::Contain => "Contains",
            SearchOperator::Equal => "Equal to",
            SearchOperator::StartWith => "Starts with",
            SearchOperator::EndWith => "Ends with",
            SearchOperator::NotEqual => "Not equal to",
            SearchOperator::Lt => "Less than",
            SearchOperator::Gt => "Greater than",
            SearchOperator::Lte => "Less than or equal",
            SearchOperator::Gte => "Greater than or equal",
            SearchOperator::Between => "From ... to ...",
            SearchOperator::In => "Any of",
        }
    }

    fn is_pattern(self) -> bool {
        matches!(
            self,
            SearchOperator::Contain | SearchOperator::StartWith | SearchOperator::EndWith
        )
    }

    fn is_ordering(self) -> bool {
        matches!(
            self,
            SearchOperator::Lt | SearchOperator::Gt | SearchOperator::Lte | SearchOperator::Gte
        )
    }
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    NumberRange(Option<f64>, Option<f64>),
    DateRange(Option<NaiveDate>, Option<NaiveDate>),
    List(Vec<String>),
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(text) => text.is_empty(),
            FilterValue::List(items) => items.is_empty(),
            FilterValue::NumberRange(min, max) => min.is_none() && max.is_none(),
            FilterValue::DateRange(from, to) => from.is_none() && to.is_none(),
            FilterValue::Number(_) | FilterValue::Date(_) => false,
        }
    }

    fn is_range(&self) -> bool {
        matches!(
            self,
            FilterValue::NumberRange(..) | FilterValue::DateRange(..)
        )
    }

    fn kind_name(&self) -> &'static str {
        match self {
            FilterValue::Text(_) => "text",
            FilterValue::Number(_) => "number",
            FilterValue::Date(_) => "date",
            FilterValue::NumberRange(..) => "number range",
            FilterValue::DateRange(..) => "date range",
            FilterValue::List(_) => "list",
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn end<T: fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map(|v| v.to_string()).unwrap_or_default()
        }

        match self {
            FilterValue::Text(text) => f.write_str(text),
            FilterValue::Number(number) => write!(f, "{number}"),
            FilterValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            FilterValue::NumberRange(min, max) => write!(f, "{} ~ {}", end(min), end(max)),
            FilterValue::DateRange(from, to) => write!(f, "{} ~ {}", end(from), end(to)),
            FilterValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Text(text) => serializer.serialize_str(text),
            FilterValue::Number(number) => serializer.serialize_f64(*number),
            FilterValue::Date(date) => date.serialize(serializer),
            FilterValue::NumberRange(min, max) => (min, max).serialize(serializer),
            FilterValue::DateRange(from, to) => (from, to).serialize(serializer),
            FilterValue::List(items) => items.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("operator `{operator}` cannot be applied to a {value_kind} value")]
pub struct SearchValueError {
    pub operator: SearchOperator,
    pub value_kind: &'static str,
}

/// One active filter on one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSearchValue {
    pub value: FilterValue,
    pub operator: SearchOperator,
}

impl ColumnSearchValue {
    pub fn new(value: FilterValue, operator: SearchOperator) -> Result<Self, SearchValueError> {
        let compatible = match operator {
            SearchOperator::Between => value.is_range(),
            SearchOperator::In => matches!(value, FilterValue::List(_)),
            op if op.is_pattern() => matches!(value, FilterValue::Text(_)),
            op if op.is_ordering() => {
                matches!(value, FilterValue::Number(_) | FilterValue::Date(_))
            }
            _ => matches!(
                value,
                FilterValue::Text(_) | FilterValue::Number(_) | FilterValue::Date(_)
            ),
        };

        if !compatible {
            return Err(SearchValueError {
                operator,
                value_kind: value.kind_name(),
            });
        }

        Ok(Self { value, operator })
    }

    pub fn text(value: impl Into<String>, operator: SearchOperator) -> Result<Self, SearchValueError> {
        Self::new(FilterValue::Text(value.into()), operator)
    }
}

/// Server-bound, flattened form of an active filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSearchItem {
    pub field: String,
    pub value: FilterValue,
    pub operator: SearchOperator,
}

/// Ordered per-column updates; `None` clears the column.
pub type SearchUpdates = Vec<(String, Option<ColumnSearchValue>)>;

/// Active column searches, at most one entry per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSearches {
    items: Vec<ColumnSearchItem>,
}

impl ColumnSearches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_vec(&self) -> Vec<ColumnSearchItem> {
        self.items.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Searched field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.field.as_str())
    }

    /// Upserts or removes one entry per update, matched by field name.
    /// Existing fields keep their position; new fields are appended.
    pub fn apply<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (String, Option<ColumnSearchValue>)>,
    {
        for (field, update) in updates {
            match update {
                None => self.items.retain(|item| item.field != field),
                Some(ColumnSearchValue { value, operator }) => {
                    let next = ColumnSearchItem {
                        field,
                        value,
                        operator,
                    };
                    match self.items.iter_mut().find(|item| item.field == next.field) {
                        Some(existing) => *existing = next,
                        None => self.items.push(next),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str, operator: SearchOperator) -> ColumnSearchValue {
        ColumnSearchValue::text(value, operator).expect("text value should be valid")
    }

    #[test]
    fn operator_wire_names_round_trip_through_parse() {
        for operator in ALL_OPERATORS {
            assert_eq!(SearchOperator::parse(operator.as_str()), Some(operator));
        }
        assert_eq!(SearchOperator::parse("like"), None);
    }

    #[test]
    fn operator_serializes_with_wire_name() {
        let json = serde_json::to_string(&SearchOperator::Lte).expect("should serialize");
        assert_eq!(json, "\"<=\"");
    }

    #[test]
    fn between_requires_a_range_value() {
        let err = ColumnSearchValue::new(FilterValue::Number(3.0), SearchOperator::Between)
            .expect_err("scalar between should be rejected");
        assert_eq!(err.value_kind, "number");

        let ok = ColumnSearchValue::new(
            FilterValue::NumberRange(Some(1.0), None),
            SearchOperator::Between,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn pattern_operators_require_text() {
        assert!(ColumnSearchValue::new(FilterValue::Number(1.0), SearchOperator::Contain).is_err());
        assert!(ColumnSearchValue::new(
            FilterValue::List(vec!["a".to_string()]),
            SearchOperator::In
        )
        .is_ok());
        assert!(ColumnSearchValue::new(FilterValue::Text("a".into()), SearchOperator::Gt).is_err());
    }

    #[test]
    fn empty_values_are_detected() {
        assert!(FilterValue::Text(String::new()).is_empty());
        assert!(FilterValue::List(Vec::new()).is_empty());
        assert!(FilterValue::NumberRange(None, None).is_empty());
        assert!(!FilterValue::NumberRange(None, Some(4.0)).is_empty());
        assert!(!FilterValue::Number(0.0).is_empty());
    }

    #[test]
    fn apply_keeps_one_entry_per_field_with_latest_value() {
        let mut searches = ColumnSearches::new();
        searches.apply(vec![("name".to_string(), Some(text("ann", SearchOperator::Contain)))]);
        searches.apply(vec![("email".to_string(), Some(text("x", SearchOperator::Equal)))]);
        searches.apply(vec![("name".to_string(), Some(text("bob", SearchOperator::StartWith)))]);

        assert_eq!(searches.len(), 2);
        let items = searches.to_vec();
        assert_eq!(items[0].field, "name", "upsert keeps position");
        assert_eq!(items[0].value, FilterValue::Text("bob".to_string()));
        assert_eq!(items[0].operator, SearchOperator::StartWith);
    }

    #[test]
    fn apply_with_none_removes_field() {
        let mut searches = ColumnSearches::new();
        searches.apply(vec![("name".to_string(), Some(text("ann", SearchOperator::Contain)))]);
        searches.apply(vec![("name".to_string(), None)]);
        assert!(searches.is_empty());

        searches.apply(vec![("missing".to_string(), None)]);
        assert!(searches.is_empty());
    }

    #[test]
    fn bulk_update_replaces_specified_fields_only() {
        let mut searches = ColumnSearches::new();
        searches.apply(vec![
            ("a".to_string(), Some(text("1", SearchOperator::Equal))),
            ("c".to_string(), Some(text("3", SearchOperator::Equal))),
        ]);

        let mut next = searches.clone();
        next.apply(vec![
            ("a".to_string(), None),
            ("b".to_string(), Some(text("2", SearchOperator::Contain))),
        ]);

        assert_eq!(next.fields().collect::<Vec<_>>(), vec!["c", "b"], "untouched fields survive");
        assert_eq!(next.to_vec()[1].value, FilterValue::Text("2".into()));
        assert_eq!(searches.len(), 2, "the source copy is untouched");
    }
}
