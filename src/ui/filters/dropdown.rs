use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::search::{ColumnSearchValue, FilterValue, SearchOperator};
use crate::ui::filters::descriptor::{ColumnFilter, DateMode, FilterKind};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Condition picker state of the advanced kinds, stored as a JSON envelope
/// in the dropdown's first selected key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advanced<V> {
    pub condition: SearchOperator,
    #[serde(default)]
    pub value: Option<V>,
    #[serde(default)]
    pub value2: Option<V>,
}

impl<V> Default for Advanced<V> {
    fn default() -> Self {
        Self {
            condition: SearchOperator::Lt,
            value: None,
            value2: None,
        }
    }
}

/// Open/closed state and raw control value of one column's filter dropdown.
///
/// Controls keep their value as strings in `selected_keys`; composite values
/// (ranges, advanced conditions) are serialized as JSON into the first key.
#[derive(Debug, Clone)]
pub struct FilterDropdown {
    filter: ColumnFilter,
    selected_keys: Vec<String>,
    open: bool,
}

impl FilterDropdown {
    pub fn new(filter: ColumnFilter) -> Self {
        Self {
            filter,
            selected_keys: Vec::new(),
            open: false,
        }
    }

    pub fn filter(&self) -> &ColumnFilter {
        &self.filter
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn selected_keys(&self) -> &[String] {
        &self.selected_keys
    }

    pub fn set_selected_keys(&mut self, keys: Vec<String>) {
        self.selected_keys = keys;
    }

    fn first_key(&self) -> &str {
        self.selected_keys.first().map(String::as_str).unwrap_or("")
    }

    fn set_single(&mut self, key: String) {
        self.selected_keys = if key.is_empty() { Vec::new() } else { vec![key] };
    }

    pub fn text(&self) -> &str {
        self.first_key()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.set_single(text.into());
    }

    /// Picks one option, or toggles it when the filter matches `in`.
    pub fn choose(&mut self, value: &str) {
        if self.filter.effective_operator() != SearchOperator::In {
            self.set_single(value.to_string());
            return;
        }
        match self.selected_keys.iter().position(|key| key == value) {
            Some(index) => {
                self.selected_keys.remove(index);
            }
            None => self.selected_keys.push(value.to_string()),
        }
    }

    pub fn is_chosen(&self, value: &str) -> bool {
        self.selected_keys.iter().any(|key| key == value)
    }

    pub fn number_range(&self) -> (Option<f64>, Option<f64>) {
        match parse_pair(self.first_key()) {
            Some((min, max)) => (number_of(&min), number_of(&max)),
            None => (None, None),
        }
    }

    pub fn set_number_range(&mut self, min: Option<f64>, max: Option<f64>) {
        let envelope = encode_pair(min.map(Value::from), max.map(Value::from));
        self.set_single(envelope);
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match serde_json::from_str::<Value>(self.first_key()) {
            Ok(Value::String(raw)) => parse_date(&raw),
            _ => parse_date(self.first_key()),
        }
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        let envelope = date
            .map(|date| Value::from(format_date(date)).to_string())
            .unwrap_or_default();
        self.set_single(envelope);
    }

    pub fn date_range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match parse_pair(self.first_key()) {
            Some((from, to)) => (date_of(&from), date_of(&to)),
            None => (None, None),
        }
    }

    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        let envelope = encode_pair(
            from.map(|d| Value::from(format_date(d))),
            to.map(|d| Value::from(format_date(d))),
        );
        self.set_single(envelope);
    }

    pub fn advanced_number(&self) -> Advanced<f64> {
        serde_json::from_str(self.first_key()).unwrap_or_default()
    }

    pub fn set_advanced_number(&mut self, advanced: &Advanced<f64>) {
        self.set_advanced(advanced);
    }

    pub fn advanced_date(&self) -> Advanced<NaiveDate> {
        serde_json::from_str(self.first_key()).unwrap_or_default()
    }

    pub fn set_advanced_date(&mut self, advanced: &Advanced<NaiveDate>) {
        self.set_advanced(advanced);
    }

    fn set_advanced<V: Serialize>(&mut self, advanced: &Advanced<V>) {
        match serde_json::to_string(advanced) {
            Ok(envelope) => self.set_single(envelope),
            Err(err) => tracing::warn!(error = %err, "failed to encode filter condition"),
        }
    }

    /// Advanced pickers show the second input only for `between`.
    pub fn shows_second_value(&self) -> bool {
        match self.filter.kind() {
            FilterKind::NumberRangeAdvanced => {
                self.advanced_number().condition == SearchOperator::Between
            }
            FilterKind::DateTimeAdvanced => {
                self.advanced_date().condition == SearchOperator::Between
            }
            _ => false,
        }
    }

    /// The search value the current control state would emit.
    pub fn pending_value(&self) -> Option<ColumnSearchValue> {
        let operator = self.filter.effective_operator();
        let (value, operator) = match self.filter.kind() {
            FilterKind::Input => (Some(FilterValue::Text(self.text().to_string())), operator),
            FilterKind::Select { .. } | FilterKind::AsyncSelect { .. } => {
                let value = if operator == SearchOperator::In {
                    Some(FilterValue::List(self.selected_keys.clone()))
                } else {
                    self.selected_keys.first().cloned().map(FilterValue::Text)
                };
                (value, operator)
            }
            FilterKind::NumberRange { .. } => {
                let (min, max) = self.number_range();
                let value = if operator == SearchOperator::Between {
                    Some(FilterValue::NumberRange(min, max))
                } else {
                    min.or(max).map(FilterValue::Number)
                };
                (value, operator)
            }
            FilterKind::DateTime {
                mode: DateMode::Single,
            } => (self.date().map(FilterValue::Date), operator),
            FilterKind::DateTime {
                mode: DateMode::Range,
            } => {
                let (from, to) = self.date_range();
                (Some(FilterValue::DateRange(from, to)), SearchOperator::Between)
            }
            FilterKind::NumberRangeAdvanced => {
                let advanced = self.advanced_number();
                let value = if advanced.condition == SearchOperator::Between {
                    Some(FilterValue::NumberRange(advanced.value, advanced.value2))
                } else {
                    advanced.value.map(FilterValue::Number)
                };
                (value, advanced.condition)
            }
            FilterKind::DateTimeAdvanced => {
                let advanced = self.advanced_date();
                let value = if advanced.condition == SearchOperator::Between {
                    Some(FilterValue::DateRange(advanced.value, advanced.value2))
                } else {
                    advanced.value.map(FilterValue::Date)
                };
                (value, advanced.condition)
            }
        };

        let value = value.filter(|value| !value.is_empty())?;
        match ColumnSearchValue::new(value, operator) {
            Ok(search) => Some(search),
            Err(err) => {
                tracing::warn!(column = self.filter.data_index(), error = %err, "filter value dropped");
                None
            }
        }
    }

    /// Emits the normalized control value and closes the dropdown.
    pub fn search(&mut self) -> Option<ColumnSearchValue> {
        let value = self.pending_value();
        self.filter.emit(value.clone());
        self.close();
        value
    }

    /// Clears the control and the column search; the dropdown stays open.
    pub fn reset(&mut self) {
        self.selected_keys.clear();
        self.filter.emit(None);
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Accepts bare dates and ISO datetimes.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

fn encode_pair(first: Option<Value>, second: Option<Value>) -> String {
    let end = |value: Option<Value>| value.unwrap_or_else(|| Value::from(""));
    Value::Array(vec![end(first), end(second)]).to_string()
}

fn parse_pair(raw: &str) -> Option<(Value, Value)> {
    let mut items = serde_json::from_str::<Vec<Value>>(raw).ok()?.into_iter();
    let first = items.next().unwrap_or(Value::Null);
    let second = items.next().unwrap_or(Value::Null);
    Some((first, second))
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

fn date_of(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(raw) => parse_date(raw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ui::filters::descriptor::SearchHandler;
    use crate::usecase::ports::options::SelectOption;

    type Emitted = Rc<RefCell<Vec<(String, Option<ColumnSearchValue>)>>>;

    fn recorder() -> (SearchHandler, Emitted) {
        let emitted: Emitted = Rc::new(RefCell::new(Vec::new()));
        let sink = emitted.clone();
        let handler = SearchHandler::new(move |value, column| {
            sink.borrow_mut().push((column.to_string(), value))
        });
        (handler, emitted)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn input_search_emits_text_and_closes() {
        let (handler, emitted) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::input("name", handler));
        dropdown.open();
        dropdown.set_text("ann");

        dropdown.search();

        assert!(!dropdown.is_open());
        let emitted = emitted.borrow();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].0, "name");
        let value = emitted[0].1.as_ref().expect("value");
        assert_eq!(value.value, FilterValue::Text("ann".to_string()));
        assert_eq!(value.operator, SearchOperator::Contain);
    }

    #[test]
    fn close_hides_without_emitting() {
        let (handler, emitted) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::input("name", handler));
        dropdown.open();
        dropdown.set_text("ann");

        dropdown.close();

        assert!(!dropdown.is_open());
        assert!(emitted.borrow().is_empty());
        assert_eq!(dropdown.text(), "ann", "typed value survives a close");
    }

    #[test]
    fn empty_input_emits_clear() {
        let (handler, emitted) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::input("name", handler));
        dropdown.set_text("");

        assert!(dropdown.search().is_none());
        assert_eq!(emitted.borrow()[0].1, None);
    }

    #[test]
    fn input_text_is_emitted_as_typed() {
        let (handler, emitted) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::input("name", handler));
        dropdown.set_text("  ann ");

        dropdown.search();

        let value = emitted.borrow()[0].1.clone().expect("value");
        assert_eq!(value.value, FilterValue::Text("  ann ".to_string()));
    }

    #[test]
    fn reset_clears_value_emits_none_and_stays_open() {
        let (handler, emitted) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::input("name", handler));
        dropdown.open();
        dropdown.set_text("ann");

        dropdown.reset();

        assert!(dropdown.is_open());
        assert!(dropdown.selected_keys().is_empty());
        assert_eq!(*emitted.borrow(), vec![("name".to_string(), None)]);
    }

    #[test]
    fn number_range_envelope_uses_empty_string_for_missing_end() {
        let (handler, emitted) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::number_range("price", handler));
        dropdown.set_number_range(None, Some(200.0));

        assert_eq!(dropdown.selected_keys(), &["[\"\",200.0]".to_string()]);
        assert_eq!(dropdown.number_range(), (None, Some(200.0)));

        dropdown.search();
        let value = emitted.borrow()[0].1.clone().expect("range value");
        assert_eq!(value.value, FilterValue::NumberRange(None, Some(200.0)));
        assert_eq!(value.operator, SearchOperator::Between);
    }

    #[test]
    fn number_range_without_ends_emits_clear() {
        let (handler, _) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::number_range("price", handler));
        dropdown.set_number_range(None, None);
        assert!(dropdown.pending_value().is_none());
    }

    #[test]
    fn number_range_accepts_string_numbers_in_envelope() {
        let (handler, _) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::number_range("price", handler));
        dropdown.set_selected_keys(vec!["[\"10\",\"\"]".to_string()]);
        assert_eq!(dropdown.number_range(), (Some(10.0), None));
    }

    #[test]
    fn date_range_always_emits_between() {
        let (handler, _) = recorder();
        let filter = ColumnFilter::date_time("created_on", DateMode::Range, handler)
            .operator(SearchOperator::Equal);
        let mut dropdown = FilterDropdown::new(filter);
        dropdown.set_date_range(Some(day(2024, 1, 1)), Some(day(2024, 1, 31)));

        assert_eq!(
            dropdown.selected_keys(),
            &["[\"2024-01-01\",\"2024-01-31\"]".to_string()]
        );
        let value = dropdown.pending_value().expect("range");
        assert_eq!(value.operator, SearchOperator::Between);
        assert_eq!(
            value.value,
            FilterValue::DateRange(Some(day(2024, 1, 1)), Some(day(2024, 1, 31)))
        );
    }

    #[test]
    fn single_date_reads_iso_datetimes() {
        let (handler, _) = recorder();
        let mut dropdown =
            FilterDropdown::new(ColumnFilter::date_time("created_on", DateMode::Single, handler));
        dropdown.set_selected_keys(vec!["\"2024-03-05T10:00:00.000Z\"".to_string()]);
        assert_eq!(dropdown.date(), Some(day(2024, 3, 5)));

        dropdown.set_date(Some(day(2024, 3, 6)));
        assert_eq!(dropdown.selected_keys(), &["\"2024-03-06\"".to_string()]);
        let value = dropdown.pending_value().expect("date");
        assert_eq!(value.value, FilterValue::Date(day(2024, 3, 6)));
        assert_eq!(value.operator, SearchOperator::Equal);
    }

    #[test]
    fn select_with_in_operator_collects_all_choices() {
        let (handler, _) = recorder();
        let options = vec![SelectOption::new("Admin", "admin"), SelectOption::new("User", "user")];
        let filter = ColumnFilter::select("role", options, handler).operator(SearchOperator::In);
        let mut dropdown = FilterDropdown::new(filter);
        dropdown.choose("admin");
        dropdown.choose("user");
        dropdown.choose("admin");

        let value = dropdown.pending_value().expect("list");
        assert_eq!(value.value, FilterValue::List(vec!["user".to_string()]));
        assert_eq!(value.operator, SearchOperator::In);
    }

    #[test]
    fn select_replaces_choice_for_equal() {
        let (handler, _) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::select("role", Vec::new(), handler));
        dropdown.choose("admin");
        dropdown.choose("user");
        assert_eq!(dropdown.selected_keys(), &["user".to_string()]);
    }

    #[test]
    fn advanced_defaults_to_less_than_with_single_input() {
        let (handler, _) = recorder();
        let dropdown = FilterDropdown::new(ColumnFilter::number_range_advanced("price", handler));
        assert_eq!(dropdown.advanced_number().condition, SearchOperator::Lt);
        assert!(!dropdown.shows_second_value());
    }

    #[test]
    fn advanced_condition_becomes_operator() {
        let (handler, _) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::number_range_advanced("price", handler));
        dropdown.set_advanced_number(&Advanced {
            condition: SearchOperator::Gte,
            value: Some(50.0),
            value2: Some(90.0),
        });

        let value = dropdown.pending_value().expect("scalar");
        assert_eq!(value.operator, SearchOperator::Gte);
        assert_eq!(value.value, FilterValue::Number(50.0));
    }

    #[test]
    fn advanced_between_shows_second_input_and_emits_range() {
        let (handler, _) = recorder();
        let mut dropdown =
            FilterDropdown::new(ColumnFilter::date_time_advanced("created_on", handler));
        dropdown.set_advanced_date(&Advanced {
            condition: SearchOperator::Between,
            value: Some(day(2024, 2, 1)),
            value2: None,
        });

        assert!(dropdown.shows_second_value());
        let value = dropdown.pending_value().expect("range");
        assert_eq!(value.value, FilterValue::DateRange(Some(day(2024, 2, 1)), None));
    }

    #[test]
    fn malformed_envelope_reads_as_empty() {
        let (handler, _) = recorder();
        let mut dropdown = FilterDropdown::new(ColumnFilter::number_range_advanced("price", handler));
        dropdown.set_selected_keys(vec!["not json".to_string()]);
        assert_eq!(dropdown.advanced_number(), Advanced::default());
        assert!(dropdown.pending_value().is_none());
    }
}
