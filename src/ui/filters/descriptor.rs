use std::fmt;
use std::rc::Rc;

use crate::domain::entities::search::{ColumnSearchValue, SearchOperator};
use crate::ui::filters::dropdown::FilterDropdown;
use crate::ui::filters::top_search::{TopSearchConfig, TopSearchKind};
use crate::usecase::ports::options::{OptionLoader, SelectOption};

pub const FILTER_ICON: &str = "\u{1F50D}";

/// Callback shared by the column dropdown and the top bar:
/// `(value, data_index)`, where `None` clears the column.
#[derive(Clone)]
pub struct SearchHandler(Rc<dyn Fn(Option<ColumnSearchValue>, &str)>);

impl SearchHandler {
    pub fn new(handler: impl Fn(Option<ColumnSearchValue>, &str) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, value: Option<ColumnSearchValue>, data_index: &str) {
        (self.0)(value, data_index)
    }
}

/// Handlers compare by identity.
impl PartialEq for SearchHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SearchHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SearchHandler")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchDisplayMode {
    #[default]
    Column,
    Top,
    Both,
}

impl SearchDisplayMode {
    pub fn shows_column(self) -> bool {
        matches!(self, SearchDisplayMode::Column | SearchDisplayMode::Both)
    }

    pub fn shows_top(self) -> bool {
        matches!(self, SearchDisplayMode::Top | SearchDisplayMode::Both)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateMode {
    Single,
    #[default]
    Range,
}

#[derive(Clone)]
pub enum FilterKind {
    Input,
    Select {
        options: Vec<SelectOption>,
    },
    AsyncSelect {
        loader: Rc<dyn OptionLoader>,
    },
    NumberRange {
        min_placeholder: Option<String>,
        max_placeholder: Option<String>,
    },
    /// The user picks the comparison; the range inputs appear for `between`.
    NumberRangeAdvanced,
    DateTime {
        mode: DateMode,
    },
    DateTimeAdvanced,
}

impl fmt::Debug for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Input => f.write_str("Input"),
            FilterKind::Select { options } => {
                f.debug_struct("Select").field("options", options).finish()
            }
            FilterKind::AsyncSelect { .. } => f.write_str("AsyncSelect"),
            FilterKind::NumberRange {
                min_placeholder,
                max_placeholder,
            } => f
                .debug_struct("NumberRange")
                .field("min_placeholder", min_placeholder)
                .field("max_placeholder", max_placeholder)
                .finish(),
            FilterKind::NumberRangeAdvanced => f.write_str("NumberRangeAdvanced"),
            FilterKind::DateTime { mode } => f.debug_struct("DateTime").field("mode", mode).finish(),
            FilterKind::DateTimeAdvanced => f.write_str("DateTimeAdvanced"),
        }
    }
}

impl PartialEq for FilterKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FilterKind::Input, FilterKind::Input)
            | (FilterKind::NumberRangeAdvanced, FilterKind::NumberRangeAdvanced)
            | (FilterKind::DateTimeAdvanced, FilterKind::DateTimeAdvanced) => true,
            (FilterKind::Select { options: a }, FilterKind::Select { options: b }) => a == b,
            (FilterKind::AsyncSelect { loader: a }, FilterKind::AsyncSelect { loader: b }) => {
                Rc::ptr_eq(a, b)
            }
            (
                FilterKind::NumberRange {
                    min_placeholder: a_min,
                    max_placeholder: a_max,
                },
                FilterKind::NumberRange {
                    min_placeholder: b_min,
                    max_placeholder: b_max,
                },
            ) => a_min == b_min && a_max == b_max,
            (FilterKind::DateTime { mode: a }, FilterKind::DateTime { mode: b }) => a == b,
            _ => false,
        }
    }
}

impl FilterKind {
    /// Kinds with a top-bar counterpart; the rest are column-only.
    fn top_kind(&self) -> Option<TopSearchKind> {
        match self {
            FilterKind::Input => Some(TopSearchKind::Input),
            FilterKind::Select { .. } => Some(TopSearchKind::Select),
            FilterKind::DateTime {
                mode: DateMode::Single,
            } => Some(TopSearchKind::Date),
            FilterKind::DateTime {
                mode: DateMode::Range,
            } => Some(TopSearchKind::DateRange),
            _ => None,
        }
    }
}

/// Declarative search affordance of one table column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    data_index: String,
    kind: FilterKind,
    placeholder: Option<String>,
    operator: SearchOperator,
    show_search: SearchDisplayMode,
    on_search: SearchHandler,
}

impl ColumnFilter {
    fn build(
        data_index: impl Into<String>,
        kind: FilterKind,
        operator: SearchOperator,
        on_search: SearchHandler,
    ) -> Self {
        Self {
            data_index: data_index.into(),
            kind,
            placeholder: None,
            operator,
            show_search: SearchDisplayMode::Column,
            on_search,
        }
    }

    pub fn input(data_index: impl Into<String>, on_search: SearchHandler) -> Self {
        Self::build(data_index, FilterKind::Input, SearchOperator::Contain, on_search)
    }

    pub fn select(
        data_index: impl Into<String>,
        options: Vec<SelectOption>,
        on_search: SearchHandler,
    ) -> Self {
        Self::build(
            data_index,
            FilterKind::Select { options },
            SearchOperator::Equal,
            on_search,
        )
    }

    pub fn async_select(
        data_index: impl Into<String>,
        loader: Rc<dyn OptionLoader>,
        on_search: SearchHandler,
    ) -> Self {
        Self::build(
            data_index,
            FilterKind::AsyncSelect { loader },
            SearchOperator::Equal,
            on_search,
        )
    }

    pub fn number_range(data_index: impl Into<String>, on_search: SearchHandler) -> Self {
        Self::build(
            data_index,
            FilterKind::NumberRange {
                min_placeholder: None,
                max_placeholder: None,
            },
            SearchOperator::Between,
            on_search,
        )
    }

    pub fn number_range_advanced(data_index: impl Into<String>, on_search: SearchHandler) -> Self {
        Self::build(
            data_index,
            FilterKind::NumberRangeAdvanced,
            SearchOperator::Between,
            on_search,
        )
    }

    pub fn date_time(
        data_index: impl Into<String>,
        mode: DateMode,
        on_search: SearchHandler,
    ) -> Self {
        Self::build(
            data_index,
            FilterKind::DateTime { mode },
            SearchOperator::Equal,
            on_search,
        )
    }

    pub fn date_time_advanced(data_index: impl Into<String>, on_search: SearchHandler) -> Self {
        Self::build(
            data_index,
            FilterKind::DateTimeAdvanced,
            SearchOperator::Between,
            on_search,
        )
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn range_placeholders(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        if let FilterKind::NumberRange {
            min_placeholder,
            max_placeholder,
        } = &mut self.kind
        {
            *min_placeholder = Some(min.into());
            *max_placeholder = Some(max.into());
        }
        self
    }

    /// Ignored by the advanced kinds, whose operator is the picked condition.
    pub fn operator(mut self, operator: SearchOperator) -> Self {
        self.operator = operator;
        self
    }

    pub fn show_search(mut self, mode: SearchDisplayMode) -> Self {
        self.show_search = mode;
        self
    }

    pub fn data_index(&self) -> &str {
        &self.data_index
    }

    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Range pickers can only express `between`.
    pub fn effective_operator(&self) -> SearchOperator {
        match self.kind {
            FilterKind::DateTime {
                mode: DateMode::Range,
            } => SearchOperator::Between,
            _ => self.operator,
        }
    }

    pub fn has_column_filter(&self) -> bool {
        self.kind.top_kind().is_none() || self.show_search.shows_column()
    }

    pub fn filter_icon(&self) -> Option<&'static str> {
        self.has_column_filter().then_some(FILTER_ICON)
    }

    pub fn search_config(&self) -> Option<TopSearchConfig> {
        if !self.show_search.shows_top() {
            return None;
        }
        let kind = self.kind.top_kind()?;
        let options = match &self.kind {
            FilterKind::Select { options } => options.clone(),
            _ => Vec::new(),
        };
        Some(TopSearchConfig {
            data_index: self.data_index.clone(),
            kind,
            placeholder: self.placeholder.clone(),
            options,
            operator: Some(self.effective_operator()),
        })
    }

    /// Dropdown state for the column header, when the column has one.
    pub fn dropdown(&self) -> Option<FilterDropdown> {
        self.has_column_filter()
            .then(|| FilterDropdown::new(self.clone()))
    }

    pub fn emit(&self, value: Option<ColumnSearchValue>) {
        tracing::debug!(
            column = %self.data_index,
            cleared = value.is_none(),
            "column search"
        );
        self.on_search.call(value, &self.data_index);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    pub fn css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
            Align::Center => "center",
        }
    }
}

pub type CellRenderer<T> = Rc<dyn Fn(&T) -> String>;

/// A table column definition with an optional search affordance merged in.
#[derive(Clone)]
pub struct TableColumn<T> {
    pub title: String,
    pub data_index: String,
    pub render: CellRenderer<T>,
    pub align: Align,
    pub width: Option<u32>,
    pub filter: Option<ColumnFilter>,
}

impl<T> TableColumn<T> {
    pub fn new(
        title: impl Into<String>,
        data_index: impl Into<String>,
        render: impl Fn(&T) -> String + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            data_index: data_index.into(),
            render: Rc::new(render),
            align: Align::Left,
            width: None,
            filter: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_filter(mut self, filter: ColumnFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Top-bar configs of every column that has one, in column order.
pub fn top_search_configs<T>(columns: &[TableColumn<T>]) -> Vec<TopSearchConfig> {
    columns
        .iter()
        .filter_map(|column| column.filter.as_ref())
        .filter_map(ColumnFilter::search_config)
        .collect()
}
