use std::collections::BTreeMap;

use crate::domain::entities::search::{
    ColumnSearchValue, FilterValue, SearchOperator, SearchUpdates,
};
use crate::usecase::ports::options::SelectOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopSearchKind {
    Input,
    Select,
    Date,
    DateRange,
}

/// One field of the search bar above the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TopSearchConfig {
    pub data_index: String,
    pub kind: TopSearchKind,
    pub placeholder: Option<String>,
    pub options: Vec<SelectOption>,
    pub operator: Option<SearchOperator>,
}

impl TopSearchConfig {
    pub fn operator_or_default(&self) -> SearchOperator {
        self.operator.unwrap_or(SearchOperator::Contain)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TopSearchBar {
    configs: Vec<TopSearchConfig>,
    values: BTreeMap<String, FilterValue>,
}

impl TopSearchBar {
    pub fn new(configs: Vec<TopSearchConfig>) -> Self {
        Self {
            configs,
            values: BTreeMap::new(),
        }
    }

    pub fn configs(&self) -> &[TopSearchConfig] {
        &self.configs
    }

    /// Nothing to render without configs.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn value(&self, data_index: &str) -> Option<&FilterValue> {
        self.values.get(data_index)
    }

    pub fn set_value(&mut self, data_index: &str, value: Option<FilterValue>) {
        match value {
            Some(value) if !value.is_empty() => {
                self.values.insert(data_index.to_string(), value);
            }
            _ => {
                self.values.remove(data_index);
            }
        }
    }

    /// One update per configured field, in config order; empty fields clear.
    pub fn submit(&self) -> SearchUpdates {
        self.configs
            .iter()
            .map(|config| {
                let value = self
                    .values
                    .get(&config.data_index)
                    .filter(|value| !value.is_empty())
                    .and_then(|value| {
                        let operator = config.operator_or_default();
                        let value = match value {
                            // A single picked option still searches as a set.
                            FilterValue::Text(text) if operator == SearchOperator::In => {
                                FilterValue::List(vec![text.clone()])
                            }
                            value => value.clone(),
                        };
                        ColumnSearchValue::new(value, operator)
                            .map_err(|err| {
                                tracing::warn!(
                                    field = %config.data_index,
                                    error = %err,
                                    "top search value dropped"
                                )
                            })
                            .ok()
                    });
                (config.data_index.clone(), value)
            })
            .collect()
    }

    /// Clears every field and returns the matching clear-all updates.
    pub fn reset(&mut self) -> SearchUpdates {
        self.values.clear();
        self.submit()
    }
}
