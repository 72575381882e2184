use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Option source of an async select column.
#[async_trait(?Send)]
pub trait OptionLoader {
    async fn load(&self, keyword: &str) -> anyhow::Result<Vec<SelectOption>>;
}

/// Loads options, logging failures and falling back to an empty list.
pub async fn load_options(loader: &dyn OptionLoader, keyword: &str) -> Vec<SelectOption> {
    match loader.load(keyword).await {
        Ok(options) => options,
        Err(err) => {
            tracing::error!(error = %err, keyword, "failed to load select options");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    struct Failing;

    #[async_trait(?Send)]
    impl OptionLoader for Failing {
        async fn load(&self, _keyword: &str) -> anyhow::Result<Vec<SelectOption>> {
            anyhow::bail!("service down")
        }
    }

    struct Fixed;

    #[async_trait(?Send)]
    impl OptionLoader for Fixed {
        async fn load(&self, keyword: &str) -> anyhow::Result<Vec<SelectOption>> {
            Ok(vec![SelectOption::new(keyword, keyword)])
        }
    }

    #[test]
    fn failed_loader_yields_empty_options() {
        assert!(block_on(load_options(&Failing, "")).is_empty());
    }

    #[test]
    fn loader_receives_the_typed_keyword() {
        let options = block_on(load_options(&Fixed, "boo"));
        assert_eq!(options, vec![SelectOption::new("boo", "boo")]);
    }
}
