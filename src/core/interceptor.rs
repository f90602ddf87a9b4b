//! Interceptors: ordered stages that may rewrite, replace or drop a log item

use super::log_item::LogItem;
use std::collections::HashSet;
use std::sync::Arc;

/// A pipeline stage run on every composed log item.
///
/// Return the (possibly modified or replaced) item to continue, or `None` to
/// drop the log entirely.
pub trait Interceptor: Send + Sync {
    fn intercept(&self, item: LogItem) -> Option<LogItem>;
}

impl<F> Interceptor for F
where
    F: Fn(LogItem) -> Option<LogItem> + Send + Sync,
{
    fn intercept(&self, item: LogItem) -> Option<LogItem> {
        self(item)
    }
}

/// Run `item` through `interceptors` in order, stopping at the first drop.
pub fn run_chain(interceptors: &[Arc<dyn Interceptor>], item: LogItem) -> Option<LogItem> {
    interceptors
        .iter()
        .try_fold(item, |item, interceptor| interceptor.intercept(item))
}

/// Drops logs whose tag is not in the whitelist.
#[derive(Debug, Clone)]
pub struct WhitelistTagsFilterInterceptor {
    tags: HashSet<String>,
}

impl WhitelistTagsFilterInterceptor {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl Interceptor for WhitelistTagsFilterInterceptor {
    fn intercept(&self, item: LogItem) -> Option<LogItem> {
        self.tags.contains(&item.tag).then_some(item)
    }
}

/// Drops logs whose tag is in the blacklist.
#[derive(Debug, Clone)]
pub struct BlacklistTagsFilterInterceptor {
    tags: HashSet<String>,
}

impl BlacklistTagsFilterInterceptor {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl Interceptor for BlacklistTagsFilterInterceptor {
    fn intercept(&self, item: LogItem) -> Option<LogItem> {
        (!self.tags.contains(&item.tag)).then_some(item)
    }
}
