/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTag {
    label: String,
    value: String,
}

impl MetricTag {
    pub fn new<L, V>(label: L, value: V) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        MetricTag {
            label: label.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for MetricTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.label, self.value)
    }
}

/// Ordered tag sequence. Duplicate labels are allowed in the sequence
/// but collapse last-write-wins when converted to a map, so callers
/// must not rely on duplicate-label semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricTags(Vec<MetricTag>);

impl MetricTags {
    pub fn new() -> Self {
        MetricTags(Vec::new())
    }

    pub fn push(&mut self, tag: MetricTag) {
        self.0.push(tag);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricTag> {
        self.0.iter()
    }

    pub fn to_map(&self) -> BTreeMap<&str, &str> {
        self.0
            .iter()
            .map(|tag| (tag.label.as_str(), tag.value.as_str()))
            .collect()
    }
}

impl From<Vec<MetricTag>> for MetricTags {
    fn from(tags: Vec<MetricTag>) -> Self {
        MetricTags(tags)
    }
}

impl FromIterator<MetricTag> for MetricTags {
    fn from_iter<T: IntoIterator<Item = MetricTag>>(iter: T) -> Self {
        MetricTags(iter.into_iter().collect())
    }
}

impl fmt::Display for MetricTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter();
        let Some(tag) = iter.next() else {
            return Ok(());
        };
        write!(f, "{tag}")?;
        for tag in iter {
            write!(f, ",{tag}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let mut tags = MetricTags::new();
        assert_eq!(tags.to_string(), "");

        tags.push(MetricTag::new("plan_guid", "g1"));
        tags.push(MetricTag::new("name", "small"));
        assert_eq!(tags.to_string(), "plan_guid:g1,name:small");
    }

    #[test]
    fn map_collapses_duplicates() {
        let tags: MetricTags = vec![
            MetricTag::new("a", "1"),
            MetricTag::new("b", "2"),
            MetricTag::new("a", "3"),
        ]
        .into();
        assert_eq!(tags.len(), 3);

        let map = tags.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&"3"));
        assert_eq!(map.get("b"), Some(&"2"));
    }
}
