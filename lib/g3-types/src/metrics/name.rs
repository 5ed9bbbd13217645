/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use super::{ParseError, chars_allowed_in_opentsdb};

/// Name of a configured component. Restricted to the character range
/// metric backends accept, so component names can be used directly in
/// emitted metrics and failure reports.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeName(String);

impl NodeName {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for NodeName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        chars_allowed_in_opentsdb(s)?;
        Ok(NodeName(s.to_string()))
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert!(NodeName::from_str("statsd-main").is_ok());
        assert!(NodeName::from_str("billing.uk").is_ok());
        assert!(NodeName::from_str("with space").is_err());
        assert!(NodeName::from_str("colon:name").is_err());
        assert!(NodeName::from_str("").is_ok());
    }
}
