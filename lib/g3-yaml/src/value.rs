/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::anyhow;
use yaml_rust::Yaml;

use g3_types::metrics::NodeName;

pub fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(s) => Ok(s.to_string()),
        _ => Err(anyhow!("yaml value type for string should be string")),
    }
}

pub fn as_usize(v: &Yaml) -> anyhow::Result<usize> {
    match v {
        Yaml::Integer(i) => usize::try_from(*i).map_err(|e| anyhow!("invalid usize value: {e}")),
        Yaml::String(s) => usize::from_str(s).map_err(|e| anyhow!("invalid usize value: {e}")),
        _ => Err(anyhow!(
            "yaml value type for usize should be 'integer' or 'string'"
        )),
    }
}

pub fn as_metric_node_name(v: &Yaml) -> anyhow::Result<NodeName> {
    if let Yaml::String(s) = v {
        let name = NodeName::from_str(s).map_err(|e| anyhow!("invalid metric node name: {e}"))?;
        Ok(name)
    } else {
        Err(anyhow!(
            "yaml value type for metric node name should be string"
        ))
    }
}

pub fn as_env_sockaddr(v: &Yaml) -> anyhow::Result<SocketAddr> {
    let s = as_string(v)?;
    SocketAddr::from_str(&s).map_err(|e| anyhow!("invalid socket address {s}: {e}"))
}

pub fn as_url(v: &Yaml) -> anyhow::Result<String> {
    let s = as_string(v)?;
    if s.starts_with("http://") || s.starts_with("https://") {
        Ok(s)
    } else {
        Err(anyhow!("unsupported url scheme in {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_values() {
        assert_eq!(as_string(&Yaml::String("a".into())).unwrap(), "a");
        assert_eq!(as_string(&Yaml::Integer(8)).unwrap(), "8");
        assert_eq!(as_usize(&Yaml::Integer(8)).unwrap(), 8);
        assert!(as_usize(&Yaml::Integer(-8)).is_err());
    }

    #[test]
    fn node_name_value() {
        let name = as_metric_node_name(&Yaml::String("console".into())).unwrap();
        assert_eq!(name.as_str(), "console");
        assert!(as_metric_node_name(&Yaml::String("a b".into())).is_err());
    }

    #[test]
    fn sockaddr_value() {
        let addr = as_env_sockaddr(&Yaml::String("127.0.0.1:8125".into())).unwrap();
        assert_eq!(addr.port(), 8125);
        assert!(as_env_sockaddr(&Yaml::String("localhost:8125".into())).is_err());
    }
}
