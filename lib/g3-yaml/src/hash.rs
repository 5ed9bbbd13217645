/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, yaml};

pub fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in table.iter() {
        if let Yaml::String(key) = k {
            f(key, v).context(format!("failed to parse value of key {key}"))?;
        } else {
            return Err(anyhow!("key in hash should be string"));
        }
    }
    Ok(())
}

pub fn get_required<'a>(map: &'a yaml::Hash, k: &str) -> anyhow::Result<&'a Yaml> {
    let key = Yaml::String(k.to_owned());
    match map.get(&key) {
        Some(v) => Ok(v),
        None => Err(anyhow!("no required key {k} found in this map")),
    }
}

pub fn get_required_str<'a>(map: &'a yaml::Hash, k: &str) -> anyhow::Result<&'a str> {
    let v = get_required(map, k)?;
    if let Yaml::String(s) = v {
        Ok(s)
    } else {
        Err(anyhow!("invalid string value for required key {k}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    fn load_hash(s: &str) -> yaml::Hash {
        let mut docs = YamlLoader::load_from_str(s).unwrap();
        match docs.pop().unwrap() {
            Yaml::Hash(map) => map,
            _ => panic!("not a map"),
        }
    }

    #[test]
    fn kv_iteration() {
        let map = load_hash("a: 1\nb: 2");
        let mut seen = Vec::new();
        foreach_kv(&map, |k, v| {
            seen.push((k.to_string(), v.as_i64().unwrap()));
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn required_keys() {
        let map = load_hash("type: console");
        assert_eq!(get_required_str(&map, "type").unwrap(), "console");
        assert!(get_required(&map, "name").is_err());
    }
}
