/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Arg, ArgAction, Command, value_parser};

const ARGS_VERBOSE: &str = "verbose";
const ARGS_CONFIG_FILE: &str = "config-file";
const ARGS_TEST_CONFIG: &str = "test-config";

#[derive(Debug)]
pub struct ProcArgs {
    pub config_file: PathBuf,
    pub test_config: bool,
    pub verbose_level: u8,
}

pub fn parse_clap() -> anyhow::Result<ProcArgs> {
    let args = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(ARGS_VERBOSE)
                .help("Show verbose output")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v')
                .long(ARGS_VERBOSE),
        )
        .arg(
            Arg::new(ARGS_CONFIG_FILE)
                .help("Config file path")
                .num_args(1)
                .value_name("CONFIG FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .short('c')
                .long("config-file"),
        )
        .arg(
            Arg::new(ARGS_TEST_CONFIG)
                .help("Test the format of config file and exit")
                .action(ArgAction::SetTrue)
                .short('t')
                .long("test-config"),
        )
        .get_matches();

    let config_file = args
        .get_one::<PathBuf>(ARGS_CONFIG_FILE)
        .cloned()
        .ok_or_else(|| anyhow!("no config file set"))?;

    Ok(ProcArgs {
        config_file,
        test_config: args.get_flag(ARGS_TEST_CONFIG),
        verbose_level: args.get_count(ARGS_VERBOSE),
    })
}
