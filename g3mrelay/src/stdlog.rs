/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};
use std::thread;

use chrono::Local;
use flume::{Receiver, Sender};
use log::{Level, LevelFilter, Log, Metadata, Record};

const DEFAULT_CHANNEL_CAPACITY: usize = 4096;

struct StdLogValue {
    level: Level,
    target: String,
    message: String,
}

/// Installs the process logger: a bounded channel into a dedicated IO
/// thread writing timestamped lines to stderr. A full channel drops
/// records instead of stalling the pipeline.
pub fn setup(verbose_level: u8) -> anyhow::Result<()> {
    let max_level = match verbose_level {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let (sender, receiver) = flume::bounded::<StdLogValue>(DEFAULT_CHANNEL_CAPACITY);

    let io_thread = AsyncIoThread { receiver };
    let _detached_thread = thread::Builder::new()
        .name("stdlog".to_string())
        .spawn(move || io_thread.run_with_stderr());

    log::set_boxed_logger(Box::new(AsyncStdLogger { sender }))?;
    log::set_max_level(max_level);
    Ok(())
}

struct AsyncStdLogger {
    sender: Sender<StdLogValue>,
}

impl Log for AsyncStdLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let value = StdLogValue {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        let _ = self.sender.try_send(value);
    }

    fn flush(&self) {}
}

struct AsyncIoThread {
    receiver: Receiver<StdLogValue>,
}

impl AsyncIoThread {
    fn run_with_stderr(self) {
        let mut stderr = io::stderr();
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Ok(v) = self.receiver.recv() {
            buf.clear();
            let _ = self.write_plain(&mut buf, v);

            while let Ok(v) = self.receiver.try_recv() {
                let _ = self.write_plain(&mut buf, v);
            }

            let _ = stderr.write_all(&buf);
            let _ = stderr.flush();
        }
    }

    fn write_plain<IO: Write>(&self, io: &mut IO, v: StdLogValue) -> io::Result<()> {
        let datetime = Local::now();
        write!(io, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.6f"))?;
        write!(io, " {} {}: {}", v.level, v.target, v.message)?;
        writeln!(io)?;
        Ok(())
    }
}
