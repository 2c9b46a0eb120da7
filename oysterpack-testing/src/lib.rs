// Copyright 2018 OysterPack Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Standardizes test logging.
//!
//! Logging is initialized once per test binary. The root level is Warn, while the ULID crates log at Debug.
//!
//! ```rust
//! # use oysterpack_testing::run_test;
//! # use log::info;
//! run_test("doc_test", || info!("it works"));
//! ```

#![deny(missing_docs, missing_debug_implementations)]

#[macro_use]
extern crate lazy_static;

use log::info;
use std::{io, time::Instant};

/// log targets that are logged at Debug level
pub const DEBUG_TARGETS: &[&str] = &[
    "oysterpack_ulid",
    "oysterpack_ulid_codec",
    "oysterpack_ulid_field",
];

fn init_logging() -> Result<(), fern::InitError> {
    let dispatch = DEBUG_TARGETS.iter().fold(
        fern::Dispatch::new().level(log::LevelFilter::Warn),
        |dispatch, target| dispatch.level_for(*target, log::LevelFilter::Debug),
    );
    dispatch
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}][{}:{}] {}",
                chrono::Local::now().format("[%H:%M:%S%.3f]"),
                record.level(),
                record.target(),
                record.file().unwrap_or("<unknown>"),
                record.line().unwrap_or(0),
                message
            ))
        })
        .chain(io::stdout())
        .apply()?;
    Ok(())
}

lazy_static! {
    static ref INIT_FERN: Result<(), String> = init_logging().map_err(|err| err.to_string());
}

/// Initializes logging, if not already initialized, and then runs the test.
/// The test run time is logged at Info level.
pub fn run_test<F: FnOnce() -> ()>(name: &str, test: F) {
    if let Err(err) = &*INIT_FERN {
        eprintln!("failed to initialize test logging: {}", err);
    }
    let before = Instant::now();
    test();
    info!(
        target: "oysterpack_ulid",
        "{}: test run time: {:?}",
        name,
        before.elapsed()
    );
}
