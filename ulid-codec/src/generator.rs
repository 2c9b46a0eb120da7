/*
 * Copyright 2019 OysterPack Inc.
 *
 *    Licensed under the Apache License, Version 2.0 (the "License");
 *    you may not use this file except in compliance with the License.
 *    You may obtain a copy of the License at
 *
 *        http://www.apache.org/licenses/LICENSE-2.0
 *
 *    Unless required by applicable law or agreed to in writing, software
 *    distributed under the License is distributed on an "AS IS" BASIS,
 *    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *    See the License for the specific language governing permissions and
 *    limitations under the License.
 */

//! ULID generator with an explicit ordering [Mode](enum.Mode.html).
//!
//! [ULID::generate()](../ulid/struct.ULID.html#method.generate) is stateless: ULIDs created within
//! the same millisecond are ordered by their random part, i.e., randomly. A [Generator](struct.Generator.html)
//! remembers the last ULID it produced, which enables strictly monotonic ULIDs.
//!
//! ```rust
//! # use oysterpack_ulid_codec::generator::*;
//! let mut generator = Generator::new();
//! let id_1 = generator.generate();
//! let id_2 = generator.generate();
//! assert!(id_1 < id_2);
//! ```
//!
//! A Generator is owned. To share one across threads, wrap it in a `Mutex`.

use crate::config::GeneratorConfig;
use crate::ulid::{MAX_TIMESTAMP_MS, ULID};
use chrono::Utc;
use log::{debug, error, warn};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// ULID ordering mode
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Each ULID gets fresh random bits. ULIDs within the same millisecond are not ordered.
    Random,
    /// Within the same millisecond, the previous random part is incremented by one.
    Monotonic,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Monotonic
    }
}

impl FromStr for Mode {
    type Err = String;

    /// accepts the snake_case names, i.e., `random` and `monotonic`
    fn from_str(mode: &str) -> Result<Mode, String> {
        match mode {
            "random" => Ok(Mode::Random),
            "monotonic" => Ok(Mode::Monotonic),
            _ => Err(format!("invalid mode: {}", mode)),
        }
    }
}

/// Millisecond clock
pub trait Clock: Send + Sync {
    /// milliseconds since the UNIX epoch
    fn now_ms(&self) -> u64;
}

/// Wall clock time
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        let millis = Utc::now().timestamp_millis();
        if millis < 0 {
            0
        } else {
            (millis as u64).min(MAX_TIMESTAMP_MS)
        }
    }
}

/// Generates ULIDs according to its [Mode](enum.Mode.html)
pub struct Generator<C: Clock = SystemClock, R: RngCore = StdRng> {
    mode: Mode,
    clock: C,
    rng: R,
    last: Option<ULID>,
}

impl Generator {
    /// Monotonic generator using the system clock and an entropy seeded RNG
    pub fn new() -> Generator {
        Generator::from_config(&GeneratorConfig::default())
    }

    /// Constructs a generator using the system clock and an entropy seeded RNG
    pub fn from_config(config: &GeneratorConfig) -> Generator {
        Generator::with_clock_and_rng(config.mode(), SystemClock, StdRng::from_entropy())
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new()
    }
}

impl<C: Clock, R: RngCore> Generator<C, R> {
    /// Constructor
    pub fn with_clock_and_rng(mode: Mode, clock: C, rng: R) -> Generator<C, R> {
        Generator {
            mode,
            clock,
            rng,
            last: None,
        }
    }

    /// Returns the generator mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the last generated ULID
    pub fn last(&self) -> Option<ULID> {
        self.last
    }

    /// Generates the next ULID.
    ///
    /// In monotonic mode, the returned ULID is strictly greater than the previous one, even if the
    /// clock moves backwards. When the random part is exhausted within a millisecond, the ULID is
    /// pushed into the next millisecond.
    ///
    /// The exception is exhaustion at `MAX_TIMESTAMP_MS`: there is no next millisecond, so an error
    /// is logged and a random ULID at `MAX_TIMESTAMP_MS` is returned. It may be less than, or equal
    /// to, the previous ULID.
    pub fn generate(&mut self) -> ULID {
        let now = self.clock.now_ms().min(MAX_TIMESTAMP_MS);
        let ulid = match (self.mode, self.last) {
            (Mode::Monotonic, Some(last)) if now <= last.timestamp_ms() => {
                if now < last.timestamp_ms() {
                    warn!(
                        "clock moved backwards: {} ms < {} ms",
                        now,
                        last.timestamp_ms()
                    );
                }
                self.next_after(last)
            }
            _ => self.random_ulid(now),
        };
        self.last = Some(ulid);
        ulid
    }

    fn next_after(&mut self, last: ULID) -> ULID {
        if let Some(next) = last.checked_increment() {
            return next;
        }
        let timestamp_ms = last.timestamp_ms();
        if timestamp_ms < MAX_TIMESTAMP_MS {
            debug!(
                "random part overflowed at {} ms - moving to the next millisecond",
                timestamp_ms
            );
            self.random_ulid(timestamp_ms + 1)
        } else {
            error!("ULID space is exhausted - monotonic ordering cannot be maintained");
            self.random_ulid(MAX_TIMESTAMP_MS)
        }
    }

    fn random_ulid(&mut self, timestamp_ms: u64) -> ULID {
        let mut randomness = [0u8; 16];
        self.rng.fill_bytes(&mut randomness[6..]);
        ULID::from_parts(timestamp_ms, u128::from_be_bytes(randomness))
    }
}

impl<C: Clock, R: RngCore> fmt::Debug for Generator<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Generator")
            .field("mode", &self.mode)
            .field("last", &self.last)
            .finish()
    }
}
