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

//! Generator config

use crate::generator::Mode;
use serde::{Deserialize, Serialize};

/// [Generator](../generator/struct.Generator.html) config.
///
/// Missing fields fall back to their defaults, i.e., `{}` yields a monotonic generator config.
///
/// ```rust
/// # use oysterpack_ulid_codec::{GeneratorConfig, Mode};
/// let config = GeneratorConfig::default();
/// assert_eq!(config.mode(), Mode::Monotonic);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    mode: Mode,
}

impl GeneratorConfig {
    /// constructor
    pub fn new(mode: Mode) -> GeneratorConfig {
        GeneratorConfig { mode }
    }

    /// ULID ordering mode
    pub fn mode(&self) -> Mode {
        self.mode
    }
}
