/*
 * Copyright 2018 OysterPack Inc.
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

use chrono::SecondsFormat;
use exitfailure::ExitFailure;
use oysterpack_ulid_codec::{Generator, GeneratorConfig, Mode, ULID};
use serde::Serialize;
use structopt::{clap::AppSettings, StructOpt};
use uuid::Uuid;

#[cfg_attr(tarpaulin, skip)]
fn main() -> Result<(), ExitFailure> {
    Command::from_args().execute()?;
    Ok(())
}

#[derive(Debug, StructOpt)]
#[structopt(name = "oysterpack-ulid", setting = AppSettings::ColoredHelp)]
enum Command {
    #[structopt(name = "generate")]
    /// generate new ULID(s)
    Generate {
        /// number of ULIDs to generate
        #[structopt(short, long, default_value = "1")]
        count: usize,
        /// ordering of ULIDs generated within the same millisecond: monotonic | random
        #[structopt(short, long, default_value = "monotonic", parse(try_from_str))]
        mode: Mode,
    },
    #[structopt(name = "parse")]
    /// parse ULID represented as either a string, UUID, or u128 number
    /// - ULID strings are case insensitive. I, L, O, U are not valid Crockford Base32 symbols (https://crockford.com/wrmg/base32.html)
    Parse { ulid: String },
}

impl Command {
    fn execute(self) -> Result<(), failure::Error> {
        match self {
            Command::Generate { count, mode } => {
                let mut generator = Generator::from_config(&GeneratorConfig::new(mode));
                for _ in 0..count {
                    print_ulid(generator.generate())?;
                }
                Ok(())
            }
            Command::Parse { ulid } => print_ulid(parse_ulid(&ulid)?),
        }
    }
}

/// ULID strings take precedence, followed by UUIDs and then u128 numbers.
fn parse_ulid(ulid: &str) -> Result<ULID, failure::Error> {
    match ULID::from_string(ulid) {
        Ok(ulid) => Ok(ulid),
        Err(err) => Uuid::parse_str(ulid)
            .map(ULID::from_uuid)
            .or_else(|_| ulid.parse::<u128>().map(ULID::from))
            .map_err(|_| err.into()),
    }
}

#[derive(Debug, Serialize)]
struct UlidInfo {
    ulid: String,
    uuid: String,
    hex: String,
    timestamp_ms: u64,
    datetime: String,
    u128: String,
}

impl From<ULID> for UlidInfo {
    fn from(ulid: ULID) -> Self {
        let id: u128 = ulid.into();
        UlidInfo {
            ulid: ulid.to_string(),
            uuid: ulid.to_uuid().to_hyphenated().to_string(),
            hex: ulid.to_hex(),
            timestamp_ms: ulid.timestamp_ms(),
            datetime: ulid.datetime().to_rfc3339_opts(SecondsFormat::Millis, true),
            u128: id.to_string(),
        }
    }
}

fn print_ulid(ulid: ULID) -> Result<(), failure::Error> {
    println!("{}", serde_json::to_string(&UlidInfo::from(ulid))?);
    Ok(())
}
