// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

/// A point in time, in milliseconds since the Unix epoch. The zero
/// timestamp is a sentinel meaning "never".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The "never seen" sentinel.
    pub const NEVER: Timestamp = Timestamp(0);

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn into_millis(self) -> i64 {
        self.0
    }

    pub fn is_never(self) -> bool {
        self.0 == 0
    }

    /// The current time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    /// Fractional minutes elapsed from `earlier` to `self`, clamped at
    /// zero when `earlier` is in the future.
    pub fn minutes_since(self, earlier: Timestamp) -> f64 {
        ((self.0 - earlier.0) as f64 / 60_000.0).max(0.0)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::NEVER
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_never() {
            return write!(f, "never");
        }
        match chrono::DateTime::from_timestamp_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_since() {
        let earlier = Timestamp::from_millis(1_000_000);
        let now = Timestamp::from_millis(1_000_000 + 90_000);
        assert_eq!(now.minutes_since(earlier), 1.5);
    }

    #[test]
    fn test_minutes_since_clamps_future() {
        let earlier = Timestamp::from_millis(2_000_000);
        let now = Timestamp::from_millis(1_000_000);
        assert_eq!(now.minutes_since(earlier), 0.0);
    }

    #[test]
    fn test_never_is_ancient() {
        // Any realistic clock reading is far more than 50 minutes after
        // the epoch.
        let now = Timestamp::from_millis(1_700_000_000_000);
        assert!(now.minutes_since(Timestamp::NEVER) > 50.0);
    }

    #[test]
    fn test_serialize_as_integer() {
        let ts = Timestamp::from_millis(1234);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1234");
        let back: Timestamp = serde_json::from_str("1234").unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_display() {
        assert_eq!(Timestamp::NEVER.to_string(), "never");
        let ts = Timestamp::from_millis(1_700_000_000_000);
        assert_eq!(ts.to_string(), "2023-11-14T22:13:20.000Z");
    }
}
