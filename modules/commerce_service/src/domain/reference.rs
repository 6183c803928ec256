//! Payment reference generation

use chrono::{DateTime, Utc};
use rand::{distr::Alphanumeric, Rng};

const PREFIX: &str = "IDGM";
const SUFFIX_LEN: usize = 8;

/// `IDGM-<unix-millis>-<8 random alphanumerics>`
pub fn generate_reference(now: DateTime<Utc>) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();

    format!("{}-{}-{}", PREFIX, now.timestamp_millis(), suffix)
}
