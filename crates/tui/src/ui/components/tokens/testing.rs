//! Test doubles shared by the component tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use tocky_types::{
    DisplayTime, Factor, GenerationError, OtpGenerator, PersistentToken, Token, TokenRef,
};

/// Builds a display time at `unix_time` seconds since the epoch.
pub fn display_time(unix_time: i64) -> DisplayTime {
    DisplayTime::new(DateTime::from_timestamp(unix_time, 0).expect("valid timestamp"))
}

fn stored(identifier: &[u8], name: &str, issuer: &str, generator: Arc<dyn OtpGenerator>) -> TokenRef {
    Arc::new(PersistentToken {
        identifier: identifier.to_vec(),
        token: Token {
            name: name.to_string(),
            issuer: issuer.to_string(),
            generator,
        },
    })
}

/// Generator scripted with a fixed password per sampled second; any other
/// second is out of range.
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    factor: Factor,
    passwords: HashMap<i64, String>,
}

impl ScriptedGenerator {
    pub fn counter() -> Self {
        Self {
            factor: Factor::Counter(0),
            passwords: HashMap::new(),
        }
    }

    pub fn timer() -> Self {
        Self {
            factor: Factor::Timer {
                period: Duration::from_secs(30),
            },
            passwords: HashMap::new(),
        }
    }

    pub fn at(mut self, unix_time: i64, password: &str) -> Self {
        self.passwords.insert(unix_time, password.to_string());
        self
    }

    pub fn into_token(self, identifier: &[u8], name: &str, issuer: &str) -> TokenRef {
        stored(identifier, name, issuer, Arc::new(self))
    }
}

impl OtpGenerator for ScriptedGenerator {
    fn factor(&self) -> Factor {
        self.factor
    }

    fn password_at_time(&self, unix_time: i64) -> Result<String, GenerationError> {
        self.passwords
            .get(&unix_time)
            .cloned()
            .ok_or(GenerationError::InvalidTime(unix_time))
    }
}

/// Generator answering the same password at every instant.
#[derive(Debug, Clone)]
pub struct FixedGenerator {
    factor: Factor,
    password: String,
}

impl OtpGenerator for FixedGenerator {
    fn factor(&self) -> Factor {
        self.factor
    }

    fn password_at_time(&self, _unix_time: i64) -> Result<String, GenerationError> {
        Ok(self.password.clone())
    }
}

/// Generator that refuses every request.
#[derive(Debug)]
pub struct FailingGenerator;

impl FailingGenerator {
    pub fn into_token(self, identifier: &[u8], name: &str, issuer: &str) -> TokenRef {
        stored(identifier, name, issuer, Arc::new(self))
    }
}

impl OtpGenerator for FailingGenerator {
    fn factor(&self) -> Factor {
        Factor::Timer {
            period: Duration::from_secs(30),
        }
    }

    fn password_at_time(&self, _unix_time: i64) -> Result<String, GenerationError> {
        Err(GenerationError::InvalidSecret)
    }
}

/// Counter credential whose generator answers `password` at any instant.
pub fn counter_token(identifier: &[u8], name: &str, issuer: &str, password: &str) -> TokenRef {
    stored(
        identifier,
        name,
        issuer,
        Arc::new(FixedGenerator {
            factor: Factor::Counter(0),
            password: password.to_string(),
        }),
    )
}

/// Time-based credential whose generator answers `password` at any instant.
pub fn timer_token(identifier: &[u8], name: &str, issuer: &str, password: &str) -> TokenRef {
    stored(
        identifier,
        name,
        issuer,
        Arc::new(FixedGenerator {
            factor: Factor::Timer {
                period: Duration::from_secs(30),
            },
            password: password.to_string(),
        }),
    )
}
