//! Host web-server integration
//!
//! A pre-forked host server usually installs its own handler on its
//! error logger. The fragment produced here tells the host to leave that
//! logger at NOTSET and propagate to the root instead, so host errors
//! flow through the configured rendering and sink like everything else.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Directive for one named logger inside a [`LogConfigFragment`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerDirective {
    pub level: String,
    pub propagate: bool,
}

/// Configuration fragment consumed by a host server's log setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfigFragment {
    pub version: u32,
    pub disable_existing_loggers: bool,
    pub loggers: BTreeMap<String, LoggerDirective>,
}

/// Build the fragment routing the host's error logger through the root:
/// inherit everything (NOTSET) and propagate upwards.
pub fn host_logconfig(error_logger: &str) -> LogConfigFragment {
    LogConfigFragment {
        version: 1,
        disable_existing_loggers: false,
        loggers: BTreeMap::from([(
            error_logger.to_string(),
            LoggerDirective {
                level: "NOTSET".to_string(),
                propagate: true,
            },
        )]),
    }
}
