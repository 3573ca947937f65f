/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! Session configuration.
//!
//! The knobs a trading-venue adapter needs to open a session: the remote
//! endpoint, the comp IDs for the standard header, the heartbeat cadence,
//! and the API credentials feeding the logon signature. Loading these from
//! files or flags is the application's business.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one FIX session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Remote host name or address.
    pub remote_address: String,
    /// Remote TCP port.
    pub port: u16,
    /// SenderCompID (tag 49).
    pub sender_comp_id: String,
    /// TargetCompID (tag 56).
    pub target_comp_id: String,
    /// Heartbeat interval.
    pub heartbeat_interval: Duration,
    /// API key, sent as Username (553) during logon.
    pub api_key: String,
    /// API secret feeding the logon signature.
    pub secret_key: String,
}

impl SessionConfig {
    /// Creates a configuration with a 15-second heartbeat and no
    /// credentials.
    #[must_use]
    pub fn new(
        remote_address: impl Into<String>,
        port: u16,
        sender_comp_id: impl Into<String>,
        target_comp_id: impl Into<String>,
    ) -> Self {
        Self {
            remote_address: remote_address.into(),
            port,
            sender_comp_id: sender_comp_id.into(),
            target_comp_id: target_comp_id.into(),
            heartbeat_interval: Duration::from_secs(15),
            api_key: String::new(),
            secret_key: String::new(),
        }
    }

    /// Sets the heartbeat interval.
    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Sets the API credentials used at logon.
    #[must_use]
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.api_key = api_key.into();
        self.secret_key = secret_key.into();
        self
    }

    /// Heartbeat interval in whole seconds, as carried by HeartBtInt (108).
    #[must_use]
    pub fn heartbeat_interval_secs(&self) -> u64 {
        self.heartbeat_interval.as_secs()
    }
}
