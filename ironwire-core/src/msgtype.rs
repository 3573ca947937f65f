/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! FIX message-type dispatch table.
//!
//! The framing engine maps the ASCII code of tag 35 to [`MsgType`] before
//! invoking the visitor. Codes outside the table dispatch as
//! [`MsgType::Unknown`]; deciding what to do with those is the visitor's
//! responsibility.

use serde::{Deserialize, Serialize};
use std::fmt;

/// FIX 4.x message types handled by the engine dispatch table.
///
/// The set covers the session-level administrative messages plus the
/// market-data and order-entry application messages of a trading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MsgType {
    /// Heartbeat (0) - Session level.
    Heartbeat,
    /// Test Request (1) - Session level.
    TestRequest,
    /// Resend Request (2) - Session level.
    ResendRequest,
    /// Reject (3) - Session level.
    Reject,
    /// Sequence Reset (4) - Session level.
    SequenceReset,
    /// Logout (5) - Session level.
    Logout,
    /// Execution Report (8).
    ExecutionReport,
    /// Order Cancel Reject (9).
    OrderCancelReject,
    /// Logon (A) - Session level.
    Logon,
    /// New Order Single (D).
    NewOrderSingle,
    /// Order Cancel Request (F).
    OrderCancelRequest,
    /// Order Cancel/Replace Request (G).
    OrderCancelReplaceRequest,
    /// Order Status Request (H).
    OrderStatusRequest,
    /// Quote Request (R).
    QuoteRequest,
    /// Quote (S).
    Quote,
    /// Market Data Request (V).
    MarketDataRequest,
    /// Market Data Snapshot/Full Refresh (W).
    MarketDataSnapshotFullRefresh,
    /// Market Data Incremental Refresh (X).
    MarketDataIncrementalRefresh,
    /// Market Data Request Reject (Y).
    MarketDataRequestReject,
    /// Any code outside the dispatch table.
    #[default]
    Unknown,
}

impl MsgType {
    /// Maps an ASCII message-type code to its enum value.
    ///
    /// Unrecognized codes map to [`MsgType::Unknown`]; this function never
    /// fails.
    ///
    /// # Arguments
    /// * `code` - The raw bytes of the tag 35 value
    #[must_use]
    pub fn from_code(code: &[u8]) -> Self {
        match code {
            b"0" => Self::Heartbeat,
            b"1" => Self::TestRequest,
            b"2" => Self::ResendRequest,
            b"3" => Self::Reject,
            b"4" => Self::SequenceReset,
            b"5" => Self::Logout,
            b"8" => Self::ExecutionReport,
            b"9" => Self::OrderCancelReject,
            b"A" => Self::Logon,
            b"D" => Self::NewOrderSingle,
            b"F" => Self::OrderCancelRequest,
            b"G" => Self::OrderCancelReplaceRequest,
            b"H" => Self::OrderStatusRequest,
            b"R" => Self::QuoteRequest,
            b"S" => Self::Quote,
            b"V" => Self::MarketDataRequest,
            b"W" => Self::MarketDataSnapshotFullRefresh,
            b"X" => Self::MarketDataIncrementalRefresh,
            b"Y" => Self::MarketDataRequestReject,
            _ => Self::Unknown,
        }
    }

    /// Returns the ASCII code of this message type.
    ///
    /// [`MsgType::Unknown`] renders as the empty string, which a message-type
    /// field treats as unset.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::ResendRequest => "2",
            Self::Reject => "3",
            Self::SequenceReset => "4",
            Self::Logout => "5",
            Self::ExecutionReport => "8",
            Self::OrderCancelReject => "9",
            Self::Logon => "A",
            Self::NewOrderSingle => "D",
            Self::OrderCancelRequest => "F",
            Self::OrderCancelReplaceRequest => "G",
            Self::OrderStatusRequest => "H",
            Self::QuoteRequest => "R",
            Self::Quote => "S",
            Self::MarketDataRequest => "V",
            Self::MarketDataSnapshotFullRefresh => "W",
            Self::MarketDataIncrementalRefresh => "X",
            Self::MarketDataRequestReject => "Y",
            Self::Unknown => "",
        }
    }

    /// Returns true if this is a session-level administrative message.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(
            self,
            Self::Heartbeat
                | Self::TestRequest
                | Self::ResendRequest
                | Self::Reject
                | Self::SequenceReset
                | Self::Logout
                | Self::Logon
        )
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
