/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! Logon credential material.
//!
//! Venues in the Deribit style authenticate a FIX logon with a challenge the
//! client builds itself: RawData (96) carries `"<epoch millis>.<nonce>"` and
//! Password (554) carries `base64(SHA256(raw_data + secret_key))`. The
//! message schema around these fields is user code; this module only
//! produces the strings.

use base64::{engine::general_purpose, Engine as _};
use ironwire_core::time::unix_now_nanos;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Nonce length in raw bytes, before base64.
const NONCE_LEN: usize = 32;

/// The two generated logon fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogonCredentials {
    /// Value for RawData (96): `"<epoch millis>.<base64 nonce>"`.
    pub raw_data: String,
    /// Value for Password (554): `base64(SHA256(raw_data + secret_key))`.
    pub password: String,
}

/// Signs logon raw data with the account secret.
#[must_use]
pub fn sign(raw_data: &str, secret_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_data.as_bytes());
    hasher.update(secret_key.as_bytes());
    general_purpose::STANDARD.encode(hasher.finalize())
}

/// Generates a fresh nonce and signs it for a logon.
#[must_use]
pub fn logon_credentials(secret_key: &str) -> LogonCredentials {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    let nonce64 = general_purpose::STANDARD.encode(nonce);
    let raw_data = format!("{}.{}", unix_now_nanos() / 1_000_000, nonce64);
    let password = sign(&raw_data, secret_key);
    LogonCredentials { raw_data, password }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironwire_codec::tags::{
        HeartBtInt, MsgSeqNum, Password, RawData, RawDataLength, SenderCompId, SendingTime,
        TargetCompId, Username,
    };
    use ironwire_codec::{fix_group, CharField, Fix44, Message, MessageType};
    use ironwire_core::msgtype::MsgType;
    use ironwire_core::time::ClockPrecision;

    // Venue-specific tag, declared like any standard one.
    type CancelOnDisconnect = CharField<9001>;

    fix_group! {
        struct LogonBody {
            msg_type: MessageType,
            seq: MsgSeqNum,
            sender: SenderCompId,
            target: TargetCompId,
            sending_time: SendingTime,
            raw_data_length: RawDataLength,
            raw_data: RawData,
            heart_bt_int: HeartBtInt,
            username: Username,
            password: Password,
            cancel_on_disconnect: CancelOnDisconnect,
        }
    }

    type Logon = Message<Fix44, LogonBody>;

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign("1739277818728.abc", "secret");
        let b = sign("1739277818728.abc", "secret");
        assert_eq!(a, b);
        // base64 of a 32-byte digest is 44 characters, '='-padded.
        assert_eq!(a.len(), 44);
        assert!(a.ends_with('='));
    }

    #[test]
    fn test_sign_depends_on_both_inputs() {
        let base = sign("raw", "secret");
        assert_ne!(sign("raw2", "secret"), base);
        assert_ne!(sign("raw", "secret2"), base);
    }

    #[test]
    fn test_logon_credentials_shape() {
        let creds = logon_credentials("secret");
        let (millis, nonce) = creds.raw_data.split_once('.').unwrap();
        assert!(millis.bytes().all(|b| b.is_ascii_digit()));
        // base64 of 32 nonce bytes.
        assert_eq!(nonce.len(), 44);
        assert_eq!(creds.password, sign(&creds.raw_data, "secret"));
    }

    #[test]
    fn test_logon_message_roundtrip() {
        let creds = logon_credentials("h1ghly-s3cret");

        let mut logon = Logon::new();
        logon.get_mut::<MessageType>().set(MsgType::Logon);
        logon.get_mut::<MsgSeqNum>().set(1);
        logon.get_mut::<SenderCompId>().set("WObvEb02");
        logon.get_mut::<TargetCompId>().set("DERIBITSERVER");
        logon
            .get_mut::<SendingTime>()
            .set_now(ClockPrecision::Millis);
        logon
            .get_mut::<RawDataLength>()
            .set(creds.raw_data.len() as i64);
        logon.get_mut::<RawData>().set(&creds.raw_data);
        logon.get_mut::<HeartBtInt>().set(15);
        logon.get_mut::<Username>().set("WObvEb02");
        logon.get_mut::<Password>().set(&creds.password);
        logon.get_mut::<CancelOnDisconnect>().set('Y');

        let mut buf = [0u8; 1024];
        let n = logon.dump(&mut buf, true, true);

        let mut parsed = Logon::new();
        assert_eq!(parsed.parse(&buf[..n]).unwrap(), n);
        assert_eq!(parsed, logon);
        assert_eq!(parsed.get::<MessageType>().get(), MsgType::Logon);
        assert_eq!(parsed.get::<HeartBtInt>().get(), Some(15));
        assert_eq!(parsed.get::<Username>().as_str(), "WObvEb02");
        assert_eq!(parsed.get::<Password>().as_str(), creds.password);
        assert_eq!(
            parsed.get::<RawDataLength>().get(),
            Some(creds.raw_data.len() as i64)
        );
        assert_eq!(parsed.get::<CancelOnDisconnect>().get(), Some('Y'));
    }
}
