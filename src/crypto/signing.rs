// Signs and verifies the one-shot flash notice carried across redirects.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

// Domain separation so the tag cannot be replayed for any other signed value.
const FLASH_DOMAIN: &[u8] = b"BOOKSHELF_FLASH";

fn tag(secret: &[u8], message: &[u8]) -> Option<HmacSha256> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret).ok()?;
    mac.update(FLASH_DOMAIN);
    mac.update(message);
    Some(mac)
}

/// Encodes `message` as `base64url(message).hex(hmac)`, safe for a cookie value.
///
/// `None` only if the key is rejected by the MAC.
pub fn sign_message(secret: &[u8], message: &str) -> Option<String> {
    let mac = tag(secret, message.as_bytes())?;
    Some(format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(message.as_bytes()),
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Returns the message if the value was produced by `sign_message` with the same secret.
pub fn verify_message(secret: &[u8], value: &str) -> Option<String> {
    let (payload, sig) = value.split_once('.')?;
    let message = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let sig = hex::decode(sig).ok()?;
    tag(secret, &message)?.verify_slice(&sig).ok()?;
    String::from_utf8(message).ok()
}
