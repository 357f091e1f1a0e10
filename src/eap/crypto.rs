//! RFC 2759 MS-CHAPv2 cryptographic primitives.
//!
//! The key-expansion and triple-DES structure here mirrors the NTLMv2
//! response computation elsewhere in this crate's auth code: both turn a
//! password hash into a set of DES/HMAC operations over a server-supplied
//! challenge, just keyed by different RFCs (2759 here, MS-NLMP there).

use cipher::generic_array::GenericArray;
use cipher::{BlockEncrypt, KeyInit};
use des::Des;
use md4::Md4;
use rand::RngCore;
use sha1::{Digest, Sha1};

const MAGIC1: &[u8] = b"Magic server to client signing constant";
const MAGIC2: &[u8] = b"Pad to make it do more than one iteration";

/// RFC 2759 §8.1: SHA1(PeerChallenge || AuthenticatorChallenge || UserName)[0..8].
pub fn challenge_hash(peer_challenge: &[u8; 16], auth_challenge: &[u8; 16], user_name: &[u8]) -> [u8; 8] {
    let mut hasher = Sha1::new();
    hasher.update(peer_challenge);
    hasher.update(auth_challenge);
    hasher.update(user_name);
    let digest = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

/// RFC 2759 §8.3: MD4(UTF-16LE(password)).
pub fn nt_password_hash(password: &str) -> [u8; 16] {
    let utf16: Vec<u8> = password.encode_utf16().flat_map(|c| c.to_le_bytes()).collect();
    let mut hasher = Md4::new();
    hasher.update(&utf16);
    let digest = hasher.finalize();
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest);
    out
}

/// RFC 2759 §8.4: MD4(NtPasswordHash), used for the Authenticator Response.
pub fn hash_nt_password_hash(hash: &[u8; 16]) -> [u8; 16] {
    let mut hasher = Md4::new();
    hasher.update(hash);
    let digest = hasher.finalize();
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest);
    out
}

/// Spreads a 7-byte DES key into the 8-byte form DES expects, inserting a
/// parity bit (left unset) after every 7 bits of key material.
fn expand_des_key(key7: &[u8]) -> [u8; 8] {
    debug_assert_eq!(key7.len(), 7);
    let mut out = [0u8; 8];
    let mut next: u8 = 0;
    for i in 0..7 {
        out[i] = (key7[i] >> i) | next;
        next = key7[i] << (7 - i);
    }
    out[7] = next;
    out
}

fn des_encrypt(block: &[u8; 8], key7: &[u8]) -> [u8; 8] {
    let key = expand_des_key(key7);
    let cipher = Des::new(GenericArray::from_slice(&key));
    let mut buf = GenericArray::clone_from_slice(block);
    cipher.encrypt_block(&mut buf);
    let mut out = [0u8; 8];
    out.copy_from_slice(&buf);
    out
}

/// RFC 2759 §8.5: zero-pads the 16-byte password hash to 21 bytes, splits
/// it into three 7-byte DES keys, and encrypts `challenge` under each.
pub fn challenge_response(challenge: &[u8; 8], password_hash: &[u8; 16]) -> [u8; 24] {
    let mut zpwd = [0u8; 21];
    zpwd[..16].copy_from_slice(password_hash);

    let mut response = [0u8; 24];
    response[0..8].copy_from_slice(&des_encrypt(challenge, &zpwd[0..7]));
    response[8..16].copy_from_slice(&des_encrypt(challenge, &zpwd[7..14]));
    response[16..24].copy_from_slice(&des_encrypt(challenge, &zpwd[14..21]));
    response
}

pub fn random_peer_challenge() -> [u8; 16] {
    let mut challenge = [0u8; 16];
    rand::rng().fill_bytes(&mut challenge);
    challenge
}

/// RFC 2759 §8.1: the 24-byte NT-Response carried in an MS-CHAPv2 Response.
pub fn generate_nt_response(
    user_name: &str,
    password: &str,
    auth_challenge: &[u8; 16],
    peer_challenge: &[u8; 16],
) -> [u8; 24] {
    let challenge = challenge_hash(peer_challenge, auth_challenge, user_name.as_bytes());
    let password_hash = nt_password_hash(password);
    challenge_response(&challenge, &password_hash)
}

/// RFC 2759 §8.7: the Authenticator Response the server is expected to send
/// back on success, derived independently here so it can be verified.
pub fn generate_authenticator_response(
    user_name: &str,
    password: &str,
    nt_response: &[u8; 24],
    peer_challenge: &[u8; 16],
    auth_challenge: &[u8; 16],
) -> [u8; 20] {
    let password_hash = nt_password_hash(password);
    let password_hash_hash = hash_nt_password_hash(&password_hash);

    let mut hasher = Sha1::new();
    hasher.update(password_hash_hash);
    hasher.update(nt_response);
    hasher.update(MAGIC1);
    let digest = hasher.finalize();

    let challenge = challenge_hash(peer_challenge, auth_challenge, user_name.as_bytes());

    let mut hasher = Sha1::new();
    hasher.update(digest);
    hasher.update(challenge);
    hasher.update(MAGIC2);
    let digest = hasher.finalize();

    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}
