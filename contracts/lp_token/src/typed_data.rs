//! Structured-data approvals.
//!
//! A permit is an ed25519 signature by an account over
//! `keccak256(0x19 || 0x01 || domain_separator || struct_hash)`, where the
//! struct hash commits to `(owner, spender, value, nonce, deadline)` and the
//! domain separator commits to the token name, version, network and contract.
//! Every field is encoded as a 32-byte word; addresses are hashed from their
//! XDR form first.

use ed25519_dalek::{Signature, VerifyingKey};
use soroban_sdk::{
    xdr::{FromXdr, ToXdr},
    Address, Bytes, BytesN, Env, String,
};

pub const PERMIT_TYPE: &[u8] =
    b"Permit(Address owner,Address spender,i128 value,u64 nonce,u64 deadline)";
pub const DOMAIN_TYPE: &[u8] =
    b"Domain(String name,String version,BytesN<32> networkId,Address verifyingContract)";
pub const VERSION: &[u8] = b"1";

/// XDR header of `ScVal::Address(ScAddress::Account(PublicKey::Ed25519(_)))`,
/// followed on the wire by the raw 32-byte key.
const ACCOUNT_XDR_HEADER: [u8; 12] = [0, 0, 0, 18, 0, 0, 0, 0, 0, 0, 0, 0];

fn keccak(env: &Env, data: &Bytes) -> BytesN<32> {
    env.crypto().keccak256(data).to_bytes()
}

fn push_word(buf: &mut Bytes, word: &BytesN<32>) {
    buf.append(&Bytes::from(word.clone()));
}

fn address_word(env: &Env, address: &Address) -> BytesN<32> {
    keccak(env, &address.clone().to_xdr(env))
}

fn i128_word(env: &Env, value: i128) -> BytesN<32> {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    BytesN::from_array(env, &word)
}

fn u64_word(env: &Env, value: u64) -> BytesN<32> {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    BytesN::from_array(env, &word)
}

pub fn permit_typehash(env: &Env) -> BytesN<32> {
    keccak(env, &Bytes::from_slice(env, PERMIT_TYPE))
}

/// Binds signatures to this token instance on this network. Must be called
/// from inside the token contract so `current_contract_address` is the token.
pub fn domain_separator(env: &Env, name: &String) -> BytesN<32> {
    let mut encoded = Bytes::new(env);
    push_word(&mut encoded, &keccak(env, &Bytes::from_slice(env, DOMAIN_TYPE)));
    push_word(&mut encoded, &keccak(env, &name.clone().to_xdr(env)));
    push_word(&mut encoded, &keccak(env, &Bytes::from_slice(env, VERSION)));
    push_word(&mut encoded, &env.ledger().network_id());
    push_word(&mut encoded, &address_word(env, &env.current_contract_address()));
    keccak(env, &encoded)
}

/// The 32-byte message an owner signs to grant `value` to `spender`.
pub fn approval_digest(
    env: &Env,
    domain_separator: &BytesN<32>,
    owner: &Address,
    spender: &Address,
    value: i128,
    nonce: u64,
    deadline: u64,
) -> BytesN<32> {
    let mut encoded = Bytes::new(env);
    push_word(&mut encoded, &permit_typehash(env));
    push_word(&mut encoded, &address_word(env, owner));
    push_word(&mut encoded, &address_word(env, spender));
    push_word(&mut encoded, &i128_word(env, value));
    push_word(&mut encoded, &u64_word(env, nonce));
    push_word(&mut encoded, &u64_word(env, deadline));
    let struct_hash = keccak(env, &encoded);

    let mut message = Bytes::from_array(env, &[0x19, 0x01]);
    push_word(&mut message, domain_separator);
    push_word(&mut message, &struct_hash);
    keccak(env, &message)
}

/// The account address controlled by an ed25519 public key.
pub fn account_address(env: &Env, public_key: &BytesN<32>) -> Option<Address> {
    let mut xdr = Bytes::from_array(env, &ACCOUNT_XDR_HEADER);
    xdr.append(&Bytes::from(public_key.clone()));
    Address::from_xdr(env, &xdr).ok()
}

/// Whether `signature` is a valid ed25519 signature by `public_key` over
/// `digest`. Malformed keys and non-canonical signatures do not verify.
pub fn verify(public_key: &BytesN<32>, digest: &BytesN<32>, signature: &BytesN<64>) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(&public_key.to_array()) else {
        return false;
    };
    key.verify_strict(&digest.to_array(), &Signature::from_bytes(&signature.to_array()))
        .is_ok()
}
