//! Trust bundle (C7, spec §4.6) and its wire format (spec §6.3).
//!
//! A [`Receipt`] is a tamper-evident description of one redaction call:
//! hashes of the input and output, a canonical manifest of the final spans,
//! a Merkle root over per-span hashes, and an optional HMAC plus hash-chain
//! link to the previous receipt in the same session. Verification
//! recomputes everything from scratch and compares — there is no trusted
//! stored state to consult beyond the receipt itself.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::TrustError;
use crate::policy::Policy;
use crate::span::Span;

type HmacSha256 = Hmac<Sha256>;

/// One entry of the receipt's manifest: everything about a span except
/// `originalValue`, which a receipt must never carry (spec §4.6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestEntry {
    pub category: &'static str,
    pub char_start: usize,
    pub char_end: usize,
    pub replacement: String,
    pub confidence: f32,
}

impl ManifestEntry {
    pub fn from_span(span: &Span) -> Self {
        ManifestEntry {
            category: span.filter_type.token(),
            char_start: span.char_start,
            char_end: span.char_end,
            replacement: span.replacement.clone().unwrap_or_default(),
            confidence: span.confidence,
        }
    }
}

/// Tamper-evident receipt for a single redaction call (spec §4.6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    pub hash_original: String,
    pub hash_redacted: String,
    pub hash_manifest: String,
    pub merkle_root: String,
    pub timestamp: u64,
    pub document_id: Uuid,
    pub policy_fingerprint: String,
    pub engine_version: String,
    pub hmac: Option<String>,
    /// Merkle root of the previous receipt in the same session; `None` for
    /// the first receipt, forming a hash chain thereafter.
    pub prior_root: Option<String>,
}

/// Builds a [`Receipt`] for a completed redaction, hashing the original and
/// redacted byte buffers and the canonical manifest derived from `spans`.
pub fn build_receipt(
    original: &str,
    redacted: &str,
    spans: &[Span],
    policy: &Policy,
    document_id: Uuid,
    prior_root: Option<String>,
    now_unix_seconds: u64,
) -> Result<Receipt, TrustError> {
    let hash_original = hex_sha256(original.as_bytes());
    let hash_redacted = hex_sha256(redacted.as_bytes());

    let manifest: Vec<ManifestEntry> = spans.iter().map(ManifestEntry::from_span).collect();
    let manifest_json = canonical_manifest_json(&manifest)?;
    let hash_manifest = hex_sha256(manifest_json.as_bytes());

    let merkle_root = merkle_root_hex(&manifest);

    let hmac = policy.hmac_key.as_ref().map(|key| {
        compute_hmac(
            key,
            &hash_original,
            &hash_redacted,
            &hash_manifest,
            &merkle_root,
        )
    });

    Ok(Receipt {
        hash_original,
        hash_redacted,
        hash_manifest,
        merkle_root,
        timestamp: now_unix_seconds,
        document_id,
        policy_fingerprint: hex::encode(policy.fingerprint()),
        engine_version: crate::config::APP_VERSION.to_string(),
        hmac,
        prior_root,
    })
}

/// Convenience wrapper using the wall clock; kept separate from
/// [`build_receipt`] so tests can supply a fixed timestamp deterministically.
pub fn build_receipt_now(
    original: &str,
    redacted: &str,
    spans: &[Span],
    policy: &Policy,
    document_id: Uuid,
    prior_root: Option<String>,
) -> Result<Receipt, TrustError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    build_receipt(original, redacted, spans, policy, document_id, prior_root, now)
}

/// Independently recomputes every hash in `receipt` from `original_text`,
/// `redacted_text`, and the span set implied by `manifest`, and compares.
/// Spec §4.6: "an independent verifier reconstructs hashRedacted,
/// hashManifest, and merkleRoot, then compares. A mismatch signals
/// tampering."
pub fn verify_receipt(
    receipt: &Receipt,
    original_text: &str,
    redacted_text: &str,
    manifest: &[ManifestEntry],
    policy: &Policy,
) -> VerifyResult {
    if hex_sha256(original_text.as_bytes()) != receipt.hash_original {
        return VerifyResult::invalid("hashOriginal mismatch");
    }
    if hex_sha256(redacted_text.as_bytes()) != receipt.hash_redacted {
        return VerifyResult::invalid("hashRedacted mismatch");
    }

    let manifest_json = match canonical_manifest_json(manifest) {
        Ok(j) => j,
        Err(_) => return VerifyResult::invalid("manifest could not be canonicalised"),
    };
    if hex_sha256(manifest_json.as_bytes()) != receipt.hash_manifest {
        return VerifyResult::invalid("hashManifest mismatch");
    }

    if merkle_root_hex(manifest) != receipt.merkle_root {
        return VerifyResult::invalid("merkleRoot mismatch");
    }

    if hex::encode(policy.fingerprint()) != receipt.policy_fingerprint {
        return VerifyResult::invalid("policyFingerprint mismatch");
    }

    if let (Some(key), Some(claimed_hmac)) = (policy.hmac_key.as_ref(), receipt.hmac.as_ref()) {
        let expected = compute_hmac(
            key,
            &receipt.hash_original,
            &receipt.hash_redacted,
            &receipt.hash_manifest,
            &receipt.merkle_root,
        );
        if &expected != claimed_hmac {
            return VerifyResult::invalid("hmac mismatch");
        }
    }

    VerifyResult { valid: true, reason: None }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    pub valid: bool,
    pub reason: Option<String>,
}

impl VerifyResult {
    fn invalid(reason: &str) -> Self {
        VerifyResult { valid: false, reason: Some(reason.to_string()) }
    }
}

fn compute_hmac(key: &str, hash_original: &str, hash_redacted: &str, hash_manifest: &str, merkle_root: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(hash_original.as_bytes());
    mac.update(hash_redacted.as_bytes());
    mac.update(hash_manifest.as_bytes());
    mac.update(merkle_root.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn hex_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Sorted-key, no-whitespace JSON (spec §6.2, §4.6), via the same
/// `Value`-round-trip re-sort the policy fingerprint uses
/// ([`crate::canonical::to_canonical_json`]) — `serde_json::to_string`
/// alone would emit `ManifestEntry`'s fields in declaration order, which an
/// independent verifier reconstructing `hashManifest` from raw JSON has no
/// reason to reproduce.
fn canonical_manifest_json(manifest: &[ManifestEntry]) -> Result<String, TrustError> {
    crate::canonical::to_canonical_json(manifest).map_err(|e| TrustError::Canonicalization(e.to_string()))
}

/// Leaf hash for one manifest entry: `SHA-256(category || charStart ||
/// charEnd || replacement)` (spec §4.6).
fn leaf_hash(entry: &ManifestEntry) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(entry.category.as_bytes());
    hasher.update(entry.char_start.to_le_bytes());
    hasher.update(entry.char_end.to_le_bytes());
    hasher.update(entry.replacement.as_bytes());
    hasher.finalize().into()
}

/// Builds a binary Merkle tree over the manifest's leaf hashes, padding
/// with zero leaves to the next power of two, and returns the hex-encoded
/// root. An empty manifest hashes to the zero leaf itself.
fn merkle_root_hex(manifest: &[ManifestEntry]) -> String {
    let mut level: Vec<[u8; 32]> = manifest.iter().map(leaf_hash).collect();
    if level.is_empty() {
        level.push([0u8; 32]);
    }

    let target_len = level.len().next_power_of_two();
    level.resize(target_len, [0u8; 32]);

    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len() / 2);
        for pair in level.chunks(2) {
            let mut hasher = Sha256::new();
            hasher.update(pair[0]);
            hasher.update(pair[1]);
            next.push(hasher.finalize().into());
        }
        level = next;
    }

    hex::encode(level[0])
}

/// Length-prefixed `.red` bundle writer/reader (spec §6.3): a JSON header
/// (the [`Receipt`]), the canonical manifest JSON, and optionally the
/// redacted output text, each preceded by a little-endian `u64` byte length.
pub mod bundle {
    use super::{ManifestEntry, Receipt, TrustError};

    pub fn write(receipt: &Receipt, manifest: &[ManifestEntry], redacted_text: Option<&str>) -> Result<Vec<u8>, TrustError> {
        let header = serde_json::to_vec(receipt).map_err(|e| TrustError::Canonicalization(e.to_string()))?;
        let manifest_json = serde_json::to_vec(manifest).map_err(|e| TrustError::Canonicalization(e.to_string()))?;

        let mut out = Vec::new();
        write_part(&mut out, &header);
        write_part(&mut out, &manifest_json);
        if let Some(text) = redacted_text {
            write_part(&mut out, text.as_bytes());
        }
        Ok(out)
    }

    fn write_part(out: &mut Vec<u8>, part: &[u8]) {
        out.extend_from_slice(&(part.len() as u64).to_le_bytes());
        out.extend_from_slice(part);
    }

    pub struct ParsedBundle {
        pub receipt: Receipt,
        pub manifest: Vec<ManifestEntry>,
        pub redacted_text: Option<String>,
    }

    pub fn read(bytes: &[u8]) -> Result<ParsedBundle, TrustError> {
        let mut cursor = 0usize;
        let header = read_part(bytes, &mut cursor)?;
        let manifest_json = read_part(bytes, &mut cursor)?;
        let redacted_text = if cursor < bytes.len() {
            Some(String::from_utf8(read_part(bytes, &mut cursor)?).map_err(|_| TrustError::MalformedBundle)?)
        } else {
            None
        };

        let receipt: Receipt = serde_json::from_slice(&header).map_err(|_| TrustError::MalformedBundle)?;
        let manifest: Vec<ManifestEntry> = serde_json::from_slice(&manifest_json).map_err(|_| TrustError::MalformedBundle)?;

        Ok(ParsedBundle { receipt, manifest, redacted_text })
    }

    fn read_part(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, TrustError> {
        if bytes.len() < *cursor + 8 {
            return Err(TrustError::MalformedBundle);
        }
        let len_bytes: [u8; 8] = bytes[*cursor..*cursor + 8].try_into().unwrap();
        let len = u64::from_le_bytes(len_bytes) as usize;
        *cursor += 8;
        if bytes.len() < *cursor + len {
            return Err(TrustError::LengthPrefixOverflow);
        }
        let part = bytes[*cursor..*cursor + len].to_vec();
        *cursor += len;
        Ok(part)
    }
}
