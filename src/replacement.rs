//! Replacement service (C6, spec §4.5).
//!
//! Turns a frozen, final span set into replacement text per
//! `policy.replacement_strategy`, then substitutes those replacements into
//! the source to produce the redacted document. `CONSISTENT_PSEUDONYM` and
//! `TAG_AND_COUNT` need memory across calls so that the same original value
//! gets the same token every time it recurs within its `scope` — that table
//! is the one piece of state in this crate that outlives a single `redact`
//! call, so it is owned by the caller (usually the orchestrator, held for
//! the lifetime of a session) and guarded by [`parking_lot::Mutex`] rather
//! than threaded through every function signature.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use parking_lot::Mutex;
use sha2::Sha256;

use crate::arbitration::freeze::FrozenSpans;
use crate::context::RedactionContext;
use crate::policy::{ReplacementStrategy, Scope};
use crate::span::FilterType;
use crate::vocabulary::fold::normalize_key;

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_PSEUDONYM_KEY: &str = "vulpes-redact-default-pseudonym-key";

/// Consistent-token assignment table, keyed by scope so that PER-DOCUMENT,
/// PER-SESSION, and PER-POLICY horizons never bleed into each other.
#[derive(Default)]
pub struct ReplacementRegistry {
    assigned: Mutex<HashMap<(String, FilterType, String), String>>,
    counters: Mutex<HashMap<(String, FilterType), u32>>,
}

impl ReplacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scope key this policy's `scope` resolves to for a given context.
    fn scope_key(ctx: &RedactionContext) -> String {
        match ctx.policy.scope {
            Scope::PerDocument => format!("doc:{}", ctx.document_id),
            Scope::PerSession => format!("session:{}", ctx.session_id),
            Scope::PerPolicy => format!("policy:{}", hex::encode(ctx.policy.fingerprint())),
        }
    }

    /// Produces (and remembers) the replacement token for one occurrence of
    /// `original_value` under `filter_type`.
    fn token_for(&self, ctx: &RedactionContext, filter_type: FilterType, original_value: &str) -> String {
        let scope = Self::scope_key(ctx);
        let normalized = normalize_key(original_value);

        match ctx.policy.replacement_strategy {
            // `[<TYPE>-<k>]`, `k` counting unique original values per type
            // within scope; same source string always yields the same token.
            ReplacementStrategy::CategoryToken => {
                let key = (scope.clone(), filter_type, normalized);
                let mut assigned = self.assigned.lock();
                if let Some(existing) = assigned.get(&key) {
                    return existing.clone();
                }
                let mut counters = self.counters.lock();
                let counter = counters.entry((scope, filter_type)).or_insert(0);
                *counter += 1;
                let token = format!("[{}-{}]", filter_type.token(), counter);
                assigned.insert(key, token.clone());
                token
            }

            ReplacementStrategy::Stars => "*".repeat(original_value.chars().count()),

            ReplacementStrategy::ConsistentPseudonym => {
                let key = (scope, filter_type, normalized);
                let mut assigned = self.assigned.lock();
                if let Some(existing) = assigned.get(&key) {
                    return existing.clone();
                }
                let key_bytes = ctx
                    .policy
                    .hmac_key
                    .as_deref()
                    .or_else(|| crate::config::hmac_key_override().as_deref())
                    .unwrap_or(DEFAULT_PSEUDONYM_KEY)
                    .to_string();
                let token = pseudonym_token(filter_type, &key.2, &key_bytes);
                assigned.insert(key, token.clone());
                token
            }

            // `[<TYPE>]` only, no counter.
            ReplacementStrategy::TagAndCount => format!("[{}]", filter_type.token()),
        }
    }
}

/// HMAC-SHA256(key, filter_type || normalized_value), truncated to 8 hex
/// characters and embedded in a category-tagged token, e.g. `[NAME-3f9a1c2b]`.
fn pseudonym_token(filter_type: FilterType, normalized_value: &str, key: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(filter_type.token().as_bytes());
    mac.update(b"|");
    mac.update(normalized_value.as_bytes());
    let digest = mac.finalize().into_bytes();
    format!("[{}-{}]", filter_type.token(), hex::encode(&digest[..4]))
}

/// Assigns `span.replacement` for every span in `frozen` per the active
/// policy strategy. Returns the frozen set back so the caller can both
/// build the redacted text and serialise spans for a receipt.
pub fn assign_replacements(mut frozen: FrozenSpans, ctx: &RedactionContext, registry: &ReplacementRegistry) -> FrozenSpans {
    for i in 0..frozen.len() {
        let (filter_type, original) = {
            let span = &frozen.as_slice()[i];
            (span.filter_type, span.original_value.clone())
        };
        let token = registry.token_for(ctx, filter_type, &original);
        frozen.set_replacement(i, token);
    }
    frozen
}

/// Substitutes every span's replacement into `source`, producing the final
/// redacted text. Spans are assumed frozen (sorted, non-overlapping) and
/// every span must already carry a replacement (call
/// [`assign_replacements`] first).
pub fn redact_text(source: &str, frozen: &FrozenSpans) -> String {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for span in frozen.as_slice() {
        out.push_str(&source[cursor..span.char_start]);
        out.push_str(span.replacement.as_deref().unwrap_or(""));
        cursor = span.char_end;
    }
    out.push_str(&source[cursor..]);
    out
}
