//! Case-folding, diacritic-stripping, and OCR-confusion normalisation
//! (spec §4.2 "locale-insensitive... diacritics folded to base letters",
//! §4.1 "OCR tolerance").

/// Case-fold (ASCII + common Latin-1) and strip diacritics so dictionary
/// lookups are locale-insensitive, per spec §4.2.
pub fn normalize_key(s: &str) -> String {
    s.chars()
        .filter_map(strip_diacritic)
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Map a Latin-1 Supplement / common-diacritic letter to its base ASCII
/// letter. Characters with no defined mapping pass through unchanged.
fn strip_diacritic(c: char) -> Option<char> {
    let mapped = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'a',
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
        'ý' | 'ÿ' | 'Ý' => 'y',
        'ñ' | 'Ñ' => 'n',
        'ç' | 'Ç' => 'c',
        other => other,
    };
    Some(mapped)
}

/// Canonical character-confusion classes collapsed before dictionary/
/// structural-detector lookup (spec §4.1): `0/O`, `1/l/I`, `5/S`, `8/B`,
/// `rn/m`. Offsets returned by callers must stay in the *original* text —
/// this function is only used to build a normalised *view* for matching,
/// never to produce the final span text.
pub fn ocr_normalize(s: &str) -> String {
    // `rn` -> `m` is a two-character collapse; handle it before the
    // per-character pass so it doesn't get mangled by the 'r'/'n' loop.
    let collapsed = s.replace("rn", "m").replace("RN", "M");
    collapsed
        .chars()
        .map(|c| match c {
            'O' => '0',
            'l' | 'I' => '1',
            'S' => '5',
            'B' => '8',
            other => other,
        })
        .collect()
}

/// Digit-only OCR-confusion fold: `O->0`, `l`/`I`->`1`, `S->5`, `B->8`,
/// one ASCII byte for one ASCII byte. Unlike [`ocr_normalize`] this never
/// collapses `rn`->`m`, so it is safe for structural/numeric-format
/// detectors (SSN, MRN, phone, account numbers, ...) that need the folded
/// view to stay perfectly byte-aligned with the original so match offsets
/// from the folded view can be used unchanged against the source text.
pub fn ocr_fold_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'O' => '0',
            'l' | 'I' => '1',
            'S' => '5',
            'B' => '8',
            other => other,
        })
        .collect()
}
