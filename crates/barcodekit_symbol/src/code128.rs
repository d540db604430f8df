//! Code128 symbol encoding and the font sentinel text form.

use crate::conf::{
    CHR_FONT_SENTINEL_START, CHR_FONT_SENTINEL_STOP, N_CODE128_CHECKSUM_MOD, N_CODE128_CODE_B,
    N_CODE128_SET_B_MAX, N_CODE128_SET_B_MIN, N_CODE128_START_B, N_CODE128_START_C,
    TUP_CODE128_PATTERNS, TUP_CODE128_STOP,
};
use crate::spec::{EnumCode128Set, ErrorSymbol, SpecBarcodeModules};

////////////////////////////////////////////////////////////////////////////////
// #region FontText

/// Wrap `identifier` in the start/stop sentinels understood by Code128 fonts.
///
/// No checksum and no code-set switching: the font draws one glyph per char.
pub fn encode_text(identifier: &str) -> String {
    let mut c_text = String::with_capacity(identifier.len() + 4);
    c_text.push(CHR_FONT_SENTINEL_START);
    c_text.push_str(identifier);
    c_text.push(CHR_FONT_SENTINEL_STOP);
    c_text
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SymbolEncoding

/// Encode `identifier` into Code128 symbol values and modules.
///
/// All-digit identifiers use code set C (a trailing odd digit switches to
/// set B); everything else uses set B.
pub fn encode_modules(identifier: &str) -> Result<SpecBarcodeModules, ErrorSymbol> {
    if identifier.is_empty() {
        return Err(ErrorSymbol::EmptyIdentifier);
    }
    validate_set_b_chars(identifier)?;

    let v_bytes = identifier.as_bytes();
    let if_use_set_c = v_bytes.len() >= 2 && v_bytes.iter().all(u8::is_ascii_digit);

    let mut l_values = Vec::with_capacity(v_bytes.len() + 3);
    let set_start = if if_use_set_c {
        l_values.push(N_CODE128_START_C);
        let n_len_pairs = v_bytes.len() - v_bytes.len() % 2;
        for pair in v_bytes[..n_len_pairs].chunks_exact(2) {
            l_values.push((pair[0] - b'0') * 10 + (pair[1] - b'0'));
        }
        if n_len_pairs < v_bytes.len() {
            l_values.push(N_CODE128_CODE_B);
            l_values.push(v_bytes[n_len_pairs] - N_CODE128_SET_B_MIN);
        }
        EnumCode128Set::C
    } else {
        l_values.push(N_CODE128_START_B);
        l_values.extend(v_bytes.iter().map(|byte| byte - N_CODE128_SET_B_MIN));
        EnumCode128Set::B
    };

    l_values.push(calculate_checksum(&l_values));

    let mut l_modules = Vec::with_capacity(l_values.len() * 11 + 13);
    for value in &l_values {
        extend_modules(&mut l_modules, &TUP_CODE128_PATTERNS[usize::from(*value)]);
    }
    extend_modules(&mut l_modules, &TUP_CODE128_STOP);

    Ok(SpecBarcodeModules {
        set_start,
        values: l_values,
        modules: l_modules,
    })
}

/// Modulo-103 weighted checksum over `values` (start symbol first, weight 1).
pub fn calculate_checksum(values: &[u8]) -> u8 {
    let Some((n_start, l_data)) = values.split_first() else {
        return 0;
    };
    let n_sum = l_data
        .iter()
        .enumerate()
        .fold(u32::from(*n_start), |acc, (n_idx, value)| {
            acc + (n_idx as u32 + 1) * u32::from(*value)
        });
    (n_sum % N_CODE128_CHECKSUM_MOD) as u8
}

fn validate_set_b_chars(identifier: &str) -> Result<(), ErrorSymbol> {
    for (n_pos, ch) in identifier.chars().enumerate() {
        let if_is_encodable = ch.is_ascii()
            && (N_CODE128_SET_B_MIN..=N_CODE128_SET_B_MAX).contains(&(ch as u8));
        if !if_is_encodable {
            return Err(ErrorSymbol::UnsupportedChar {
                identifier: identifier.to_string(),
                ch,
                position: n_pos,
            });
        }
    }
    Ok(())
}

fn extend_modules(modules: &mut Vec<bool>, widths: &[u8]) {
    for (n_idx, width) in widths.iter().enumerate() {
        let if_is_bar = n_idx % 2 == 0;
        modules.extend(std::iter::repeat_n(if_is_bar, usize::from(*width)));
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
