//! Text normalizer.
//!
//! Cleans raw OCR markup into canonical algebraic text the engine can
//! parse. Total: never fails, worst case it returns a best-effort
//! cleaned string and parsing reports the problem later.

/// Canonical disjunction token, with its separating spaces.
pub const OR_TOKEN: &str = " or ";

// interim marker so whitespace removal cannot eat the separator
const OR_MARK: char = '\u{1}';

/// Normalize raw snapshot text.
///
/// Rules, in order: strip math fences, unwrap annotation wrappers,
/// unify disjunction spellings, rewrite bracketed exponents to `**`,
/// drop whitespace inside equation bodies, make digit-letter
/// multiplication explicit. Disjunction separators keep one space on
/// each side.
pub fn normalize(raw: &str) -> String {
    let text = strip_fences(raw);
    let text = collapse_annotations(&text);
    let text = unify_or_words(&text);
    let text = bracket_powers(&text);
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let text = implicit_multiplication(&text);
    restore_or_token(&text)
}

/// Remove inline/display math fences: `$`, `\(`, `\)`, `\[`, `\]`.
fn strip_fences(text: &str) -> String {
    text.replace("\\(", "")
        .replace("\\)", "")
        .replace("\\[", "")
        .replace("\\]", "")
        .replace('$', "")
}

/// Unwrap `\text{...}` wrappers, including nested ones. A wrapper whose
/// body is just a disjunction word becomes the disjunction marker.
fn collapse_annotations(text: &str) -> String {
    let mut out = text.to_string();
    // el desenrollado interior puede exponer otro \text{...}
    loop {
        let Some(start) = out.find("\\text{") else {
            return out;
        };
        let body_start = start + "\\text{".len();
        let Some(body_len) = balanced_body_len(&out[body_start..]) else {
            // unbalanced wrapper: drop the marker and keep the rest
            out.replace_range(start..body_start, "");
            continue;
        };
        let body = out[body_start..body_start + body_len].to_string();
        let replacement = if is_or_word(body.trim()) {
            OR_MARK.to_string()
        } else {
            body
        };
        out.replace_range(start..body_start + body_len + 1, &replacement);
    }
}

/// Length of the brace-balanced body starting right after an opening
/// brace, or `None` when the closing brace is missing.
fn balanced_body_len(rest: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

fn is_or_word(word: &str) -> bool {
    word.eq_ignore_ascii_case("or")
}

/// Replace `\lor` and every standalone spelling of "or" with the
/// disjunction marker.
fn unify_or_words(text: &str) -> String {
    let text = text.replace("\\lor", &OR_MARK.to_string());
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            if is_or_word(&word) {
                out.push(OR_MARK);
            } else {
                out.push_str(&word);
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Rewrite `^{n}` as `**n` (parenthesizing multi-token bodies) and any
/// remaining `^` as `**`.
fn bracket_powers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '^' {
            out.push_str("**");
            i += 1;
            if i < chars.len() && chars[i] == '{' {
                let rest: String = chars[i + 1..].iter().collect();
                if let Some(len) = balanced_body_len(&rest) {
                    let body: String = chars[i + 1..i + 1 + len].iter().collect();
                    // only a bare numeric exponent may drop its braces;
                    // anything else keeps grouping so `x^{2x}` cannot
                    // later be misread as `x**2*x`
                    if body.chars().all(|c| c.is_ascii_digit()) {
                        out.push_str(&body);
                    } else {
                        out.push('(');
                        out.push_str(&body);
                        out.push(')');
                    }
                    i += len + 2;
                }
                // unbalanced brace: leave it for the parser to reject
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// `5x` -> `5*x`: explicit multiplication between a digit and a letter.
fn implicit_multiplication(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        out.push(*c);
        if c.is_ascii_digit() {
            if let Some(next) = chars.get(i + 1) {
                if next.is_alphabetic() {
                    out.push('*');
                }
            }
        }
    }
    out
}

/// Collapse runs of the interim marker into the canonical token.
fn restore_or_token(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c == OR_MARK {
            if !in_run {
                out.push_str(OR_TOKEN);
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
