//! Text normalizer.
//!
//! Tokenizes the problem text, folds synonyms and symbols to canonical
//! words, converts cm/m values to mm, lower-cases words and canonicalizes
//! spacing. Every rewrite is logged against its span in the original text.
//!
//! Normalizing already-normalized text changes nothing.

use ortho_ir::{ChangeReason, NormalizationChange, Span};

use crate::error::NormalizationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Number,
    Word,
    Symbol,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    span: Span,
}

/// A token of normalized output and where it came from.
#[derive(Debug, Clone)]
struct OutToken {
    text: String,
    kind: TokenKind,
    origin: Span,
}

/// A token-sequence rewrite.
struct Rule {
    pattern: &'static [&'static str],
    replacement: &'static str,
    reason: ChangeReason,
}

const fn rule(
    pattern: &'static [&'static str],
    replacement: &'static str,
    reason: ChangeReason,
) -> Rule {
    Rule {
        pattern,
        replacement,
        reason,
    }
}

use ChangeReason::{Symbol, Synonym};

/// Rewrites, longest pattern first. Patterns match lower-cased tokens.
static RULES: &[Rule] = &[
    rule(&["away", "from", "the", "v", ".", "p", "."], "in front of the vp", Synonym),
    rule(&["away", "from", "v", ".", "p", "."], "in front of vp", Synonym),
    rule(&["away", "from", "the", "v", ".", "p"], "in front of the vp", Synonym),
    rule(&["away", "from", "v", ".", "p"], "in front of vp", Synonym),
    rule(&["at", "right", "angles", "to"], "perpendicular to", Synonym),
    rule(&["at", "right", "angle", "to"], "perpendicular to", Synonym),
    rule(&["in", "-", "front", "of"], "in front of", Synonym),
    rule(&["h", ".", "p", "."], "hp", Synonym),
    rule(&["v", ".", "p", "."], "vp", Synonym),
    rule(&["h", ".", "p"], "hp", Synonym),
    rule(&["v", ".", "p"], "vp", Synonym),
    rule(&["horizontal", "plane"], "hp", Synonym),
    rule(&["vertical", "plane"], "vp", Synonym),
    rule(&["infront", "of"], "in front of", Synonym),
    rule(&["away", "from", "the", "vp"], "in front of the vp", Synonym),
    rule(&["away", "from", "vp"], "in front of vp", Synonym),
    rule(&["normal", "to"], "perpendicular to", Synonym),
    rule(&["perp", "."], "perpendicular", Synonym),
    rule(&["parallel", "with"], "parallel to", Synonym),
    rule(&["inclined", "with"], "inclined to", Synonym),
    rule(&["resting", "on"], "rests on", Synonym),
    rule(&["lies", "on"], "rests on", Synonym),
    rule(&["lying", "on"], "rests on", Synonym),
    rule(&["resting", "in"], "rests in", Synonym),
    rule(&["lies", "in"], "rests in", Synonym),
    rule(&["lying", "in"], "rests in", Synonym),
    rule(&["bottom", "end"], "lower end", Synonym),
    rule(&["top", "end"], "upper end", Synonym),
    rule(&["nearer", "end"], "near end", Synonym),
    rule(&["nearest", "end"], "near end", Synonym),
    rule(&["farther", "end"], "far end", Synonym),
    rule(&["further", "end"], "far end", Synonym),
    rule(&["farthest", "end"], "far end", Synonym),
    rule(&["perp"], "perpendicular", Synonym),
    rule(&["⊥"], "perpendicular to", Symbol),
    rule(&["∥"], "parallel to", Symbol),
    rule(&["°"], "deg", Symbol),
    rule(&["º"], "deg", Symbol),
    rule(&["degrees"], "deg", Synonym),
    rule(&["degree"], "deg", Synonym),
    rule(&["degs"], "deg", Synonym),
    rule(&["θ"], "theta", Symbol),
    rule(&["ϑ"], "theta", Symbol),
    rule(&["φ"], "phi", Symbol),
    rule(&["ϕ"], "phi", Symbol),
    rule(&["millimetres"], "mm", Synonym),
    rule(&["millimeters"], "mm", Synonym),
    rule(&["millimetre"], "mm", Synonym),
    rule(&["millimeter"], "mm", Synonym),
    rule(&["mms"], "mm", Synonym),
];

const CENTIMETRE_WORDS: &[&str] = &[
    "cm",
    "cms",
    "centimetre",
    "centimetres",
    "centimeter",
    "centimeters",
];
const METRE_WORDS: &[&str] = &["m", "metre", "metres", "meter", "meters"];

/// Symbols written without a space before them.
const CLOSING: &[&str] = &[",", ".", ";", ":", ")", "!", "?", "%", "'"];
/// Symbols written without a space after them.
const OPENING: &[&str] = &["("];

/// Normalized text with its change log and original-text alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Text as received.
    pub original: String,
    /// Canonical text.
    pub text: String,
    /// Rewrites, in text order.
    pub changes: Vec<NormalizationChange>,
    alignment: Vec<(Span, Span)>,
}

impl Normalized {
    /// Map a span of the normalized text back to the original text.
    ///
    /// Returns the smallest original span covering every normalized token
    /// the span touches.
    pub fn original_span(&self, span: Span) -> Option<Span> {
        self.alignment
            .iter()
            .filter(|(norm, _)| norm.overlaps(&span))
            .map(|(_, orig)| *orig)
            .reduce(|a, b| a.cover(&b))
    }

    /// Number of output tokens.
    pub fn token_count(&self) -> usize {
        self.alignment.len()
    }
}

/// Stateless text normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Create a normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize `text`.
    pub fn normalize(&self, text: &str) -> Result<Normalized, NormalizationError> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(NormalizationError::Empty);
        }
        let lowered: Vec<String> = tokens
            .iter()
            .map(|t| token_text(text, t).to_lowercase())
            .collect();

        // Rewrite token runs, remembering which output tokens came from a rule.
        let mut out: Vec<OutToken> = Vec::with_capacity(tokens.len());
        let mut rewrites: Vec<Option<ChangeReason>> = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            if let Some((len, replacement)) = convert_unit(text, &tokens, &lowered, i) {
                out.push(OutToken {
                    text: replacement,
                    kind: TokenKind::Word,
                    origin: tokens[i].span.cover(&tokens[i + len - 1].span),
                });
                rewrites.push(Some(ChangeReason::UnitConversion));
                i += len;
                continue;
            }
            if let Some(r) = RULES.iter().find(|r| matches_at(&lowered, i, r.pattern)) {
                let last = i + r.pattern.len() - 1;
                out.push(OutToken {
                    text: r.replacement.to_string(),
                    kind: TokenKind::Word,
                    origin: tokens[i].span.cover(&tokens[last].span),
                });
                rewrites.push(Some(r.reason));
                i = last + 1;
                continue;
            }
            let lower = &lowered[i];
            let (folded, reason) = match lower.strip_prefix('−') {
                Some(digits) => (format!("-{digits}"), Some(ChangeReason::Symbol)),
                None => (
                    lower.clone(),
                    (lower != token_text(text, &tokens[i])).then_some(ChangeReason::CaseFold),
                ),
            };
            out.push(OutToken {
                text: folded,
                kind: tokens[i].kind,
                origin: tokens[i].span,
            });
            rewrites.push(reason);
            i += 1;
        }

        let mut normalized = String::with_capacity(text.len());
        let mut changes = Vec::new();
        let mut alignment = Vec::with_capacity(out.len());

        let leading = Span::new(0, out[0].origin.start);
        if !leading.is_empty() {
            changes.push(change(text, leading, "", ChangeReason::Whitespace));
        }

        for (idx, tok) in out.iter().enumerate() {
            if idx > 0 {
                let prev = &out[idx - 1];
                let sep = if needs_space(prev, tok) { " " } else { "" };
                let gap = Span::new(prev.origin.end, tok.origin.start);
                if &text[gap.start..gap.end] != sep {
                    changes.push(change(text, gap, sep, ChangeReason::Whitespace));
                }
                normalized.push_str(sep);
            }
            let start = normalized.len();
            normalized.push_str(&tok.text);
            alignment.push((Span::new(start, normalized.len()), tok.origin));
            if let Some(reason) = rewrites[idx] {
                changes.push(change(text, tok.origin, &tok.text, reason));
            }
        }

        let last = out[out.len() - 1].origin.end;
        if last < text.len() {
            changes.push(change(
                text,
                Span::new(last, text.len()),
                "",
                ChangeReason::Whitespace,
            ));
        }

        Ok(Normalized {
            original: text.to_string(),
            text: normalized,
            changes,
            alignment,
        })
    }
}

fn change(text: &str, span: Span, replacement: &str, reason: ChangeReason) -> NormalizationChange {
    NormalizationChange {
        original_span: span,
        original: text[span.start..span.end].to_string(),
        replacement: replacement.to_string(),
        reason,
    }
}

fn token_text<'a>(text: &'a str, token: &Token) -> &'a str {
    &text[token.span.start..token.span.end]
}

fn needs_space(prev: &OutToken, next: &OutToken) -> bool {
    if next.kind == TokenKind::Symbol && CLOSING.contains(&next.text.as_str()) {
        return false;
    }
    !(prev.kind == TokenKind::Symbol && OPENING.contains(&prev.text.as_str()))
}

fn matches_at(lowered: &[String], i: usize, pattern: &[&str]) -> bool {
    lowered.len() >= i + pattern.len()
        && pattern
            .iter()
            .zip(&lowered[i..])
            .all(|(p, tok)| *p == tok.as_str())
}

/// `<number> cm` or `<number> m` at `i`: returns tokens consumed and the mm text.
fn convert_unit(
    text: &str,
    tokens: &[Token],
    lowered: &[String],
    i: usize,
) -> Option<(usize, String)> {
    let number = tokens.get(i).filter(|t| t.kind == TokenKind::Number)?;
    let unit = lowered.get(i + 1)?;
    let places = if CENTIMETRE_WORDS.contains(&unit.as_str()) {
        1
    } else if METRE_WORDS.contains(&unit.as_str()) {
        3
    } else {
        return None;
    };
    let mm = shift_decimal(token_text(text, number), places);
    Some((2, format!("{mm} mm")))
}

/// Multiply a decimal literal by `10^places` by moving its decimal point.
fn shift_decimal(literal: &str, places: usize) -> String {
    let (sign, literal) = match literal.strip_prefix(['-', '−']) {
        Some(unsigned) => ("-", unsigned),
        None => ("", literal),
    };
    let (int, frac) = literal.split_once('.').unwrap_or((literal, ""));
    let mut frac = frac.to_string();
    while frac.len() < places {
        frac.push('0');
    }
    let (moved, rest) = frac.split_at(places);
    let digits = format!("{int}{moved}");
    let trimmed = digits.trim_start_matches('0');
    let int_part = if trimmed.is_empty() { "0" } else { trimmed };
    if rest.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{rest}")
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, NormalizationError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        if ch.is_control() {
            return Err(NormalizationError::control(start, ch));
        }

        let after = start + ch.len_utf8();
        let signed = matches!(ch, '-' | '−')
            && text[after..].starts_with(|n: char| n.is_ascii_digit())
            && !tokens
                .last()
                .is_some_and(|t: &Token| t.span.end == start && t.kind != TokenKind::Symbol);

        let (kind, end) = if ch.is_ascii_digit() || signed {
            let mut end = start;
            if signed {
                chars.next();
                end = after;
            }
            let mut seen_dot = false;
            while let Some(&(i, c)) = chars.peek() {
                let fraction = c == '.'
                    && !seen_dot
                    && text[i + 1..].starts_with(|n: char| n.is_ascii_digit());
                if !(c.is_ascii_digit() || fraction) {
                    break;
                }
                seen_dot |= fraction;
                end = i + c.len_utf8();
                chars.next();
            }
            (TokenKind::Number, end)
        } else if ch.is_alphabetic() {
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            (TokenKind::Word, end)
        } else {
            chars.next();
            (TokenKind::Symbol, start + ch.len_utf8())
        };

        tokens.push(Token {
            kind,
            span: Span::new(start, end),
        });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(text: &str) -> Normalized {
        Normalizer::new().normalize(text).unwrap()
    }

    #[test]
    fn test_case_and_spacing() {
        let n = norm("  Line AB   is  70 mm long. ");
        assert_eq!(n.text, "line ab is 70 mm long.");
        assert!(n
            .changes
            .iter()
            .any(|c| c.reason == ChangeReason::CaseFold && c.original == "AB"));
        assert!(n
            .changes
            .iter()
            .any(|c| c.reason == ChangeReason::Whitespace && c.original == "   "));
    }

    #[test]
    fn test_synonyms_and_symbols() {
        let n = norm("A line ⊥ H.P., inclined at 30° to the V.P.");
        assert_eq!(
            n.text,
            "a line perpendicular to hp, inclined at 30 deg to the vp"
        );
        let hp = n
            .changes
            .iter()
            .find(|c| c.replacement == "hp")
            .unwrap();
        assert_eq!(hp.original, "H.P.");
        assert_eq!(hp.reason, ChangeReason::Synonym);
        assert!(n
            .changes
            .iter()
            .any(|c| c.original == "°" && c.reason == ChangeReason::Symbol));
    }

    #[test]
    fn test_unit_conversion_keeps_precision() {
        let n = norm("length 7.25 cm, 0.015 m in front of VP");
        assert_eq!(n.text, "length 72.5 mm, 15 mm in front of vp");
        let c = n
            .changes
            .iter()
            .find(|c| c.reason == ChangeReason::UnitConversion)
            .unwrap();
        assert_eq!(c.original, "7.25 cm");
        assert_eq!(c.replacement, "72.5 mm");
        assert_eq!(shift_decimal("12.345", 1), "123.45");
        assert_eq!(shift_decimal("7", 3), "7000");
        assert_eq!(shift_decimal("0.1", 1), "1");
    }

    #[test]
    fn test_number_then_word_is_split() {
        assert_eq!(norm("70mm").text, "70 mm");
        assert_eq!(norm("7cm").text, "70 mm");
        assert_eq!(norm("h_A=10").text, "h_a = 10");
    }

    #[test]
    fn test_degree_sign_after_number() {
        assert_eq!(norm("inclined at 30°").text, "inclined at 30 deg");
        assert_eq!(
            norm("inclined at 30° to HP").text,
            "inclined at 30 deg to hp"
        );
        assert_eq!(norm("45º to VP").text, "45 deg to vp");
        assert_eq!(norm("30θ").text, "30 theta");
        assert_eq!(norm("length 70.").text, "length 70.");
    }

    #[test]
    fn test_signed_numbers() {
        assert_eq!(norm("lower end -5 mm above HP").text, "lower end -5 mm above hp");
        assert_eq!(norm("-0.5 cm above hp").text, "-5 mm above hp");

        let n = norm("end A −5 above HP");
        assert_eq!(n.text, "end a -5 above hp");
        assert!(n
            .changes
            .iter()
            .any(|c| c.original == "−5" && c.replacement == "-5" && c.reason == ChangeReason::Symbol));

        // A hyphen between numbers is not a sign.
        assert_eq!(norm("20-30 mm").text, "20 - 30 mm");
        assert_eq!(norm("in-front of vp").text, "in front of vp");
        assert_eq!(shift_decimal("-1.5", 1), "-15");
    }

    #[test]
    fn test_away_from_only_means_in_front_of_vp() {
        assert_eq!(norm("15 mm away from V.P.").text, "15 mm in front of vp");
        assert_eq!(norm("15 mm away from the VP").text, "15 mm in front of the vp");
        assert_eq!(norm("10 mm away from HP").text, "10 mm away from hp");
    }

    #[test]
    fn test_plane_contact_phrases() {
        assert_eq!(norm("one end resting on HP").text, "one end rests on hp");
        assert_eq!(norm("the line lies in VP").text, "the line rests in vp");
    }

    #[test]
    fn test_idempotent() {
        for text in [
            "Line AB, 70 mm long, is perpendicular to the HP. Its lower end is 10 mm above H.P. and 15 mm infront of V.P.",
            "A line (ab) inclined at 30° to HP and 45 degrees to VP; end A 2 cm above HP",
            "θ = 30, φ=45, TL: 80",
            "b' lies on VP",
            "end A −5 above HP, 30° to HP, 15 mm away from V.P.",
        ] {
            let once = norm(text);
            let twice = norm(&once.text);
            assert_eq!(twice.text, once.text);
            assert!(
                twice.changes.is_empty(),
                "second pass changed {:?}: {:?}",
                once.text,
                twice.changes
            );
        }
    }

    #[test]
    fn test_original_span_mapping() {
        let n = norm("Lower end 10 above H.P.");
        let start = n.text.find("hp").unwrap();
        let span = n.original_span(Span::new(start, start + 2)).unwrap();
        assert_eq!(&n.original[span.start..span.end], "H.P.");
    }

    #[test]
    fn test_empty_and_control_input() {
        assert_eq!(
            Normalizer::new().normalize("   \n\t"),
            Err(NormalizationError::Empty)
        );
        assert!(matches!(
            Normalizer::new().normalize("line\u{7}"),
            Err(NormalizationError::ControlCharacter { position: 4, code: 7 })
        ));
    }
}
