//! Sentence-pairing heuristics.
//!
//! Article pages come in two shapes, and each has its own way of lining up the
//! English text with its Chinese translation:
//!
//! - **Parallel paragraphs** ([`pair_parallel_paragraphs`]): an English `<p>`
//!   followed by a Chinese `<p>`, repeated. Captions, bylines and stray
//!   single-character paragraphs break the rhythm, so the pairing slides a
//!   cursor and re-synchronizes whenever a window does not look like
//!   English-then-Chinese.
//! - **Inline translation** ([`split_inline_paragraphs`]): one `<p>` holds the
//!   English sentence immediately followed by the Chinese one. The split point
//!   is the first Chinese ideograph, pulled back by one character when that
//!   ideograph is preceded by an opening quote or bracket.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::models::SentencePair;
use crate::utils::truncate_for_log;

/// First Chinese ideograph, together with an opening mark directly before it.
static CHINESE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[‘“【（]?[\x{4E00}-\x{9FA5}]").expect("valid regex"));

/// Inline fragments at or below this many characters are discarded.
const MIN_INLINE_FRAGMENT_CHARS: usize = 20;

/// Whether `c` lies in the CJK Unified Ideographs block used by the site.
fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FA5}').contains(&c)
}

/// Whether `text` contains at least one Chinese ideograph.
pub fn has_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// A paragraph holding a single visible character, e.g. a lone `"."` or `"|"`.
fn is_single_char(text: &str) -> bool {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let mut chars = body.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c != '\n')
}

/// Pair consecutive English/Chinese paragraphs.
///
/// Single-character paragraphs are dropped first. The remaining list is
/// scanned two at a time: a window whose first entry has no Chinese and whose
/// second entry has some is emitted and skipped over; any other window moves
/// the cursor forward by one.
pub fn pair_parallel_paragraphs(paragraphs: &[String]) -> Vec<SentencePair> {
    let kept: Vec<&str> = paragraphs
        .iter()
        .map(String::as_str)
        .filter(|p| !is_single_char(p))
        .collect();

    let mut pairs = Vec::new();
    let mut cursor = 0;
    while let [en, zh, ..] = &kept[cursor..] {
        let (en, zh) = (en.trim(), zh.trim());
        if !en.is_empty() && !has_cjk(en) && has_cjk(zh) {
            pairs.push(SentencePair::new(en, zh));
            cursor += 2;
        } else {
            trace!(paragraph = %truncate_for_log(en, 60), "Resynchronizing");
            cursor += 1;
        }
    }
    pairs
}

/// Split paragraphs carrying an inline translation into pairs.
///
/// Paragraphs without Chinese are ignored. The English part is everything
/// before the first Chinese ideograph (or the opening mark directly
/// in front of it); both halves must exceed
/// [`MIN_INLINE_FRAGMENT_CHARS`] characters before trimming.
pub fn split_inline_paragraphs(paragraphs: &[String]) -> Vec<SentencePair> {
    let mut pairs = Vec::new();
    for paragraph in paragraphs {
        let Some(m) = CHINESE_START.find(paragraph) else {
            continue;
        };
        let (en, zh) = paragraph.split_at(m.start());
        if en.chars().count() <= MIN_INLINE_FRAGMENT_CHARS
            || zh.chars().count() <= MIN_INLINE_FRAGMENT_CHARS
        {
            continue;
        }
        let (en, zh) = (en.trim(), zh.trim());
        if !en.is_empty() {
            pairs.push(SentencePair::new(en, zh));
        }
    }
    pairs
}
