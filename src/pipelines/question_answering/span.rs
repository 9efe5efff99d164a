//! Span selection over start/end score vectors.
//!
//! Start and end positions are picked by independent argmax over the raw
//! score vectors, on the original token sequence. There is no search over
//! valid `start <= end` pairs: an inverted result is returned as-is and the
//! pipeline treats it as "no answer". Argmax ties resolve to the lowest
//! index.

/// A token span over the encoded input, inclusive on both ends.
///
/// Raw output of [`select_span`]: `end < start` is representable and means
/// the model found no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AnswerSpan {
    pub start: usize,
    pub end: usize,
}

impl AnswerSpan {
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Pick the answer span from start/end score vectors.
///
/// Returns `None` only when either vector is empty.
pub(crate) fn select_span(start_scores: &[f32], end_scores: &[f32]) -> Option<AnswerSpan> {
    Some(AnswerSpan {
        start: argmax(start_scores)?,
        end: argmax(end_scores)?,
    })
}

/// Confidence for a chosen span: the product of the softmax probabilities of
/// the start and end positions.
pub(crate) fn span_confidence(start_scores: &[f32], end_scores: &[f32], span: &AnswerSpan) -> f32 {
    softmax_at(start_scores, span.start) * softmax_at(end_scores, span.end)
}

/// Index of the maximum score. Ties resolve to the lowest index.
fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

fn softmax_at(scores: &[f32], index: usize) -> f32 {
    let max = scores.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let denom: f32 = scores.iter().map(|&s| (s - max).exp()).sum();
    if denom > 0.0 {
        (scores[index] - max).exp() / denom
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_independent_argmaxes() {
        let start = [0.1, 4.0, 0.3, 0.2];
        let end = [0.1, 0.2, 0.3, 5.0];
        let span = select_span(&start, &end).unwrap();
        assert_eq!(span, AnswerSpan { start: 1, end: 3 });
        assert!(!span.is_empty());
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let scores = [2.0, 2.0, 2.0];
        assert_eq!(argmax(&scores), Some(0));

        let span = select_span(&scores, &scores).unwrap();
        assert_eq!(span, AnswerSpan { start: 0, end: 0 });
    }

    #[test]
    fn maxima_at_zero_give_span_zero_zero() {
        let start = [9.0, 1.0, 2.0];
        let end = [8.0, 0.5, 1.0];
        assert_eq!(
            select_span(&start, &end).unwrap(),
            AnswerSpan { start: 0, end: 0 }
        );
    }

    #[test]
    fn inverted_span_is_returned_raw() {
        let start = [0.0, 0.0, 7.0];
        let end = [6.0, 0.0, 0.0];
        let span = select_span(&start, &end).unwrap();
        assert_eq!(span, AnswerSpan { start: 2, end: 0 });
        assert!(span.is_empty());
    }

    #[test]
    fn empty_scores_give_no_span() {
        assert_eq!(select_span(&[], &[]), None);
        assert_eq!(select_span(&[1.0], &[]), None);
    }

    #[test]
    fn confidence_is_a_probability() {
        let start = [0.0, 3.0, 1.0];
        let end = [1.0, 0.0, 2.0];
        let span = select_span(&start, &end).unwrap();
        let confidence = span_confidence(&start, &end, &span);
        assert!(confidence > 0.0 && confidence <= 1.0);
    }

    #[test]
    fn confident_spans_score_higher() {
        let span = AnswerSpan { start: 1, end: 1 };
        let sharp = span_confidence(&[0.0, 10.0, 0.0], &[0.0, 10.0, 0.0], &span);
        let flat = span_confidence(&[0.0, 0.1, 0.0], &[0.0, 0.1, 0.0], &span);
        assert!(sharp > flat);
    }
}
