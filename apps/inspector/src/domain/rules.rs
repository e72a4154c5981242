use crate::domain::ballot::{BallotCategory, BallotFace, InvalidReason};

/// Classify a ballot face. A face can show several defects; the first in
/// priority order wins: blank, multiple marks, border mark, identifying
/// marks, missing signature, tear.
pub fn classify(face: &BallotFace) -> BallotCategory {
    let reason = match face.marks.as_slice() {
        [] => Some(InvalidReason::Blank),
        [mark] if mark.is_border => Some(InvalidReason::BorderMark),
        [_] => {
            if has_identifying_text(face) {
                Some(InvalidReason::IdentifyingMarks)
            } else if !face.has_signature {
                Some(InvalidReason::NoSignature)
            } else if face.has_tear {
                Some(InvalidReason::Torn)
            } else {
                None
            }
        }
        _ => Some(InvalidReason::MultipleMarks),
    };
    BallotCategory::from_reason(reason)
}

/// Any non-empty text counts, whitespace included.
pub fn has_identifying_text(face: &BallotFace) -> bool {
    face.identifying_text
        .as_deref()
        .is_some_and(|text| !text.is_empty())
}
