//! Ballot model: the physical face of a ballot plus its derived ground truth.

use serde::{Deserialize, Serialize};

use crate::domain::grid::Cell;
use crate::domain::rules::classify;

/// 1-based position of a ballot within its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BallotId(pub u32);

impl std::fmt::Display for BallotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side of the cell a border mark straddles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderDir {
    Right,
    Bottom,
}

/// A single tick on the ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    pub row: u8,
    pub col: u8,
    pub is_border: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub border_dir: Option<BorderDir>,
}

impl Mark {
    /// A mark sitting fully inside one cell.
    pub fn inside(cell: Cell) -> Self {
        Self {
            row: cell.row,
            col: cell.col,
            is_border: false,
            border_dir: None,
        }
    }

    /// A mark straddling `cell` and its neighbour in `dir`.
    pub fn straddling(cell: Cell, dir: BorderDir) -> Self {
        Self {
            row: cell.row,
            col: cell.col,
            is_border: true,
            border_dir: Some(dir),
        }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TearPosition {
    TopLeft,
    TopRight,
    BottomRight,
}

impl TearPosition {
    pub const ALL: [TearPosition; 3] = [
        TearPosition::TopLeft,
        TearPosition::TopRight,
        TearPosition::BottomRight,
    ];
}

/// Placement of identifying text, in percent of the ballot's height and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyingPos {
    pub top_pct: u8,
    pub left_pct: u8,
}

/// The six mutually exclusive defect classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    MultipleMarks,
    Blank,
    BorderMark,
    IdentifyingMarks,
    NoSignature,
    Torn,
}

impl InvalidReason {
    /// Classification priority, first match wins.
    pub const PRIORITY: [InvalidReason; 6] = [
        InvalidReason::Blank,
        InvalidReason::MultipleMarks,
        InvalidReason::BorderMark,
        InvalidReason::IdentifyingMarks,
        InvalidReason::NoSignature,
        InvalidReason::Torn,
    ];

    pub fn key(self) -> &'static str {
        match self {
            InvalidReason::MultipleMarks => "multiple_marks",
            InvalidReason::Blank => "blank",
            InvalidReason::BorderMark => "border_mark",
            InvalidReason::IdentifyingMarks => "identifying_marks",
            InvalidReason::NoSignature => "no_signature",
            InvalidReason::Torn => "torn",
        }
    }

    /// Text shown to the player after a wrong call on a ballot with this defect.
    pub fn display(self) -> &'static str {
        match self {
            InvalidReason::MultipleMarks => "Multiple marks: two or more cells are marked",
            InvalidReason::Blank => "Blank ballot: no mark made anywhere on the ballot",
            InvalidReason::BorderMark => {
                "Border mark: the mark falls between two cells, intent unclear"
            }
            InvalidReason::IdentifyingMarks => {
                "Identifying marks: writing on the ballot could reveal the voter"
            }
            InvalidReason::NoSignature => {
                "No signature: the election officer's signature is missing"
            }
            InvalidReason::Torn => "Torn ballot: physical damage makes intent unreadable",
        }
    }
}

/// Ground-truth category of a ballot, used for planning and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallotCategory {
    Valid,
    Invalid(InvalidReason),
}

impl BallotCategory {
    /// Every category: valid first, then defects in classification priority.
    pub const ALL: [BallotCategory; 7] = [
        BallotCategory::Valid,
        BallotCategory::Invalid(InvalidReason::Blank),
        BallotCategory::Invalid(InvalidReason::MultipleMarks),
        BallotCategory::Invalid(InvalidReason::BorderMark),
        BallotCategory::Invalid(InvalidReason::IdentifyingMarks),
        BallotCategory::Invalid(InvalidReason::NoSignature),
        BallotCategory::Invalid(InvalidReason::Torn),
    ];

    pub fn from_reason(reason: Option<InvalidReason>) -> Self {
        reason.map_or(BallotCategory::Valid, BallotCategory::Invalid)
    }

    pub fn reason(self) -> Option<InvalidReason> {
        match self {
            BallotCategory::Valid => None,
            BallotCategory::Invalid(reason) => Some(reason),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            BallotCategory::Valid => "valid",
            BallotCategory::Invalid(reason) => reason.key(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        BallotCategory::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Everything an inspector can see on the paper. Carries no verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotFace {
    pub marks: Vec<Mark>,
    pub sloppy_mark: bool,
    pub has_tear: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tear_position: Option<TearPosition>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub identifying_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub identifying_pos: Option<IdentifyingPos>,
    pub has_signature: bool,
}

impl BallotFace {
    /// A clean, valid-looking face with one mark in `cell`.
    pub fn single_mark(cell: Cell) -> Self {
        Self {
            marks: vec![Mark::inside(cell)],
            sloppy_mark: false,
            has_tear: false,
            tear_position: None,
            identifying_text: None,
            identifying_pos: None,
            has_signature: true,
        }
    }
}

/// One generated ballot. Immutable; ground truth is derived from the face at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ballot {
    id: BallotId,
    #[serde(flatten)]
    face: BallotFace,
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_reason: Option<InvalidReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_reason_display: Option<String>,
}

impl Ballot {
    /// Build a ballot, deriving `is_valid` and `invalid_reason` from the face.
    pub fn from_face(id: BallotId, face: BallotFace) -> Self {
        let invalid_reason = classify(&face).reason();
        Self {
            id,
            is_valid: invalid_reason.is_none(),
            invalid_reason_display: invalid_reason.map(|r| r.display().to_string()),
            invalid_reason,
            face,
        }
    }

    pub fn id(&self) -> BallotId {
        self.id
    }

    /// The physical features, without the verdict.
    pub fn face(&self) -> &BallotFace {
        &self.face
    }

    pub fn marks(&self) -> &[Mark] {
        &self.face.marks
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        self.invalid_reason
    }

    pub fn invalid_reason_display(&self) -> Option<&str> {
        self.invalid_reason_display.as_deref()
    }

    pub fn category(&self) -> BallotCategory {
        BallotCategory::from_reason(self.invalid_reason)
    }
}
