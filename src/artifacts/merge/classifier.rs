//! Per-path merge classification
//!
//! Each path present in any of the three snapshots is compared by blob ID, absence
//! included. What matters is which sides *diverged* from the split point:
//!
//! | current | given | outcome                                   |
//! |---------|-------|-------------------------------------------|
//! | same    | same  | keep current                              |
//! | changed | same  | keep current                              |
//! | same    | changed | take given (or remove, if given deleted) |
//! | changed | changed | keep if both agree, conflict otherwise  |
//!
//! The table covers every combination exactly once, which is what makes the outcome of
//! a path unambiguous.

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;

bitflags! {
    /// Sides whose version differs from the split point's
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Divergence: u8 {
        const CURRENT = 0b01;
        const GIVEN = 0b10;
        const BOTH = Self::CURRENT.bits() | Self::GIVEN.bits();
    }
}

impl Divergence {
    pub fn between(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> Self {
        let mut divergence = Divergence::empty();
        divergence.set(Divergence::CURRENT, current != split);
        divergence.set(Divergence::GIVEN, given != split);
        divergence
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The merged snapshot keeps whatever current has (possibly nothing)
    KeepCurrent,
    /// Check out and stage the given side's blob
    TakeGiven(ObjectId),
    /// Delete the file and stage its removal
    Remove,
    /// Both sides changed the path in different ways
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> MergeOutcome {
    let divergence = Divergence::between(split, current, given);

    if divergence == Divergence::GIVEN {
        return match given {
            Some(given) => MergeOutcome::TakeGiven(given.clone()),
            None => MergeOutcome::Remove,
        };
    }

    if divergence == Divergence::BOTH && current != given {
        return MergeOutcome::Conflict {
            current: current.cloned(),
            given: given.cloned(),
        };
    }

    MergeOutcome::KeepCurrent
}
