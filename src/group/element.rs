//! The capability trait `GroupVector`/`GroupMatrix` are generic over: "an
//! element of group G", flattened from the source's class hierarchy into a
//! single trait rather than an inheritance chain.

use super::{GqElement, GqGroup, ZqElement, ZqGroup};

/// An element that knows which group it belongs to. `GqElement` and
/// `ZqElement` both implement this; containers (`GroupVector`,
/// `GroupMatrix`) are generic over any `E: GroupElement`.
pub trait GroupElement: Clone + PartialEq {
    type Group: Clone + PartialEq;

    fn group(&self) -> &Self::Group;
}

impl GroupElement for GqElement {
    type Group = GqGroup;

    fn group(&self) -> &GqGroup {
        GqElement::group(self)
    }
}

impl GroupElement for ZqElement {
    type Group = ZqGroup;

    fn group(&self) -> &ZqGroup {
        ZqElement::group(self)
    }
}
