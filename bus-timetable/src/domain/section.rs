//! Route sections: the four directional pages of the timetable.

use super::LineVariant;

/// Which way a trip runs along the corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Hub towards the capital
    Outbound,
    /// Capital towards the hub
    Inbound,
}

/// One of the four fixed directional sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteSection {
    /// Hub to capital, full itineraries
    OutboundMain,
    /// Capital to hub, full itineraries
    InboundMain,
    /// Branch termini to capital, sliced itineraries
    OutboundBranch,
    /// Capital to branch termini, sliced itineraries
    InboundBranch,
}

impl RouteSection {
    /// All sections in output order.
    pub const ALL: [RouteSection; 4] = [
        RouteSection::OutboundMain,
        RouteSection::InboundMain,
        RouteSection::OutboundBranch,
        RouteSection::InboundBranch,
    ];

    /// Stable identifier used in the output document.
    pub fn id(self) -> &'static str {
        match self {
            RouteSection::OutboundMain => "m2b",
            RouteSection::InboundMain => "b2m",
            RouteSection::OutboundBranch => "o2b",
            RouteSection::InboundBranch => "b2o",
        }
    }

    /// The section holding full itineraries for a direction.
    pub fn main_for(direction: Direction) -> Self {
        match direction {
            Direction::Outbound => RouteSection::OutboundMain,
            Direction::Inbound => RouteSection::InboundMain,
        }
    }

    /// The section holding branch slices for a direction.
    pub fn branch_for(direction: Direction) -> Self {
        match direction {
            Direction::Outbound => RouteSection::OutboundBranch,
            Direction::Inbound => RouteSection::InboundBranch,
        }
    }

    /// Variants shown in this section, in display order.
    ///
    /// Any other variant is downgraded to `Generic` on insertion.
    pub fn allowed_variants(self) -> [LineVariant; 2] {
        match self {
            RouteSection::OutboundMain | RouteSection::InboundMain => {
                [LineVariant::Primary, LineVariant::Generic]
            }
            RouteSection::OutboundBranch | RouteSection::InboundBranch => {
                [LineVariant::Branch, LineVariant::Generic]
            }
        }
    }
}
