//! Line variant type.

/// The service pattern a trip runs.
///
/// The network has two named lines sharing a corridor plus semi-direct
/// journeys that belong to neither. Labels come from configuration; the
/// enum only fixes the three roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineVariant {
    /// The main line from the hub to the capital ("e22")
    Primary,
    /// The line serving the branch termini ("e23")
    Branch,
    /// Anything else ("semidirecte")
    Generic,
}

impl LineVariant {
    /// All variants in output order.
    pub const ALL: [LineVariant; 3] = [
        LineVariant::Primary,
        LineVariant::Branch,
        LineVariant::Generic,
    ];

    /// Keep `self` if it is in `allowed`, otherwise fall back to `Generic`.
    ///
    /// ```
    /// use bus_timetable::domain::LineVariant;
    ///
    /// let main_only = [LineVariant::Primary, LineVariant::Generic];
    /// assert_eq!(LineVariant::Branch.clamp_to(&main_only), LineVariant::Generic);
    /// assert_eq!(LineVariant::Primary.clamp_to(&main_only), LineVariant::Primary);
    /// ```
    pub fn clamp_to(self, allowed: &[LineVariant]) -> LineVariant {
        if allowed.contains(&self) {
            self
        } else {
            LineVariant::Generic
        }
    }
}
