//! Static satisfiability flags.

use bitflags::bitflags;

bitflags! {
    /// Configuration-scoped satisfiability classification of one node.
    ///
    /// `ALWAYS` implies not `NEVER`, and `FREE` implies `ALWAYS`;
    /// [`FlagSet::compose`] clamps any combination to respect both.
    /// A node with no flag set is situational: satisfiability depends on
    /// the simulated state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct FlagSet: u8 {
        /// Cannot be satisfied from any state under this configuration.
        const NEVER = 1 << 0;
        /// Satisfiable from every state under this configuration.
        const ALWAYS = 1 << 1;
        /// Satisfiable from every state at zero net resource cost.
        const FREE = 1 << 2;
    }
}

impl FlagSet {
    /// Builds a flag set, clamping to the implication invariants.
    pub fn compose(never: bool, always: bool, free: bool) -> Self {
        let always = always && !never;
        let free = free && always;
        let mut flags = FlagSet::empty();
        flags.set(FlagSet::NEVER, never);
        flags.set(FlagSet::ALWAYS, always);
        flags.set(FlagSet::FREE, free);
        flags
    }

    /// Statically unsatisfiable.
    #[inline]
    pub fn never(self) -> bool {
        self.contains(FlagSet::NEVER)
    }

    /// Statically guaranteed.
    #[inline]
    pub fn always(self) -> bool {
        self.contains(FlagSet::ALWAYS)
    }

    /// Statically guaranteed at zero net cost.
    #[inline]
    pub fn free(self) -> bool {
        self.contains(FlagSet::FREE)
    }

    /// Worth considering at all: the negation of `never`.
    #[inline]
    pub fn relevant(self) -> bool {
        !self.never()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_clamps_contradictions() {
        let flags = FlagSet::compose(true, true, true);
        assert!(flags.never());
        assert!(!flags.always());
        assert!(!flags.free());

        let flags = FlagSet::compose(false, false, true);
        assert!(!flags.free());
    }

    #[test]
    fn relevant_is_not_never() {
        assert!(FlagSet::compose(false, false, false).relevant());
        assert!(!FlagSet::compose(true, false, false).relevant());
    }
}
