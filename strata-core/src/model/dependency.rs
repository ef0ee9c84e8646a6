//! Dependency Descriptors
//!
//! A descriptor names a kind of state. Reactions list the descriptors they
//! read (inbound) and write (outbound); two reactions interact when a read
//! descriptor of one matches a written descriptor of the other.
//!
//! Matching is not plain equality: wildcards such as [`Dependency::Everything`]
//! and [`Dependency::EveryMolecule`] stand for whole families of state.

use std::fmt;

/// A kind of state a reaction may read or write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// Any state at all.
    Everything,

    /// The concentration of any molecule.
    EveryMolecule,

    /// Node positions.
    Movement,

    /// The concentration of one named molecule.
    Molecule(String),
}

impl Dependency {
    /// Shorthand for [`Dependency::Molecule`].
    pub fn molecule(name: impl Into<String>) -> Self {
        Self::Molecule(name.into())
    }

    /// Whether state described by `self` is affected by changes to `other`.
    pub fn depends_on(&self, other: &Dependency) -> bool {
        self.covers(other)
    }

    /// Whether a change to `self` affects state described by `other`.
    pub fn makes_dependent(&self, other: &Dependency) -> bool {
        self.covers(other)
    }

    /// Wildcards cover their family; anything else covers only itself.
    fn covers(&self, other: &Dependency) -> bool {
        match (self, other) {
            (Self::Everything, _) => true,
            (Self::EveryMolecule, Self::EveryMolecule | Self::Molecule(_)) => true,
            (Self::EveryMolecule, _) => false,
            _ => self == other,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Everything => f.write_str("*"),
            Self::EveryMolecule => f.write_str("molecule:*"),
            Self::Movement => f.write_str("movement"),
            Self::Molecule(name) => write!(f, "molecule:{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_matches_anything() {
        assert!(Dependency::Everything.depends_on(&Dependency::Movement));
        assert!(Dependency::Everything.depends_on(&Dependency::molecule("a")));
        assert!(Dependency::Everything.makes_dependent(&Dependency::Movement));
        assert!(!Dependency::Movement.depends_on(&Dependency::Everything));
    }

    #[test]
    fn every_molecule_matches_only_molecules() {
        assert!(Dependency::EveryMolecule.depends_on(&Dependency::molecule("a")));
        assert!(Dependency::EveryMolecule.depends_on(&Dependency::EveryMolecule));
        assert!(!Dependency::EveryMolecule.depends_on(&Dependency::Movement));
        assert!(Dependency::EveryMolecule.makes_dependent(&Dependency::molecule("b")));
        assert!(!Dependency::EveryMolecule.makes_dependent(&Dependency::Movement));
    }

    #[test]
    fn named_molecules_match_by_name() {
        let a = Dependency::molecule("a");
        assert!(a.depends_on(&Dependency::molecule("a")));
        assert!(!a.depends_on(&Dependency::molecule("b")));
        assert!(!a.depends_on(&Dependency::EveryMolecule));
        assert_eq!(a.to_string(), "molecule:a");
    }
}
