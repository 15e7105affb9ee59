//! Member descriptors and capability-typed member sets.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use indexmap::IndexSet;
use serde::Serialize;

/// A named, typed member of a type.
///
/// Two descriptors are equal when their name and display type match. The
/// capability flags do not take part in equality: members are filtered by
/// capability before sets are compared.
#[derive(Clone, Debug, Serialize)]
pub struct MemberDescriptor {
    pub name: String,
    /// Declared type in display form (`int`, `Foo.Bar`, `List<Foo.Bar>`)
    #[serde(rename = "type")]
    pub ty: String,
    pub readable: bool,
    pub writable: bool,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        MemberDescriptor {
            name: name.into(),
            ty: ty.into(),
            readable: false,
            writable: false,
        }
    }

    pub fn with_access(mut self, readable: bool, writable: bool) -> Self {
        self.readable = readable;
        self.writable = writable;
        self
    }
}

impl PartialEq for MemberDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty
    }
}

impl Eq for MemberDescriptor {}

impl Hash for MemberDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.ty.hash(state);
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// A member filter: which members a `MemberSet` admits.
pub trait Capability {
    const NAME: &'static str;

    fn admits(member: &MemberDescriptor) -> bool;
}

/// Members that can be read off an instance.
#[derive(Clone, Copy, Debug)]
pub enum Readable {}

/// Members that can be assigned in an object initializer.
#[derive(Clone, Copy, Debug)]
pub enum Writable {}

impl Capability for Readable {
    const NAME: &'static str = "readable";

    fn admits(member: &MemberDescriptor) -> bool {
        member.readable
    }
}

impl Capability for Writable {
    const NAME: &'static str = "writable";

    fn admits(member: &MemberDescriptor) -> bool {
        member.writable
    }
}

/// An insertion-ordered set of members that all carry capability `C`.
pub struct MemberSet<C: Capability> {
    members: IndexSet<MemberDescriptor>,
    _capability: PhantomData<C>,
}

impl<C: Capability> MemberSet<C> {
    pub fn new() -> Self {
        MemberSet {
            members: IndexSet::new(),
            _capability: PhantomData,
        }
    }

    /// Add `member` if it has capability `C`. Returns whether it was added;
    /// a member equal to one already present is not added again.
    pub fn insert(&mut self, member: MemberDescriptor) -> bool {
        C::admits(&member) && self.members.insert(member)
    }

    pub fn contains(&self, member: &MemberDescriptor) -> bool {
        self.members.contains(member)
    }

    pub fn get(&self, member: &MemberDescriptor) -> Option<&MemberDescriptor> {
        self.members.get(member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }
}

impl MemberSet<Readable> {
    /// Members readable here and writable in `destination`, compared by
    /// name and type, in this set's order. The results carry both flags.
    pub fn intersect(&self, destination: &MemberSet<Writable>) -> IndexSet<MemberDescriptor> {
        self.members
            .iter()
            .filter(|member| destination.contains(member))
            .map(|member| member.clone().with_access(true, true))
            .collect()
    }
}

impl<C: Capability> Default for MemberSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Capability> Clone for MemberSet<C> {
    fn clone(&self) -> Self {
        MemberSet {
            members: self.members.clone(),
            _capability: PhantomData,
        }
    }
}

impl<C: Capability> fmt::Debug for MemberSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberSet")
            .field("capability", &C::NAME)
            .field("members", &self.members)
            .finish()
    }
}

impl<C: Capability> FromIterator<MemberDescriptor> for MemberSet<C> {
    fn from_iter<I: IntoIterator<Item = MemberDescriptor>>(iter: I) -> Self {
        let mut set = MemberSet::new();
        for member in iter {
            set.insert(member);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(name: &str, ty: &str) -> MemberDescriptor {
        MemberDescriptor::new(name, ty).with_access(true, false)
    }

    fn write(name: &str, ty: &str) -> MemberDescriptor {
        MemberDescriptor::new(name, ty).with_access(false, true)
    }

    #[test]
    fn test_equality_ignores_capability_flags() {
        assert_eq!(read("Id", "int"), write("Id", "int"));
        assert_ne!(read("Id", "int"), read("Id", "long"));
        assert_ne!(read("Id", "int"), read("Key", "int"));
    }

    #[test]
    fn test_set_rejects_members_without_its_capability() {
        let mut set = MemberSet::<Writable>::new();
        assert!(!set.insert(read("Id", "int")));
        assert!(set.insert(write("Id", "int")));
        assert!(!set.insert(write("Id", "int")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_intersection_matches_name_and_type() {
        let source: MemberSet<Readable> = [read("x", "int"), read("y", "string"), read("w", "long")]
            .into_iter()
            .collect();
        let destination: MemberSet<Writable> =
            [write("x", "int"), write("z", "bool"), write("w", "int")]
                .into_iter()
                .collect();
        let matched = source.intersect(&destination);
        let names: Vec<&str> = matched.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["x"]);
        assert!(matched[0].readable && matched[0].writable);
    }
}
