//! Capability tagging: how a component says what it is.
//!
//! A [`Capability`] names a type a component can be looked up by: its own
//! concrete type, or a trait object type such as `dyn SearchBox`. Rust has
//! no runtime "is assignable to" check, so each component type carries a
//! [`CapabilitySet`] listing the capabilities it provides together with a
//! projection from the concrete type to the capability type. Lookups filter
//! by tag membership and project through the stored function; no reflection
//! is involved.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a capability type.
///
/// Equality and hashing use the [`TypeId`] only; the name is carried for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct Capability {
    id: TypeId,
    name: &'static str,
}

impl Capability {
    /// The capability for `T`, which may be unsized (`dyn Trait`).
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The type identity of this capability.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this capability is `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Capability").field(&self.name).finish()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Casts an erased component to the capability type `T`.
trait Project<T: ?Sized>: Send + Sync {
    fn project<'a>(&self, component: &'a dyn Any) -> Option<&'a T>;
    fn project_mut<'a>(&self, component: &'a mut dyn Any) -> Option<&'a mut T>;
}

struct Projection<C, T: ?Sized> {
    shared: fn(&C) -> &T,
    exclusive: fn(&mut C) -> &mut T,
}

impl<C: Any, T: ?Sized + 'static> Project<T> for Projection<C, T> {
    fn project<'a>(&self, component: &'a dyn Any) -> Option<&'a T> {
        component.downcast_ref::<C>().map(self.shared)
    }

    fn project_mut<'a>(&self, component: &'a mut dyn Any) -> Option<&'a mut T> {
        component.downcast_mut::<C>().map(self.exclusive)
    }
}

struct Entry {
    capability: Capability,
    // Holds a `Box<dyn Project<T>>` for the entry's capability `T`.
    projection: Box<dyn Any + Send + Sync>,
}

/// The capabilities one concrete type `C` provides.
///
/// A set always starts with `C` itself. Further capabilities are added with
/// [`CapabilitySet::insert`], passing the shared and exclusive projections,
/// in practice two `|c| c` closures that coerce `&C` into `&dyn Trait`:
///
/// ```rust
/// use exodius_core::capability::{Capability, CapabilitySet};
///
/// trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".into()
///     }
/// }
///
/// let mut set = CapabilitySet::new::<English>();
/// set.insert::<English, dyn Greeter>(|c| c, |c| c);
///
/// let component = English;
/// let greeter = set.project::<dyn Greeter>(&component).unwrap();
/// assert_eq!(greeter.greet(), "hello");
/// assert!(set.contains(&Capability::of::<English>()));
/// ```
pub struct CapabilitySet {
    owner: Capability,
    entries: Vec<Entry>,
}

impl CapabilitySet {
    /// A set for `C` containing only `C` itself.
    pub fn new<C: Any + Send + Sync>() -> Self {
        let mut set = Self {
            owner: Capability::of::<C>(),
            entries: Vec::new(),
        };
        set.insert::<C, C>(|c| c, |c| c);
        set
    }

    /// The concrete type this set describes.
    pub fn owner(&self) -> Capability {
        self.owner
    }

    /// Add capability `T` for the concrete type `C`.
    ///
    /// Re-inserting an existing capability replaces its projections.
    ///
    /// # Panics
    ///
    /// Panics if `C` is not the type this set was created for; a projection
    /// for another type could never succeed.
    pub fn insert<C: Any, T: ?Sized + 'static>(
        &mut self,
        shared: fn(&C) -> &T,
        exclusive: fn(&mut C) -> &mut T,
    ) -> &mut Self {
        assert!(
            self.owner.is::<C>(),
            "capability projection for {} registered on {}",
            std::any::type_name::<C>(),
            self.owner
        );
        let capability = Capability::of::<T>();
        let projection: Box<dyn Project<T>> = Box::new(Projection { shared, exclusive });
        let entry = Entry {
            capability,
            projection: Box::new(projection),
        };
        match self.entries.iter_mut().find(|e| e.capability == capability) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// Whether the set provides `capability`.
    pub fn contains(&self, capability: &Capability) -> bool {
        self.entries.iter().any(|e| e.capability == *capability)
    }

    /// Whether the set provides the capability with this type identity.
    pub fn provides(&self, id: TypeId) -> bool {
        self.entries.iter().any(|e| e.capability.id() == id)
    }

    /// Capabilities in insertion order, starting with the owner.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.entries.iter().map(|e| e.capability)
    }

    /// Number of capabilities, including the owner.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a set contains at least its owner.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// View `component` as capability `T`.
    ///
    /// Returns `None` if `T` is not in the set or `component` is not the
    /// set's owner type.
    pub fn project<'a, T: ?Sized + 'static>(&self, component: &'a dyn Any) -> Option<&'a T> {
        self.projection::<T>()?.project(component)
    }

    /// Mutable form of [`CapabilitySet::project`].
    pub fn project_mut<'a, T: ?Sized + 'static>(
        &self,
        component: &'a mut dyn Any,
    ) -> Option<&'a mut T> {
        self.projection::<T>()?.project_mut(component)
    }

    fn projection<T: ?Sized + 'static>(&self) -> Option<&dyn Project<T>> {
        let id = TypeId::of::<T>();
        self.entries
            .iter()
            .find(|e| e.capability.id() == id)
            .and_then(|e| e.projection.downcast_ref::<Box<dyn Project<T>>>())
            .map(|p| &**p)
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilitySet")
            .field("owner", &self.owner)
            .field("capabilities", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Named {
        fn name(&self) -> &str;
        fn rename(&mut self, name: &str);
    }

    struct Widget {
        name: String,
    }

    impl Named for Widget {
        fn name(&self) -> &str {
            &self.name
        }

        fn rename(&mut self, name: &str) {
            self.name = name.to_string();
        }
    }

    struct Other;

    fn widget_set() -> CapabilitySet {
        let mut set = CapabilitySet::new::<Widget>();
        set.insert::<Widget, dyn Named>(|c| c, |c| c);
        set
    }

    #[test]
    fn new_set_contains_owner() {
        let set = CapabilitySet::new::<Widget>();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Capability::of::<Widget>()));
        assert!(!set.contains(&Capability::of::<dyn Named>()));
        assert_eq!(set.owner(), Capability::of::<Widget>());
    }

    #[test]
    fn project_through_trait_object() {
        let set = widget_set();
        let widget = Widget {
            name: "search".into(),
        };
        let named = set.project::<dyn Named>(&widget).unwrap();
        assert_eq!(named.name(), "search");
    }

    #[test]
    fn project_mut_reaches_the_instance() {
        let set = widget_set();
        let mut widget = Widget {
            name: "search".into(),
        };
        set.project_mut::<dyn Named>(&mut widget)
            .unwrap()
            .rename("nav");
        assert_eq!(widget.name, "nav");
    }

    #[test]
    fn project_rejects_foreign_instance() {
        let set = widget_set();
        assert!(set.project::<dyn Named>(&Other).is_none());
    }

    #[test]
    fn project_unknown_capability_is_none() {
        let set = CapabilitySet::new::<Widget>();
        let widget = Widget { name: "x".into() };
        assert!(set.project::<dyn Named>(&widget).is_none());
    }

    #[test]
    fn reinsert_does_not_duplicate() {
        let mut set = widget_set();
        set.insert::<Widget, dyn Named>(|c| c, |c| c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    #[should_panic(expected = "capability projection")]
    fn insert_for_wrong_owner_panics() {
        let mut set = CapabilitySet::new::<Widget>();
        set.insert::<Other, Other>(|c| c, |c| c);
    }

    #[test]
    fn capability_equality_ignores_name() {
        let a = Capability::of::<dyn Named>();
        let b = Capability::of::<dyn Named>();
        assert_eq!(a, b);
        assert_ne!(a, Capability::of::<Widget>());
        assert!(a.is::<dyn Named>());
        assert!(a.name().contains("Named"));
    }
}
