//! Component instantiation
//!
//! A type is a component when its declaration carries a `ComponentTag`.
//! Instantiation only builds a fresh default value; there is no registry
//! and no scope handling.

use declara_core::{Reflect, TypeDescriptor};

/// Whether the declaration is marked as a component
pub fn is_component(descriptor: &TypeDescriptor) -> bool {
    descriptor.is_component()
}

/// Build a fresh instance of `T` if it is declared as a component
///
/// Returns `None` for types without a component marker.
pub fn create_instance<T: Reflect + Default>() -> Option<T> {
    let descriptor = T::type_descriptor();
    let tag = descriptor.component.as_ref()?;
    tracing::info!(
        "Created component {} ({}, scope {})",
        tag.name,
        descriptor.name,
        tag.scope
    );
    Some(T::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{MEMBER, Member, PLAIN, Plain};

    #[test]
    fn test_is_component() {
        assert!(is_component(&MEMBER));
        assert!(!is_component(&PLAIN));
    }

    #[test]
    fn test_create_component() {
        let member = create_instance::<Member>().unwrap();
        assert!(member.member_id.is_none());
        assert!(member.username.is_none());
    }

    #[test]
    fn test_plain_type_is_not_instantiated() {
        assert!(create_instance::<Plain>().is_none());
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = create_instance::<Member>().unwrap();
        first.age = Some(30);
        let second = create_instance::<Member>().unwrap();
        assert_eq!(second.age, None);
    }
}
