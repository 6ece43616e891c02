//! Pages: entities with metadata and a fixed component set.

use crate::entity::Entity;
use exodius_core::PageMeta;

/// A page definition: where the page lives and which components it has.
///
/// Build one with [`Entity::for_page`].
pub trait PageEntity {
    /// Route, DOM anchor and display name of the page.
    fn meta() -> PageMeta;

    /// Register the page's components on `entity`.
    fn compose(entity: &mut Entity);
}
