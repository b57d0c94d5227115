//! Everything that deals with a decoded world as a whole: locating and loading it, walking its
//! object tree and turning the waynet into marker objects.

pub mod markers;
pub mod vob_walker;
pub mod waynet;
pub mod world_loader;

/// Items do not reference their visual directly, it is defined by the item's script instance.
/// Implementors run the script VM (or any other lookup) to find it.
pub trait ItemVisualResolver {
    /// The visual of the item instance `object_name`, e.g. `ITMI_GOLD.3DS`.
    fn resolve_item_visual(&self, object_name: &str) -> Option<String>;
}

/// Resolves no item at all, every item is skipped.
pub struct NoItemVisuals {}

impl ItemVisualResolver for NoItemVisuals {
    fn resolve_item_visual(&self, _object_name: &str) -> Option<String> {
        None
    }
}
