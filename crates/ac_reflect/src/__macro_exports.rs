//! Items used by the code that `#[derive(Reflect)]` generates.

pub use alloc::boxed::Box;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::registry::{GetTypeMeta, TypeRegistry};

    /// A registration function submitted by `#[reflect(auto_register)]`.
    pub struct AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(AutoRegisterFunc);

    /// The function submitted for `T`.
    pub fn register_type<T: GetTypeMeta>(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }

    /// Runs every submitted function, returns how many ran.
    pub(crate) fn register_types(registry: &mut TypeRegistry) -> usize {
        let mut count = 0;
        for func in inventory::iter::<AutoRegisterFunc> {
            (func.0)(registry);
            count += 1;
        }
        count
    }
}
