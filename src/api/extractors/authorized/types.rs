/*
 * Responsibility
 * - one marker type per capability the API checks
 * - everything `pub` here is re-exported through ./mod.rs
 */
use super::core::Permission;

macro_rules! permission {
    ($tag:ident, $name:literal) => {
        pub enum $tag {}

        impl Permission for $tag {
            const NAME: &'static str = $name;
        }
    };
}

permission!(GetDrinksDetail, "get:drinks-detail");
permission!(PostDrinks, "post:drinks");
permission!(PatchDrinks, "patch:drinks");
permission!(DeleteDrinks, "delete:drinks");
