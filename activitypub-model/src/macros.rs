/// Generates the singular accessor pair for plural [`Relation`](crate::Relation) fields.
///
/// `field => get / set: Elem` expands to `get(&self) -> Option<&Elem>` (the
/// first element) and `set(&mut self, Option<Elem>)` (`None` clears the
/// relation, `Some` inserts at index 0).
macro_rules! relation_accessors {
    ($($(#[$meta:meta])* $field:ident => $get:ident / $set:ident : $elem:ty;)*) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $get(&self) -> Option<&$elem> {
                self.$field.first()
            }

            pub fn $set(&mut self, value: Option<$elem>) {
                self.$field.set_first(value);
            }
        )*
    };
}

pub(crate) use relation_accessors;
