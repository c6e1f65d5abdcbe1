use proc_macro::TokenStream;

mod or_variant;

/// Emits the annotated fluent method unchanged plus an `or_` prefixed twin
/// in which every `Conjunction::And` path of the body reads `Conjunction::Or`.
#[proc_macro_attribute]
pub fn or_variant(attr: TokenStream, item: TokenStream) -> TokenStream {
    or_variant::or_variant_impl(attr, item)
}
