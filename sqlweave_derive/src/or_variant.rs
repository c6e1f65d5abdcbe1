use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{ImplItemFn, Path, parse_macro_input, parse_quote, visit_mut::VisitMut};

pub fn or_variant_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(Span::call_site(), "or_variant does not take arguments")
            .to_compile_error()
            .into();
    }

    // trait default methods parse as impl fns too, they only lack a visibility
    let original = parse_macro_input!(item as ImplItemFn);
    let mut variant = original.clone();
    let name = &original.sig.ident;
    variant.sig.ident = format_ident!("or_{}", name);

    let doc = format!(" Same as [`Self::{name}`] but joined to the previous predicate with `or`.");
    variant.attrs.retain(|attr| !attr.path().is_ident("doc"));
    variant.attrs.insert(0, parse_quote!(#[doc = #doc]));

    let mut swap = SwapConjunction { swapped: 0 };
    swap.visit_block_mut(&mut variant.block);
    if swap.swapped == 0 {
        return syn::Error::new_spanned(
            &original.sig.ident,
            "or_variant expects the body to use `Conjunction::And`",
        )
        .to_compile_error()
        .into();
    }

    quote! {
        #original
        #variant
    }
    .into()
}

struct SwapConjunction {
    swapped: usize,
}

impl VisitMut for SwapConjunction {
    fn visit_path_mut(&mut self, path: &mut Path) {
        let len = path.segments.len();
        if len >= 2
            && path.segments[len - 2].ident == "Conjunction"
            && path.segments[len - 1].ident == "And"
        {
            let span = path.segments[len - 1].ident.span();
            path.segments[len - 1].ident = syn::Ident::new("Or", span);
            self.swapped += 1;
        }
        syn::visit_mut::visit_path_mut(self, path);
    }
}
