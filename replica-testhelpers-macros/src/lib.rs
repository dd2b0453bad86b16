//! The `#[test]` attribute re-exported by `replica-testhelpers`.

use unsynn::*;

// A test function, split at its body. Everything before the body (attributes,
// qualifiers, name, signature) is passed through untouched.
unsynn! {
    struct Head {
        tokens: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        head: Head,
        body: BraceGroup,
    }
}

impl quote::ToTokens for Head {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.tokens.to_tokens(tokens)
    }
}

/// Run a test with the `replica-testhelpers` setup in place.
///
/// ```ignore
/// use replica_testhelpers::test;
///
/// #[test]
/// fn copies() {}
/// ```
///
/// Another test attribute can be named as argument, it then replaces the
/// built-in `#[test]`.
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr = TokenStream::from(attr);
    let item = TokenStream::from(item);

    let TestFn { head, body } = match item.to_token_iter().parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(err) => panic!("#[test] expects a function: {err:?}"),
    };
    let statements = body.0.stream();

    let runner = if attr.is_empty() {
        quote::quote! { ::core::prelude::rust_2024::test }
    } else {
        attr
    };

    quote::quote! {
        #[#runner]
        #head {
            ::replica_testhelpers::setup();
            #statements
        }
    }
    .into()
}
