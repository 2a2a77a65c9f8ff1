//! Procedural macros for defining board operations
//!
//! `#[operation]` implements `projectboard_operations::Operation` for a
//! struct. The struct's serialized fields are the operation's input.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, DeriveInput, Ident, LitStr, Token,
};

/// Attribute macro for defining an operation
///
/// # Usage
///
/// ```ignore
/// #[operation(verb = "move", noun = "task", description = "Move a task")]
/// #[derive(Debug, Deserialize, Serialize)]
/// pub struct MoveTask {
///     pub id: TaskId,
///     pub position: usize,
///     pub column: Option<ColumnId>,
/// }
/// ```
#[proc_macro_attribute]
pub fn operation(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as OperationArgs);
    let input = parse_macro_input!(item as DeriveInput);

    match expand_operation(&args, &input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand_operation(
    args: &OperationArgs,
    input: &DeriveInput,
) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    match &input.data {
        syn::Data::Struct(data) if !matches!(data.fields, syn::Fields::Unnamed(_)) => {}
        syn::Data::Struct(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "operation macro does not support tuple structs",
            ))
        }
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "operation macro only supports structs",
            ))
        }
    }

    let OperationArgs {
        verb,
        noun,
        description,
    } = args;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics projectboard_operations::Operation for #name #ty_generics #where_clause {
            fn verb(&self) -> &'static str {
                #verb
            }

            fn noun(&self) -> &'static str {
                #noun
            }

            fn description(&self) -> &'static str {
                #description
            }
        }
    })
}

/// `verb = "...", noun = "...", description = "..."`
struct OperationArgs {
    verb: LitStr,
    noun: LitStr,
    description: LitStr,
}

impl Parse for OperationArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut verb = None;
        let mut noun = None;
        let mut description = None;

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: LitStr = input.parse()?;

            let slot = match key.to_string().as_str() {
                "verb" => &mut verb,
                "noun" => &mut noun,
                "description" => &mut description,
                other => {
                    return Err(syn::Error::new_spanned(
                        &key,
                        format!("unknown operation argument `{}`", other),
                    ))
                }
            };
            if slot.replace(value).is_some() {
                return Err(syn::Error::new_spanned(key, "duplicate operation argument"));
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        let missing = |what: &str| input.error(format!("missing `{}` argument", what));
        Ok(Self {
            verb: verb.ok_or_else(|| missing("verb"))?,
            noun: noun.ok_or_else(|| missing("noun"))?,
            description: description.ok_or_else(|| missing("description"))?,
        })
    }
}
