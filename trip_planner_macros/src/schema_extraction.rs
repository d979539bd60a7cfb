use syn::{
    parse::Parser, punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Fields,
    ItemStruct, Lit, LitStr, MetaNameValue, Token,
};

/// `name = "..."` / `description = "..."` overrides accepted by the attribute.
#[derive(Default)]
pub struct SchemaArgs {
    pub name: Option<LitStr>,
    pub description: Option<LitStr>,
}

impl SchemaArgs {
    pub fn parse(attr: proc_macro::TokenStream) -> syn::Result<Self> {
        let mut args = SchemaArgs::default();
        if attr.is_empty() {
            return Ok(args);
        }

        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse(attr)?;
        for pair in pairs {
            let key = pair
                .path
                .get_ident()
                .ok_or_else(|| syn::Error::new_spanned(&pair.path, "expected identifier"))?;

            let value = match &pair.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.clone(),
                other => {
                    return Err(syn::Error::new_spanned(other, "expected string literal"));
                }
            };

            let slot = match key.to_string().as_str() {
                "name" => &mut args.name,
                "description" => &mut args.description,
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("unsupported argument `{other}`"),
                    ));
                }
            };

            if slot.replace(value).is_some() {
                return Err(syn::Error::new(
                    key.span(),
                    format!("duplicate `{key}` argument"),
                ));
            }
        }

        Ok(args)
    }
}

pub fn require_named_fields(item: &ItemStruct) -> syn::Result<()> {
    if matches!(item.fields, Fields::Named(_)) {
        Ok(())
    } else {
        Err(syn::Error::new(
            item.struct_token.span(),
            "`#[completion_schema]` requires a struct with named fields",
        ))
    }
}

/// Joined `///` lines of an item, or `None` when it has none.
pub fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(MetaNameValue {
                value:
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(lit), ..
                    }),
                ..
            }) => Some(lit.value().trim().to_string()),
            _ => None,
        })
        .collect();

    (!lines.is_empty()).then(|| lines.join("\n"))
}

pub fn field_docs(item: &ItemStruct) -> Vec<(String, String)> {
    let Fields::Named(fields) = &item.fields else {
        return Vec::new();
    };

    fields
        .named
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            doc_text(&field.attrs).map(|doc| (ident.to_string(), doc))
        })
        .collect()
}
