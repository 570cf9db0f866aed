use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

// Derives the CSV column list for a telemetry log payload.
// The field tagged `#[timestamp]` is written by the log line itself, so it is
// left out of the header.
// Usage: #[derive(TelemetryPayload)]

#[proc_macro_derive(TelemetryPayload, attributes(timestamp))]
pub fn telemetry_payload(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return syn::Error::new_spanned(name, "TelemetryPayload can only be derived for structs")
            .to_compile_error()
            .into();
    };
    let Fields::Named(fields) = &data.fields else {
        return syn::Error::new_spanned(name, "TelemetryPayload requires named fields")
            .to_compile_error()
            .into();
    };

    let columns: Vec<String> = fields
        .named
        .iter()
        .filter(|field| !field.attrs.iter().any(|attr| attr.path().is_ident("timestamp")))
        .filter_map(|field| field.ident.as_ref().map(|ident| ident.unraw().to_string()))
        .collect();

    let header = columns.join(",");
    let count = columns.len();

    let output = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Payload column names in declaration order.
            pub const CSV_HEADER: &'static str = #header;
            /// Number of payload columns.
            pub const CSV_COLUMNS: usize = #count;
        }
    };

    output.into()
}
