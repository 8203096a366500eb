//! # homescreen-macros
//!
//! Procedural macros for the homescreen section registry.
//!
//! - `#[derive(DeclaredSection)]` - compile-time default metadata for a section type

use proc_macro::TokenStream;

mod section;

/// Derive `DeclaredSection` from a `#[section(...)]` attribute.
///
/// # Attributes
///
/// - `key = "..."` (required, non-empty) - stable section key
/// - `display_text = "..."` - label shown by the frontend
/// - `limit = N` - instances one user may see at once (at least 1)
/// - `route = "..."` - navigation target
/// - `additional_data = "..."` - opaque extra data
///
/// # Example
///
/// ```rust,ignore
/// #[derive(DeclaredSection)]
/// #[section(key = "LatestShows", display_text = "Latest Shows", route = "tvshows")]
/// struct LatestShows {
///     catalog: Arc<Catalog>,
/// }
///
/// assert_eq!(LatestShows::declared_meta().key(), "LatestShows");
/// ```
#[proc_macro_derive(DeclaredSection, attributes(section))]
pub fn derive_declared_section(input: TokenStream) -> TokenStream {
    section::derive_declared_section_impl(input)
}
