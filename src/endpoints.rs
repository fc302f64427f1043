//! The application's route URIs.
//!
//! For endpoints that take a parameter, e.g., '/entries/{entry_id}', use
//! [format_endpoint].

use std::fmt::Display;

/// The root route which redirects to the ledger page.
pub const ROOT: &str = "/";
/// The page displaying the ledger: filters, totals, charts, and the entry table.
pub const LEDGER_VIEW: &str = "/ledger";
/// The page for recording a new entry.
pub const NEW_ENTRY_VIEW: &str = "/ledger/new";
/// The page for editing an existing entry.
pub const EDIT_ENTRY_VIEW: &str = "/ledger/{entry_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for creating an entry (form submission), and for wiping every
/// entry via DELETE.
pub const ENTRIES: &str = "/entries";
/// The route for updating or deleting a single entry (form submission).
pub const ENTRY: &str = "/entries/{entry_id}";

/// The JSON API route for listing, creating, and bulk-deleting entries.
pub const API_DETAILS: &str = "/api/details";
/// The JSON API route for updating or deleting a single entry.
pub const API_DETAIL: &str = "/api/details/{id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/entries/{entry_id}', '{entry_id}' is
/// the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::{endpoints, entry::EntryId};

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::LEDGER_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_ENTRY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_ENTRY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::ENTRIES);
        assert_endpoint_is_valid_uri(endpoints::ENTRY);
        assert_endpoint_is_valid_uri(endpoints::API_DETAILS);
        assert_endpoint_is_valid_uri(endpoints::API_DETAIL);
    }

    #[test]
    fn produces_valid_uri_from_entry_id() {
        let formatted_path = format_endpoint(endpoints::ENTRY, EntryId::new("a1b2c3"));

        assert_eq!(formatted_path, "/entries/a1b2c3");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
