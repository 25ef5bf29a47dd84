/*
 * Responsibility
 * - Public entry points of the middleware layer
 * - auth::access::apply (bearer gate), http::apply (transport concerns)
 */
pub mod auth;
pub mod http;
