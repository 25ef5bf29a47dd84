/*!
 * Request extractors
 *
 * Public API:
 * - CurrentPrincipal
 */
mod principal;

pub use principal::CurrentPrincipal;
