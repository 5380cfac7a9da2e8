/*
 * Responsibility
 * - middleware public interface
 * - cors::apply(...), http::apply(...)
 */
pub mod cors;
pub mod http;
