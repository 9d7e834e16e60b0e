/*
 * Responsibility
 * - middleware public interface
 * - http::apply(...), security_headers::apply(...)
 */
pub mod http;
pub mod security_headers;
