//! HTTP security header name constants.
//!
//! Canonical names as recorded in the `site_security_headers` table.
//! Matching against stored names is case-insensitive.

/// X-XSS-Protection header
pub const HEADER_X_XSS_PROTECTION: &str = "X-XSS-Protection";
/// Content Security Policy header
pub const HEADER_CONTENT_SECURITY_POLICY: &str = "Content-Security-Policy";
/// X-Frame-Options header
pub const HEADER_X_FRAME_OPTIONS: &str = "X-Frame-Options";
/// X-Content-Type-Options header
pub const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "X-Content-Type-Options";
/// Referrer-Policy header
pub const HEADER_REFERRER_POLICY: &str = "Referrer-Policy";
/// HTTP Strict Transport Security header
pub const HEADER_STRICT_TRANSPORT_SECURITY: &str = "Strict-Transport-Security";
/// HTTP Public Key Pinning header
pub const HEADER_PUBLIC_KEY_PINS: &str = "Public-Key-Pins";
/// X-Permitted-Cross-Domain-Policies header
pub const HEADER_X_PERMITTED_CROSS_DOMAIN_POLICIES: &str = "X-Permitted-Cross-Domain-Policies";
