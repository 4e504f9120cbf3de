/*
 * Responsibility
 * - router-wide middleware (authorization lives in the Authorized<P> extractor)
 */
pub mod cors;
pub mod http;
