// Public handlers - no authentication required (token acquisition lives here)
pub mod auth;
