// Protected handlers - JWT authentication required
//
// Route prefix: /api/*. The jwt_auth_middleware runs ahead of everything
// here and injects an AuthUser extension; handlers scope every query to
// that user's id.

pub mod auth;
pub mod projects;
pub mod tasks;
