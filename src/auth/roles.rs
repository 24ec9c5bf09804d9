pub const ROLE_USER: &str = "User";
pub const ROLE_ADMIN: &str = "Admin";

/// Long-form role claim name some token issuers emit instead of `role`.
pub const ROLE_CLAIM_URI: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
