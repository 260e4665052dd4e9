// Role-based authorization check for the admin panel

use poise::serenity_prelude as serenity;

/// True iff the actor's role set contains the required role.
/// Pure membership test; callers decide what to do with a denial.
pub fn is_authorized(roles: &[serenity::RoleId], required: serenity::RoleId) -> bool {
    roles.contains(&required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_with_role_is_authorized() {
        let roles = vec![serenity::RoleId::new(1), serenity::RoleId::new(77)];
        assert!(is_authorized(&roles, serenity::RoleId::new(77)));
    }

    #[test]
    fn member_without_role_is_denied() {
        let roles = vec![serenity::RoleId::new(1), serenity::RoleId::new(2)];
        assert!(!is_authorized(&roles, serenity::RoleId::new(77)));
    }

    #[test]
    fn empty_role_set_is_denied() {
        assert!(!is_authorized(&[], serenity::RoleId::new(77)));
    }
}
