//! Ownership trait for user-owned resources.
//!
//! Conversations belong to exactly one user; every read, write and delete
//! checks ownership through this trait before touching the store.

use super::UserId;

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owned {
        owner: UserId,
    }

    impl OwnedByUser for Owned {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    #[test]
    fn only_the_owner_matches() {
        let resource = Owned {
            owner: UserId::new("alice").unwrap(),
        };
        assert!(resource.is_owner(&UserId::new("alice").unwrap()));
        assert!(!resource.is_owner(&UserId::new("bob").unwrap()));
    }
}
