use proptest::prelude::*;

use guild_access::AccessRegistry;
use guild_crypto::address_from_label;
use guild_types::{Action, Address, ContractError, RegistryInit, Role};

fn org() -> Address {
    address_from_label("org")
}

fn registry() -> AccessRegistry {
    let mut registry = AccessRegistry::new(address_from_label("registry"));
    registry
        .initialize(
            &address_from_label("factory"),
            RegistryInit {
                root: org(),
                ..Default::default()
            },
            &mut Vec::new(),
        )
        .unwrap();
    registry
}

fn role_name() -> impl Strategy<Value = Role> {
    "[A-Z]{1,8}_ROLE".prop_map(Role::from)
}

fn target_action() -> Action {
    Action::new(address_from_label("module"), "doThing(uint256)")
}

proptest! {
    /// Granting twice equals granting once; revoking twice equals revoking once.
    #[test]
    fn membership_is_idempotent(role in role_name(), account in prop::array::uniform20(0u8..)) {
        let mut registry = registry();
        let account = Address::new(account);
        let mut events = Vec::new();

        registry.admin_grant_role(&org(), role.clone(), account, &mut events).unwrap();
        registry.admin_grant_role(&org(), role.clone(), account, &mut events).unwrap();
        prop_assert!(registry.has_role(&role, &account));
        prop_assert_eq!(events.len(), 1);

        registry.admin_revoke_role(&org(), role.clone(), account, &mut events).unwrap();
        registry.admin_revoke_role(&org(), role.clone(), account, &mut events).unwrap();
        prop_assert!(!registry.has_role(&role, &account));
        prop_assert_eq!(events.len(), 2);
    }

    /// Added roles come back in insertion order; removing one keeps the rest in order.
    #[test]
    fn action_roles_keep_insertion_order(
        roles in prop::collection::vec(role_name(), 1..8),
        remove_idx in any::<prop::sample::Index>(),
    ) {
        let mut registry = registry();
        let action = target_action();
        registry
            .add_actions_roles(&org(), vec![action.clone()], vec![roles.clone()], &mut Vec::new())
            .unwrap();

        let mut expected: Vec<Role> = Vec::new();
        for role in &roles {
            if !expected.contains(role) {
                expected.push(role.clone());
            }
        }
        prop_assert_eq!(registry.get_action_roles(&action), expected.as_slice());

        let removed = expected.remove(remove_idx.index(expected.len()));
        registry
            .remove_actions_roles(&org(), vec![action.clone()], vec![vec![removed.clone()]], &mut Vec::new())
            .unwrap();
        prop_assert_eq!(registry.get_action_roles(&action), expected.as_slice());
        prop_assert!(!registry.is_role_authorized(&action, &removed));
    }

    /// `isAuthorized` is exactly "holds at least one authorized role".
    #[test]
    fn authorization_matches_or_predicate(
        authorized in prop::collection::vec(role_name(), 0..4),
        held in prop::collection::vec(role_name(), 0..4),
    ) {
        let mut registry = registry();
        let caller = address_from_label("caller");
        let action = target_action();
        registry
            .add_actions_roles(&org(), vec![action.clone()], vec![authorized.clone()], &mut Vec::new())
            .unwrap();
        for role in &held {
            registry.admin_grant_role(&org(), role.clone(), caller, &mut Vec::new()).unwrap();
        }

        let expected = authorized.iter().any(|r| held.contains(r));
        prop_assert_eq!(registry.is_authorized(&caller, &action), expected);
    }

    /// Every batched registry entry point rejects mismatched parallel arrays.
    #[test]
    fn batches_reject_length_mismatch(longer_first in any::<bool>()) {
        let mut registry = registry();
        let (n_actions, n_lists) = if longer_first { (2, 1) } else { (1, 2) };
        let actions = vec![target_action(); n_actions];
        let lists = vec![vec![Role::EXECUTOR]; n_lists];

        let err = registry
            .add_actions_roles(&org(), actions.clone(), lists.clone(), &mut Vec::new())
            .unwrap_err();
        prop_assert_eq!(err, ContractError::ArraysNotEqual);
        let err = registry
            .remove_actions_roles(&org(), actions, lists, &mut Vec::new())
            .unwrap_err();
        prop_assert_eq!(err, ContractError::ArraysNotEqual);

        let err = registry
            .create_roles(
                &org(),
                vec![Role::EXECUTOR; n_actions],
                vec![Role::DEFAULT_ADMIN; n_lists],
                vec![Vec::new(); n_actions],
                &mut Vec::new(),
            )
            .unwrap_err();
        prop_assert_eq!(err, ContractError::ArraysNotEqual);
    }
}
