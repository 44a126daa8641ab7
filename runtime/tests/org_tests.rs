//! Org `execute` semantics on a live chain: batching, value forwarding,
//! reentrancy, depth limits and governance over the org's own registry.

mod common;

use common::{grant, salt_of, upgrade_role, wallet, Fixture};
use guild_runtime::{Blueprint, Chain, ChainConfig};
use guild_types::{
    signatures, Action, Address, Amount, Call, CallOutput, ContractError, Role,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn batch(calls: Vec<(Address, Amount, Call)>) -> Call {
    let mut targets = Vec::new();
    let mut values = Vec::new();
    let mut calldatas = Vec::new();
    for (target, value, call) in calls {
        targets.push(target);
        values.push(value);
        calldatas.push(call.encode());
    }
    Call::Execute {
        targets,
        values,
        calldatas,
    }
}

fn executor() -> Address {
    wallet("executor1")
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

#[test]
fn batch_returns_every_sub_call_output() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let registry = created.access_registry;

    let call = batch(vec![
        (registry, Amount::ZERO, grant(Role::EXECUTOR, wallet("executor3"))),
        (
            registry,
            Amount::ZERO,
            Call::HasRole {
                role: Role::EXECUTOR,
                account: wallet("executor3"),
            },
        ),
    ]);
    let receipt = fx.chain.submit(&executor(), &created.org, &call).unwrap();
    assert_eq!(
        receipt.output,
        CallOutput::Batch(vec![CallOutput::Unit, CallOutput::Bool(true)])
    );
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let receipt = fx
        .chain
        .submit(&executor(), &created.org, &batch(Vec::new()))
        .unwrap();
    assert_eq!(receipt.output, CallOutput::Batch(Vec::new()));
}

#[test]
fn unequal_batch_arrays_are_rejected() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let call = Call::Execute {
        targets: vec![created.access_registry],
        values: vec![],
        calldatas: vec![grant(Role::EXECUTOR, wallet("x")).encode()],
    };
    assert_eq!(
        fx.chain.submit(&executor(), &created.org, &call),
        Err(ContractError::ArraysNotEqual)
    );
}

#[test]
fn authorization_is_checked_before_lengths() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let outsider = wallet("outsider");
    let call = Call::Execute {
        targets: vec![created.access_registry],
        values: vec![],
        calldatas: vec![],
    };
    let err = fx.chain.submit(&outsider, &created.org, &call).unwrap_err();
    assert!(err.is_authorization_denied());
}

#[test]
fn failing_sub_call_reports_its_index_and_reverts_the_batch() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let registry = created.access_registry;
    let logs_before = fx.chain.logs().len();

    let call = batch(vec![
        (registry, Amount::ZERO, grant(Role::EXECUTOR, wallet("executor3"))),
        (
            registry,
            Amount::ZERO,
            Call::Initialize(guild_types::RegistryInit::default()),
        ),
    ]);
    let err = fx.chain.submit(&executor(), &created.org, &call).unwrap_err();

    let ContractError::SubCallFailed { index, source } = &err else {
        panic!("expected a sub-call failure, got {err:?}");
    };
    assert_eq!(*index, 1);
    assert_eq!(**source, ContractError::AlreadyInitialized);
    assert!(!fx.has_role(&registry, &Role::EXECUTOR, &wallet("executor3")));
    assert_eq!(fx.chain.logs().len(), logs_before);
    assert!(fx.chain.org(&created.org).unwrap().guard().is_idle());
}

#[test]
fn calls_to_addresses_without_code_succeed() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let call = batch(vec![(wallet("eoa"), Amount::ZERO, Call::Name)]);
    let receipt = fx.chain.submit(&executor(), &created.org, &call).unwrap();
    assert_eq!(receipt.output, CallOutput::Batch(vec![CallOutput::Unit]));
}

#[test]
fn implementations_expose_no_functions_directly() {
    let mut fx = Fixture::new();
    let implementation = fx.core.org_implementation;
    let err = fx
        .chain
        .submit(&executor(), &implementation, &Call::Name)
        .unwrap_err();
    assert!(matches!(err, ContractError::UnknownFunction { .. }));
}

#[test]
fn garbage_calldata_is_rejected() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let err = fx
        .chain
        .transact(&executor(), &created.org, Amount::ZERO, &[0xff, 0xff, 0xff, 0xff, 0x07])
        .unwrap_err();
    assert!(matches!(err, ContractError::InvalidCalldata(_)));
}

// ---------------------------------------------------------------------------
// Native value
// ---------------------------------------------------------------------------

#[test]
fn org_accepts_value_and_forwards_it() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let donor = wallet("donor");
    let payee = wallet("payee");
    fx.chain.fund(&donor, Amount::new(50)).unwrap();

    fx.chain
        .transact(&donor, &created.org, Amount::new(50), &[])
        .expect("orgs accept plain transfers");
    assert_eq!(fx.chain.native_balance(&created.org), Amount::new(50));

    let call = batch(vec![(payee, Amount::new(30), Call::Name)]);
    fx.chain.submit(&executor(), &created.org, &call).unwrap();
    assert_eq!(fx.chain.native_balance(&created.org), Amount::new(20));
    assert_eq!(fx.chain.native_balance(&payee), Amount::new(30));
}

#[test]
fn overspending_sub_call_fails_the_batch() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let call = batch(vec![(wallet("payee"), Amount::new(1), Call::Name)]);
    let err = fx.chain.submit(&executor(), &created.org, &call).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &ContractError::InsufficientBalance {
            needed: 1,
            available: 0
        }
    );
}

// ---------------------------------------------------------------------------
// Reentrancy
// ---------------------------------------------------------------------------

#[test]
fn org_cannot_reenter_its_own_execute() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    fx.execute_one(
        &executor(),
        &created.org,
        &created.access_registry,
        &grant(Role::EXECUTOR, created.org),
    )
    .unwrap();

    let inner = batch(vec![(
        created.access_registry,
        Amount::ZERO,
        grant(Role::EXECUTOR, wallet("executor3")),
    )]);
    let outer = batch(vec![(created.org, Amount::ZERO, inner)]);
    let err = fx.chain.submit(&executor(), &created.org, &outer).unwrap_err();

    assert_eq!(err.root_cause(), &ContractError::ReentrantCall);
    assert!(!fx.has_role(&created.access_registry, &Role::EXECUTOR, &wallet("executor3")));
    assert!(fx.chain.org(&created.org).unwrap().guard().is_idle());
}

#[test]
fn upgrade_inside_execute_is_rejected() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let v2 = fx
        .chain
        .deploy(&fx.deployer, Blueprint::OrgImplementation { version: 2 })
        .unwrap();
    fx.execute_one(
        &executor(),
        &created.org,
        &created.access_registry,
        &grant(upgrade_role(), created.org),
    )
    .unwrap();

    let err = fx
        .execute_one(
            &executor(),
            &created.org,
            &created.org,
            &Call::UpgradeTo { implementation: v2 },
        )
        .unwrap_err();
    assert_eq!(err.root_cause(), &ContractError::ReentrantCall);
    assert_eq!(fx.chain.implementation_version(&created.org), Some(1));
}

// ---------------------------------------------------------------------------
// Depth
// ---------------------------------------------------------------------------

#[test]
fn nested_calls_past_the_depth_limit_fail() {
    let config = ChainConfig {
        max_call_depth: 2,
        ..ChainConfig::default()
    };
    let mut fx = Fixture::with_chain(Chain::new(config));
    let outer = fx.standard_org();
    let receipt = fx.create_org(fx.standard_params("inner"));
    let (inner_org, inner_registry) = receipt.output.as_org_pair().unwrap();

    // One level of nesting fits.
    fx.execute_one(
        &executor(),
        &inner_org,
        &inner_registry,
        &grant(Role::EXECUTOR, outer.org),
    )
    .unwrap();

    // Outer org driving the inner org needs a third level.
    let inner_batch = batch(vec![(
        inner_registry,
        Amount::ZERO,
        grant(Role::EXECUTOR, wallet("executor3")),
    )]);
    let err = fx
        .execute_one(&executor(), &outer.org, &inner_org, &inner_batch)
        .unwrap_err();
    assert_eq!(err.root_cause(), &ContractError::CallDepthExceeded(2));
    assert!(!fx.has_role(&inner_registry, &Role::EXECUTOR, &wallet("executor3")));
}

// ---------------------------------------------------------------------------
// Governance over the registry
// ---------------------------------------------------------------------------

#[test]
fn empty_org_is_inert() {
    let mut fx = Fixture::new();
    let receipt = fx.create_org(fx.empty_params("empty"));
    let (org, registry) = receipt.output.as_org_pair().unwrap();
    let hopeful = wallet("hopeful");

    let err = fx
        .chain
        .submit(&hopeful, &registry, &grant(Role::EXECUTOR, hopeful))
        .unwrap_err();
    assert_eq!(err, ContractError::denied_role(hopeful, Role::DEFAULT_ADMIN));

    let err = fx
        .execute_one(&hopeful, &org, &registry, &grant(Role::EXECUTOR, hopeful))
        .unwrap_err();
    assert!(err.is_authorization_denied());
}

#[test]
fn org_creates_roles_and_delegates_their_administration() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let registry = created.access_registry;
    let steward = wallet("steward");
    let member = wallet("member");

    let create = Call::CreateRoles {
        roles: vec![Role::from("STEWARD_ROLE"), Role::from("MEMBER_ROLE")],
        role_admins: vec![Role::DEFAULT_ADMIN, Role::from("STEWARD_ROLE")],
        members: vec![vec![steward], vec![]],
    };
    fx.execute_one(&executor(), &created.org, &registry, &create)
        .unwrap();

    fx.chain
        .submit(&steward, &registry, &grant(Role::from("MEMBER_ROLE"), member))
        .expect("steward administers members");
    assert!(fx.has_role(&registry, &Role::from("MEMBER_ROLE"), &member));

    let err = fx
        .chain
        .submit(&member, &registry, &grant(Role::from("STEWARD_ROLE"), member))
        .unwrap_err();
    assert_eq!(err, ContractError::denied_role(member, Role::DEFAULT_ADMIN));
}

#[test]
fn org_can_revoke_an_executor() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let registry = created.access_registry;
    let revoke = Call::AdminRevokeRole {
        role: Role::EXECUTOR,
        account: wallet("executor2"),
    };
    fx.execute_one(&executor(), &created.org, &registry, &revoke)
        .unwrap();
    assert!(!fx.has_role(&registry, &Role::EXECUTOR, &wallet("executor2")));

    let err = fx
        .execute_one(
            &wallet("executor2"),
            &created.org,
            &registry,
            &grant(Role::EXECUTOR, wallet("executor2")),
        )
        .unwrap_err();
    assert!(err.is_authorization_denied());
}

#[test]
fn org_never_loses_default_admin() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let registry = created.access_registry;
    let revoke_root = Call::AdminRevokeRole {
        role: Role::DEFAULT_ADMIN,
        account: created.org,
    };

    let err = fx
        .execute_one(&executor(), &created.org, &registry, &revoke_root)
        .unwrap_err();
    assert_eq!(err.root_cause(), &ContractError::CannotRevokeRoot(created.org));
    assert!(fx.has_role(&registry, &Role::DEFAULT_ADMIN, &created.org));

    // A deputy holding default-admin directly is refused as well.
    let deputy = wallet("deputy");
    fx.execute_one(
        &executor(),
        &created.org,
        &registry,
        &grant(Role::DEFAULT_ADMIN, deputy),
    )
    .unwrap();
    let err = fx.chain.submit(&deputy, &registry, &revoke_root).unwrap_err();
    assert_eq!(err, ContractError::CannotRevokeRoot(created.org));
    assert!(fx.has_role(&registry, &Role::DEFAULT_ADMIN, &created.org));
}

#[test]
fn org_can_lock_itself_out_of_role_creation() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let registry = created.access_registry;
    let create_roles = Action::new(registry, signatures::CREATE_ROLES);

    let remove = Call::RemoveActionsRoles {
        actions: vec![create_roles.clone()],
        roles: vec![vec![Role::DEFAULT_ADMIN]],
    };
    fx.execute_one(&executor(), &created.org, &registry, &remove)
        .unwrap();

    let create = Call::CreateRoles {
        roles: vec![Role::from("LATE_ROLE")],
        role_admins: vec![Role::DEFAULT_ADMIN],
        members: vec![vec![]],
    };
    let err = fx
        .execute_one(&executor(), &created.org, &registry, &create)
        .unwrap_err();
    assert_eq!(
        err.root_cause(),
        &ContractError::denied_action(created.org, create_roles)
    );
}

#[test]
fn is_authorized_is_answered_for_any_account() {
    let mut fx = Fixture::new();
    let created = fx.standard_org();
    let execute = Action::new(created.org, signatures::EXECUTE);

    let yes = fx
        .chain
        .query(
            &created.access_registry,
            &Call::IsAuthorized {
                caller: executor(),
                action: execute.clone(),
            },
        )
        .unwrap();
    let no = fx
        .chain
        .query(
            &created.access_registry,
            &Call::IsAuthorized {
                caller: wallet("upgrader1"),
                action: execute,
            },
        )
        .unwrap();
    assert_eq!(yes, CallOutput::Bool(true));
    assert_eq!(no, CallOutput::Bool(false));
}

#[test]
fn orgs_sharing_a_factory_are_isolated() {
    let mut fx = Fixture::new();
    let first = fx.standard_org();
    let second_params = fx.standard_params("second");
    assert_ne!(second_params.salt, salt_of("hi"));
    let receipt = fx.create_org(second_params);
    let (second_org, second_registry) = receipt.output.as_org_pair().unwrap();

    // executor1 holds EXECUTE in both, but each grant lands only in its own registry.
    fx.execute_one(
        &executor(),
        &first.org,
        &first.access_registry,
        &grant(Role::from("SCOPED_ROLE"), wallet("scoped")),
    )
    .unwrap();
    assert!(fx.has_role(&first.access_registry, &Role::from("SCOPED_ROLE"), &wallet("scoped")));
    assert!(!fx.has_role(&second_registry, &Role::from("SCOPED_ROLE"), &wallet("scoped")));

    // The first org is not an admin of the second registry.
    let err = fx
        .execute_one(
            &executor(),
            &first.org,
            &second_registry,
            &grant(Role::EXECUTOR, wallet("intruder")),
        )
        .unwrap_err();
    assert_eq!(
        err.root_cause(),
        &ContractError::denied_role(first.org, Role::DEFAULT_ADMIN)
    );
    assert_ne!(second_org, first.org);
}
