#![no_main]

use libfuzzer_sys::fuzz_target;

use guild_crypto::address_from_label;
use guild_runtime::Chain;
use guild_types::{Amount, Call, CreateOrgParams, Salt};

// Throw arbitrary calldata at every contract kind on a live chain. No input
// may panic, and a reverted transaction must leave the log untouched.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut chain = Chain::default();
    let deployer = address_from_label("deployer");
    let Ok(core) = chain.deploy_core(&deployer) else {
        return;
    };
    let create = Call::CreateOrg {
        creator: deployer,
        params: CreateOrgParams {
            org_implementation: core.org_implementation,
            registry_implementation: core.registry_implementation,
            name: "Fuzz".into(),
            salt: Salt::ZERO,
            roles: vec![],
            role_admins: vec![],
            members: vec![],
            org_functions: vec![],
            org_function_roles: vec![],
            actions: vec![],
            action_roles: vec![],
        },
    };
    let Ok(receipt) = chain.submit(&deployer, &core.factory, &create) else {
        return;
    };
    let Some((org, registry)) = receipt.output.as_org_pair() else {
        return;
    };

    let targets = [
        org,
        registry,
        core.factory,
        core.treasury_factory,
        core.org_implementation,
    ];
    let target = targets[data[0] as usize % targets.len()];
    let sender = address_from_label("sender");
    chain.fund(&sender, Amount::new(1_000)).ok();

    let logs_before = chain.logs().len();
    let value = Amount::new(u128::from(data[0] >> 4));
    if chain.transact(&sender, &target, value, &data[1..]).is_err() {
        assert_eq!(chain.logs().len(), logs_before);
        assert_eq!(chain.native_balance(&sender), Amount::new(1_000));
    }
});
