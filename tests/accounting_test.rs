/*!
 * Memory Accounting Tests
 * Charge/uncharge semantics against configured limits
 */

use gcgroup::{
    ChargeKind, ControlError, Identity, MemoryAccountant, MemoryError, MemoryLimit,
    ProcessRegistry, RegistryError,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn accountant_with_identity(identity: Identity) -> MemoryAccountant {
    let registry = ProcessRegistry::new();
    registry.create_process(identity.pid).unwrap();
    registry.create_accelerator(identity).unwrap();
    MemoryAccountant::new(registry)
}

#[test]
fn test_worked_example_from_contract() {
    let identity = Identity::new(1, 0);
    let accountant = accountant_with_identity(identity);
    accountant
        .set_limit(identity, MemoryLimit::from_raw(1000))
        .unwrap();

    accountant.try_charge(identity, 600, ChargeKind::Device).unwrap();
    assert_eq!(accountant.current(identity).unwrap(), 600);

    let err = accountant
        .try_charge(identity, 500, ChargeKind::Device)
        .unwrap_err();
    assert!(matches!(
        err,
        ControlError::Memory(MemoryError::LimitExceeded {
            requested: 500,
            limit: 1000,
            current: 600,
        })
    ));
    assert_eq!(accountant.current(identity).unwrap(), 600);

    accountant.uncharge(identity, 600, ChargeKind::Device).unwrap();
    assert_eq!(accountant.current(identity).unwrap(), 0);

    let err = accountant
        .uncharge(identity, 100, ChargeKind::Device)
        .unwrap_err();
    assert!(matches!(
        err,
        ControlError::Memory(MemoryError::Underflow {
            requested: 100,
            charged: 0,
        })
    ));
    assert_eq!(accountant.current(identity).unwrap(), 0);
}

#[test]
fn test_charge_to_exact_limit_succeeds() {
    let identity = Identity::new(1, 0);
    let accountant = accountant_with_identity(identity);
    accountant
        .set_limit(identity, MemoryLimit::from_raw(1000))
        .unwrap();

    accountant.try_charge(identity, 1000, ChargeKind::Device).unwrap();
    assert_eq!(accountant.current(identity).unwrap(), 1000);
    assert!(accountant.try_charge(identity, 1, ChargeKind::Device).is_err());
}

#[test]
fn test_swap_counter_reported_independently() {
    let identity = Identity::new(2, 1);
    let accountant = accountant_with_identity(identity);
    accountant
        .set_limit(identity, MemoryLimit::from_raw(256))
        .unwrap();

    accountant.try_charge(identity, 256, ChargeKind::Device).unwrap();
    accountant.try_charge(identity, 200, ChargeKind::Swap).unwrap();

    assert_eq!(accountant.current(identity).unwrap(), 256);
    assert_eq!(accountant.swap_current(identity).unwrap(), 200);

    // Each counter is bounded by the one configured limit
    let err = accountant
        .try_charge(identity, 100, ChargeKind::Swap)
        .unwrap_err();
    assert!(matches!(
        err,
        ControlError::Memory(MemoryError::LimitExceeded { .. })
    ));
    assert_eq!(accountant.swap_current(identity).unwrap(), 200);
}

#[test]
fn test_unknown_identity_reports_not_found() {
    let accountant = MemoryAccountant::new(ProcessRegistry::new());
    let identity = Identity::new(99, 0);

    for result in [
        accountant.try_charge(identity, 1, ChargeKind::Device),
        accountant.uncharge(identity, 1, ChargeKind::Device),
    ] {
        assert!(matches!(
            result.unwrap_err(),
            ControlError::Registry(RegistryError::ProcessNotFound(99))
        ));
    }
    assert!(accountant.current(identity).is_err());
    assert!(accountant.limit(identity).is_err());
}

#[test]
fn test_limit_write_sentinels() {
    let identity = Identity::new(3, 0);
    let accountant = accountant_with_identity(identity);

    assert!(accountant.limit(identity).unwrap().is_unlimited());

    accountant
        .set_limit(identity, MemoryLimit::from_raw(0))
        .unwrap();
    assert!(accountant.limit(identity).unwrap().is_unlimited());

    accountant
        .set_limit(identity, MemoryLimit::from_raw(4096))
        .unwrap();
    assert_eq!(accountant.limit(identity).unwrap().as_raw(), 4096);
}

#[test]
fn test_usage_reports_fail_and_underflow_counts() {
    let identity = Identity::new(4, 0);
    let accountant = accountant_with_identity(identity);
    accountant
        .set_limit(identity, MemoryLimit::from_raw(100))
        .unwrap();

    let _ = accountant.try_charge(identity, 200, ChargeKind::Device);
    let _ = accountant.try_charge(identity, 200, ChargeKind::Swap);
    let _ = accountant.uncharge(identity, 50, ChargeKind::Device);

    let usage = accountant.usage(identity).unwrap();
    assert_eq!(usage.fail_count, 1);
    assert_eq!(usage.swap_fail_count, 1);
    assert_eq!(usage.underflow_count, 1);
    assert_eq!(usage.current, 0);
}

proptest! {
    // With a fixed limit, no interleaving of charges and uncharges can push
    // the counter outside [0, limit], and the final value equals the net sum
    // of the operations that individually succeeded.
    #[test]
    fn prop_counter_stays_within_bounds(
        limit in 1u64..=10_000,
        ops in prop::collection::vec((0u64..=4096, any::<bool>()), 0..64),
    ) {
        let identity = Identity::new(1, 0);
        let accountant = accountant_with_identity(identity);
        accountant.set_limit(identity, MemoryLimit::from_raw(limit)).unwrap();

        let mut expected: u64 = 0;
        for (size, is_charge) in ops {
            if is_charge {
                if accountant.try_charge(identity, size, ChargeKind::Device).is_ok() {
                    expected += size;
                }
            } else if accountant.uncharge(identity, size, ChargeKind::Device).is_ok() {
                expected -= size;
            } else {
                // An over-release clamps the counter to zero
                expected = 0;
            }

            let current = accountant.current(identity).unwrap();
            prop_assert!(current <= limit);
            prop_assert_eq!(current, expected);
        }
    }
}
