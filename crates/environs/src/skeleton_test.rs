// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::environ::Operation;
use crate::error::Phase;
use crate::token::BootstrapContext;
use crate::value::{attrs, AttrValue, Attrs};
use crate::Error;

#[fixture]
fn provider() -> SkeletonProvider {
    SkeletonProvider::new().expect("Skeleton schema should be consistent")
}

fn valid_attrs() -> Attrs {
    attrs([
        ("name", "testenv"),
        ("type", "skeleton"),
        (SECRET_FIELD, "seekrit"),
        (IMMUTABLE_FIELD, "static"),
    ])
}

fn new_config(insert: Attrs, remove: &[&str]) -> Config {
    let mut all = valid_attrs();
    all.extend(insert);
    for field in remove {
        all.remove(*field);
    }
    Config::new(all).expect("Should build config")
}

/// Shared cases for a config validated on its own. `Ok` holds attributes
/// expected in the result; `Err` the expected message.
fn new_config_cases() -> Vec<(&'static str, Attrs, Vec<&'static str>, Result<Attrs, &'static str>)> {
    vec![
        (
            "immutable field is required",
            Attrs::new(),
            vec![IMMUTABLE_FIELD],
            Err("skeleton-immutable-field: expected string, got nothing"),
        ),
        (
            "immutable field cannot be empty",
            attrs([(IMMUTABLE_FIELD, "")]),
            vec![],
            Err("skeleton-immutable-field: must not be empty"),
        ),
        (
            "secret field is required",
            Attrs::new(),
            vec![SECRET_FIELD],
            Err("skeleton-secret-field: expected string, got nothing"),
        ),
        (
            "secret field cannot be empty",
            attrs([(SECRET_FIELD, "")]),
            vec![],
            Err("skeleton-secret-field: must not be empty"),
        ),
        (
            "default field is inserted if missing",
            Attrs::new(),
            vec![],
            Ok(attrs([(DEFAULT_FIELD, DEFAULT_FIELD_VALUE)])),
        ),
        (
            "default field cannot be empty",
            attrs([(DEFAULT_FIELD, "")]),
            vec![],
            Err("skeleton-default-field: must not be empty"),
        ),
        (
            "default field is untouched if present",
            attrs([(DEFAULT_FIELD, "<user value>")]),
            vec![],
            Ok(attrs([(DEFAULT_FIELD, "<user value>")])),
        ),
        (
            "unknown field is not touched",
            attrs([("unknown-field", 12345)]),
            vec![],
            Ok(attrs([("unknown-field", 12345)])),
        ),
    ]
}

/// Shared cases for a config validated as a change from [`valid_attrs`].
fn change_config_cases() -> Vec<(&'static str, Attrs, Result<Attrs, &'static str>)> {
    vec![
        ("no change, no error", Attrs::new(), Ok(valid_attrs())),
        (
            "can change secret field",
            attrs([(SECRET_FIELD, "okkult")]),
            Ok(attrs([(SECRET_FIELD, "okkult")])),
        ),
        (
            "can change default field",
            attrs([(DEFAULT_FIELD, "different")]),
            Ok(attrs([(DEFAULT_FIELD, "different")])),
        ),
        (
            "cannot change immutable field",
            attrs([(IMMUTABLE_FIELD, "mutant")]),
            Err("skeleton-immutable-field: cannot change from static to mutant"),
        ),
        (
            "can insert unknown field",
            attrs([("unknown", "ignoti")]),
            Ok(attrs([("unknown", "ignoti")])),
        ),
    ]
}

fn assert_contains(actual: &Attrs, expected: &Attrs, info: &str) {
    for (field, value) in expected {
        assert_eq!(actual.get(field), Some(value), "{info}: {field}");
    }
}

#[rstest]
fn test_open_new_config(provider: SkeletonProvider) {
    for (info, insert, remove, expect) in new_config_cases() {
        let cfg = new_config(insert, &remove);
        match (provider.open(&cfg), expect) {
            (Ok(env), Ok(expected)) => assert_contains(env.config().all_attrs(), &expected, info),
            (Err(err), Err(message)) => assert_eq!(err.to_string(), message, "{info}"),
            (result, expect) => panic!("{info}: got {result:?}, expected {expect:?}"),
        }
    }
}

#[rstest]
fn test_validate_new_config(provider: SkeletonProvider) {
    for (info, insert, remove, expect) in new_config_cases() {
        let cfg = new_config(insert, &remove);
        match (provider.validate(&cfg, None), expect) {
            (Ok(valid), Ok(expected)) => assert_contains(valid.all_attrs(), &expected, info),
            (Err(err), Err(message)) => {
                assert_eq!(err.to_string(), format!("invalid config: {message}"), "{info}")
            }
            (result, expect) => panic!("{info}: got {result:?}, expected {expect:?}"),
        }
    }
}

#[rstest]
fn test_validate_old_config(provider: SkeletonProvider) {
    let known_good = new_config(Attrs::new(), &[]);
    for (info, insert, remove, expect) in new_config_cases() {
        let old = new_config(insert, &remove);
        match (provider.validate(&known_good, Some(&old)), expect) {
            (Ok(valid), Ok(_)) => assert_contains(valid.all_attrs(), &valid_attrs(), info),
            (Err(err), Err(message)) => {
                assert!(matches!(err, Error::Phase { phase: Phase::Base, .. }));
                assert_eq!(err.to_string(), format!("invalid base config: {message}"), "{info}")
            }
            (result, expect) => panic!("{info}: got {result:?}, expected {expect:?}"),
        }
    }
}

#[rstest]
fn test_validate_change(provider: SkeletonProvider) {
    let base = new_config(Attrs::new(), &[]);
    for (info, insert, expect) in change_config_cases() {
        let cfg = new_config(insert, &[]);
        match (provider.validate(&cfg, Some(&base)), expect) {
            (Ok(valid), Ok(expected)) => assert_contains(valid.all_attrs(), &expected, info),
            (Err(err), Err(message)) => {
                assert_eq!(err.to_string(), format!("invalid config change: {message}"), "{info}")
            }
            (result, expect) => panic!("{info}: got {result:?}, expected {expect:?}"),
        }
    }
}

#[rstest]
fn test_set_config(provider: SkeletonProvider) {
    let base = new_config(Attrs::new(), &[]);
    for (info, insert, expect) in change_config_cases() {
        let env = provider.open(&base).expect("Should open base config");
        let cfg = new_config(insert, &[]);
        let result = env.set_config(&cfg);
        let held = env.config();
        match (result, expect) {
            (Ok(()), Ok(expected)) => assert_contains(held.all_attrs(), &expected, info),
            (Err(err), Err(message)) => {
                assert_eq!(err.to_string(), message, "{info}");
                assert_contains(held.all_attrs(), &base.unknown_attrs(), info);
            }
            (result, expect) => panic!("{info}: got {result:?}, expected {expect:?}"),
        }
    }
}

#[rstest]
fn test_typed_accessors(provider: SkeletonProvider) {
    let env = provider
        .open_skeleton(&new_config(Attrs::new(), &[]))
        .unwrap();
    assert_eq!(env.secret_field().unwrap(), "seekrit");
    assert_eq!(env.immutable_field().unwrap(), "static");
    assert_eq!(env.default_field().unwrap(), DEFAULT_FIELD_VALUE);
}

#[rstest]
fn test_prepare_generates_immutable_field(provider: SkeletonProvider) {
    let cfg = new_config(Attrs::new(), &[IMMUTABLE_FIELD]);
    let ctx = BootstrapContext::new();

    let first = provider.prepare(&ctx, &cfg).expect("Should prepare");
    let second = provider.prepare(&ctx, &cfg).expect("Should prepare again");

    let token = |env: &dyn Environ| {
        env.config().all_attrs()[IMMUTABLE_FIELD]
            .as_str()
            .map(String::from)
            .expect("immutable field should be a string")
    };
    let (a, b) = (token(first.as_ref()), token(second.as_ref()));
    assert!(!a.is_empty());
    ulid::Ulid::from_string(&a.to_uppercase()).expect("Token should be a valid ULID");
    assert_ne!(a, b, "Each prepare should choose a fresh token");
}

#[rstest]
fn test_prepare_keeps_user_immutable_field(provider: SkeletonProvider) {
    let cfg = new_config(Attrs::new(), &[]);
    let env = provider.prepare(&BootstrapContext::new(), &cfg).unwrap();
    assert_eq!(
        env.config().all_attrs()[IMMUTABLE_FIELD],
        AttrValue::from("static")
    );
}

#[rstest]
fn test_secret_attrs(provider: SkeletonProvider) {
    let cfg = new_config(attrs([("unknown-field", "x")]), &[]);
    let secrets = provider.secret_attrs(&cfg).unwrap();
    assert_eq!(secrets.len(), 1);
    assert_eq!(secrets[SECRET_FIELD], "seekrit");
}

#[rstest]
fn test_secret_attrs_requires_valid_config(provider: SkeletonProvider) {
    let cfg = new_config(Attrs::new(), &[SECRET_FIELD]);
    assert!(matches!(
        provider.secret_attrs(&cfg),
        Err(Error::MissingField { .. })
    ));
}

#[rstest]
fn test_boilerplate_mentions_every_field(provider: SkeletonProvider) {
    let text = provider.boilerplate_config();
    for field in provider.schema().schema().fields() {
        assert!(text.contains(&field.name), "{} missing", field.name);
    }
    let cfg = Config::from_yaml(text).expect("Boilerplate should parse");
    assert_eq!(cfg.provider_type(), PROVIDER_TYPE);
}

#[rstest]
#[case::bootstrap(Operation::Bootstrap)]
#[case::public_address(Operation::PublicAddress)]
#[case::private_address(Operation::PrivateAddress)]
fn test_provisioning_is_unsupported(provider: SkeletonProvider, #[case] operation: Operation) {
    let env = provider.open(&new_config(Attrs::new(), &[])).unwrap();
    let err = match operation {
        Operation::Bootstrap => env.bootstrap().unwrap_err(),
        Operation::PublicAddress => env.public_address().unwrap_err(),
        _ => env.private_address().unwrap_err(),
    };
    assert!(matches!(err, Error::Unsupported { operation: op, .. } if op == operation));
    assert!(err.to_string().ends_with("not implemented in skeleton provider"));
}

#[rstest]
fn test_open_configures_through_set_config(provider: SkeletonProvider) {
    let cfg = new_config(Attrs::new(), &[]);
    let env = SkeletonEnviron::new("testenv", Arc::clone(&provider.schema));
    assert!(matches!(env.secret_field(), Err(Error::MissingField { .. })));

    env.set_config(&cfg).expect("First config should be accepted");
    let opened = provider.open_skeleton(&cfg).unwrap();
    assert_eq!(env.config(), opened.config());
    assert_eq!(env.default_field().unwrap(), DEFAULT_FIELD_VALUE);

    let changed = new_config(attrs([(IMMUTABLE_FIELD, "mutant")]), &[]);
    assert!(matches!(
        opened.set_config(&changed),
        Err(Error::ImmutableFieldChanged { .. })
    ));
}

#[rstest]
fn test_open_rejects_invalid_config_through_set_config(provider: SkeletonProvider) {
    let cfg = new_config(attrs([(SECRET_FIELD, "")]), &[]);
    let env = SkeletonEnviron::new("testenv", Arc::clone(&provider.schema));
    let direct = env.set_config(&cfg).unwrap_err();
    let opened = provider.open_skeleton(&cfg).unwrap_err();
    assert_eq!(direct.to_string(), opened.to_string());
    assert_eq!(env.config(), Config::default());
}

#[rstest]
fn test_debug_hides_secret_field(provider: SkeletonProvider) {
    let env = provider.open(&new_config(Attrs::new(), &[])).unwrap();
    let shown = format!("{env:?}");
    assert!(!shown.contains("seekrit"), "{shown}");
    assert!(shown.contains("static"), "{shown}");
}
