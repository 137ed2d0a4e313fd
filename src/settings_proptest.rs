//! Property-based tests for settings overrides.
//!
//! These tests use proptest to generate flag values and settings documents
//! and verify that overrides touch exactly the keys they are meant to.

#[cfg(test)]
mod proptest_tests {
    use crate::command::apply_overrides;
    use crate::options::{standard_options, Options, OVERRIDES};
    use crate::settings::{keys, Settings};
    use proptest::prelude::*;
    use serde_yaml::{Mapping, Value};
    use std::path::Path;

    fn flag_value() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9.:_@-]{1,24}"
    }

    fn parse(args: Vec<String>) -> Options {
        let cli = standard_options(clap::Command::new("ght"));
        Options::parse(cli, std::iter::once("ght".to_string()).chain(args)).unwrap()
    }

    fn args_for(
        addr: &Option<String>,
        username: &Option<String>,
        password: &Option<String>,
    ) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(v) = addr {
            args.push(format!("--addr={v}"));
        }
        if let Some(v) = username {
            args.push(format!("--username={v}"));
        }
        if let Some(v) = password {
            args.push(format!("--password={v}"));
        }
        args
    }

    proptest! {
        /// Property: a given flag always wins; an absent flag leaves its key alone
        #[test]
        fn overrides_apply_exactly_given_flags(
            addr in proptest::option::of(flag_value()),
            username in proptest::option::of(flag_value()),
            password in proptest::option::of(flag_value()),
            verbose in any::<bool>(),
        ) {
            let mut args = args_for(&addr, &username, &password);
            if verbose {
                args.push("-v".to_string());
            }
            let options = parse(args);
            let original = Settings::from_yaml_str(
                "attach_ip: 0.0.0.0\ngithub_username: octocat\ngithub_passwd: secret\nmongo_host: db\n",
            ).unwrap();
            let mut settings = original.clone();

            let mut out: Vec<u8> = Vec::new();
            apply_overrides(&mut settings, &options, &mut out).unwrap();

            let expected = [
                (&addr, keys::ATTACH_IP),
                (&username, keys::GITHUB_USERNAME),
                (&password, keys::GITHUB_PASSWD),
            ];
            for (given, key) in expected {
                match given {
                    Some(v) => {
                        prop_assert_eq!(settings.get_str(key), Some(v.as_str()));
                    }
                    None => {
                        prop_assert_eq!(settings.get(key), original.get(key));
                    }
                }
            }
            prop_assert_eq!(settings.get("mongo_host"), original.get("mongo_host"));

            let announced = String::from_utf8(out).unwrap().lines().count();
            let given = [&addr, &username, &password].iter().filter(|v| v.is_some()).count();
            prop_assert_eq!(announced, given);
        }

        /// Property: --config defaults to config.yaml whatever else is given
        #[test]
        fn config_defaults_without_flag(
            addr in proptest::option::of(flag_value()),
            username in proptest::option::of(flag_value()),
            password in proptest::option::of(flag_value()),
        ) {
            let options = parse(args_for(&addr, &username, &password));
            prop_assert_eq!(options.config(), Path::new("config.yaml"));
            prop_assert!(!options.config_given());
        }

        /// Property: override_value leaves every other key unchanged
        #[test]
        fn override_value_is_local(
            entries in proptest::collection::btree_map("[a-z_]{1,12}", "[a-z0-9]{0,12}", 0..8),
            value in flag_value(),
        ) {
            let mut mapping = Mapping::new();
            for (k, v) in &entries {
                mapping.insert(Value::String(k.clone()), Value::String(v.clone()));
            }
            let original = Settings::from(mapping);
            let mut settings = original.clone();

            let previous = settings.override_value(keys::ATTACH_IP, value.as_str());

            prop_assert_eq!(previous.as_ref(), original.get(keys::ATTACH_IP));
            prop_assert_eq!(settings.get_str(keys::ATTACH_IP), Some(value.as_str()));
            for (k, _) in &entries {
                if k != keys::ATTACH_IP {
                    prop_assert_eq!(settings.get(k.as_str()), original.get(k.as_str()));
                }
            }
        }
    }

    #[test]
    fn override_keys_are_distinct() {
        let keys: std::collections::HashSet<&str> = OVERRIDES.iter().map(|(_, k)| *k).collect();
        assert_eq!(keys.len(), OVERRIDES.len());
    }
}
