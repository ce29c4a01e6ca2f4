//! Property tests for field classification

use hostfile_core::config::ImportConfiguration;
use hostfile_core::import::{FieldClassifier, HostRecordBuilder};
use hostfile_core::models::{CanonicalHostRecord, FieldRole, RawRecord};
use proptest::prelude::*;

/// Field names that cannot collide with hostname names, address names,
/// prefixes, or the multi-value suffix
fn plain_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}".prop_filter("reserved name", |key| {
        !["hostname", "host", "name", "ip", "ipv4", "ipaddress"].contains(&key.as_str())
            && !key.starts_with("tag")
            && !key.starts_with("label")
            && !key.starts_with("attr")
    })
}

fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._-]{1,12}"
}

fn address_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["ip", "IP", "ipv4", "IPv4", "ipaddress", "IpAddress"])
        .prop_map(String::from)
}

fn classify_and_build(config: &ImportConfiguration, record: &RawRecord, positional: bool) -> CanonicalHostRecord {
    let classified = FieldClassifier::new(config)
        .classify(record, positional)
        .expect("record has a hostname");
    HostRecordBuilder::from_config(config).build(classified)
}

proptest! {
    /// Property: addresses never leak into tags
    #[test]
    fn address_fields_are_never_tags(
        hostname in value(),
        name in address_name(),
        address in value(),
        extra in prop::collection::vec((plain_key(), value()), 0..5),
    ) {
        let mut fields = vec![("host".to_string(), hostname), (name.clone(), address.clone())];
        fields.extend(extra);
        let record = RawRecord::new(1, fields);

        let host = classify_and_build(&ImportConfiguration::default(), &record, false);

        prop_assert!(host.addresses().contains(&address));
        prop_assert!(!host.tags().contains_key(&name));
        prop_assert!(!host.tags().contains_key(&name.to_lowercase()));
    }

    /// Property: tag-prefixed fields end up in tags only, with the prefix stripped
    #[test]
    fn tag_prefix_only_reaches_tags(
        hostname in value(),
        tags in prop::collection::btree_map(plain_key(), value(), 1..6),
    ) {
        let mut fields = vec![("name".to_string(), hostname)];
        fields.extend(tags.iter().map(|(k, v)| (format!("tag_{k}"), v.clone())));
        let record = RawRecord::new(1, fields);

        let host = classify_and_build(&ImportConfiguration::default(), &record, false);

        prop_assert_eq!(host.tags(), &tags);
        prop_assert!(host.labels().is_empty());
        prop_assert!(host.attributes().is_empty());
    }

    /// Property: every field classifies into exactly one role and only one
    /// field holds the hostname
    #[test]
    fn one_role_per_field(
        hostname in value(),
        extra in prop::collection::vec((plain_key(), value()), 0..8),
    ) {
        let mut fields = vec![("hostname".to_string(), hostname)];
        fields.extend(extra);
        let record = RawRecord::new(1, fields);

        let classified = FieldClassifier::new(&ImportConfiguration::default())
            .classify(&record, false)
            .unwrap();

        prop_assert_eq!(classified.fields.len(), record.len());
        prop_assert_eq!(classified.with_role(FieldRole::Hostname).count(), 1);
    }

    /// Property: re-serializing tags, labels, and attributes and classifying
    /// again reproduces them
    #[test]
    fn prefixed_fields_round_trip(
        hostname in value(),
        addresses in prop::collection::vec("10\\.0\\.[0-9]{1,3}\\.[0-9]{1,3}", 0..3),
        tags in prop::collection::btree_map(plain_key(), value(), 0..5),
        labels in prop::collection::btree_map(plain_key(), value(), 0..5),
        attributes in prop::collection::btree_map(plain_key(), value(), 0..5),
    ) {
        let config = ImportConfiguration::default();
        let mut original = CanonicalHostRecord::new(hostname);
        for address in addresses {
            original = original.with_address(address);
        }
        for (k, v) in tags {
            original = original.with_tag(k, v);
        }
        for (k, v) in labels {
            original = original.with_label(k, v);
        }
        for (k, v) in attributes {
            original = original.with_attribute(k, v);
        }

        let record = RawRecord::new(1, original.to_fields(&config));
        let rebuilt = classify_and_build(&config, &record, false);

        prop_assert_eq!(rebuilt, original);
    }

    /// Property: a record read from a file, built, re-serialized, and built
    /// again keeps its tags, labels, and attributes, even when a field has
    /// no name
    #[test]
    fn built_records_round_trip(
        hostname in value(),
        fields in prop::collection::vec(
            (prop::sample::select(vec!["", "tag_", "label_", "attr_"]), plain_key(), value()),
            0..8,
        ),
        unnamed in prop::option::of(value()),
    ) {
        let config = ImportConfiguration::default();
        let mut raw = vec![("hostname".to_string(), hostname)];
        raw.extend(fields.into_iter().map(|(prefix, key, v)| (format!("{prefix}{key}"), v)));
        if let Some(v) = unnamed {
            raw.push((String::new(), v));
        }

        let first = classify_and_build(&config, &RawRecord::new(1, raw), false);
        let second = classify_and_build(&config, &RawRecord::new(1, first.to_fields(&config)), false);

        prop_assert!(!first.tags().contains_key(""));
        prop_assert_eq!(second.tags(), first.tags());
        prop_assert_eq!(second.labels(), first.labels());
        prop_assert_eq!(second.attributes(), first.attributes());
    }
}
