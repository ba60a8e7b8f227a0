//! Shared IR fixtures for unit tests.

use ygen_schema::{Identity, SchemaTree, SchemaTreeBuilder, YangKind, YangType};

/// Routes generator logs to the test harness when `RUST_LOG` is set.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A compressed OpenConfig-style interfaces model with a top-level leaf.
pub(crate) fn interfaces_tree() -> SchemaTree {
    interfaces_builder().build().expect("valid fixture")
}

/// Builder behind [`interfaces_tree`], for tests that extend it.
pub(crate) fn interfaces_builder() -> SchemaTreeBuilder {
    const IF: &str = "/oc-if/interfaces/interface";
    const SUB: &str = "/oc-if/interfaces/interface/subinterfaces/subinterface";

    let interface_type = Identity::new("interface-type", "oc-if")
        .with_value("ethernetCsmacd", "iana-if-type")
        .with_value("softwareLoopback", "iana-if-type");

    let mut b = SchemaTreeBuilder::new();
    b.fakeroot("device")
        .module("oc-if")
        .container("/oc-if", "interfaces")
        .list("/oc-if/interfaces", "interface")
        .leaf(IF, "name", YangType::leafref("../config/name"))
        .container(IF, "config")
        .leaf(
            "/oc-if/interfaces/interface/config",
            "name",
            YangType::new(YangKind::String),
        )
        .leaf(
            "/oc-if/interfaces/interface/config",
            "type",
            YangType::identityref(interface_type),
        )
        .leaf(
            "/oc-if/interfaces/interface/config",
            "mtu",
            YangType::new(YangKind::Uint16).with_range(Some("68"), Some("max")),
        )
        .leaf_default("/oc-if/interfaces/interface/config/mtu", "1500")
        .leaf(
            "/oc-if/interfaces/interface/config",
            "enabled",
            YangType::new(YangKind::Boolean).with_default("true"),
        )
        .leaf(
            "/oc-if/interfaces/interface/config",
            "description",
            YangType::new(YangKind::String),
        )
        .container(IF, "state")
        .leaf(
            "/oc-if/interfaces/interface/state",
            "name",
            YangType::new(YangKind::String),
        )
        .leaf(
            "/oc-if/interfaces/interface/state",
            "oper-status",
            YangType::enumeration(["UP", "DOWN", "TESTING"]),
        )
        .container(IF, "subinterfaces")
        .list("/oc-if/interfaces/interface/subinterfaces", "subinterface")
        .leaf(SUB, "index", YangType::leafref("../config/index"))
        .container(SUB, "config")
        .leaf(
            "/oc-if/interfaces/interface/subinterfaces/subinterface/config",
            "index",
            YangType::new(YangKind::Uint32),
        )
        .leaf(
            "/oc-if/interfaces/interface/subinterfaces/subinterface/config",
            "description",
            YangType::new(YangKind::String),
        )
        .module("oc-sys")
        .leaf("/oc-sys", "hostname", YangType::new(YangKind::String))
        .directory(IF)
        .keys(IF, &["name"])
        .field(IF, "/oc-if/interfaces/interface/name", &["name"])
        .field(IF, "/oc-if/interfaces/interface/config/type", &["config/type"])
        .field(
            IF,
            "/oc-if/interfaces/interface/config/mtu",
            &["config/mtu", "state/mtu"],
        )
        .field(
            IF,
            "/oc-if/interfaces/interface/config/enabled",
            &["config/enabled"],
        )
        .field(
            IF,
            "/oc-if/interfaces/interface/config/description",
            &["config/description"],
        )
        .field(
            IF,
            "/oc-if/interfaces/interface/state/oper-status",
            &["state/oper-status"],
        )
        .field(IF, SUB, &["subinterfaces/subinterface"])
        .directory(SUB)
        .keys(SUB, &["index"])
        .field(SUB, &format!("{SUB}/index"), &["index"])
        .field(
            SUB,
            &format!("{SUB}/config/description"),
            &["config/description"],
        )
        .field("/device", IF, &["interfaces/interface"])
        .field("/device", "/oc-sys/hostname", &["hostname"]);
    b
}
