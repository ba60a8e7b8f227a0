//! Default value resolution.
//!
//! A leaf default is validated against the resolved type and rendered as a
//! Rust expression. Union defaults try each flattened subtype in order and
//! keep the first that accepts the value.

use crate::enums::EnumCatalog;
use crate::error::TypeError;
use crate::types::{ResolvedType, Subtype};
use crate::unions::variant_name;
use regex::Regex;
use ygen_schema::{NodeKind, Range, SchemaNode, YangKind, YangType};

/// Resolves the default of `leaf` to a Rust expression.
///
/// The instance default beats the default of the declared type. Leaf-lists
/// and leaves without any default yield `Ok(None)`.
///
/// # Errors
/// Returns [`TypeError::InvalidDefault`] if the value fits none of the
/// leaf's subtypes.
pub fn resolve_default(
    leaf: &SchemaNode,
    resolved: &ResolvedType,
    enums: &EnumCatalog,
) -> Result<Option<String>, TypeError> {
    if leaf.kind != NodeKind::Leaf {
        return Ok(None);
    }
    let declared = leaf.yang_type.as_ref();
    let Some(value) = leaf
        .default
        .as_deref()
        .or_else(|| declared.and_then(|t| t.default.as_deref()))
    else {
        return Ok(None);
    };

    let invalid = |reason: String| TypeError::InvalidDefault {
        leaf: leaf.path.clone(),
        value: value.to_string(),
        type_name: declared.map_or_else(|| resolved.mapped.native_type.clone(), |t| t.name.clone()),
        reason,
    };

    if resolved.flattened.is_empty() {
        return Err(invalid("type has no resolved subtype".to_string()));
    }

    let mut reasons = Vec::new();
    for subtype in &resolved.flattened {
        match literal(value, subtype, enums) {
            Ok(lit) if resolved.mapped.is_union() => {
                return Ok(Some(format!(
                    "{}::{}({lit})",
                    resolved.mapped.native_type,
                    variant_name(&subtype.mapped.native_type)
                )));
            }
            Ok(lit) => return Ok(Some(lit)),
            Err(reason) => reasons.push((&subtype.mapped.native_type, reason)),
        }
    }
    match reasons.as_slice() {
        [(_, only)] => Err(invalid(only.clone())),
        _ => {
            let reasons: Vec<String> = reasons
                .iter()
                .map(|(native, reason)| format!("{native}: {reason}"))
                .collect();
            Err(invalid(format!(
                "no union member accepts it ({})",
                reasons.join("; ")
            )))
        }
    }
}

/// Validates `value` against one subtype and renders it.
fn literal(value: &str, subtype: &Subtype, enums: &EnumCatalog) -> Result<String, String> {
    let ty = &subtype.yang_type;
    match ty.kind {
        kind if kind.is_integer() => integer_literal(value, ty),
        YangKind::Decimal64 => decimal_literal(value, ty),
        YangKind::Boolean => match value {
            "true" | "false" => Ok(value.to_string()),
            _ => Err("expected true or false".to_string()),
        },
        YangKind::String => string_literal(value, ty),
        YangKind::Enumeration | YangKind::Identityref => {
            let name = &subtype.mapped.native_type;
            let enumerated = enums
                .get(name)
                .ok_or_else(|| format!("unknown enumerated type {name}"))?;
            let bare = value.rsplit_once(':').map_or(value, |(_, v)| v);
            enumerated
                .variant_for(bare)
                .map(|variant| format!("{name}::{variant}"))
                .ok_or_else(|| format!("'{bare}' is not a value of {name}"))
        }
        YangKind::Empty | YangKind::Binary => {
            Err(format!("{} leaves take no default", ty.kind.yang_name()))
        }
        _ => Ok(format!("Untyped::from({value:?})")),
    }
}

fn integer_literal(value: &str, ty: &YangType) -> Result<String, String> {
    let parsed = parse_yang_int(value)?;
    if let Some((min, max)) = ty.kind.int_bounds() {
        if parsed < min || parsed > max {
            return Err(format!("{parsed} is out of bounds for {}", ty.kind.yang_name()));
        }
    }
    let in_range = |r: &Range| -> Result<bool, String> {
        let lo = r.min.as_deref().map(parse_bound).transpose()?.flatten();
        let hi = r.max.as_deref().map(parse_bound).transpose()?.flatten();
        Ok(lo.is_none_or(|lo| parsed >= lo) && hi.is_none_or(|hi| parsed <= hi))
    };
    if !ty.ranges.is_empty() && !any_ok(&ty.ranges, in_range)? {
        return Err(format!("{parsed} is outside the range restriction"));
    }
    Ok(parsed.to_string())
}

fn parse_bound(bound: &str) -> Result<Option<i128>, String> {
    match bound {
        "min" | "max" => Ok(None),
        other => parse_yang_int(other).map(Some),
    }
}

fn any_ok<T>(items: &[T], mut f: impl FnMut(&T) -> Result<bool, String>) -> Result<bool, String> {
    for item in items {
        if f(item)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Parses a YANG integer literal.
///
/// Accepts an optional sign, `0x`/`0X` hexadecimal and leading-zero octal.
/// `_` separators and `0b` binary literals are rejected.
///
/// # Errors
/// Returns the reason the literal was rejected.
pub fn parse_yang_int(literal: &str) -> Result<i128, String> {
    let (negative, body) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };
    if body.is_empty() {
        return Err("empty integer literal".to_string());
    }
    if body.contains('_') {
        return Err("digit separators are not allowed".to_string());
    }
    if body.starts_with("0b") || body.starts_with("0B") {
        return Err("binary literals are not allowed".to_string());
    }

    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("'{literal}' is not a base-{radix} integer"));
    }

    let magnitude = i128::from_str_radix(digits, radix).map_err(|e| e.to_string())?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Returns true for `[+-]digits[.digits]`, the decimal64 lexical form.
fn is_decimal_lexical(value: &str) -> bool {
    let body = value.strip_prefix(['-', '+']).unwrap_or(value);
    let (int, fraction) = match body.split_once('.') {
        Some((int, fraction)) => (int, Some(fraction)),
        None => (body, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(int) && fraction.is_none_or(digits)
}

fn decimal_literal(value: &str, ty: &YangType) -> Result<String, String> {
    if !is_decimal_lexical(value) {
        return Err(format!("'{value}' is not a decimal64 literal"));
    }
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a decimal number"))?;
    if !parsed.is_finite() {
        return Err(format!("'{value}' is not a finite number"));
    }
    if let Some(digits) = ty.fraction_digits {
        let fraction = value.split_once('.').map_or(0, |(_, f)| f.len());
        if fraction > usize::from(digits) {
            return Err(format!("more than {digits} fraction digits"));
        }
    }
    let in_range = |r: &Range| -> Result<bool, String> {
        let bound = |b: Option<&str>| -> Result<Option<f64>, String> {
            match b {
                None | Some("min" | "max") => Ok(None),
                Some(b) => b.parse().map(Some).map_err(|_| format!("bad range bound '{b}'")),
            }
        };
        let lo = bound(r.min.as_deref())?;
        let hi = bound(r.max.as_deref())?;
        Ok(lo.is_none_or(|lo| parsed >= lo) && hi.is_none_or(|hi| parsed <= hi))
    };
    if !ty.ranges.is_empty() && !any_ok(&ty.ranges, in_range)? {
        return Err(format!("{value} is outside the range restriction"));
    }
    Ok(format!("{parsed:?}"))
}

fn string_literal(value: &str, ty: &YangType) -> Result<String, String> {
    let len = u64::try_from(value.chars().count()).map_err(|e| e.to_string())?;
    if !ty.lengths.is_empty() && !ty.lengths.iter().any(|l| l.contains(len)) {
        return Err(format!("length {len} is outside the length restriction"));
    }
    for pattern in &ty.patterns {
        let re = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| format!("unsupported pattern '{pattern}': {e}"))?;
        if !re.is_match(value) {
            return Err(format!("does not match pattern '{pattern}'"));
        }
    }
    Ok(format!("String::from({value:?})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::names::NameResolver;
    use crate::test_support::interfaces_tree;
    use crate::types::TypeResolver;
    use ygen_schema::{SchemaTree, SchemaTreeBuilder};

    fn resolve(tree: &SchemaTree, path: &str) -> Result<Option<String>, TypeError> {
        let config = GeneratorConfig::default();
        let mut names = NameResolver::new(tree, &config);
        names.assign();
        let mut resolver = TypeResolver::new(tree, &config);
        let leaf = tree.node(path).unwrap();
        let resolved = resolver.resolve(leaf, &mut names).unwrap();
        resolve_default(leaf, &resolved, resolver.enums())
    }

    fn leaf_with_default(ty: YangType, default: &str) -> SchemaTree {
        let mut b = SchemaTreeBuilder::new();
        b.module("m")
            .container("/m", "top")
            .leaf("/m/top", "value", ty)
            .leaf_default("/m/top/value", default)
            .directory("/m/top")
            .field("/m/top", "/m/top/value", &["value"]);
        b.build().unwrap()
    }

    #[test]
    fn test_parse_yang_int() {
        assert_eq!(parse_yang_int("42"), Ok(42));
        assert_eq!(parse_yang_int("-7"), Ok(-7));
        assert_eq!(parse_yang_int("+7"), Ok(7));
        assert_eq!(parse_yang_int("0x1F"), Ok(31));
        assert_eq!(parse_yang_int("0X1f"), Ok(31));
        assert_eq!(parse_yang_int("017"), Ok(15));
        assert_eq!(parse_yang_int("0"), Ok(0));
        assert!(parse_yang_int("0b101").is_err());
        assert!(parse_yang_int("1_000").is_err());
        assert!(parse_yang_int("09").is_err());
        assert!(parse_yang_int("").is_err());
        assert!(parse_yang_int("-").is_err());
        assert!(parse_yang_int("12a").is_err());
    }

    #[test]
    fn test_uint8_literals() {
        let tree = leaf_with_default(YangType::new(YangKind::Uint8), "0x1F");
        assert_eq!(resolve(&tree, "/m/top/value"), Ok(Some("31".to_string())));

        let tree = leaf_with_default(YangType::new(YangKind::Uint8), "0b101");
        assert!(matches!(
            resolve(&tree, "/m/top/value"),
            Err(TypeError::InvalidDefault { .. })
        ));

        let tree = leaf_with_default(YangType::new(YangKind::Uint8), "256");
        assert!(resolve(&tree, "/m/top/value").is_err());
    }

    #[test]
    fn test_instance_default_beats_type_default() {
        let tree = interfaces_tree();
        assert_eq!(
            resolve(&tree, "/oc-if/interfaces/interface/config/mtu"),
            Ok(Some("1500".to_string()))
        );
        assert_eq!(
            resolve(&tree, "/oc-if/interfaces/interface/config/enabled"),
            Ok(Some("true".to_string()))
        );
        assert_eq!(
            resolve(&tree, "/oc-if/interfaces/interface/config/description"),
            Ok(None)
        );
    }

    #[test]
    fn test_range_restriction() {
        let ty = YangType::new(YangKind::Uint16).with_range(Some("68"), Some("max"));
        let tree = leaf_with_default(ty.clone(), "67");
        assert!(resolve(&tree, "/m/top/value").is_err());
        let tree = leaf_with_default(ty, "9000");
        assert_eq!(resolve(&tree, "/m/top/value"), Ok(Some("9000".to_string())));
    }

    #[test]
    fn test_string_restrictions() {
        let ty = YangType::new(YangKind::String)
            .with_length(1, Some(4))
            .with_pattern("[a-z]+");
        let tree = leaf_with_default(ty.clone(), "eth");
        assert_eq!(
            resolve(&tree, "/m/top/value"),
            Ok(Some("String::from(\"eth\")".to_string()))
        );
        let tree = leaf_with_default(ty.clone(), "ethernet");
        assert!(resolve(&tree, "/m/top/value").is_err());
        let tree = leaf_with_default(ty, "eth0");
        assert!(resolve(&tree, "/m/top/value").is_err());
    }

    #[test]
    fn test_decimal_and_boolean() {
        let ty = YangType::new(YangKind::Decimal64).with_fraction_digits(2);
        let tree = leaf_with_default(ty.clone(), "1.5");
        assert_eq!(resolve(&tree, "/m/top/value"), Ok(Some("1.5".to_string())));
        let tree = leaf_with_default(ty, "1.555");
        assert!(resolve(&tree, "/m/top/value").is_err());

        let tree = leaf_with_default(YangType::new(YangKind::Boolean), "yes");
        assert!(resolve(&tree, "/m/top/value").is_err());
    }

    #[test]
    fn test_decimal_lexical_form() {
        let ty = YangType::new(YangKind::Decimal64).with_fraction_digits(2);
        for accepted in ["5", "-5.25", "+0.5"] {
            let tree = leaf_with_default(ty.clone(), accepted);
            assert!(resolve(&tree, "/m/top/value").is_ok(), "{accepted}");
        }
        for rejected in ["1e2", "5.", ".5", "-", "1.2.3", "inf", "NaN"] {
            let tree = leaf_with_default(ty.clone(), rejected);
            assert!(
                matches!(
                    resolve(&tree, "/m/top/value"),
                    Err(TypeError::InvalidDefault { .. })
                ),
                "{rejected}"
            );
            assert!(resolve(&tree, "/m/top/value").is_err());
        }
    }

    #[test]
    fn test_enum_default() {
        let tree = leaf_with_default(YangType::enumeration(["UP", "DOWN"]), "DOWN");
        assert_eq!(
            resolve(&tree, "/m/top/value"),
            Ok(Some("E_M_Top_Value::Down".to_string()))
        );
        let tree = leaf_with_default(YangType::enumeration(["UP", "DOWN"]), "SIDEWAYS");
        assert!(resolve(&tree, "/m/top/value").is_err());
    }

    #[test]
    fn test_union_default_first_match_wins() {
        let ty = YangType::union(vec![
            YangType::new(YangKind::Uint32),
            YangType::new(YangKind::String),
        ]);
        let tree = leaf_with_default(ty.clone(), "5");
        assert_eq!(
            resolve(&tree, "/m/top/value"),
            Ok(Some("Top_Value_Union::U32(5)".to_string()))
        );
        let tree = leaf_with_default(ty, "five");
        assert_eq!(
            resolve(&tree, "/m/top/value"),
            Ok(Some("Top_Value_Union::String(String::from(\"five\"))".to_string()))
        );
    }

    #[test]
    fn test_union_default_tries_members_sharing_a_native_type() {
        let ty = YangType::union(vec![
            YangType::new(YangKind::String).with_pattern("[a-z]+"),
            YangType::new(YangKind::String).with_pattern("[0-9]+"),
        ]);
        let tree = leaf_with_default(ty.clone(), "123");
        assert_eq!(
            resolve(&tree, "/m/top/value"),
            Ok(Some("String::from(\"123\")".to_string()))
        );
        let tree = leaf_with_default(ty, "12ab");
        assert!(matches!(
            resolve(&tree, "/m/top/value"),
            Err(TypeError::InvalidDefault { .. })
        ));
    }

    #[test]
    fn test_union_default_checks_each_range_of_a_shared_native_type() {
        let ty = YangType::union(vec![
            YangType::new(YangKind::Uint8).with_range(Some("1"), Some("10")),
            YangType::new(YangKind::Uint8).with_range(Some("100"), Some("200")),
            YangType::new(YangKind::String),
        ]);
        let tree = leaf_with_default(ty.clone(), "150");
        assert_eq!(
            resolve(&tree, "/m/top/value"),
            Ok(Some("Top_Value_Union::U8(150)".to_string()))
        );
        let tree = leaf_with_default(ty, "50");
        assert_eq!(
            resolve(&tree, "/m/top/value"),
            Ok(Some("Top_Value_Union::String(String::from(\"50\"))".to_string()))
        );
    }

    #[test]
    fn test_empty_and_binary_reject_defaults() {
        let tree = leaf_with_default(YangType::new(YangKind::Empty), "x");
        assert!(resolve(&tree, "/m/top/value").is_err());
        let tree = leaf_with_default(YangType::new(YangKind::Binary), "AAAA");
        assert!(resolve(&tree, "/m/top/value").is_err());
    }
}
