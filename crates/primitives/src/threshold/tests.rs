use rstest::rstest;

use super::*;

#[test]
fn test_threshold_admits() {
	assert!(Threshold::UNLIMITED.admits(usize::MAX));
	assert!(Threshold::limit(3).admits(3));
	assert!(!Threshold::limit(3).admits(4));
	assert!(Threshold::limit(0).admits(0));
}

#[test]
fn test_threshold_rejects_negative() {
	assert_eq!(
		Threshold::from_signed(-1),
		Err(BudgetError::NegativeThreshold(-1))
	);
	assert_eq!(Threshold::from_signed(7), Ok(Threshold::limit(7)));
}

#[rstest]
#[case::self_wins(InheritableThreshold::Limit(2), &[InheritableThreshold::Limit(5)], Threshold::limit(9), Threshold::limit(2))]
#[case::first_fallback(InheritableThreshold::Inherit, &[InheritableThreshold::Limit(5)], Threshold::limit(9), Threshold::limit(5))]
#[case::skip_inheriting(InheritableThreshold::Inherit, &[InheritableThreshold::Inherit, InheritableThreshold::Unlimited], Threshold::limit(9), Threshold::UNLIMITED)]
#[case::root(InheritableThreshold::Inherit, &[InheritableThreshold::Inherit], Threshold::limit(9), Threshold::limit(9))]
fn test_inheritable_resolve(
	#[case] threshold: InheritableThreshold,
	#[case] fallbacks: &[InheritableThreshold],
	#[case] root: Threshold,
	#[case] expected: Threshold,
) {
	assert_eq!(threshold.resolve(fallbacks, root), expected);
}

#[derive(Debug, Deserialize)]
struct Doc {
	cap: Threshold,
	dict: InheritableThreshold,
	#[serde(default)]
	members: InheritableThreshold,
}

#[test]
fn test_deserialize_from_toml() {
	let doc: Doc = toml::from_str("cap = 4\ndict = \"unlimited\"\n").unwrap();
	assert_eq!(doc.cap, Threshold::limit(4));
	assert_eq!(doc.dict, InheritableThreshold::Unlimited);
	assert_eq!(doc.members, InheritableThreshold::Inherit);
}

#[test]
fn test_deserialize_rejects_negative_and_unknown() {
	assert!(toml::from_str::<Doc>("cap = -2\ndict = 1\n").is_err());
	assert!(toml::from_str::<Doc>("cap = 2\ndict = \"lots\"\n").is_err());
}

#[test]
fn test_threshold_unlimited_keyword() {
	let doc: Doc = toml::from_str("cap = \"unlimited\"\ndict = \"inherit\"\n").unwrap();
	assert_eq!(doc.cap, Threshold::UNLIMITED);
	assert_eq!(doc.dict, InheritableThreshold::Inherit);
	assert!(toml::from_str::<Doc>("cap = \"inherit\"\ndict = 1\n").is_err());
}
