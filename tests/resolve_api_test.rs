//! Integration tests for coordinate resolution through the public API.

use goalseq::registry::{DeclaredPlugin, ProjectPlugins};
use goalseq::steps::{resolve, StepSpec};
use goalseq::GoalseqError;

fn plugin(group: &str, artifact: &str, version: &str) -> DeclaredPlugin {
    DeclaredPlugin {
        group: group.into(),
        artifact: artifact.into(),
        version: Some(version.into()),
        executions: vec![],
    }
}

#[test]
fn three_part_references_adopt_declared_versions() {
    let plugins = ProjectPlugins::new(vec![
        plugin("org.alpha", "maven-one-plugin", "1.0"),
        plugin("org.beta", "two-maven-plugin", "2.0"),
    ]);

    for (coordinates, group, artifact, version) in [
        ("org.alpha:maven-one-plugin:go", "org.alpha", "maven-one-plugin", "1.0"),
        ("org.beta:two-maven-plugin:go", "org.beta", "two-maven-plugin", "2.0"),
    ] {
        let resolved = resolve(&StepSpec::for_coordinates(coordinates), &plugins).unwrap();
        assert_eq!(resolved.target.group, group);
        assert_eq!(resolved.target.artifact, artifact);
        assert_eq!(resolved.target.goal, "go");
        assert_eq!(resolved.target.version, version);
    }
}

#[test]
fn short_identifier_resolves_against_conventional_names() {
    let plugins = ProjectPlugins::new(vec![plugin("org.example", "maven-foo-plugin", "1.2.3")]);

    let resolved = resolve(&StepSpec::for_coordinates("foo:bar"), &plugins).unwrap();
    assert_eq!(resolved.target.group, "org.example");
    assert_eq!(resolved.target.artifact, "maven-foo-plugin");
    assert_eq!(resolved.target.goal, "bar");
    assert_eq!(resolved.target.version, "1.2.3");
}

#[test]
fn both_conventional_forms_declared_is_ambiguous() {
    let plugins = ProjectPlugins::new(vec![
        plugin("org.example", "maven-foo-plugin", "1.0"),
        plugin("org.example", "foo-maven-plugin", "2.0"),
    ]);

    let err = resolve(&StepSpec::for_coordinates("foo:bar"), &plugins).unwrap_err();
    assert!(matches!(err, GoalseqError::AmbiguousPlugin { identifier } if identifier == "foo"));
}

#[test]
fn unknown_identifier_reports_plugin_not_found() {
    let plugins = ProjectPlugins::new(vec![plugin("org.example", "maven-foo-plugin", "1.0")]);

    let err = resolve(&StepSpec::for_coordinates("unknown:bar"), &plugins).unwrap_err();
    assert!(
        matches!(err, GoalseqError::PluginNotFound { identifier } if identifier == "unknown")
    );
}

#[test]
fn resolved_targets_are_fully_qualified() {
    let plugins = ProjectPlugins::new(vec![plugin("org.example", "maven-foo-plugin", "1.0")]);

    let resolved = resolve(&StepSpec::for_coordinates("foo:bar@night"), &plugins).unwrap();
    assert!(!resolved.target.group.is_empty());
    assert!(!resolved.target.artifact.is_empty());
    assert!(!resolved.target.goal.is_empty());
    assert!(!resolved.target.version.is_empty());
    assert_eq!(resolved.target.key(), "org.example:maven-foo-plugin");
}
