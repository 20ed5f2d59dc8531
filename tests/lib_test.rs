//! Library integration tests.

use depaudit::config::LinuxScripts;
use depaudit::deps::{Reconciliation, ShellPackageSource};
use depaudit::DepauditError;

#[test]
fn error_types_are_public() {
    let err = DepauditError::Structural {
        message: "deps-client.yaml missing build section".into(),
    };
    assert!(err.to_string().contains("missing build section"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> depaudit::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use depaudit::cli::{Cli, Commands};

    let cli = Cli::parse_from(["depaudit", "schema", "meta"]);
    assert!(matches!(cli.command, Some(Commands::Schema(_))));
}

#[test]
fn reconciliation_is_usable_from_outside() {
    let declared = vec!["BAR".to_string()];
    let candidates = vec![vec!["FOO".to_string()]];
    let rec = Reconciliation::compute("build x y z client (linux)", &declared, &candidates);
    assert!(rec.is_failure());
}

#[test]
fn shell_source_is_constructible() {
    let source = ShellPackageSource::new(
        std::path::Path::new("/repo"),
        LinuxScripts::default(),
        "ci/deps/packages-bsd.sh",
    );
    let _: &dyn depaudit::deps::PackageSource = &source;
}
