// SPDX-FileCopyrightText: 2026 Contributors to the MTag project.
// SPDX-License-Identifier: Apache-2.0

//! Probe tests against a scripted [`QueryRunner`].
//!
//! No pkg-config installation is needed: the fake runner records each
//! invocation and replays a canned result.

use std::{
    cell::RefCell,
    ffi::OsString,
    path::{Path, PathBuf},
    time::Duration,
};

use mtag_build::{
    BuildConfig, Error, FlagCategory, Probe, QueryOutput, QueryRunner, Result, UnrecognizedTokens,
};

/// One recorded call to [`FakeRunner::run`].
#[derive(Debug, Clone, PartialEq)]
struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Duration,
}

/// Replays a fixed outcome and remembers how it was called.
struct FakeRunner {
    outcome: fn() -> Result<QueryOutput>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    fn new(outcome: fn() -> Result<QueryOutput>) -> Self {
        Self {
            outcome,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl QueryRunner for FakeRunner {
    fn run(&self, program: &Path, args: &[OsString], timeout: Duration) -> Result<QueryOutput> {
        self.calls.borrow_mut().push(Invocation {
            program: program.to_path_buf(),
            args: args.to_vec(),
            timeout,
        });
        (self.outcome)()
    }
}

fn probe() -> Probe {
    let mut probe = Probe::new();
    probe.tool("pkg-config");
    probe
}

fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(|arg| OsString::from(*arg)).collect()
}

#[test]
fn runs_one_query_for_all_libraries() {
    let runner = FakeRunner::new(|| {
        Ok(QueryOutput::success(
            "-I/usr/include/mtag -I/usr/include/glib-2.0 -L/usr/lib -lmtag -lglib-2.0\n",
        ))
    });
    let config = probe()
        .timeout(Duration::from_secs(3))
        .probe_with(&runner, &["libmtag", "glib-2.0"])
        .unwrap();

    assert_eq!(
        runner.calls(),
        [Invocation {
            program: PathBuf::from("pkg-config"),
            args: os_args(&["--libs", "--cflags", "libmtag", "glib-2.0"]),
            timeout: Duration::from_secs(3),
        }]
    );
    assert_eq!(config.include_dirs(), ["/usr/include/mtag", "/usr/include/glib-2.0"]);
    assert_eq!(config.library_dirs(), ["/usr/lib"]);
    assert_eq!(config.libraries(), ["mtag", "glib-2.0"]);
}

#[test]
fn static_probe_adds_static_flag() {
    let runner = FakeRunner::new(|| Ok(QueryOutput::success("-lmtag -lm")));
    let config = probe()
        .statik(true)
        .probe_with(&runner, &["libmtag"])
        .unwrap();

    assert_eq!(
        runner.calls()[0].args,
        os_args(&["--libs", "--cflags", "--static", "libmtag"])
    );
    assert_eq!(config.libraries(), ["mtag", "m"]);
}

#[test]
fn tooling_failure_is_reported_before_parsing() {
    let runner = FakeRunner::new(|| {
        Err(Error::ToolingUnavailable {
            tool: "pkg-config".to_string(),
            reason: "No such file or directory (os error 2)".to_string(),
        })
    });
    let mut probe = probe();
    probe.unrecognized_tokens(UnrecognizedTokens::Reject);

    let error = probe.probe_with(&runner, &["libmtag"]).unwrap_err();
    assert!(matches!(error, Error::ToolingUnavailable { .. }), "{error:?}");
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn signal_termination_is_tooling_failure() {
    let runner = FakeRunner::new(|| {
        Ok(QueryOutput {
            code: None,
            success: false,
            stdout: "-lmtag".to_string(),
            stderr: String::new(),
        })
    });
    let error = probe().probe_with(&runner, &["libmtag"]).unwrap_err();
    assert!(matches!(error, Error::ToolingUnavailable { .. }), "{error:?}");
}

#[test]
fn refused_query_is_unknown_library_not_flags() {
    let runner = FakeRunner::new(|| {
        Ok(QueryOutput::failure(
            1,
            "Package libmtag was not found in the pkg-config search path.\n\
             Perhaps you should add the directory containing `libmtag.pc'\n\
             to the PKG_CONFIG_PATH environment variable\n",
        ))
    });
    let error = probe().probe_with(&runner, &["libmtag"]).unwrap_err();
    match error {
        Error::UnknownLibrary { libraries, message } => {
            assert_eq!(libraries, "libmtag");
            assert!(message.starts_with("Package libmtag was not found"));
            assert!(message.ends_with("PKG_CONFIG_PATH environment variable"));
        }
        other => panic!("expected UnknownLibrary, got {other:?}"),
    }
}

#[test]
fn empty_answer_is_an_empty_configuration() {
    let runner = FakeRunner::new(|| Ok(QueryOutput::success("\n")));
    let config = probe().probe_with(&runner, &["libmtag"]).unwrap();
    assert!(config.is_empty());
}

#[test]
fn stderr_noise_on_success_is_not_parsed() {
    let runner = FakeRunner::new(|| {
        Ok(QueryOutput {
            code: Some(0),
            success: true,
            stdout: "-lmtag".to_string(),
            stderr: "-lbogus -I/bogus".to_string(),
        })
    });
    let config = probe().probe_with(&runner, &["libmtag"]).unwrap();
    assert_eq!(config.libraries(), ["mtag"]);
    assert!(config.include_dirs().is_empty());
}

#[test]
fn strict_probe_rejects_unrecognized_flags() {
    let runner = FakeRunner::new(|| Ok(QueryOutput::success("-pthread -lmtag")));
    let mut probe = probe();
    probe.unrecognized_tokens(UnrecognizedTokens::Reject);

    let error = probe.probe_with(&runner, &["libmtag"]).unwrap_err();
    assert!(matches!(error, Error::MalformedToken { ref token } if token == "-pthread"));
}

#[test]
fn no_libraries_means_no_query() {
    let runner = FakeRunner::new(|| Ok(QueryOutput::success("-lmtag")));
    let error = probe().probe_with(&runner, &[]).unwrap_err();
    assert!(matches!(error, Error::NoLibraries));
    assert!(runner.calls().is_empty());
}

#[test]
fn discovered_flags_follow_the_base_configuration() {
    let runner = FakeRunner::new(|| Ok(QueryOutput::success("-I/usr/include/mtag -lmtag")));
    let mut base = BuildConfig::new();
    base.push(FlagCategory::IncludeDirs, "src");
    base.push(FlagCategory::Libraries, "m");

    let config = probe()
        .base(base)
        .probe_with(&runner, &["libmtag"])
        .unwrap();
    assert_eq!(config.include_dirs(), ["src", "/usr/include/mtag"]);
    assert_eq!(config.libraries(), ["m", "mtag"]);
    assert!(config.library_dirs().is_empty());
}
