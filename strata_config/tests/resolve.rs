//! Stream release guarantees of the resolution primitive.
//!
//! A releasable stream must be released exactly once whether decoding
//! succeeds or fails, and a release failure must be reported alongside any
//! decode failure rather than replacing it.

use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use strata_config::decode::{Decoder, FallbackDecoder};
use strata_config::source::{ReaderSource, Releasable};
use strata_config::{ConfigError, ConfigResult, MergeLeft, Options, fill, new};
use test_helpers::counter::CallCounter;
use test_helpers::io::TrackedReader;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, MergeLeft)]
struct Settings {
    pub name: String,
    pub port: u16,
}

struct Tracked(TrackedReader);

impl Read for Tracked {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Releasable for Tracked {
    fn release(self: Box<Self>) -> io::Result<()> {
        self.0.finish()
    }
}

fn source(body: &str, releases: &CallCounter, fail_release: bool) -> ReaderSource {
    let plain = TrackedReader::new(body, releases.clone());
    let reader = if fail_release {
        plain.failing_release()
    } else {
        plain
    };
    ReaderSource::releasing(Tracked(reader))
}

#[rstest]
fn releases_after_successful_decode() -> Result<()> {
    let releases = CallCounter::default();
    let settings: Settings = new(
        source(r#"{"name":"svc"}"#, &releases, false),
        &Options::default(),
    )
    .map_err(|e| anyhow!("{e}"))?;
    ensure!(settings.name == "svc");
    ensure!(releases.count() == 1);
    Ok(())
}

#[rstest]
fn releases_after_failed_decode() {
    let releases = CallCounter::default();
    let err = new::<Settings, _>(source("{oops", &releases, false), &Options::default()).err();
    assert!(matches!(err.as_deref(), Some(ConfigError::Decode { .. })));
    assert_eq!(releases.count(), 1);
}

#[rstest]
fn release_failure_alone_fails_resolution() {
    let releases = CallCounter::default();
    let err = new::<Settings, _>(source("{}", &releases, true), &Options::default()).err();
    assert!(matches!(err.as_deref(), Some(ConfigError::Release(_))));
}

#[rstest]
fn decode_and_release_failures_are_joined() -> Result<()> {
    let releases = CallCounter::default();
    let Some(err) = new::<Settings, _>(source("{oops", &releases, true), &Options::default()).err()
    else {
        return Err(anyhow!("both steps fail"));
    };
    let leaves = err.leaves();
    ensure!(leaves.len() == 2, "got {err}");
    ensure!(matches!(leaves.first(), Some(ConfigError::Decode { .. })));
    ensure!(matches!(leaves.get(1), Some(ConfigError::Release(_))));
    Ok(())
}

#[rstest]
fn fill_merges_under_existing_values() -> Result<()> {
    let releases = CallCounter::default();
    let mut settings = Settings {
        name: "preset".into(),
        port: 0,
    };
    fill(
        &mut settings,
        source(r#"{"name":"decoded","port":8080}"#, &releases, false),
        &Options::default(),
    )
    .map_err(|e| anyhow!("{e}"))?;
    ensure!(
        settings
            == Settings {
                name: "preset".into(),
                port: 8080,
            }
    );
    ensure!(releases.count() == 1);
    Ok(())
}

#[rstest]
fn failed_decoders_are_not_rolled_back() {
    let half_written = |_: &mut dyn Read, target: &mut Settings| -> ConfigResult<()> {
        target.name = "half".into();
        Err(Arc::new(ConfigError::decode("custom", "stopped early")))
    };
    let decoder = FallbackDecoder::new().or(half_written);
    let mut settings = Settings::default();
    assert!(decoder.decode(&mut &b""[..], &mut settings).is_err());
    assert_eq!(settings.name, "half");
}
