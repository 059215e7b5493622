//! Fallback combinators observed through call-counting doubles.

use std::borrow::Cow;
use std::io::Read;
use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use strata_config::decode::{Decoder, FallbackDecoder, IniDecoder, JsonDecoder};
use strata_config::source::{ByteStream, FallbackSource, KvSource, MemoryKv, Source};
use strata_config::{ConfigError, ConfigResult, MergeLeft, Options, new};
use test_helpers::counter::CallCounter;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, MergeLeft)]
struct Settings {
    pub foo: String,
}

/// Source double recording every call.
struct Scripted {
    calls: CallCounter,
    body: Option<&'static str>,
}

impl Scripted {
    fn failing(calls: &CallCounter) -> Self {
        Self {
            calls: calls.clone(),
            body: None,
        }
    }

    fn serving(calls: &CallCounter, body: &'static str) -> Self {
        Self {
            calls: calls.clone(),
            body: Some(body),
        }
    }
}

impl Source for Scripted {
    fn provide(&mut self) -> ConfigResult<ByteStream> {
        self.calls.hit();
        self.body.map(ByteStream::from_bytes).ok_or_else(|| {
            Arc::new(ConfigError::source_failure(self.describe(), "scripted failure"))
        })
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("scripted")
    }
}

#[rstest]
fn source_fallback_short_circuits() -> Result<()> {
    let first = CallCounter::default();
    let second = CallCounter::default();
    let third = CallCounter::default();
    let source = FallbackSource::new()
        .or(Scripted::failing(&first))
        .or(Scripted::serving(&second, r#"{"foo":"v"}"#))
        .or(Scripted::failing(&third));

    let settings: Settings = new(source, &Options::default()).map_err(|e| anyhow!("{e}"))?;

    ensure!(settings.foo == "v");
    ensure!(first.count() == 1 && second.count() == 1);
    ensure!(!third.was_called(), "third candidate must not run");
    Ok(())
}

#[rstest]
#[case::one(1)]
#[case::three(3)]
#[case::five(5)]
fn source_fallback_reports_one_cause_per_candidate(#[case] n: usize) -> Result<()> {
    let calls = CallCounter::default();
    let source = (0..n).fold(FallbackSource::new(), |acc, _| {
        acc.or(Scripted::failing(&calls))
    });
    let Some(err) = new::<Settings, _>(source, &Options::default()).err() else {
        return Err(anyhow!("all candidates fail"));
    };
    let ConfigError::Aggregate(agg) = &*err else {
        return Err(anyhow!("expected aggregate, got {err}"));
    };
    ensure!(agg.len() == n);
    ensure!(calls.count() == n);
    Ok(())
}

#[rstest]
fn absent_source_slots_are_positional_failures() -> Result<()> {
    let source = FallbackSource::from_candidates(vec![
        None,
        Some(Box::new(KvSource::new(MemoryKv::new(), "app/config")) as Box<dyn Source>),
    ]);
    let Some(err) = new::<Settings, _>(source, &Options::default()).err() else {
        return Err(anyhow!("no candidate can succeed"));
    };
    let rendered = err.to_string();
    ensure!(rendered.contains("absent candidate at position 0"), "{rendered}");
    ensure!(rendered.contains("candidate 1"), "{rendered}");
    ensure!(rendered.contains("doesn't exist"), "{rendered}");
    Ok(())
}

#[rstest]
fn kv_fallback_reaches_the_present_key() -> Result<()> {
    let store = MemoryKv::new().with("app/config", r#"{"foo":"from-kv"}"#);
    let source = FallbackSource::new()
        .or(KvSource::new(store.clone(), "app/missing"))
        .or(KvSource::new(store, "app/config"));
    let settings: Settings = new(source, &Options::default()).map_err(|e| anyhow!("{e}"))?;
    ensure!(settings.foo == "from-kv");
    Ok(())
}

#[rstest]
fn decoder_fallback_short_circuits() -> Result<()> {
    let late = CallCounter::default();
    let tally = late.clone();
    let counting = move |_: &mut dyn Read, _: &mut Settings| -> ConfigResult<()> {
        tally.hit();
        Ok(())
    };
    let decoder = FallbackDecoder::new()
        .or(JsonDecoder)
        .or(IniDecoder)
        .or(counting);
    let mut settings = Settings::default();
    decoder
        .decode(&mut &b"foo = ini-value\n"[..], &mut settings)
        .map_err(|e| anyhow!("{e}"))?;
    ensure!(settings.foo == "ini-value");
    ensure!(!late.was_called());
    Ok(())
}

#[rstest]
fn decoder_fallback_reports_one_cause_per_candidate() {
    let decoder: FallbackDecoder<Settings> = FallbackDecoder::from_candidates(vec![
        Some(Box::new(JsonDecoder) as Box<dyn Decoder<Settings>>),
        None,
        Some(Box::new(JsonDecoder) as Box<dyn Decoder<Settings>>),
    ]);
    let err = decoder
        .decode(&mut &b"{not json"[..], &mut Settings::default())
        .err();
    assert!(matches!(err.as_deref(), Some(ConfigError::Aggregate(agg)) if agg.len() == 3));
}
