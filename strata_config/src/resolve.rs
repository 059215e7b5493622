//! Resolving one value from one source.

use std::mem;
use std::sync::Arc;

use crate::decode::Decoder;
use crate::options::Options;
use crate::source::Source;
use crate::{ConfigError, ConfigResult, MergeLeft};

/// Resolve a fresh `T` from `source`.
///
/// The value starts as `T::default()`, which should be the type's zero
/// value when the result is later merged. The source's stream is decoded
/// into it, and the stream is released afterwards whether decoding succeeded or
/// not. A decode failure and a release failure are both reported, joined in
/// that order.
///
/// # Examples
///
/// ```
/// use strata_config::{Options, new, source::ReaderSource};
///
/// #[derive(Default, serde::Serialize, serde::Deserialize)]
/// struct Cfg {
///     port: u16,
/// }
///
/// let cfg: Cfg = new(ReaderSource::from_bytes(r#"{"port": 80}"#), &Options::default())
///     .expect("valid document");
/// assert_eq!(cfg.port, 80);
/// ```
///
/// # Errors
///
/// Returns the source, decode or release failure, or several of them joined.
pub fn new<T, S>(mut source: S, options: &Options<T>) -> ConfigResult<T>
where
    T: Default,
    S: Source,
{
    let mut value = T::default();
    decode_into(&mut source, options.decoder_ref(), &mut value)?;
    Ok(value)
}

/// Resolve from `source` and merge the result under `cfg`.
///
/// Fields already set on `cfg` take precedence; its zero fields are filled
/// from the freshly resolved value. On failure `cfg` is left untouched.
///
/// The resolved value starts from `T::default()`, which must be zero. A
/// non-zero default field would count as set by the source.
///
/// # Errors
///
/// Returns the failure reported by [`new`].
///
/// # Panics
///
/// In debug builds, panics when `T::default()` is not zero.
pub fn fill<T, S>(cfg: &mut T, source: S, options: &Options<T>) -> ConfigResult<()>
where
    T: Default + MergeLeft,
    S: Source,
{
    debug_assert!(T::default().is_zero(), "Default must be the zero value for layered merging");
    let fresh = new(source, options)?;
    *cfg = mem::take(cfg).merge_left(fresh);
    Ok(())
}

/// Provide, decode into `target`, then release.
pub(crate) fn decode_into<T>(
    source: &mut dyn Source,
    decoder: &dyn Decoder<T>,
    target: &mut T,
) -> ConfigResult<()> {
    let mut stream = source.provide()?;
    let decoded = decoder.decode(&mut stream, target);
    let released = stream.release().map_err(|e| {
        tracing::warn!(source = %source.describe(), error = %e, "failed to release stream");
        Arc::new(ConfigError::Release(e))
    });
    match (decoded, released) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
        (Err(decode), Err(release)) => Err(ConfigError::join(Some(decode), release)),
    }
}
