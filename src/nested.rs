use crate::{Arrive, Blame};
use serde_json::Value;

/// The `access_nested_map` function looks up a value inside a mapping of mappings.
///
/// Each key in `path` descends one level into `map`.  The value found after the last key is
/// returned by reference, so the caller decides whether a clone is worth it.  Objects are the only
/// kind of [`Value`] with keys: asking a number, string, array or null for a key is the same as
/// asking an object that lacks it.
///
/// Will [`Blame::KeyNotFound`] on the first key missing from the current level, naming that key.
/// We stop there, so later keys in the path are never examined.
/// Will [`Blame::EmptyPath`] if `path` holds no keys, rather than handing back the root.
///
/// ```
/// use serde_json::json;
/// let map = json!({"a": {"b": 2}});
/// assert_eq!(dawdle::access_nested_map(&map, ["a", "b"])?, &json!(2));
/// # Ok::<(), dawdle::Blame>(())
/// ```
pub fn access_nested_map<I, K>(map: &Value, path: I) -> Arrive<&Value>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let mut keys = path.into_iter().peekable();
    if keys.peek().is_none() {
        tracing::trace!("Refusing to walk an empty path.");
        return Err(Blame::EmptyPath);
    }
    let mut current = map;
    for key in keys {
        let key = key.as_ref();
        current = match current.as_object().and_then(|level| level.get(key)) {
            Some(value) => value,
            None => {
                tracing::trace!("Missing key: {key}");
                return Err(Blame::key_not_found(key));
            }
        };
    }
    Ok(current)
}
