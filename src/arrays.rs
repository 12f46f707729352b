//! Helpers for ordered key/value collections and plain slices.

/// Trim every value and then URL-decode it (`+` and `%XX`).
///
/// Meant for raw query/form pairs; keys and their order are left untouched.
pub fn clean_array<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Vec<(K, String)>
where
  V: AsRef<str>,
{
  pairs
    .into_iter()
    .map(|(k, v)| (k, url_decode(v.as_ref().trim())))
    .collect()
}

/// Form-style percent decoding. Invalid UTF-8 is replaced rather than rejected.
pub fn url_decode(raw: &str) -> String {
  let plus_as_space = raw.replace('+', " ");
  let bytes = urlencoding::decode_binary(plus_as_space.as_bytes());
  String::from_utf8_lossy(&bytes).into_owned()
}

/// Copy of `items` with every element equal to `value` removed.
pub fn del_by_value<T: PartialEq + Clone>(items: &[T], value: &T) -> Vec<T> {
  items.iter().filter(|item| *item != value).cloned().collect()
}
