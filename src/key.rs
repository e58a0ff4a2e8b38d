/// Builds the remote record key for a package.
///
/// The store addresses one record per `(name, version)` pair, encoded as
/// `name<version>`. Upload, remove and list all go through this encoding.
pub fn resolve_key(name: &str, version: &str) -> String {
    format!("{}<{}>", name, version)
}

/// Splits a record key back into `(name, version)`.
///
/// Splits on the *first* `<` and strips a single trailing `>`. This is lossy
/// for names that themselves contain `<`: `resolve_key("foo<bar", "1")`
/// produces `foo<bar<1>`, which parses back as `("foo", "bar<1")`. The server
/// side uses the same encoding, so the ambiguity is preserved here instead of
/// silently re-encoding.
///
/// Returns `None` if the key has no `<` or does not end with `>`.
pub fn parse_key(key: &str) -> Option<(String, String)> {
    let (name, rest) = key.split_once('<')?;
    let version = rest.strip_suffix('>')?;
    Some((name.to_string(), version.to_string()))
}
