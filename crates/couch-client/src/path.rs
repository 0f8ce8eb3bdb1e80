//! URL/path joining.

/// Join two URL or path segments with exactly one `/` at the seam.
///
/// Trailing slashes on `base` and leading slashes on `path` are dropped before
/// joining. If either side is empty after trimming, the other side is returned
/// as is.
///
/// ```rust
/// use couchrest_client::join;
///
/// assert_eq!(join("http://localhost:5984/", "/_all_dbs"), "http://localhost:5984/_all_dbs");
/// assert_eq!(join("mydb", "doc1"), "mydb/doc1");
/// ```
pub fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return path.to_string();
    }

    let mut joined = String::with_capacity(base.len() + path.len() + 1);
    joined.push_str(base);
    joined.push('/');
    joined.push_str(path);
    joined
}
